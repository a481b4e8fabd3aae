//! # Gateway Response Formatter
//!
//! Turns a handler result into the envelope the gateway's callers see.
//! The HTTP status is always `200 OK`; success or failure is carried by the
//! envelope `code`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use idgate_core::{Envelope, SUCCESS_CODE};
use serde::Serialize;

use crate::error::{AppError, INTERNAL_ERROR_CODE};

/// Message attached to every successful reply.
pub const SUCCESS: &str = "success";

/// Map a handler result onto the outbound envelope.
///
/// | Result | Envelope |
/// |--------|----------|
/// | `Ok(v)` | `{200, "success", v}` |
/// | `Err(AppError::Gateway(e))` | `{e.code, e.msg, null}` |
/// | `Err(other)` | `{500, other.to_string(), null}` |
pub fn format<T>(result: Result<T, AppError>) -> Envelope<T> {
    match result {
        Ok(data) => Envelope {
            code: SUCCESS_CODE,
            msg: SUCCESS.to_string(),
            data: Some(data),
        },
        Err(AppError::Gateway(e)) => Envelope::failure(e.code, e.msg),
        Err(other) => {
            tracing::error!(error = %other, "internal error");
            Envelope::failure(INTERNAL_ERROR_CODE, other.to_string())
        }
    }
}

/// Serialize an envelope as an HTTP 200 JSON response.
pub fn envelope<T: Serialize>(envelope: Envelope<T>) -> Response {
    (StatusCode::OK, Json(envelope)).into_response()
}

/// Successful handler output, wrapped as `{200, "success", data}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse<T>(pub T);

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        envelope(format(Ok(self.0)))
    }
}

/// Result type returned by every envelope-speaking handler.
pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;
