//! # API Error Types
//!
//! Every failure leaves the gateway as a `{code, msg, data: null}` envelope
//! over HTTP 200; see [`crate::response::format`] for the mapping.
//!
//! - [`GatewayError`] carries its own business code and message (auth
//!   rejections, request parse failures, relayed upstream rejections).
//! - Anything else is an internal fault and is reported as code `500` with
//!   the underlying error's description as the message.

use axum::response::{IntoResponse, Response};
use idgate_user_client::UserServiceError;
use thiserror::Error;

use crate::response;

/// Business code for a request body or path that could not be parsed.
pub const PARSE_ERROR_CODE: i64 = 10005;

/// Business code for internal faults.
pub const INTERNAL_ERROR_CODE: i64 = 500;

/// Error with a caller-facing business code and message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{msg}")]
pub struct GatewayError {
    pub code: i64,
    pub msg: String,
}

impl GatewayError {
    pub fn new(code: i64, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
        }
    }

    /// The request could not be parsed.
    pub fn parse_error(detail: impl std::fmt::Display) -> Self {
        Self::new(PARSE_ERROR_CODE, format!("failed to parse request: {detail}"))
    }
}

/// Application-level error returned by handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Known failure with its own code and message.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Unexpected fault. Reported as code 500 with this error's description.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Wrap any error as an internal fault.
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Upstream business rejections are relayed with the upstream's code and
/// message; transport and decode failures are internal faults.
impl From<UserServiceError> for AppError {
    fn from(err: UserServiceError) -> Self {
        match err.rejection() {
            Some(rejection) => Self::Gateway(GatewayError::new(rejection.code, rejection.msg.clone())),
            None => Self::Internal(err.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        response::envelope(response::format::<()>(Err(self)))
    }
}
