//! # Request Extraction Helpers
//!
//! Handlers take `Result<Json<T>, JsonRejection>` / `Result<Path<T>,
//! PathRejection>` and pass them through these helpers so malformed input
//! becomes a parse-error envelope (code 10005) instead of axum's plain-text
//! rejection.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::Path;
use axum::Json;

use crate::error::{AppError, GatewayError};

/// Extract a JSON body, mapping deserialization errors to a parse error.
///
/// ```ignore
/// async fn handler(body: Result<Json<T>, JsonRejection>) -> ApiResult<...> {
///     let req = extract_json(body)?;
///     // use req...
/// }
/// ```
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| GatewayError::parse_error(err.body_text()).into())
}

/// Extract path parameters, mapping failures to a parse error.
pub fn extract_path<T>(result: Result<Path<T>, PathRejection>) -> Result<T, AppError> {
    result
        .map(|Path(v)| v)
        .map_err(|err| GatewayError::parse_error(err.body_text()).into())
}
