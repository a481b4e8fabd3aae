//! # Error Types
//!
//! Two failure families come out of envelope handling and must stay
//! distinguishable:
//!
//! - [`DelegationError`]: the body *was* a valid envelope, but its `code`
//!   reports a business failure.
//! - [`EnvelopeError::Decode`]: the body was not a valid envelope, or its
//!   payload did not match the expected shape.

use thiserror::Error;

/// Business-level failure carried by an envelope whose code is not a
/// success code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("code={code}, msg={msg}")]
pub struct DelegationError {
    /// Status code reported by the envelope.
    pub code: i64,
    /// Human-readable message reported by the envelope.
    pub msg: String,
}

impl DelegationError {
    /// Create a delegation error from an envelope's code and message.
    pub fn new(code: i64, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
        }
    }
}

/// Errors produced while turning a raw body into a typed payload.
#[derive(Error, Debug)]
pub enum EnvelopeError {
    /// The body, or the payload inside it, is not the expected JSON shape.
    #[error("failed to decode envelope: {0}")]
    Decode(#[from] serde_json::Error),

    /// The envelope decoded fine but reports a business failure.
    #[error(transparent)]
    Delegation(#[from] DelegationError),

    /// The envelope reports success but carries no payload.
    #[error("envelope reported success without a payload")]
    MissingData,
}
