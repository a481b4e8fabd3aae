//! # Response Envelope Protocol
//!
//! Every JSON body exchanged by idgate, with the upstream user service and
//! with the gateway's own callers, has the shape:
//!
//! ```text
//! { "code": <int>, "msg": <string>, "data": <T | null> }
//! ```
//!
//! A code of `0` or `200` means success; any other value is a business
//! failure and the payload must be ignored.
//!
//! ## Decoding Rules
//!
//! - An empty body (or JSON `null`) decodes to the zero envelope
//!   `{code: 0, msg: "", data: None}`. The upstream is allowed to answer
//!   with an empty body, so this is not an error.
//! - A `null` or missing `code`/`msg` decodes to `0`/`""`.
//! - The payload is decoded into `T` only when the envelope is ok. A failure
//!   envelope with an irregular `data` value still classifies as a business
//!   failure instead of a decode error.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{DelegationError, EnvelopeError};

/// Success code used by the gateway and by current upstream services.
pub const SUCCESS_CODE: i64 = 200;

/// Success code still emitted by older upstream services.
pub const LEGACY_SUCCESS_CODE: i64 = 0;

/// Generic `{code, msg, data}` response wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Business status code. `0` and `200` mean success.
    #[serde(default)]
    pub code: i64,
    /// Human-readable message.
    #[serde(default)]
    pub msg: String,
    /// Payload, present only on success.
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> Default for Envelope<T> {
    fn default() -> Self {
        Self {
            code: 0,
            msg: String::new(),
            data: None,
        }
    }
}

/// Loosely-typed envelope used as the first decoding phase.
#[derive(Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

/// Whether `code` is one of the success codes.
pub fn is_success_code(code: i64) -> bool {
    code == SUCCESS_CODE || code == LEGACY_SUCCESS_CODE
}

impl<T> Envelope<T> {
    /// Build a success envelope carrying `data`.
    pub fn success(msg: impl Into<String>, data: T) -> Self {
        Self {
            code: SUCCESS_CODE,
            msg: msg.into(),
            data: Some(data),
        }
    }

    /// Build a failure envelope with no payload.
    pub fn failure(code: i64, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
            data: None,
        }
    }

    /// True iff the code is `0` or `200`.
    pub fn is_ok(&self) -> bool {
        is_success_code(self.code)
    }

    /// The business failure carried by this envelope, or `None` when ok.
    ///
    /// Works the same whether the payload is empty or populated.
    pub fn error(&self) -> Option<DelegationError> {
        if self.is_ok() {
            None
        } else {
            Some(DelegationError::new(self.code, self.msg.clone()))
        }
    }

    /// Consume the envelope and return its payload.
    ///
    /// # Errors
    ///
    /// - [`EnvelopeError::Delegation`] when the code reports a failure.
    /// - [`EnvelopeError::MissingData`] when the envelope is ok but empty.
    pub fn into_payload(self) -> Result<T, EnvelopeError> {
        if let Some(err) = self.error() {
            return Err(err.into());
        }
        self.data.ok_or(EnvelopeError::MissingData)
    }
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Decode an envelope from a raw response body.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::Decode`] when the body is not JSON, is not an
    /// envelope object, or the payload of a success envelope is not a `T`.
    pub fn decode(body: &[u8]) -> Result<Self, EnvelopeError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        let value: serde_json::Value = serde_json::from_slice(body)?;
        Self::decode_value(value)
    }

    /// Decode an envelope from an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Same as [`Envelope::decode`].
    pub fn decode_value(value: serde_json::Value) -> Result<Self, EnvelopeError> {
        if value.is_null() {
            return Ok(Self::default());
        }
        let raw: RawEnvelope = serde_json::from_value(value)?;
        let code = raw.code.unwrap_or_default();
        let msg = raw.msg.unwrap_or_default();

        let data = if is_success_code(code) {
            raw.data.map(serde_json::from_value).transpose()?
        } else {
            None
        };

        Ok(Self { code, msg, data })
    }
}
