//! User service client error types.

use idgate_core::{DelegationError, EnvelopeError};

/// Coarse classification of a failed upstream call, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Connection, DNS, timeout, or non-2xx HTTP status.
    Transport,
    /// The body was not the expected envelope shape.
    Decode,
    /// The upstream answered with a business failure envelope.
    Rejected,
    /// The request could not be built locally.
    Request,
}

impl FailureKind {
    /// Stable lowercase label, used as a log field and metric label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Decode => "decode",
            Self::Rejected => "rejected",
            Self::Request => "request",
        }
    }
}

/// Errors from user service calls.
#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    /// HTTP transport error (connection refused, DNS, timeout).
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// User service returned a non-2xx status.
    #[error("user service {endpoint} returned {status}: {body}")]
    ApiError {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response body was not a decodable envelope.
    #[error("failed to decode response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: EnvelopeError,
    },
    /// Envelope reported a business failure.
    #[error("user service {endpoint} rejected the call: {source}")]
    Rejected {
        endpoint: String,
        source: DelegationError,
    },
    /// The credential could not be placed in a request header.
    #[error("credential for {endpoint} is not a valid header value")]
    InvalidCredential { endpoint: String },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl UserServiceError {
    /// Split an envelope failure into a business rejection or a decode error.
    pub(crate) fn from_envelope(endpoint: String, err: EnvelopeError) -> Self {
        match err {
            EnvelopeError::Delegation(source) => Self::Rejected { endpoint, source },
            other => Self::Deserialization {
                endpoint,
                source: other,
            },
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Http { .. } | Self::ApiError { .. } => FailureKind::Transport,
            Self::Deserialization { .. } => FailureKind::Decode,
            Self::Rejected { .. } => FailureKind::Rejected,
            Self::InvalidCredential { .. } | Self::Config(_) => FailureKind::Request,
        }
    }

    /// The business failure reported by the upstream, if that is what happened.
    pub fn rejection(&self) -> Option<&DelegationError> {
        match self {
            Self::Rejected { source, .. } => Some(source),
            _ => None,
        }
    }
}
