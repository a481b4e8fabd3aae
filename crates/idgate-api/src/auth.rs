//! # Authentication Middleware
//!
//! The gateway does not validate tokens. It forwards the caller's
//! `Authorization` header to the user service and trusts the answer.
//!
//! ## Request Lifecycle
//!
//! ```text
//! Unverified ──(no header)──────────────> Rejected: "missing credentials"
//!            ──(not "Bearer ...")───────> Rejected: "invalid credential format"
//!            ──(upstream call fails)────> Rejected: "authentication failed"
//!            ──(upstream returns user)──> Verified: AuthorizationContext attached
//! ```
//!
//! Every rejection is an envelope with the configured unauthorized code.
//! Upstream detail (timeouts, business codes, decode errors) is logged and
//! counted but never returned to the caller. The first two rejections make
//! no upstream call; a well-formed header makes exactly one.
//!
//! ## AuthorizationContext
//!
//! A verified request carries an [`AuthorizationContext`] in its
//! extensions. Handlers take it as an extractor, or as
//! `Option<AuthorizationContext>` when authentication is optional.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::{FromRequestParts, OptionalFromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::{header, Extensions, HeaderMap};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use idgate_core::Identity;
use idgate_user_client::{FailureKind, UserClient, UserServiceError};
use thiserror::Error;

use crate::error::{AppError, GatewayError};
use crate::state::AppState;

/// Scheme prefix every accepted `Authorization` header starts with.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Counter of authentication outcomes, labelled by `outcome`.
pub const AUTH_OUTCOMES_METRIC: &str = "idgate_auth_outcomes_total";

// ── Errors ──────────────────────────────────────────────────────────────────

/// Why a request was not authenticated.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing credentials")]
    MissingCredentials,

    #[error("invalid credential format")]
    MalformedCredentials,

    /// The upstream was unreachable, timed out, or rejected the credential.
    #[error("authentication failed")]
    DelegationFailure(#[source] UserServiceError),

    /// The upstream answered with a body that is not a user envelope.
    #[error("authentication failed")]
    DecodeFailure(#[source] UserServiceError),
}

impl AuthError {
    fn from_upstream(err: UserServiceError) -> Self {
        match err.kind() {
            FailureKind::Decode => Self::DecodeFailure(err),
            _ => Self::DelegationFailure(err),
        }
    }

    /// Metric label for this rejection.
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::MissingCredentials => "missing",
            Self::MalformedCredentials => "malformed",
            Self::DelegationFailure(e) | Self::DecodeFailure(e) => e.kind().as_str(),
        }
    }

    /// Caller-facing error with the given unauthorized code.
    pub fn into_gateway(self, unauthorized_code: i64) -> GatewayError {
        GatewayError::new(unauthorized_code, self.to_string())
    }
}

// ── AuthorizationContext ────────────────────────────────────────────────────

/// Verified identity of the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationContext {
    identity: Arc<Identity>,
}

impl AuthorizationContext {
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Attach `identity` to a request's extensions.
    ///
    /// Write-once: returns `false` and leaves the existing context in place
    /// if the request already carries one.
    pub fn attach(extensions: &mut Extensions, identity: Identity) -> bool {
        if extensions.get::<Self>().is_some() {
            return false;
        }
        extensions.insert(Self {
            identity: Arc::new(identity),
        });
        true
    }
}

/// Extracts the context the auth middleware attached.
///
/// Rejects with an internal error when absent, which only happens if a
/// handler is mounted outside the middleware.
impl<S: Send + Sync> FromRequestParts<S> for AuthorizationContext {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthorizationContext>()
            .cloned()
            .ok_or_else(|| AppError::internal(anyhow::anyhow!("user not found")))
    }
}

impl<S: Send + Sync> OptionalFromRequestParts<S> for AuthorizationContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<AuthorizationContext>().cloned())
    }
}

// ── Credential handling ─────────────────────────────────────────────────────

/// Return the full `Authorization` header value if it is a bearer credential.
///
/// The value is returned with its `Bearer ` prefix; that is what the user
/// service expects to receive.
pub fn bearer_credential(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = match headers.get(header::AUTHORIZATION) {
        Some(value) if !value.is_empty() => value,
        _ => return Err(AuthError::MissingCredentials),
    };
    if !value.as_bytes().starts_with(BEARER_PREFIX.as_bytes()) {
        return Err(AuthError::MalformedCredentials);
    }
    std::str::from_utf8(value.as_bytes()).map_err(|_| AuthError::MalformedCredentials)
}

/// Resolve the caller's identity by delegating to the user service.
pub async fn authenticate(client: &UserClient, headers: &HeaderMap) -> Result<Identity, AuthError> {
    let credential = bearer_credential(headers)?;
    client
        .fetch_identity(credential)
        .await
        .map_err(AuthError::from_upstream)
}

fn record_outcome(outcome: &'static str) {
    metrics::counter!(AUTH_OUTCOMES_METRIC, "outcome" => outcome).increment(1);
}

// ── Middleware ──────────────────────────────────────────────────────────────

/// Authenticate the request, then run the rest of the chain.
///
/// Mount with `axum::middleware::from_fn_with_state`.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(&state.user_client, request.headers()).await {
        Ok(identity) => {
            record_outcome("authenticated");
            tracing::debug!(user_id = %identity.id(), "request authenticated");
            if !AuthorizationContext::attach(request.extensions_mut(), identity) {
                tracing::warn!("authorization context already present; keeping the first");
            }
            next.run(request).await
        }
        Err(err) => {
            record_outcome(err.outcome());
            match &err {
                AuthError::DelegationFailure(cause) | AuthError::DecodeFailure(cause) => {
                    tracing::warn!(
                        kind = cause.kind().as_str(),
                        error = %cause,
                        "authentication failed: upstream delegation"
                    );
                }
                other => {
                    tracing::warn!(reason = %other, "authentication failed");
                }
            }
            AppError::from(err.into_gateway(state.unauthorized_code())).into_response()
        }
    }
}
