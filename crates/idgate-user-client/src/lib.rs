//! # idgate-user-client: Typed Rust client for the upstream user service
//!
//! The gateway never validates bearer tokens itself. It forwards them to the
//! user service, which answers with a `{code, msg, data}` envelope (see
//! [`idgate_core::Envelope`]). This crate owns that conversation.
//!
//! ## Layers
//!
//! 1. [`UserClient::send`]: method + path + optional JSON body + headers in,
//!    raw body out. Transport failures and non-2xx statuses stop here.
//! 2. [`UserClient::call`]: `send` with the caller's credential, followed by
//!    envelope decoding into a typed payload.
//! 3. Per-endpoint wrappers in [`users`]: `get_user_info`, `fetch_identity`,
//!    `create_user`, `update_user`. New upstream operations are new wrappers;
//!    the two layers above never change for them.
//!
//! ## Guarantees
//!
//! - One shared `reqwest::Client` (connection pool) per `UserClient`; clones
//!   share it and it is safe to use from many tasks at once.
//! - Every call is bounded by the configured timeout.
//! - No retries. A failed call fails immediately.
//! - Credentials are sent as sensitive header values and never logged.

pub mod config;
pub mod error;
pub mod users;

pub use config::{ConfigError, UserServiceConfig};
pub use error::{FailureKind, UserServiceError};
pub use users::{
    CreateUserRequest, CreateUserResponse, GetUserInfoResponse, UpdateUserRequest,
    UpdateUserResponse,
};

use std::time::Duration;

use idgate_core::Envelope;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Client for the upstream user service.
#[derive(Debug, Clone)]
pub struct UserClient {
    http: reqwest::Client,
    base_url: String,
}

impl UserClient {
    /// Create a new client from configuration.
    pub fn new(config: UserServiceConfig) -> Result<Self, UserServiceError> {
        let base_url = config.base_url()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| UserServiceError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self { http, base_url })
    }

    /// Base URL every endpoint path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one request and return the raw response body.
    ///
    /// `path` is appended to the base URL as-is. When `body` is present it is
    /// sent as JSON with `Content-Type: application/json`.
    ///
    /// # Errors
    ///
    /// - [`UserServiceError::Http`] on connection, DNS, or timeout failures.
    /// - [`UserServiceError::ApiError`] on a non-2xx status, with the raw body.
    pub async fn send<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        headers: HeaderMap,
    ) -> Result<Vec<u8>, UserServiceError>
    where
        B: Serialize + ?Sized,
    {
        let endpoint = format!("{method} {path}");
        let url = format!("{}{path}", self.base_url);

        let mut request = self.http.request(method, &url).headers(headers);
        if let Some(body) = body {
            request = request.json(body);
        }

        let resp = request.send().await.map_err(|e| UserServiceError::Http {
            endpoint: endpoint.clone(),
            source: e,
        })?;

        let status = resp.status();
        let bytes = resp.bytes().await.map_err(|e| UserServiceError::Http {
            endpoint: endpoint.clone(),
            source: e,
        })?;

        tracing::debug!(%endpoint, status = status.as_u16(), "user service responded");

        if !status.is_success() {
            return Err(UserServiceError::ApiError {
                endpoint,
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        Ok(bytes.to_vec())
    }

    /// Send one request carrying `credential` as the `Authorization` header
    /// and decode the envelope payload into `T`.
    ///
    /// # Errors
    ///
    /// Everything [`UserClient::send`] returns, plus:
    /// - [`UserServiceError::Deserialization`] when the body is not an
    ///   envelope, the payload is not a `T`, or a success envelope is empty.
    /// - [`UserServiceError::Rejected`] when the envelope code is a failure.
    pub async fn call<T, B>(
        &self,
        method: Method,
        path: &str,
        credential: &str,
        body: Option<&B>,
    ) -> Result<T, UserServiceError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let endpoint = format!("{method} {path}");
        let headers = authorization_headers(credential, &endpoint)?;
        let raw = self.send(method, path, body, headers).await?;

        Envelope::<T>::decode(&raw)
            .and_then(Envelope::into_payload)
            .map_err(|e| UserServiceError::from_envelope(endpoint, e))
    }
}

/// Build a header map holding `credential` as a sensitive `Authorization` value.
fn authorization_headers(credential: &str, endpoint: &str) -> Result<HeaderMap, UserServiceError> {
    let mut value =
        HeaderValue::from_str(credential).map_err(|_| UserServiceError::InvalidCredential {
            endpoint: endpoint.to_string(),
        })?;
    value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}
