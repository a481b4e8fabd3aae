//! User service endpoints.
//!
//! Every wrapper forwards the caller's `Authorization` header value
//! unchanged; the user service decides whether it is acceptable.

use idgate_core::{Identity, User, UserId, UserProfile};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::{UserClient, UserServiceError};

/// Payload of `GET /info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetUserInfoResponse {
    pub user: User,
}

/// Payload of `POST /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub user: User,
}

/// Payload of `PUT /{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserResponse {
    pub user: User,
}

/// Request body for creating a user.
///
/// The password is wiped from memory when the request is dropped and is
/// never printed by `Debug`.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CreateUserRequest {
    #[serde(flatten)]
    pub profile: UserProfile,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("profile", &self.profile)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Drop for CreateUserRequest {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

/// Request body for updating a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(flatten)]
    pub profile: UserProfile,
}

impl UserClient {
    /// Look up the user the credential belongs to.
    ///
    /// Calls `GET {base}/info`.
    pub async fn get_user_info(&self, credential: &str) -> Result<GetUserInfoResponse, UserServiceError> {
        self.call::<GetUserInfoResponse, ()>(Method::GET, "/info", credential, None)
            .await
    }

    /// Resolve the credential into a verified [`Identity`].
    pub async fn fetch_identity(&self, credential: &str) -> Result<Identity, UserServiceError> {
        let info = self.get_user_info(credential).await?;
        Ok(Identity::from(info.user))
    }

    /// Create a user. Calls `POST {base}/`.
    pub async fn create_user(
        &self,
        credential: &str,
        req: &CreateUserRequest,
    ) -> Result<CreateUserResponse, UserServiceError> {
        self.call(Method::POST, "/", credential, Some(req)).await
    }

    /// Update a user. Calls `PUT {base}/{id}`.
    pub async fn update_user(
        &self,
        credential: &str,
        id: UserId,
        req: &UpdateUserRequest,
    ) -> Result<UpdateUserResponse, UserServiceError> {
        let path = format!("/{id}");
        self.call(Method::PUT, &path, credential, Some(req)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_debug_redacts_password() {
        let req = CreateUserRequest {
            profile: UserProfile {
                name: "Bob".into(),
                ..UserProfile::default()
            },
            password: "hunter2".into(),
        };
        let debug = format!("{req:?}");
        assert!(debug.contains("Bob"));
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn create_request_serializes_flat() {
        let req = CreateUserRequest {
            profile: UserProfile {
                name: "Bob".into(),
                login_name: "bob".into(),
                ..UserProfile::default()
            },
            password: "secret".into(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["name"], "Bob");
        assert_eq!(value["login_name"], "bob");
        assert_eq!(value["password"], "secret");
        assert!(value.get("profile").is_none());
    }

    #[test]
    fn info_response_ignores_unknown_fields() {
        let body = serde_json::json!({
            "user": {"id": 7, "name": "Alice", "shoe_size": 42},
            "extra": true
        });
        let resp: GetUserInfoResponse = serde_json::from_value(body).unwrap();
        assert_eq!(resp.user.id, UserId(7));
        assert_eq!(resp.user.profile.name, "Alice");
    }
}
