//! # Upstream User Records
//!
//! The user record exactly as the upstream identity service serves it.
//! Every field tolerates being absent, and fields this crate does not know
//! about are ignored, so the upstream can grow its schema without breaking
//! the gateway.

use serde::{Deserialize, Serialize};

/// Numeric identifier of a user in the upstream identity service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    /// Access the inner integer.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Profile fields shared by the user record and by create/update requests.
///
/// Excludes the identifier, timestamps, and password.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    /// Display name.
    pub name: String,
    /// Normalized name used for search.
    pub name_optimized: String,
    pub login_name: String,
    /// SAP employee reference, when the user is an employee.
    pub sap_employee_id: Option<i64>,
    /// 1 = employed, 2 = departed.
    pub status: i16,
    pub role_code: String,

    /// Current organisation.
    pub org_id: Option<i64>,
    pub org_name: String,
    pub org_level1_id: Option<i64>,
    pub org_level1_name: String,
    pub org_level2_id: Option<i64>,
    pub org_level2_name: String,
    pub org_level3_id: Option<i64>,
    pub org_level3_name: String,
    pub org_level4_id: Option<i64>,
    pub org_level4_name: String,
    pub org_level5_id: Option<i64>,
    pub org_level5_name: String,
    pub org_level6_id: Option<i64>,
    pub org_level6_name: String,
    pub org_level7_id: Option<i64>,
    pub org_level7_name: String,
    pub org_level8_id: Option<i64>,
    pub org_level8_name: String,
    pub org_level9_id: Option<i64>,
    pub org_level9_name: String,

    pub employee_post: Option<i64>,
    pub employee_post_name: Option<String>,
    /// Position code for outsourced staff.
    pub out_source_position_code: Option<String>,
    pub boss_employee_id: Option<i64>,
    pub boss_name: String,
    pub boss_employee_post: Option<i64>,

    /// Production line.
    pub line_id: Option<i64>,
    pub line_name: String,
    pub customer_id: Option<i64>,
    pub customer_name: String,
    /// Employee region marker.
    pub employee_qy: String,

    pub is_internal: Option<bool>,
    pub is_auto_add: Option<bool>,
    pub is_backend_synced: Option<bool>,
    pub is_manual_update: Option<bool>,
    pub comment: String,
}

/// Full user record returned by the upstream identity service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: UserId,
    #[serde(flatten)]
    pub profile: UserProfile,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub last_active_at: Option<String>,
}
