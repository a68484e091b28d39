//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Password of the seeded `admin` and `test` accounts
pub const SEED_PASSWORD: &str = "123456";

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Response envelope
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
}

/// Registration request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            username: format!("user{suffix}"),
            password: "pw-123".to_string(),
            email: format!("user{suffix}@example.com"),
            phone: Some(format!("139{suffix:08}")),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self::new(&reg.username, &reg.password)
    }
}

/// Registration result
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterData {
    pub user_id: i64,
    pub username: String,
    pub email: String,
}

/// Login result
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub token: String,
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Login status
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginStatus {
    pub is_login: bool,
    pub user_id: Option<i64>,
    pub token: Option<String>,
}

/// Redacted user record
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub is_delete: Option<i16>,
    pub password: Option<String>,
}

/// Roles and permissions of the caller
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionsData {
    pub permissions: BTreeSet<String>,
    pub roles: BTreeSet<String>,
    pub user_id: i64,
}

/// Admin console summary
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub message: String,
    pub total_users: usize,
    pub current_admin: i64,
}

/// Profile update request
#[derive(Debug, Serialize)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub phone: Option<String>,
}
