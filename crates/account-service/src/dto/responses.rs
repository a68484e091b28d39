//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output, with camelCase
//! field names.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Response envelope. `code` 200 signals success; any other value is a
/// failure and carries no data.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Successful response with the default message
    pub fn new(data: T) -> Self {
        Self::with_message("success", data)
    }

    /// Successful response with a custom message
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            code: 200,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Failed response
    pub fn error(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Check if this is a success envelope
    pub fn is_success(&self) -> bool {
        self.code == 200
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Registration result
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub message: String,
}

/// Login result
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Login status of the calling request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginStatusResponse {
    pub is_login: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl LoginStatusResponse {
    pub fn logged_out() -> Self {
        Self {
            is_login: false,
            user_id: None,
            token: None,
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// User record with the password redacted
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub is_delete: Option<i16>,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

/// Roles and permissions in effect for the caller
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionsResponse {
    pub permissions: BTreeSet<String>,
    pub roles: BTreeSet<String>,
    pub user_id: i64,
}

/// Administrator console summary
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub message: String,
    pub total_users: usize,
    pub current_admin: i64,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Readiness check response
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub checks: HealthChecks,
}

/// Individual backend checks
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: bool,
    pub sessions: bool,
}

impl ReadinessResponse {
    pub fn new(database: bool, sessions: bool) -> Self {
        Self {
            status: if database && sessions { "ready" } else { "not_ready" },
            checks: HealthChecks { database, sessions },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.checks.database && self.checks.sessions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_shapes() {
        let ok = serde_json::to_value(ApiResponse::new(1)).unwrap();
        assert_eq!(ok, json!({"code": 200, "message": "success", "data": 1}));

        let err = serde_json::to_value(ApiResponse::<()>::error(401, "not logged in")).unwrap();
        assert_eq!(err, json!({"code": 401, "message": "not logged in", "data": null}));
    }

    #[test]
    fn test_login_status_omits_absent_fields() {
        let value = serde_json::to_value(LoginStatusResponse::logged_out()).unwrap();
        assert_eq!(value, json!({"isLogin": false}));
    }

    #[test]
    fn test_readiness() {
        assert!(ReadinessResponse::new(true, true).is_ready());
        let degraded = ReadinessResponse::new(true, false);
        assert!(!degraded.is_ready());
        assert_eq!(degraded.status, "not_ready");
    }
}
