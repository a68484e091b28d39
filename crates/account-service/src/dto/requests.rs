//! Request DTOs for API endpoints
//!
//! Missing fields deserialize as empty so that required-field checks report
//! a field-specific message instead of a JSON rejection. Length bounds follow
//! the storage column widths.

use serde::Deserialize;
use validator::Validate;

/// Field names in declaration order. Validation failures are reported by
/// the first failing field in this order.
pub trait FieldOrder {
    const FIELDS: &'static [&'static str];
}

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request. Blank fields are rejected by the
/// registration itself.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterRequest {
    #[validate(length(max = 64, message = "username must be at most 64 characters"))]
    pub username: String,

    #[validate(length(max = 255, message = "password must be at most 255 characters"))]
    pub password: String,

    #[validate(length(max = 255, message = "email must be at most 255 characters"))]
    pub email: String,

    #[validate(length(max = 32, message = "phone must be at most 32 characters"))]
    pub phone: Option<String>,
}

impl FieldOrder for RegisterRequest {
    const FIELDS: &'static [&'static str] = &["username", "password", "email", "phone"];
}

/// User login request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

impl FieldOrder for LoginRequest {
    const FIELDS: &'static [&'static str] = &["username", "password"];
}

/// Forced logout target
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KickoutQuery {
    pub user_id: Option<i64>,
}

// ============================================================================
// User Requests
// ============================================================================

/// Profile update. An absent email keeps the current one; phone is
/// replaced as given.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 255, message = "email must be at most 255 characters"))]
    pub email: Option<String>,

    #[validate(length(max = 32, message = "phone must be at most 32 characters"))]
    pub phone: Option<String>,
}

impl FieldOrder for UpdateProfileRequest {
    const FIELDS: &'static [&'static str] = &["email", "phone"];
}
