//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use account_core::{AccountStatus, User};

use super::responses::{LoginResponse, RegisterResponse, UserResponse};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.into_inner(),
            username: user.username.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            is_delete: user.status.map(AccountStatus::flag),
            create_time: user.created_at,
            update_time: user.updated_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for RegisterResponse {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.into_inner(),
            username: user.username.clone(),
            email: user.email.clone(),
            message: "registration successful".to_string(),
        }
    }
}

impl LoginResponse {
    pub fn new(token: String, user: &User) -> Self {
        Self {
            token,
            user_id: user.id.into_inner(),
            username: user.username.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
        }
    }
}
