//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for users table
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub email: String,
    pub phone: Option<String>,
    pub is_delete: Option<i16>,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

impl UserModel {
    /// Check if user is soft deleted
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.is_delete == Some(1)
    }
}
