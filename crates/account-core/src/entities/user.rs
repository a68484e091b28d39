//! User entity - the sole record of the account service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::UserId;

/// Soft-delete state of an account.
///
/// Stored as a nullable flag: absent and `Active` are equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Deleted,
}

impl AccountStatus {
    /// Stored flag: `1` deleted, `0` active
    pub fn flag(self) -> i16 {
        match self {
            Self::Active => 0,
            Self::Deleted => 1,
        }
    }

    /// Decode a stored flag. `1` is deleted; any other value is active.
    pub fn from_flag(flag: i16) -> Self {
        if flag == 1 {
            Self::Deleted
        } else {
            Self::Active
        }
    }
}

/// User account record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password: String,
    pub email: String,
    pub phone: Option<String>,
    pub status: Option<AccountStatus>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build an unsaved record (unset id) from registration input,
    /// filling in the creation defaults
    pub fn from_new(new: NewUser) -> Self {
        let now = Utc::now();
        let created_at = new.created_at.unwrap_or(now);
        Self {
            id: UserId::UNSET,
            username: new.username,
            password: new.password,
            email: new.email,
            phone: new.phone,
            status: Some(new.status.unwrap_or(AccountStatus::Active)),
            created_at,
            updated_at: now.max(created_at),
        }
    }

    /// Check if the account is soft-deleted
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.status == Some(AccountStatus::Deleted)
    }

    /// Check if the account is active (flag absent or explicitly active)
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.is_deleted()
    }

    /// Refresh the modification timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.created_at);
    }

    /// Mark the account as soft-deleted
    pub fn mark_deleted(&mut self) {
        self.status = Some(AccountStatus::Deleted);
        self.touch();
    }

    /// Replace the contact details
    pub fn set_contact(&mut self, email: String, phone: Option<String>) {
        self.email = email;
        self.phone = phone;
        self.touch();
    }
}

/// Input for creating a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: String,
    pub phone: Option<String>,
    pub status: Option<AccountStatus>,
    pub created_at: Option<DateTime<Utc>>,
}

impl NewUser {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            email: email.into(),
            phone: None,
            status: None,
            created_at: None,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_status(mut self, status: AccountStatus) -> Self {
        self.status = Some(status);
        self
    }
}
