//! In-process implementation of UserRepository
//!
//! Records live in an ordered map behind a single write lock, so the
//! uniqueness check and the insert happen atomically, just as the unique
//! indexes guarantee it in PostgreSQL.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::instrument;

use account_core::traits::{RepoResult, UserRepository};
use account_core::{DomainError, User, UserId};

use super::error::user_not_found;

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<UserId, User>,
    last_id: i64,
}

impl Table {
    fn username_taken(&self, username: &str) -> bool {
        self.rows.values().any(|u| u.username == username)
    }

    fn email_taken_by_other(&self, email: &str, id: UserId) -> bool {
        self.rows.values().any(|u| u.email == email && u.id != id)
    }
}

/// In-process user store
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    table: RwLock<Table>,
}

impl MemoryUserRepository {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records, soft-deleted included
    pub fn len(&self) -> usize {
        self.table.read().rows.len()
    }

    /// Check if the store holds no records
    pub fn is_empty(&self) -> bool {
        self.table.read().rows.is_empty()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self.table.read().rows.get(&id).cloned())
    }

    #[instrument(skip(self))]
    async fn find_active_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        Ok(self
            .table
            .read()
            .rows
            .values()
            .find(|u| u.username == username && u.is_active())
            .cloned())
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .table
            .read()
            .rows
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    #[instrument(skip(self))]
    async fn find_by_phone(&self, phone: &str) -> RepoResult<Option<User>> {
        // BTreeMap iterates in id order
        Ok(self
            .table
            .read()
            .rows
            .values()
            .find(|u| u.phone.as_deref() == Some(phone))
            .cloned())
    }

    #[instrument(skip(self))]
    async fn exists_by_username(&self, username: &str) -> RepoResult<bool> {
        Ok(self.table.read().username_taken(username))
    }

    #[instrument(skip(self))]
    async fn exists_by_email(&self, email: &str) -> RepoResult<bool> {
        Ok(self.table.read().rows.values().any(|u| u.email == email))
    }

    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn insert(&self, user: &User) -> RepoResult<User> {
        let mut table = self.table.write();

        if table.username_taken(&user.username) {
            return Err(DomainError::UsernameTaken);
        }
        if table.email_taken_by_other(&user.email, UserId::UNSET) {
            return Err(DomainError::EmailTaken);
        }

        table.last_id += 1;
        let mut stored = user.clone();
        stored.id = UserId::new(table.last_id);
        table.rows.insert(stored.id, stored.clone());

        Ok(stored)
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update(&self, user: &User) -> RepoResult<User> {
        let mut table = self.table.write();

        if table.email_taken_by_other(&user.email, user.id) {
            return Err(DomainError::EmailTaken);
        }

        let row = table
            .rows
            .get_mut(&user.id)
            .ok_or_else(|| user_not_found(user.id))?;

        row.password.clone_from(&user.password);
        row.email.clone_from(&user.email);
        row.phone.clone_from(&user.phone);
        row.status = user.status;
        row.updated_at = user.updated_at.max(row.created_at);

        Ok(row.clone())
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<User>> {
        Ok(self.table.read().rows.values().cloned().collect())
    }

    async fn health_check(&self) -> RepoResult<()> {
        Ok(())
    }
}
