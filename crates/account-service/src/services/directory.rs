//! User directory service
//!
//! Wraps the record store with input normalization, soft-delete filtering,
//! and timestamp maintenance. Two kinds of lookups coexist:
//! - active lookups (`find_*`) hide soft-deleted accounts
//! - raw lookups (`exists_*`, `inspect_by_id`, `list_all`) see every record

use account_core::{NewUser, User, UserId};
use tracing::{debug, instrument, warn};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Trim, mapping blank input to `None`
fn normalized(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Directory of user accounts
pub struct DirectoryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DirectoryService<'a> {
    /// Create a new DirectoryService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Active account by username
    #[instrument(skip(self))]
    pub async fn find_by_username(&self, username: &str) -> ServiceResult<Option<User>> {
        let Some(username) = normalized(username) else {
            return Ok(None);
        };
        Ok(self.ctx.user_repo().find_active_by_username(username).await?)
    }

    /// Active account by id; `None` for an unset id without touching the store
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: UserId) -> ServiceResult<Option<User>> {
        Ok(self.inspect_by_id(id).await?.filter(User::is_active))
    }

    /// Active account by email
    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> ServiceResult<Option<User>> {
        let Some(email) = normalized(email) else {
            return Ok(None);
        };
        let user = self.ctx.user_repo().find_by_email(email).await?;
        Ok(user.filter(User::is_active))
    }

    /// Active account by phone
    #[instrument(skip(self))]
    pub async fn find_by_phone(&self, phone: &str) -> ServiceResult<Option<User>> {
        let Some(phone) = normalized(phone) else {
            return Ok(None);
        };
        let user = self.ctx.user_repo().find_by_phone(phone).await?;
        Ok(user.filter(User::is_active))
    }

    /// Any record, soft-deleted included
    #[instrument(skip(self))]
    pub async fn inspect_by_id(&self, id: UserId) -> ServiceResult<Option<User>> {
        if id.is_unset() {
            return Ok(None);
        }
        Ok(self.ctx.user_repo().find_by_id(id).await?)
    }

    /// Whether any record, soft-deleted included, holds this username
    #[instrument(skip(self))]
    pub async fn exists_by_username(&self, username: &str) -> ServiceResult<bool> {
        match normalized(username) {
            Some(username) => Ok(self.ctx.user_repo().exists_by_username(username).await?),
            None => Ok(false),
        }
    }

    /// Whether any record, soft-deleted included, holds this email
    #[instrument(skip(self))]
    pub async fn exists_by_email(&self, email: &str) -> ServiceResult<bool> {
        match normalized(email) {
            Some(email) => Ok(self.ctx.user_repo().exists_by_email(email).await?),
            None => Ok(false),
        }
    }

    /// Persist a new account, filling in creation defaults
    #[instrument(skip(self, new_user), fields(username = %new_user.username))]
    pub async fn create(&self, new_user: NewUser) -> ServiceResult<User> {
        let user = self.ctx.user_repo().insert(&User::from_new(new_user)).await?;
        debug!(user_id = %user.id, "User record created");
        Ok(user)
    }

    /// Persist the full record as given, refreshing its modification time
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn update(&self, mut user: User) -> ServiceResult<User> {
        if user.id.is_unset() {
            return Err(ServiceError::validation("user id is required"));
        }
        user.touch();
        Ok(self.ctx.user_repo().update(&user).await?)
    }

    /// Mark an account deleted. `false` when absent or on any store failure.
    #[instrument(skip(self))]
    pub async fn soft_delete(&self, id: UserId) -> bool {
        if id.is_unset() {
            return false;
        }

        let result = async {
            let Some(mut user) = self.ctx.user_repo().find_by_id(id).await? else {
                return Ok(false);
            };
            user.mark_deleted();
            self.ctx.user_repo().update(&user).await?;
            Ok::<_, account_core::DomainError>(true)
        }
        .await;

        match result {
            Ok(deleted) => deleted,
            Err(e) => {
                warn!(user_id = %id, error = %e, "Soft delete failed");
                false
            }
        }
    }

    /// Every record, soft-deleted included
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> ServiceResult<Vec<User>> {
        Ok(self.ctx.user_repo().find_all().await?)
    }

    /// Check a username/password pair against an active account
    #[instrument(skip(self, password))]
    pub async fn verify_credentials(&self, username: &str, password: &str) -> ServiceResult<bool> {
        let Some(user) = self.find_by_username(username).await? else {
            return Ok(false);
        };
        Ok(self.ctx.credential_policy().matches(password, &user.password))
    }
}
