//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Lookups here are raw: soft-delete filtering
//! belongs to the directory service, except for the one active lookup that
//! authentication needs.

use async_trait::async_trait;

use crate::entities::User;
use crate::error::DomainError;
use crate::value_objects::UserId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID, soft-deleted records included
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find a user by username, soft-deleted records excluded
    async fn find_active_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Find user by email, soft-deleted records included
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Find the lowest-id user with this phone, soft-deleted records included
    async fn find_by_phone(&self, phone: &str) -> RepoResult<Option<User>>;

    /// Check if a username is taken by any record
    async fn exists_by_username(&self, username: &str) -> RepoResult<bool>;

    /// Check if an email is taken by any record
    async fn exists_by_email(&self, email: &str) -> RepoResult<bool>;

    /// Insert a new record and return it with its assigned id.
    ///
    /// Fails with `UsernameTaken`/`EmailTaken` if the store's uniqueness
    /// constraints reject it.
    async fn insert(&self, user: &User) -> RepoResult<User>;

    /// Persist the mutable fields of an existing record.
    ///
    /// Username and creation time are never rewritten.
    async fn update(&self, user: &User) -> RepoResult<User>;

    /// All records, soft-deleted included, ordered by id
    async fn find_all(&self) -> RepoResult<Vec<User>>;

    /// Check that the store is reachable
    async fn health_check(&self) -> RepoResult<()>;
}
