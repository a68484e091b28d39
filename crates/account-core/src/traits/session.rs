//! Session authority port

use async_trait::async_trait;

use crate::traits::RepoResult;
use crate::value_objects::UserId;

/// Issues and resolves opaque session tokens.
///
/// A subject may hold any number of concurrent tokens.
#[async_trait]
pub trait SessionAuthority: Send + Sync {
    /// Issue a new token bound to the subject
    async fn issue(&self, subject: UserId) -> RepoResult<String>;

    /// Resolve a token to its subject, `None` if unknown or expired
    async fn resolve(&self, token: &str) -> RepoResult<Option<UserId>>;

    /// End one session. Returns whether the token was live.
    async fn invalidate(&self, token: &str) -> RepoResult<bool>;

    /// End every session of a subject. Returns how many were ended.
    async fn force_invalidate(&self, subject: UserId) -> RepoResult<usize>;

    /// Check that the backing store is reachable
    async fn health_check(&self) -> RepoResult<()>;
}
