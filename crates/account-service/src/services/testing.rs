//! Shared fixtures for service tests

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use account_cache::MemorySessionStore;
use account_common::CredentialPolicy;
use account_core::traits::{RepoResult, SessionAuthority, UserRepository};
use account_core::{AccessPolicy, DomainError, NewUser, User, UserId};
use account_db::MemoryUserRepository;
use async_trait::async_trait;

use super::context::ServiceContext;
use super::directory::DirectoryService;

pub fn context_with_policy(policy: CredentialPolicy) -> ServiceContext {
    ServiceContext::new(
        Arc::new(MemoryUserRepository::new()),
        Arc::new(MemorySessionStore::new(3600)),
        AccessPolicy::default(),
        policy,
    )
}

pub fn context() -> ServiceContext {
    context_with_policy(CredentialPolicy::Plaintext)
}

/// Store an active account with password `pw`
pub async fn seed(ctx: &ServiceContext, username: &str) -> User {
    DirectoryService::new(ctx)
        .create(NewUser::new(username, "pw", format!("{username}@example.com")))
        .await
        .expect("seed user")
}

// ============================================================================
// Failing adapters
// ============================================================================

/// In-memory store whose id lookups and updates can be switched to fail
#[derive(Default)]
pub struct FaultyUserRepository {
    inner: MemoryUserRepository,
    fail_lookups: AtomicBool,
    fail_updates: AtomicBool,
}

impl FaultyUserRepository {
    pub fn fail_lookups(&self, fail: bool) {
        self.fail_lookups.store(fail, Ordering::SeqCst);
    }

    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    fn check(flag: &AtomicBool) -> RepoResult<()> {
        if flag.load(Ordering::SeqCst) {
            Err(DomainError::DatabaseError("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl UserRepository for FaultyUserRepository {
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        Self::check(&self.fail_lookups)?;
        self.inner.find_by_id(id).await
    }

    async fn find_active_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        self.inner.find_active_by_username(username).await
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        self.inner.find_by_email(email).await
    }

    async fn find_by_phone(&self, phone: &str) -> RepoResult<Option<User>> {
        self.inner.find_by_phone(phone).await
    }

    async fn exists_by_username(&self, username: &str) -> RepoResult<bool> {
        self.inner.exists_by_username(username).await
    }

    async fn exists_by_email(&self, email: &str) -> RepoResult<bool> {
        self.inner.exists_by_email(email).await
    }

    async fn insert(&self, user: &User) -> RepoResult<User> {
        self.inner.insert(user).await
    }

    async fn update(&self, user: &User) -> RepoResult<User> {
        Self::check(&self.fail_updates)?;
        self.inner.update(user).await
    }

    async fn find_all(&self) -> RepoResult<Vec<User>> {
        self.inner.find_all().await
    }

    async fn health_check(&self) -> RepoResult<()> {
        self.inner.health_check().await
    }
}

/// In-memory session authority whose forced logout can be switched to fail
pub struct FaultySessionStore {
    inner: MemorySessionStore,
    fail_force: AtomicBool,
}

impl Default for FaultySessionStore {
    fn default() -> Self {
        Self {
            inner: MemorySessionStore::new(3600),
            fail_force: AtomicBool::new(false),
        }
    }
}

impl FaultySessionStore {
    pub fn fail_force_invalidate(&self, fail: bool) {
        self.fail_force.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl SessionAuthority for FaultySessionStore {
    async fn issue(&self, subject: UserId) -> RepoResult<String> {
        self.inner.issue(subject).await
    }

    async fn resolve(&self, token: &str) -> RepoResult<Option<UserId>> {
        self.inner.resolve(token).await
    }

    async fn invalidate(&self, token: &str) -> RepoResult<bool> {
        self.inner.invalidate(token).await
    }

    async fn force_invalidate(&self, subject: UserId) -> RepoResult<usize> {
        if self.fail_force.load(Ordering::SeqCst) {
            return Err(DomainError::CacheError("connection reset".to_string()));
        }
        self.inner.force_invalidate(subject).await
    }

    async fn health_check(&self) -> RepoResult<()> {
        self.inner.health_check().await
    }
}

/// Context over the failing adapters, with handles to switch faults on
pub fn faulty_context() -> (
    ServiceContext,
    Arc<FaultyUserRepository>,
    Arc<FaultySessionStore>,
) {
    let users = Arc::new(FaultyUserRepository::default());
    let sessions = Arc::new(FaultySessionStore::default());
    let ctx = ServiceContext::new(
        Arc::clone(&users) as Arc<dyn UserRepository>,
        Arc::clone(&sessions) as Arc<dyn SessionAuthority>,
        AccessPolicy::default(),
        CredentialPolicy::Plaintext,
    );
    (ctx, users, sessions)
}
