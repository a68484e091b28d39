//! Service context - dependency container for services
//!
//! Holds the record store, the session authority, and the policies every
//! service consults.

use std::sync::Arc;

use account_common::CredentialPolicy;
use account_core::traits::{SessionAuthority, UserRepository};
use account_core::AccessPolicy;

use super::error::{ServiceError, ServiceResult};
use super::session::RequestSession;

/// Service context containing all dependencies
///
/// Cheap to clone: every dependency is behind an `Arc`.
#[derive(Clone)]
pub struct ServiceContext {
    user_repo: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionAuthority>,
    access_policy: Arc<AccessPolicy>,
    credential_policy: CredentialPolicy,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionAuthority>,
        access_policy: AccessPolicy,
        credential_policy: CredentialPolicy,
    ) -> Self {
        Self {
            user_repo,
            sessions,
            access_policy: Arc::new(access_policy),
            credential_policy,
        }
    }

    // === Ports ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the session authority
    pub fn sessions(&self) -> &dyn SessionAuthority {
        self.sessions.as_ref()
    }

    /// Build the per-request session view for a presented token
    pub fn request_session(&self, token: Option<String>) -> RequestSession {
        RequestSession::new(Arc::clone(&self.sessions), token)
    }

    // === Policies ===

    /// Get the role and grant mapping
    pub fn access_policy(&self) -> &AccessPolicy {
        &self.access_policy
    }

    /// Get the credential storage policy
    pub fn credential_policy(&self) -> CredentialPolicy {
        self.credential_policy
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("user_repo", &"dyn UserRepository")
            .field("sessions", &"dyn SessionAuthority")
            .field("access_policy", &self.access_policy)
            .field("credential_policy", &self.credential_policy)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    sessions: Option<Arc<dyn SessionAuthority>>,
    access_policy: Option<AccessPolicy>,
    credential_policy: Option<CredentialPolicy>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn sessions(mut self, sessions: Arc<dyn SessionAuthority>) -> Self {
        self.sessions = Some(sessions);
        self
    }

    pub fn access_policy(mut self, policy: AccessPolicy) -> Self {
        self.access_policy = Some(policy);
        self
    }

    pub fn credential_policy(mut self, policy: CredentialPolicy) -> Self {
        self.credential_policy = Some(policy);
        self
    }

    /// Build the ServiceContext
    ///
    /// Policies fall back to their defaults; the two ports are required.
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if a port is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.sessions
                .ok_or_else(|| ServiceError::validation("sessions is required"))?,
            self.access_policy.unwrap_or_default(),
            self.credential_policy.unwrap_or_default(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use account_cache::MemorySessionStore;
    use account_db::MemoryUserRepository;

    #[test]
    fn test_builder_requires_ports() {
        let err = ServiceContextBuilder::new().build().unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let err = ServiceContextBuilder::new()
            .user_repo(Arc::new(MemoryUserRepository::new()))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("sessions"));
    }

    #[test]
    fn test_builder_defaults_policies() {
        let ctx = ServiceContextBuilder::new()
            .user_repo(Arc::new(MemoryUserRepository::new()))
            .sessions(Arc::new(MemorySessionStore::new(60)))
            .build()
            .unwrap();

        assert_eq!(ctx.credential_policy(), CredentialPolicy::Plaintext);
        assert!(ctx.access_policy().is_elevated("admin"));
    }
}
