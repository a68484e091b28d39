//! Authorization policy resolver
//!
//! Derives the roles and permissions in effect for a subject. Resolution
//! never fails: an unparseable subject, a missing or soft-deleted account,
//! or a store error all resolve to the empty set.

use std::collections::BTreeSet;

use account_core::{Subject, User};
use tracing::{debug, instrument, warn};

use super::context::ServiceContext;
use super::directory::DirectoryService;
use super::error::{ServiceError, ServiceResult};

/// Resolves roles and permissions through the directory
pub struct PolicyResolver<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PolicyResolver<'a> {
    /// Create a new PolicyResolver
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Permissions held by the subject
    pub async fn permissions_for(&self, subject: impl Into<Subject>) -> BTreeSet<String> {
        match self.active_user(subject.into()).await {
            Some(user) => self.ctx.access_policy().permissions_for(&user),
            None => BTreeSet::new(),
        }
    }

    /// Roles held by the subject
    pub async fn roles_for(&self, subject: impl Into<Subject>) -> BTreeSet<String> {
        match self.active_user(subject.into()).await {
            Some(user) => self.ctx.access_policy().roles_for(&user),
            None => BTreeSet::new(),
        }
    }

    /// Check if the subject holds a role
    pub async fn has_role(&self, subject: impl Into<Subject>, role: &str) -> bool {
        self.roles_for(subject).await.contains(role)
    }

    /// Check if the subject holds a permission
    pub async fn has_permission(&self, subject: impl Into<Subject>, permission: &str) -> bool {
        self.permissions_for(subject).await.contains(permission)
    }

    /// Fail with `RoleRequired` unless the subject holds the role
    pub async fn require_role(&self, subject: impl Into<Subject>, role: &str) -> ServiceResult<()> {
        if self.has_role(subject, role).await {
            Ok(())
        } else {
            Err(ServiceError::role_required(role))
        }
    }

    /// Fail with `PermissionDenied` unless the subject holds the permission
    pub async fn require_permission(
        &self,
        subject: impl Into<Subject>,
        permission: &str,
    ) -> ServiceResult<()> {
        if self.has_permission(subject, permission).await {
            Ok(())
        } else {
            Err(ServiceError::permission_denied(permission))
        }
    }

    #[instrument(skip(self))]
    async fn active_user(&self, subject: Subject) -> Option<User> {
        let Ok(id) = subject.user_id() else {
            debug!("Subject is not a user id");
            return None;
        };

        match DirectoryService::new(self.ctx).find_by_id(id).await {
            Ok(Some(user)) => Some(user),
            Ok(None) => {
                warn!(user_id = %id, "No active user for subject");
                None
            }
            Err(e) => {
                warn!(user_id = %id, error = %e, "Policy lookup failed");
                None
            }
        }
    }
}
