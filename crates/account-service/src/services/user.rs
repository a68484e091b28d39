//! User service
//!
//! Profile reads and updates for the caller, and the administrative
//! listing, deletion, and dashboard operations.

use account_core::{permission, role, UserId};
use tracing::{info, instrument, warn};

use crate::dto::{DashboardResponse, PermissionsResponse, UpdateProfileRequest, UserResponse};

use super::context::ServiceContext;
use super::directory::DirectoryService;
use super::error::{ServiceError, ServiceResult};
use super::policy::PolicyResolver;
use super::session::RequestSession;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn directory(&self) -> DirectoryService<'a> {
        DirectoryService::new(self.ctx)
    }

    fn policy(&self) -> PolicyResolver<'a> {
        PolicyResolver::new(self.ctx)
    }

    // === Self service ===

    /// Get the caller's profile
    #[instrument(skip(self, session))]
    pub async fn profile(&self, session: &RequestSession) -> ServiceResult<UserResponse> {
        let user_id = session.require_authenticated().await?;
        let user = self
            .directory()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id))?;
        Ok(UserResponse::from(user))
    }

    /// Update the caller's email and phone
    #[instrument(skip(self, session, request))]
    pub async fn update_profile(
        &self,
        session: &RequestSession,
        request: UpdateProfileRequest,
    ) -> ServiceResult<UserResponse> {
        let user_id = session.require_authenticated().await?;
        self.policy()
            .require_permission(user_id, permission::USER_UPDATE)
            .await?;

        let directory = self.directory();
        let mut user = directory
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id))?;

        let email = match request.email {
            Some(email) => {
                let email = email.trim();
                if email.is_empty() {
                    return Err(ServiceError::validation("email must not be blank"));
                }
                if email != user.email && directory.exists_by_email(email).await? {
                    return Err(ServiceError::conflict("email already registered"));
                }
                email.to_string()
            }
            None => user.email.clone(),
        };
        user.set_contact(email, request.phone);

        let updated = directory.update(user).await?;
        info!(user_id = %updated.id, "Profile updated");
        Ok(UserResponse::from(updated))
    }

    /// Roles and permissions in effect for the caller
    #[instrument(skip(self, session))]
    pub async fn permissions(&self, session: &RequestSession) -> ServiceResult<PermissionsResponse> {
        let user_id = session.require_authenticated().await?;
        let policy = self.policy();
        Ok(PermissionsResponse {
            permissions: policy.permissions_for(user_id).await,
            roles: policy.roles_for(user_id).await,
            user_id: user_id.into_inner(),
        })
    }

    // === Administration ===

    /// Every user, soft-deleted included, passwords redacted
    #[instrument(skip(self, session))]
    pub async fn list(&self, session: &RequestSession) -> ServiceResult<Vec<UserResponse>> {
        let caller = session.require_authenticated().await?;
        self.policy().require_role(caller, role::ADMIN).await?;

        let users = self.directory().list_all().await?;
        Ok(users.iter().map(UserResponse::from).collect())
    }

    /// Soft-delete a user and end their sessions
    ///
    /// Deleting oneself is refused regardless of role.
    #[instrument(skip(self, session))]
    pub async fn delete_user(&self, session: &RequestSession, target: UserId) -> ServiceResult<()> {
        let caller = session.require_authenticated().await?;
        let policy = self.policy();
        policy.require_role(caller, role::ADMIN).await?;
        policy.require_permission(caller, permission::USER_DELETE).await?;

        if caller == target {
            return Err(ServiceError::validation("cannot delete yourself"));
        }

        if !self.directory().soft_delete(target).await {
            return Err(ServiceError::not_found("User", target));
        }

        match self.ctx.sessions().force_invalidate(target).await {
            Ok(ended) => info!(caller = %caller, target = %target, ended, "User deleted"),
            Err(e) => warn!(target = %target, error = %e, "User deleted but sessions not ended"),
        }
        Ok(())
    }

    /// Administrator console summary
    #[instrument(skip(self, session))]
    pub async fn dashboard(&self, session: &RequestSession) -> ServiceResult<DashboardResponse> {
        let caller = session.require_authenticated().await?;
        self.policy().require_role(caller, role::ADMIN).await?;

        let total_users = self.directory().list_all().await?.len();
        Ok(DashboardResponse {
            message: "welcome to the admin console".to_string(),
            total_users,
            current_admin: caller.into_inner(),
        })
    }
}
