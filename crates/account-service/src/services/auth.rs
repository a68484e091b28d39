//! Authentication service
//!
//! Handles registration, login, logout, login status, and forced logout.

use account_core::{NewUser, UserId};
use tracing::{info, instrument, warn};

use crate::dto::{
    LoginRequest, LoginResponse, LoginStatusResponse, RegisterRequest, RegisterResponse,
    UserResponse,
};

use super::context::ServiceContext;
use super::directory::DirectoryService;
use super::error::{ServiceError, ServiceResult};
use super::session::RequestSession;

/// Trimmed value, or a validation error naming the field
fn required<'s>(value: &'s str, field: &str) -> ServiceResult<&'s str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::validation(format!("{field} is required")));
    }
    Ok(trimmed)
}

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn directory(&self) -> DirectoryService<'a> {
        DirectoryService::new(self.ctx)
    }

    /// Register a new user
    ///
    /// Username and email must be unused by any record, soft-deleted
    /// records included. Conflicts are reported before anything is written.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<RegisterResponse> {
        let username = required(&request.username, "username")?;
        required(&request.password, "password")?;
        let email = required(&request.email, "email")?;

        let directory = self.directory();
        if directory.exists_by_username(username).await? {
            return Err(ServiceError::conflict("username already exists"));
        }
        if directory.exists_by_email(email).await? {
            return Err(ServiceError::conflict("email already registered"));
        }

        let password = self.ctx.credential_policy().encode(&request.password)?;
        let mut new_user = NewUser::new(username, password, email);
        new_user.phone = request.phone;

        let user = directory.create(new_user).await?;
        info!(user_id = %user.id, "User registered successfully");

        Ok(RegisterResponse::from(&user))
    }

    /// Login with username and password
    ///
    /// Unknown usernames and wrong passwords produce the same error.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginResponse> {
        let username = required(&request.username, "username")?;
        required(&request.password, "password")?;

        let directory = self.directory();
        let Some(user) = directory.find_by_username(username).await? else {
            if directory.exists_by_username(username).await? {
                warn!(username, "Login refused: account disabled");
                return Err(ServiceError::AccountDisabled);
            }
            warn!(username, "Login failed: user not found");
            return Err(ServiceError::InvalidCredentials);
        };

        if !self
            .ctx
            .credential_policy()
            .matches(&request.password, &user.password)
        {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::InvalidCredentials);
        }

        let token = self.ctx.sessions().issue(user.id).await?;
        info!(user_id = %user.id, "User logged in successfully");

        Ok(LoginResponse::new(token, &user))
    }

    /// End the session presented by the request
    ///
    /// Succeeds whether or not a live session was presented.
    #[instrument(skip(self, session))]
    pub async fn logout(&self, session: &RequestSession) -> ServiceResult<()> {
        if session.invalidate_current().await? {
            info!("User logged out");
        }
        Ok(())
    }

    /// Login status of the request
    #[instrument(skip(self, session))]
    pub async fn login_status(&self, session: &RequestSession) -> ServiceResult<LoginStatusResponse> {
        Ok(match session.current_subject().await? {
            Some(user_id) => LoginStatusResponse {
                is_login: true,
                user_id: Some(user_id.into_inner()),
                token: session.token().map(ToString::to_string),
            },
            None => LoginStatusResponse::logged_out(),
        })
    }

    /// Current user with the password redacted
    #[instrument(skip(self, session))]
    pub async fn user_info(&self, session: &RequestSession) -> ServiceResult<UserResponse> {
        let user_id = session.require_authenticated().await?;
        let user = self
            .directory()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id))?;
        Ok(UserResponse::from(user))
    }

    /// End every session of the target user. Returns how many were ended.
    #[instrument(skip(self, session))]
    pub async fn kickout(&self, session: &RequestSession, target: Option<i64>) -> ServiceResult<usize> {
        let caller = session.require_authenticated().await?;

        let target = target
            .map(UserId::new)
            .filter(|id| id.is_positive())
            .ok_or_else(|| ServiceError::validation("userId must be a positive integer"))?;

        let ended = self.ctx.sessions().force_invalidate(target).await?;
        info!(caller = %caller, target = %target, ended, "User kicked out");
        Ok(ended)
    }
}
