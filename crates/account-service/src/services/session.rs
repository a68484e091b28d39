//! Per-request session view

use std::sync::Arc;

use account_core::traits::SessionAuthority;
use account_core::UserId;
use tracing::instrument;

use super::error::{ServiceError, ServiceResult};

/// The session authority seen through the token a request presented.
///
/// Every method resolves the token against the authority again, so a
/// session ended elsewhere (logout, kick-out) is observed immediately.
#[derive(Clone)]
pub struct RequestSession {
    authority: Arc<dyn SessionAuthority>,
    token: Option<String>,
}

impl RequestSession {
    pub fn new(authority: Arc<dyn SessionAuthority>, token: Option<String>) -> Self {
        let token = token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        Self { authority, token }
    }

    /// The token presented by the request, if any
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Subject of the presented token, if it is a live session
    #[instrument(skip(self))]
    pub async fn current_subject(&self) -> ServiceResult<Option<UserId>> {
        match &self.token {
            Some(token) => Ok(self.authority.resolve(token).await?),
            None => Ok(None),
        }
    }

    /// Check if the request carries a live session
    pub async fn is_authenticated(&self) -> ServiceResult<bool> {
        Ok(self.current_subject().await?.is_some())
    }

    /// Subject of the live session, or an authentication error
    pub async fn require_authenticated(&self) -> ServiceResult<UserId> {
        self.current_subject()
            .await?
            .ok_or(ServiceError::NotAuthenticated)
    }

    /// End the presented session. Returns whether one was live.
    #[instrument(skip(self))]
    pub async fn invalidate_current(&self) -> ServiceResult<bool> {
        match &self.token {
            Some(token) => Ok(self.authority.invalidate(token).await?),
            None => Ok(false),
        }
    }
}

impl std::fmt::Debug for RequestSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSession")
            .field("has_token", &self.token.is_some())
            .finish()
    }
}
