//! Session extractor
//!
//! Reads the session token from `Authorization: Bearer <token>` or, failing
//! that, from the configured token header. Extraction never rejects: an
//! anonymous request yields a session with no token, and each operation
//! decides whether it needs one.

use account_service::RequestSession;
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::response::ApiError;
use crate::state::AppState;

/// The per-request session view
#[derive(Debug, Clone)]
pub struct Session(pub RequestSession);

impl std::ops::Deref for Session {
    type Target = RequestSession;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Token presented by the request, if any
pub fn presented_token(parts: &Parts, token_header: &str) -> Option<String> {
    parts
        .headers
        .get(token_header)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let bearer = TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .ok()
            .map(|TypedHeader(Authorization(bearer))| bearer.token().to_string());

        let token = bearer.or_else(|| presented_token(parts, app_state.token_header()));

        Ok(Session(app_state.service_context().request_session(token)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(header: &str, value: &str) -> Parts {
        let (parts, ()) = Request::builder()
            .header(header, value)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[test]
    fn test_presented_token_reads_configured_header() {
        let parts = parts("satoken", " abc ");
        assert_eq!(presented_token(&parts, "satoken").as_deref(), Some("abc"));
        assert_eq!(presented_token(&parts, "x-token"), None);
    }

    #[test]
    fn test_blank_header_is_absent() {
        let parts = parts("satoken", "   ");
        assert_eq!(presented_token(&parts, "satoken"), None);
    }
}
