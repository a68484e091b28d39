//! Authentication handlers
//!
//! Endpoints for registration, login, logout, login status, and kick-out.

use account_service::dto::{
    KickoutQuery, LoginRequest, LoginResponse, LoginStatusResponse, RegisterRequest,
    RegisterResponse, UserResponse,
};
use account_service::AuthService;
use axum::extract::{rejection::QueryRejection, Query, State};

use crate::extractors::{Session, ValidatedJson};
use crate::response::{ApiError, ApiResult, Envelope};
use crate::state::AppState;

/// Register a new user
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Envelope<RegisterResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(Envelope::ok(response))
}

/// Login with username and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Envelope<LoginResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Envelope::ok(response))
}

/// Login status of the caller
///
/// GET /auth/isLogin
pub async fn is_login(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<Envelope<LoginStatusResponse>> {
    let service = AuthService::new(state.service_context());
    Ok(Envelope::ok(service.login_status(&session).await?))
}

/// Current user, password redacted
///
/// GET /auth/userInfo
pub async fn user_info(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<Envelope<UserResponse>> {
    let service = AuthService::new(state.service_context());
    Ok(Envelope::ok(service.user_info(&session).await?))
}

/// End the caller's session
///
/// POST /auth/logout
pub async fn logout(State(state): State<AppState>, session: Session) -> ApiResult<Envelope<String>> {
    AuthService::new(state.service_context())
        .logout(&session)
        .await?;
    Ok(Envelope::confirm("logged out"))
}

/// End every session of a user
///
/// POST /auth/kickout?userId=
pub async fn kickout(
    State(state): State<AppState>,
    session: Session,
    query: Result<Query<KickoutQuery>, QueryRejection>,
) -> ApiResult<Envelope<String>> {
    let Query(query) = query.map_err(|_| ApiError::invalid_query("userId must be a positive integer"))?;

    AuthService::new(state.service_context())
        .kickout(&session, query.user_id)
        .await?;
    Ok(Envelope::confirm("success"))
}
