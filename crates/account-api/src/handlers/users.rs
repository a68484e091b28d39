//! User handlers
//!
//! Endpoints for the caller's profile and permissions, and the
//! administrative user operations.

use account_service::dto::{
    DashboardResponse, PermissionsResponse, UpdateProfileRequest, UserResponse,
};
use account_service::UserService;
use axum::extract::State;

use crate::extractors::{Session, UserIdPath, ValidatedJson};
use crate::response::{ApiResult, Envelope};
use crate::state::AppState;

/// Get the caller's profile
///
/// GET /user/profile
pub async fn get_profile(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<Envelope<UserResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Envelope::ok(service.profile(&session).await?))
}

/// Update the caller's email and phone
///
/// PUT /user/profile
pub async fn update_profile(
    State(state): State<AppState>,
    session: Session,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Envelope<String>> {
    UserService::new(state.service_context())
        .update_profile(&session, request)
        .await?;
    Ok(Envelope::confirm("updated"))
}

/// List every user
///
/// GET /user/list
pub async fn list_users(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<Envelope<Vec<UserResponse>>> {
    let service = UserService::new(state.service_context());
    Ok(Envelope::ok(service.list(&session).await?))
}

/// Soft-delete a user
///
/// DELETE /user/{user_id}
pub async fn delete_user(
    State(state): State<AppState>,
    session: Session,
    UserIdPath(user_id): UserIdPath,
) -> ApiResult<Envelope<String>> {
    UserService::new(state.service_context())
        .delete_user(&session, user_id)
        .await?;
    Ok(Envelope::confirm("deleted"))
}

/// Roles and permissions of the caller
///
/// GET /user/permissions
pub async fn get_permissions(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<Envelope<PermissionsResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Envelope::ok(service.permissions(&session).await?))
}

/// Administrator console
///
/// GET /user/admin/dashboard
pub async fn admin_dashboard(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<Envelope<DashboardResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Envelope::ok(service.dashboard(&session).await?))
}
