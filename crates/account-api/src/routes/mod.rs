//! Route definitions
//!
//! Authentication routes under /auth, user routes under /user.

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers::{auth, health, users};
use crate::state::AppState;

/// Create the main API router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(user_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/isLogin", get(auth::is_login))
        .route("/auth/userInfo", get(auth::user_info))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/kickout", post(auth::kickout))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/user/profile",
            get(users::get_profile).put(users::update_profile),
        )
        .route("/user/list", get(users::list_users))
        .route("/user/permissions", get(users::get_permissions))
        .route("/user/admin/dashboard", get(users::admin_dashboard))
        .route("/user/:user_id", delete(users::delete_user))
}
