//! API Integration Tests
//!
//! Each test starts the server on a local port with in-process backends
//! and the default `admin` and `test` accounts seeded.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_data, assert_envelope, assert_failure, fixtures::*, TestServer,
};
use reqwest::StatusCode;

async fn login(server: &TestServer, username: &str, password: &str) -> LoginData {
    let response = server
        .post("/auth/login", &LoginRequest::new(username, password))
        .await
        .unwrap();
    assert_data(response).await.unwrap()
}

async fn register(server: &TestServer) -> (RegisterRequest, RegisterData) {
    let request = RegisterRequest::unique();
    let response = server.post("/auth/register", &request).await.unwrap();
    let data = assert_data(response).await.unwrap();
    (request, data)
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_eq!(response.status(), StatusCode::OK);
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    let server = TestServer::start().await.unwrap();
    let (request, data) = register(&server).await;

    assert_eq!(data.username, request.username);
    assert_eq!(data.email, request.email);
    assert!(data.user_id > 0);
}

#[tokio::test]
async fn test_register_duplicate_username_and_email() {
    let server = TestServer::start().await.unwrap();
    let (request, _) = register(&server).await;

    let mut same_name = RegisterRequest::unique();
    same_name.username = request.username.clone();
    let response = server.post("/auth/register", &same_name).await.unwrap();
    assert_failure(response, StatusCode::CONFLICT).await.unwrap();

    let mut same_email = RegisterRequest::unique();
    same_email.email = request.email.clone();
    let response = server.post("/auth/register", &same_email).await.unwrap();
    assert_failure(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_register_seeded_admin_conflicts() {
    let server = TestServer::start().await.unwrap();
    let mut request = RegisterRequest::unique();
    request.username = "admin".to_string();

    let response = server.post("/auth/register", &request).await.unwrap();
    assert_failure(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_register_blank_field() {
    let server = TestServer::start().await.unwrap();
    let mut request = RegisterRequest::unique();
    request.username = "   ".to_string();

    let response = server.post("/auth/register", &request).await.unwrap();
    let message = assert_failure(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(message, "username is required");
}

#[tokio::test]
async fn test_login_failures_share_message() {
    let server = TestServer::start().await.unwrap();

    let unknown = server
        .post("/auth/login", &LoginRequest::new("ghost", "whatever"))
        .await
        .unwrap();
    let unknown = assert_failure(unknown, StatusCode::UNAUTHORIZED).await.unwrap();

    let wrong = server
        .post("/auth/login", &LoginRequest::new("test", "wrong"))
        .await
        .unwrap();
    let wrong = assert_failure(wrong, StatusCode::UNAUTHORIZED).await.unwrap();

    assert_eq!(unknown, wrong);
}

#[tokio::test]
async fn test_session_lifecycle() {
    let server = TestServer::start().await.unwrap();
    let (request, registered) = register(&server).await;

    let session = login(&server, &request.username, &request.password).await;
    assert_eq!(session.user_id, registered.user_id);
    assert_eq!(session.phone, request.phone);

    let response = server.get_auth("/auth/isLogin", &session.token).await.unwrap();
    let status: LoginStatus = assert_data(response).await.unwrap();
    assert!(status.is_login);
    assert_eq!(status.user_id, Some(registered.user_id));
    assert_eq!(status.token.as_deref(), Some(session.token.as_str()));

    let response = server.get_auth("/auth/userInfo", &session.token).await.unwrap();
    let info: UserData = assert_data(response).await.unwrap();
    assert_eq!(info.username, request.username);
    assert!(info.password.is_none());

    let response = server.post_auth("/auth/logout", &session.token).await.unwrap();
    assert_envelope::<String>(response, StatusCode::OK).await.unwrap();

    let response = server.get_auth("/auth/isLogin", &session.token).await.unwrap();
    let status: LoginStatus = assert_data(response).await.unwrap();
    assert!(!status.is_login);
    assert!(status.user_id.is_none());

    let response = server.get_auth("/user/profile", &session.token).await.unwrap();
    assert_failure(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_token_header_is_accepted() {
    let server = TestServer::start().await.unwrap();
    let session = login(&server, "test", SEED_PASSWORD).await;

    let response = server
        .get_with_header("/user/profile", "satoken", &session.token)
        .await
        .unwrap();
    let profile: UserData = assert_data(response).await.unwrap();
    assert_eq!(profile.username, "test");
}

#[tokio::test]
async fn test_user_info_requires_login() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/auth/userInfo").await.unwrap();
    assert_failure(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server.get_auth("/auth/userInfo", "not-a-token").await.unwrap();
    assert_failure(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_kickout_ends_all_sessions() {
    let server = TestServer::start().await.unwrap();
    let admin = login(&server, "admin", SEED_PASSWORD).await;
    let first = login(&server, "test", SEED_PASSWORD).await;
    let second = login(&server, "test", SEED_PASSWORD).await;

    let path = format!("/auth/kickout?userId={}", first.user_id);
    let response = server.post_auth(&path, &admin.token).await.unwrap();
    assert_envelope::<String>(response, StatusCode::OK).await.unwrap();

    for token in [&first.token, &second.token] {
        let response = server.get_auth("/user/profile", token).await.unwrap();
        assert_failure(response, StatusCode::UNAUTHORIZED).await.unwrap();
    }
}

#[tokio::test]
async fn test_kickout_rejects_invalid_target() {
    let server = TestServer::start().await.unwrap();
    let admin = login(&server, "admin", SEED_PASSWORD).await;

    let response = server.post_auth("/auth/kickout?userId=0", &admin.token).await.unwrap();
    assert_failure(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server.post_auth("/auth/kickout?userId=abc", &admin.token).await.unwrap();
    assert_failure(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_update_profile() {
    let server = TestServer::start().await.unwrap();
    let (request, _) = register(&server).await;
    let session = login(&server, &request.username, &request.password).await;

    let update = UpdateProfileRequest {
        email: Some(format!("changed-{}", request.email)),
        phone: Some("555".to_string()),
    };
    let response = server
        .put_auth("/user/profile", &session.token, &update)
        .await
        .unwrap();
    assert_envelope::<String>(response, StatusCode::OK).await.unwrap();

    let response = server.get_auth("/user/profile", &session.token).await.unwrap();
    let profile: UserData = assert_data(response).await.unwrap();
    assert_eq!(Some(profile.email), update.email);
    assert_eq!(profile.phone.as_deref(), Some("555"));
    assert_eq!(profile.username, request.username);
}

#[tokio::test]
async fn test_update_profile_email_conflict() {
    let server = TestServer::start().await.unwrap();
    let session = login(&server, "test", SEED_PASSWORD).await;

    let update = UpdateProfileRequest {
        email: Some("admin@example.com".to_string()),
        phone: None,
    };
    let response = server
        .put_auth("/user/profile", &session.token, &update)
        .await
        .unwrap();
    assert_failure(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_permissions() {
    let server = TestServer::start().await.unwrap();

    let admin = login(&server, "admin", SEED_PASSWORD).await;
    let response = server.get_auth("/user/permissions", &admin.token).await.unwrap();
    let data: PermissionsData = assert_data(response).await.unwrap();
    assert_eq!(data.user_id, admin.user_id);
    assert_eq!(data.roles.iter().collect::<Vec<_>>(), ["admin"]);
    assert_eq!(data.permissions.len(), 6);
    assert!(data.permissions.contains("admin:kickout"));

    let user = login(&server, "test", SEED_PASSWORD).await;
    let response = server.get_auth("/user/permissions", &user.token).await.unwrap();
    let data: PermissionsData = assert_data(response).await.unwrap();
    assert_eq!(data.roles.iter().collect::<Vec<_>>(), ["user"]);
    assert_eq!(
        data.permissions.iter().collect::<Vec<_>>(),
        ["user:info", "user:update"]
    );
}

#[tokio::test]
async fn test_admin_routes_require_admin() {
    let server = TestServer::start().await.unwrap();
    let user = login(&server, "test", SEED_PASSWORD).await;

    for path in ["/user/list", "/user/admin/dashboard"] {
        let response = server.get_auth(path, &user.token).await.unwrap();
        assert_failure(response, StatusCode::FORBIDDEN).await.unwrap();
    }

    let response = server.delete_auth("/user/1", &user.token).await.unwrap();
    assert_failure(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_admin_list_and_dashboard() {
    let server = TestServer::start().await.unwrap();
    register(&server).await;
    let admin = login(&server, "admin", SEED_PASSWORD).await;

    let response = server.get_auth("/user/list", &admin.token).await.unwrap();
    let users: Vec<UserData> = assert_data(response).await.unwrap();
    assert_eq!(users.len(), 3);
    assert!(users.iter().all(|u| u.password.is_none()));

    let response = server.get_auth("/user/admin/dashboard", &admin.token).await.unwrap();
    let dashboard: DashboardData = assert_data(response).await.unwrap();
    assert_eq!(dashboard.total_users, 3);
    assert_eq!(dashboard.current_admin, admin.user_id);
    assert!(!dashboard.message.is_empty());
}

#[tokio::test]
async fn test_delete_user_disables_login() {
    let server = TestServer::start().await.unwrap();
    let (request, registered) = register(&server).await;
    let victim = login(&server, &request.username, &request.password).await;
    let admin = login(&server, "admin", SEED_PASSWORD).await;

    let path = format!("/user/{}", registered.user_id);
    let response = server.delete_auth(&path, &admin.token).await.unwrap();
    assert_envelope::<String>(response, StatusCode::OK).await.unwrap();

    let response = server.get_auth("/user/profile", &victim.token).await.unwrap();
    assert_failure(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .post("/auth/login", &LoginRequest::from_register(&request))
        .await
        .unwrap();
    assert_failure(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.get_auth("/user/list", &admin.token).await.unwrap();
    let users: Vec<UserData> = assert_data(response).await.unwrap();
    let deleted = users.iter().find(|u| u.id == registered.user_id).unwrap();
    assert_eq!(deleted.is_delete, Some(1));

    let response = server.post("/auth/register", &request).await.unwrap();
    assert_failure(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_delete_self_is_refused() {
    let server = TestServer::start().await.unwrap();
    let admin = login(&server, "admin", SEED_PASSWORD).await;

    let path = format!("/user/{}", admin.user_id);
    let response = server.delete_auth(&path, &admin.token).await.unwrap();
    assert_failure(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_delete_missing_user() {
    let server = TestServer::start().await.unwrap();
    let admin = login(&server, "admin", SEED_PASSWORD).await;

    let response = server.delete_auth("/user/9999", &admin.token).await.unwrap();
    assert_failure(response, StatusCode::NOT_FOUND).await.unwrap();
}
