// ==========================================
// AuthApi 集成测试
// ==========================================
// 测试范围:
// 1. 登录保存凭证，两个角色互不影响
// 2. 本地校验失败不发请求
// 3. 登出与登录状态
// 4. 忘记密码与重置密码
// ==========================================

mod helpers;

use helpers::api_test_helper::ApiTestEnv;
use helpers::mock_transport::MockResponse;
use pretty_assertions::assert_eq;
use rice_mill_report::api::{ApiError, AuthStatus};
use rice_mill_report::client::HttpMethod;
use rice_mill_report::domain::types::Role;
use serde_json::json;

#[tokio::test]
async fn test_login_stores_token_for_role() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.transport.respond_json(
        HttpMethod::Post,
        "/admin-login",
        json!({ "access_token": "fresh-admin", "token_type": "bearer" }),
    );

    env.state
        .auth_api
        .login(Role::Admin, " admin ", "secret")
        .await
        .expect("登录失败");

    assert_eq!(
        env.state.credentials.get(Role::Admin).unwrap().as_deref(),
        Some("fresh-admin")
    );
    assert_eq!(env.state.credentials.get(Role::User).unwrap(), None);

    let request = env
        .transport
        .last_request(HttpMethod::Post, "/admin-login")
        .unwrap();
    assert_eq!(
        request.body,
        Some(json!({ "username": "admin", "password": "secret" }))
    );
    assert_eq!(request.bearer, None);
}

#[tokio::test]
async fn test_rejected_login_keeps_previous_token() {
    let env = ApiTestEnv::logged_in().expect("无法创建测试环境");
    env.transport.respond(
        HttpMethod::Post,
        "/user-login",
        MockResponse::Status(401, "Invalid credentials".to_string()),
    );

    let err = env
        .state
        .auth_api
        .login(Role::User, "clerk", "wrong")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::HttpStatus { status: 401, .. }));
    assert_eq!(
        env.state.credentials.get(Role::User).unwrap().as_deref(),
        Some("user-token")
    );
}

#[tokio::test]
async fn test_blank_username_blocked_locally() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let err = env
        .state
        .auth_api
        .login(Role::User, "   ", "secret")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::ValidationError(_)));
    assert!(env.transport.requests().is_empty());
}

#[tokio::test]
async fn test_logout_and_status() {
    let env = ApiTestEnv::logged_in().expect("无法创建测试环境");
    assert_eq!(
        env.state.auth_api.status().unwrap(),
        AuthStatus {
            user: true,
            admin: true
        }
    );

    assert!(env.state.auth_api.logout(Role::User).unwrap());
    assert!(!env.state.auth_api.logout(Role::User).unwrap());
    assert_eq!(
        env.state.auth_api.status().unwrap(),
        AuthStatus {
            user: false,
            admin: true
        }
    );
}

#[tokio::test]
async fn test_reset_password_rules() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.transport.respond_json(
        HttpMethod::Post,
        "/reset-password",
        json!({ "message": "Password updated" }),
    );

    let err = env
        .state
        .auth_api
        .reset_password(Role::User, "reset-tok", "secret1", "secret2")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::ValidationError(_)));

    let err = env
        .state
        .auth_api
        .reset_password(Role::User, "reset-tok", "abc", "abc")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::ValidationError(_)));
    assert!(env.transport.requests().is_empty());

    env.state
        .auth_api
        .reset_password(Role::User, "reset-tok", "secret1", "secret1")
        .await
        .expect("重置失败");
    let request = env
        .transport
        .last_request(HttpMethod::Post, "/reset-password")
        .unwrap();
    assert_eq!(
        request.body,
        Some(json!({ "token": "reset-tok", "password": "secret1" }))
    );
}

#[tokio::test]
async fn test_forgot_password_posts_username_anonymously() {
    let env = ApiTestEnv::logged_in().expect("无法创建测试环境");
    env.transport.respond_json(
        HttpMethod::Post,
        "/admin-forgot-password",
        json!({ "message": "Reset link sent to your admin email." }),
    );

    let message = env
        .state
        .auth_api
        .forgot_password(Role::Admin, " kamal ")
        .await
        .expect("请求失败");
    assert_eq!(message, "Reset link sent to your admin email.");

    let request = env
        .transport
        .last_request(HttpMethod::Post, "/admin-forgot-password")
        .unwrap();
    assert_eq!(request.body, Some(json!({ "username": "kamal" })));
    assert_eq!(request.bearer, None);
    assert_eq!(env.transport.count(HttpMethod::Post, "/forgot-password"), 0);
}

#[tokio::test]
async fn test_forgot_password_unknown_user() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.transport.respond(
        HttpMethod::Post,
        "/forgot-password",
        MockResponse::Status(404, "User not found.".to_string()),
    );

    let err = env
        .state
        .auth_api
        .forgot_password(Role::User, "ghost")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::HttpStatus { status: 404, .. }));

    let err = env
        .state
        .auth_api
        .forgot_password(Role::User, "  ")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::ValidationError(_)));
    assert_eq!(env.transport.requests().len(), 1);
}
