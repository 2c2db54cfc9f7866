// ==========================================
// AccountApi 集成测试
// ==========================================
// 测试范围:
// 1. 用户/管理员账户列表: 管理员凭证，客户端过滤与分页
// 2. 增删改: 表单提交，本地校验，成功后重新获取全集
// 3. 未持有管理员凭证时不发请求
// ==========================================

mod helpers;

use helpers::api_test_helper::ApiTestEnv;
use helpers::mock_transport::MockResponse;
use pretty_assertions::assert_eq;
use rice_mill_report::api::{AccountsQuery, ApiError};
use rice_mill_report::client::HttpMethod;
use rice_mill_report::domain::account::AccountInput;
use rice_mill_report::domain::types::Role;
use serde_json::json;

fn users() -> serde_json::Value {
    json!([
        { "id": "u1", "fullName": "Nimal Perera", "email": "nimal@mill.lk", "username": "nimal", "role": "Staff" },
        { "id": "u2", "fullName": "Sunil Silva", "email": "sunil@mill.lk", "username": "sunil", "role": "Manager" },
        { "id": "u3", "fullName": "Nimali Fernando", "email": "nimali@mill.lk", "username": "nimali", "role": "Staff" }
    ])
}

fn admins() -> serde_json::Value {
    json!([
        { "id": "a1", "fullName": "Kamal", "email": "kamal@mill.lk", "username": "kamal", "role": "Super Admin" }
    ])
}

fn new_user() -> AccountInput {
    AccountInput {
        full_name: "Ruwan Jayasuriya".to_string(),
        email: "ruwan@mill.lk".to_string(),
        username: "ruwan".to_string(),
        password: "secret1".to_string(),
        confirm_password: "secret1".to_string(),
        role: "Staff".to_string(),
        phone: "0771234567".to_string(),
        bio: String::new(),
    }
}

fn form_value<'a>(fields: &'a [(String, String)], key: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

#[tokio::test]
async fn test_user_accounts_view_filters_and_pages() {
    let env = ApiTestEnv::logged_in().expect("无法创建测试环境");
    env.transport.respond_json(HttpMethod::Get, "/users", users());

    let query = AccountsQuery {
        search: "NIMAL".to_string(),
        ..AccountsQuery::default()
    };
    let view = env
        .state
        .account_api
        .accounts_view(Role::User, &query)
        .await
        .expect("查询失败");

    assert_eq!(view.accounts.len(), 3);
    assert_eq!(view.role_options, vec!["All", "Staff", "Manager"]);
    let names: Vec<&str> = view.page.items.iter().map(|a| a.username.as_str()).collect();
    assert_eq!(names, vec!["nimal", "nimali"]);

    let request = env.transport.last_request(HttpMethod::Get, "/users").unwrap();
    assert_eq!(request.bearer.as_deref(), Some("admin-token"));
}

#[tokio::test]
async fn test_admin_accounts_use_admin_collection() {
    let env = ApiTestEnv::logged_in().expect("无法创建测试环境");
    env.transport.respond_json(HttpMethod::Get, "/admins", admins());

    let accounts = env.state.account_api.list(Role::Admin).await.expect("查询失败");
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].role, "Super Admin");
    assert_eq!(env.transport.count(HttpMethod::Get, "/users"), 0);
}

#[tokio::test]
async fn test_add_user_posts_form_and_refetches() {
    let env = ApiTestEnv::logged_in().expect("无法创建测试环境");
    env.transport.respond_json(
        HttpMethod::Post,
        "/add-user",
        json!({ "msg": "User added", "id": "u4" }),
    );
    env.transport.respond_json(HttpMethod::Get, "/users", users());

    let accounts = env
        .state
        .account_api
        .add(Role::User, &new_user())
        .await
        .expect("新增失败");
    assert_eq!(accounts.len(), 3);

    let post = env.transport.last_request(HttpMethod::Post, "/add-user").unwrap();
    assert_eq!(post.body, None);
    let form = post.form.unwrap();
    assert_eq!(form_value(&form, "fullName"), Some("Ruwan Jayasuriya"));
    assert_eq!(form_value(&form, "password"), Some("secret1"));
    assert_eq!(form_value(&form, "confirmPassword"), None);
    assert_eq!(post.bearer.as_deref(), Some("admin-token"));
    assert_eq!(env.transport.count(HttpMethod::Get, "/users"), 1);
}

#[tokio::test]
async fn test_update_and_delete_admin_use_account_id() {
    let env = ApiTestEnv::logged_in().expect("无法创建测试环境");
    env.transport
        .respond_json(HttpMethod::Put, "/update-admin/a1", json!({ "msg": "Admin updated successfully" }));
    env.transport
        .respond_json(HttpMethod::Delete, "/delete-admin/a1", json!({ "msg": "Admin deleted successfully" }));
    env.transport.respond_json(HttpMethod::Get, "/admins", admins());

    let mut update = new_user();
    update.role = "Moderator".to_string();
    update.password.clear();
    update.confirm_password.clear();
    env.state
        .account_api
        .update(Role::Admin, " a1 ", &update)
        .await
        .expect("更新失败");
    env.state
        .account_api
        .delete(Role::Admin, "a1")
        .await
        .expect("删除失败");

    let put = env.transport.last_request(HttpMethod::Put, "/update-admin/a1").unwrap();
    let form = put.form.unwrap();
    assert_eq!(form_value(&form, "role"), Some("Moderator"));
    // 留空密码不下发
    assert_eq!(form_value(&form, "password"), None);
    assert_eq!(env.transport.count(HttpMethod::Delete, "/delete-admin/a1"), 1);
    assert_eq!(env.transport.count(HttpMethod::Get, "/admins"), 2);
}

#[tokio::test]
async fn test_invalid_account_blocked_locally() {
    let env = ApiTestEnv::logged_in().expect("无法创建测试环境");

    let mut input = new_user();
    input.email = "ruwan.mill.lk".to_string();
    let err = env.state.account_api.add(Role::User, &input).await.unwrap_err();
    assert!(matches!(err, ApiError::ValidationError(_)));

    let mut input = new_user();
    input.confirm_password = "secret2".to_string();
    let err = env.state.account_api.add(Role::User, &input).await.unwrap_err();
    assert!(matches!(err, ApiError::ValidationError(_)));

    let err = env.state.account_api.delete(Role::User, " ").await.unwrap_err();
    assert!(matches!(err, ApiError::ValidationError(_)));
    assert!(env.transport.requests().is_empty());
}

#[tokio::test]
async fn test_failed_delete_skips_refetch() {
    let env = ApiTestEnv::logged_in().expect("无法创建测试环境");
    env.transport.respond(
        HttpMethod::Delete,
        "/delete-user/u9",
        MockResponse::Status(404, "User not found".to_string()),
    );
    env.transport.respond_json(HttpMethod::Get, "/users", users());

    let err = env.state.account_api.delete(Role::User, "u9").await.unwrap_err();
    assert!(matches!(err, ApiError::HttpStatus { status: 404, .. }));
    assert_eq!(env.transport.count(HttpMethod::Get, "/users"), 0);
}

#[tokio::test]
async fn test_accounts_require_admin_token() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let err = env.state.account_api.list(Role::User).await.unwrap_err();
    assert!(matches!(err, ApiError::NotAuthenticated(_)));
    assert!(env.transport.requests().is_empty());
}
