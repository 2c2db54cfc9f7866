// ==========================================
// 米厂报表客户端 - 认证接口
// ==========================================

use crate::client::error::{ClientError, ClientResult};
use crate::client::session::ApiSession;
use crate::client::transport::ApiRequest;
use crate::domain::types::Role;
use serde::Deserialize;
use serde_json::{json, Value};

/// 登录响应（只关心 access_token，其余字段原样保留）
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Clone)]
pub struct AuthClient {
    session: ApiSession,
}

impl AuthClient {
    pub fn new(session: ApiSession) -> Self {
        Self { session }
    }

    /// POST /user-login 或 /admin-login
    pub async fn login(&self, role: Role, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = ApiRequest::post(role.login_path())
            .body(json!({ "username": username, "password": password }));
        let resp: LoginResponse = self.session.fetch_anonymous(request).await?;
        if resp.access_token.trim().is_empty() {
            return Err(ClientError::Decode {
                path: role.login_path().to_string(),
                message: "access_token 为空".to_string(),
            });
        }
        Ok(resp)
    }

    /// POST /forgot-password 或 /admin-forgot-password
    ///
    /// 后端按用户名查找账户并向其邮箱发送重置链接
    pub async fn forgot_password(&self, role: Role, username: &str) -> ClientResult<Value> {
        let request = ApiRequest::post(role.forgot_password_path())
            .body(json!({ "username": username }));
        self.session.fetch_anonymous(request).await
    }

    /// POST /reset-password 或 /admin-reset-password
    ///
    /// # 参数
    /// - `token`: 邮件中的重置令牌（不是登录凭证）
    pub async fn reset_password(&self, role: Role, token: &str, password: &str) -> ClientResult<Value> {
        let request = ApiRequest::post(role.reset_password_path())
            .body(json!({ "token": token, "password": password }));
        self.session.fetch_anonymous(request).await
    }
}
