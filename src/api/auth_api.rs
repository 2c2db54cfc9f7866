// ==========================================
// 米厂报表客户端 - 认证 API
// ==========================================
// 职责: 登录/登出/状态/忘记密码/重置密码
// 凭证: 仅通过 CredentialRepository 读写（get/set/clear）
// ==========================================

use std::sync::Arc;

use serde::Serialize;

use crate::api::error::ApiResult;
use crate::api::validator::{validate_non_blank, validate_password_reset};
use crate::client::AuthClient;
use crate::domain::types::Role;
use crate::repository::CredentialRepository;

/// 登录状态
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthStatus {
    pub user: bool,
    pub admin: bool,
}

pub struct AuthApi {
    client: AuthClient,
    credentials: Arc<CredentialRepository>,
}

impl AuthApi {
    pub fn new(client: AuthClient, credentials: Arc<CredentialRepository>) -> Self {
        Self {
            client,
            credentials,
        }
    }

    /// 登录并保存该角色的凭证
    ///
    /// # 参数
    /// - role: 用户或管理员
    /// - username/password: 空白时本地拦截
    pub async fn login(&self, role: Role, username: &str, password: &str) -> ApiResult<()> {
        validate_non_blank("username", username)?;
        validate_non_blank("password", password)?;

        let resp = self.client.login(role, username.trim(), password).await?;
        self.credentials.set(role, &resp.access_token)?;
        tracing::info!(role = %role, "登录成功");
        Ok(())
    }

    /// 清除该角色凭证
    ///
    /// # 返回
    /// 是否确实存在并清除了凭证
    pub fn logout(&self, role: Role) -> ApiResult<bool> {
        let removed = self.credentials.clear(role)?;
        tracing::info!(role = %role, removed, "已登出");
        Ok(removed)
    }

    pub fn status(&self) -> ApiResult<AuthStatus> {
        let roles = self.credentials.authenticated_roles()?;
        Ok(AuthStatus {
            user: roles.contains(&Role::User),
            admin: roles.contains(&Role::Admin),
        })
    }

    /// 请求发送重置邮件（无需登录）
    ///
    /// # 返回
    /// 后端提示信息（例如 "Reset link sent to your email."）
    pub async fn forgot_password(&self, role: Role, username: &str) -> ApiResult<String> {
        validate_non_blank("username", username)?;
        let resp = self.client.forgot_password(role, username.trim()).await?;
        tracing::info!(role = %role, "已请求重置邮件");
        Ok(resp
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or_default()
            .to_string())
    }

    /// 通过邮件中的重置 token 设置新密码
    pub async fn reset_password(
        &self,
        role: Role,
        token: &str,
        password: &str,
        confirm: &str,
    ) -> ApiResult<()> {
        validate_non_blank("token", token)?;
        validate_password_reset(password, confirm)?;
        self.client.reset_password(role, token.trim(), password).await?;
        tracing::info!(role = %role, "密码已重置");
        Ok(())
    }
}
