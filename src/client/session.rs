// ==========================================
// 米厂报表客户端 - 带凭证的请求入口
// ==========================================
// 职责: 从凭证仓储取 bearer、发请求、反序列化
// 约束: 缺少凭证时直接失败，不发网络请求
// ==========================================

use crate::client::error::{ClientError, ClientResult};
use crate::client::transport::{ApiRequest, ApiTransport};
use crate::domain::types::Role;
use crate::repository::CredentialRepository;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone)]
pub struct ApiSession {
    transport: Arc<dyn ApiTransport>,
    credentials: Arc<CredentialRepository>,
}

impl ApiSession {
    pub fn new(transport: Arc<dyn ApiTransport>, credentials: Arc<CredentialRepository>) -> Self {
        Self {
            transport,
            credentials,
        }
    }

    pub fn credentials(&self) -> &Arc<CredentialRepository> {
        &self.credentials
    }

    /// 读取角色凭证
    ///
    /// # 返回
    /// - `Err(NotAuthenticated)`: 本地没有该角色的凭证
    pub fn token(&self, role: Role) -> ClientResult<String> {
        self.credentials
            .get(role)?
            .ok_or(ClientError::NotAuthenticated { role })
    }

    /// 以角色身份发送请求，返回原始 JSON
    pub async fn send_as(&self, role: Role, request: ApiRequest) -> ClientResult<Value> {
        let token = self.token(role)?;
        self.transport.send(request.bearer(token)).await
    }

    /// 以角色身份发送请求并反序列化
    pub async fn fetch_as<T: DeserializeOwned>(
        &self,
        role: Role,
        request: ApiRequest,
    ) -> ClientResult<T> {
        let path = request.path.clone();
        let value = self.send_as(role, request).await?;
        decode(&path, value)
    }

    /// 无凭证请求（登录、重置密码）
    pub async fn fetch_anonymous<T: DeserializeOwned>(&self, request: ApiRequest) -> ClientResult<T> {
        let path = request.path.clone();
        let value = self.transport.send(request).await?;
        decode(&path, value)
    }
}

/// JSON -> 类型
pub fn decode<T: DeserializeOwned>(path: &str, value: Value) -> ClientResult<T> {
    serde_json::from_value(value).map_err(|e| ClientError::Decode {
        path: path.to_string(),
        message: e.to_string(),
    })
}
