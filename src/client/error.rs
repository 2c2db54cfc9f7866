// ==========================================
// 米厂报表客户端 - 数据获取层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::domain::types::Role;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 数据获取层错误类型
#[derive(Error, Debug)]
pub enum ClientError {
    // ===== 传输错误 =====
    #[error("网络请求失败: {0}")]
    Transport(String),

    #[error("请求超时: {path}")]
    Timeout { path: String },

    // ===== 响应错误 =====
    #[error("服务端返回错误 ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("响应解析失败 (path={path}): {message}")]
    Decode { path: String, message: String },

    // ===== 凭证错误 =====
    #[error("未登录: 缺少 {role} 凭证")]
    NotAuthenticated { role: Role },

    #[error("本地凭证读取失败: {0}")]
    Storage(#[from] RepositoryError),

    // ===== 请求构造错误 =====
    #[error("无效请求: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            let path = err
                .url()
                .map(|u| u.path().to_string())
                .unwrap_or_default();
            return ClientError::Timeout { path };
        }
        ClientError::Transport(err.to_string())
    }
}

impl ClientError {
    /// 是否为网络层失败（未拿到 HTTP 响应）
    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Transport(_) | ClientError::Timeout { .. })
    }
}

/// Result 类型别名
pub type ClientResult<T> = Result<T, ClientError>;
