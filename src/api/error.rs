// ==========================================
// 米厂报表客户端 - API层错误类型
// ==========================================
// 职责: 用例层错误分类，把下层技术错误转换为用户可读的消息
// 分类: 网络失败 / 非 2xx 响应 / 本地校验失败 / 本地存储 / 导出
// 空结果不是错误，不在此定义
// ==========================================

use crate::client::error::ClientError;
use crate::engine::fetch_state::InvalidTransition;
use crate::export::error::ExportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 远端错误
    // ==========================================
    #[error("网络错误: {0}")]
    NetworkError(String),

    /// 非 2xx 响应，message 取自响应 detail
    #[error("请求失败 ({status}): {message}")]
    HttpStatus { status: u16, message: String },

    #[error("响应格式错误: {0}")]
    DecodeError(String),

    #[error("未登录: {0}")]
    NotAuthenticated(String),

    // ==========================================
    // 本地校验错误（提交前拦截，不发请求）
    // ==========================================
    #[error("数据验证失败: {0}")]
    ValidationError(String),

    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("无效的状态转换: from={from} to={to}")]
    InvalidStateTransition { from: String, to: String },

    // ==========================================
    // 本地存储错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    // ==========================================
    // 导出错误
    // ==========================================
    #[error("导出失败: {0}")]
    ExportError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 是否可通过手动重试恢复
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::NetworkError(_) => true,
            ApiError::HttpStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::FieldValueError { field, message } => {
                ApiError::InvalidInput(format!("字段{}错误: {}", field, message))
            }
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

// ==========================================
// 从 ClientError 转换
// ==========================================
impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Transport(msg) => ApiError::NetworkError(msg),
            ClientError::Timeout { path } => ApiError::NetworkError(format!("请求超时: {}", path)),
            ClientError::Status { status, message } => ApiError::HttpStatus { status, message },
            ClientError::Decode { path, message } => {
                ApiError::DecodeError(format!("{}: {}", path, message))
            }
            ClientError::NotAuthenticated { role } => {
                ApiError::NotAuthenticated(format!("请先以 {} 身份登录", role))
            }
            ClientError::Storage(err) => err.into(),
            ClientError::InvalidRequest(msg) => ApiError::InvalidInput(msg),
        }
    }
}

// ==========================================
// 从 ExportError 转换
// ==========================================
impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::NothingSelected | ExportError::EmptyData(_) => {
                ApiError::ValidationError(err.to_string())
            }
            other => ApiError::ExportError(other.to_string()),
        }
    }
}

impl From<InvalidTransition> for ApiError {
    fn from(err: InvalidTransition) -> Self {
        ApiError::InvalidStateTransition {
            from: err.from.to_string(),
            to: err.to.to_string(),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Role;

    #[test]
    fn test_client_error_conversion() {
        let api_err: ApiError = ClientError::Status {
            status: 404,
            message: "No data found".to_string(),
        }
        .into();
        match api_err {
            ApiError::HttpStatus { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "No data found");
            }
            other => panic!("Expected HttpStatus, got {:?}", other),
        }

        let api_err: ApiError = ClientError::NotAuthenticated { role: Role::Admin }.into();
        assert!(matches!(api_err, ApiError::NotAuthenticated(_)));
    }

    #[test]
    fn test_repository_error_conversion() {
        let api_err: ApiError = RepositoryError::LockError("poisoned".to_string()).into();
        match api_err {
            ApiError::DatabaseConnectionError(msg) => assert!(msg.contains("poisoned")),
            other => panic!("Expected DatabaseConnectionError, got {:?}", other),
        }
    }

    #[test]
    fn test_export_precondition_is_validation() {
        let api_err: ApiError = ExportError::NothingSelected.into();
        assert!(matches!(api_err, ApiError::ValidationError(_)));
    }

    #[test]
    fn test_retryable() {
        assert!(ApiError::NetworkError("refused".into()).is_retryable());
        assert!(!ApiError::ValidationError("x".into()).is_retryable());
    }
}
