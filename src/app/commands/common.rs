use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::export;

// ==========================================
// 公共工具：错误映射、序列化、文件写出
// ==========================================

/// 错误响应（输出到 stderr）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 错误代码
    pub code: String,

    /// 错误消息
    pub message: String,

    /// 详细信息（可选）
    pub details: Option<serde_json::Value>,
}

/// 将ApiError转换为JSON字符串
pub fn map_api_error(err: ApiError) -> String {
    let error_response = ErrorResponse {
        code: match &err {
            ApiError::NetworkError(_) => "NETWORK_ERROR",
            ApiError::HttpStatus { .. } => "HTTP_STATUS",
            ApiError::DecodeError(_) => "DECODE_ERROR",
            ApiError::NotAuthenticated(_) => "NOT_AUTHENTICATED",
            ApiError::ValidationError(_) => "VALIDATION_ERROR",
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::InvalidStateTransition { .. } => "INVALID_STATE_TRANSITION",
            ApiError::DatabaseError(_) => "DATABASE_ERROR",
            ApiError::DatabaseConnectionError(_) => "DATABASE_CONNECTION_ERROR",
            ApiError::ExportError(_) => "EXPORT_ERROR",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
            ApiError::Other(_) => "OTHER_ERROR",
        }
        .to_string(),
        message: err.to_string(),
        details: match &err {
            ApiError::HttpStatus { status, .. } => Some(serde_json::json!({
                "status": status,
                "retryable": err.is_retryable(),
            })),
            ApiError::NetworkError(_) => Some(serde_json::json!({ "retryable": true })),
            _ => None,
        },
    };

    serde_json::to_string(&error_response).unwrap_or_else(|_| err.to_string())
}

pub(super) fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("序列化失败: {}", e))
}

/// 写出导出文件，返回完整路径
pub(super) fn write_export(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf, String> {
    let path = dir.join(file_name);
    export::save(&path, bytes).map_err(|e| map_api_error(e.into()))?;
    Ok(path)
}
