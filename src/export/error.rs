// ==========================================
// 米厂报表客户端 - 导出层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 导出层错误类型
#[derive(Error, Debug)]
pub enum ExportError {
    // ===== 前置条件 =====
    #[error("未勾选任何报表分区")]
    NothingSelected,

    #[error("没有可导出的数据: {0}")]
    EmptyData(String),

    // ===== 写出错误 =====
    #[error("CSV 写出失败: {0}")]
    Csv(String),

    #[error("PDF 生成失败: {0}")]
    Pdf(String),

    #[error("文件写入失败: {0}")]
    Io(String),
}

// 实现 From<csv::Error>
impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::Csv(err.to_string())
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::Io(err.to_string())
    }
}

/// Result 类型别名
pub type ExportResult<T> = Result<T, ExportError>;
