// ==========================================
// 米厂报表客户端 - 导出层
// ==========================================
// 职责: 报表文档与表格写成 CSV / PDF 字节并落盘
// 红线: 导出层不发请求，只消费内存中的数据
// ==========================================

pub mod csv_export;
pub mod error;
pub mod pdf;

pub use error::{ExportError, ExportResult};

use std::fs;
use std::path::Path;

/// 写入文件（父目录不存在时创建）
pub fn save(path: &Path, bytes: &[u8]) -> ExportResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, bytes)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "导出文件已写入");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("a.csv");
        save(&path, b"x\n").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"x\n");
    }
}
