// ==========================================
// 米厂报表客户端 - CSV 导出
// ==========================================
// 职责: 表格 -> CSV（表头与可见列一致），以及回读校验
// 报表 CSV: 每个分区一块 = 标题行 + 表头 + 数据行 + 空行
// ==========================================

use crate::domain::row::{to_table, TabularRow};
use crate::export::error::{ExportError, ExportResult};
use crate::report::document::{BlockBody, ReportDocument};
use csv::{ReaderBuilder, WriterBuilder};

/// 把表头 + 单元格写成 CSV 字节
pub fn write_rows(headers: &[String], rows: &[Vec<String>]) -> ExportResult<Vec<u8>> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row)?;
    }
    finish(writer)
}

/// 把一组行按其可见列写成 CSV 字节
///
/// # 返回
/// - 空行集返回 EmptyData（没有可导出的记录）
pub fn write_table<R: TabularRow>(rows: &[R]) -> ExportResult<Vec<u8>> {
    if rows.is_empty() {
        return Err(ExportError::EmptyData("表格为空".to_string()));
    }
    let (headers, body) = to_table(rows);
    write_rows(&headers, &body)
}

/// 报表文档写成单个 CSV
pub fn write_report(document: &ReportDocument) -> ExportResult<Vec<u8>> {
    // 各块列数不同
    let mut writer = WriterBuilder::new().flexible(true).from_writer(Vec::new());
    for block in &document.blocks {
        writer.write_record([block.title.as_str()])?;
        match &block.body {
            BlockBody::Fields(fields) => {
                for (label, value) in fields {
                    writer.write_record([label.as_str(), value.as_str()])?;
                }
            }
            BlockBody::Table { headers, rows } => {
                writer.write_record(headers)?;
                for row in rows {
                    writer.write_record(row)?;
                }
            }
        }
        writer.write_record([""])?;
    }
    finish(writer)
}

/// 回读 CSV: 返回 (表头, 数据行)
pub fn read_back(bytes: &[u8]) -> ExportResult<(Vec<String>, Vec<Vec<String>>)> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);
    let headers = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(|c| c.to_string()).collect());
    }
    Ok((headers, rows))
}

fn finish(writer: csv::Writer<Vec<u8>>) -> ExportResult<Vec<u8>> {
    writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.to_string()))
}
