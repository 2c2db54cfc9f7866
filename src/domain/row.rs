// ==========================================
// 米厂报表客户端 - 行访问接口
// ==========================================
// 职责: 为过滤/排序提供按字段名取值，为表格/导出提供固定列
// ==========================================

use chrono::NaiveDate;
use std::cmp::Ordering;
use std::fmt;

// ==========================================
// FieldValue - 字段值
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Bool(bool),
}

impl FieldValue {
    /// 将后端日期字符串（YYYY-MM-DD，允许带时间后缀）解析为日期值
    ///
    /// 解析失败时退化为文本
    pub fn date_or_text(raw: &str) -> FieldValue {
        match parse_iso_date(raw) {
            Some(d) => FieldValue::Date(d),
            None => FieldValue::Text(raw.to_string()),
        }
    }

    /// 全序比较: 同类值按值比较，类型不一致时按类型排序
    ///
    /// 类型顺序: Number < Date < Bool < Text
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Number(a), FieldValue::Number(b)) => a.total_cmp(b),
            (FieldValue::Date(a), FieldValue::Date(b)) => a.cmp(b),
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            FieldValue::Number(_) => 0,
            FieldValue::Date(_) => 1,
            FieldValue::Bool(_) => 2,
            FieldValue::Text(_) => 3,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            FieldValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// 解析 YYYY-MM-DD 前缀
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let head = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

// ==========================================
// Trait: FieldAccess
// ==========================================
// 用途: table_query 的过滤与排序按字段名读取
pub trait FieldAccess {
    /// 读取字段值；未知字段返回 None
    fn field(&self, name: &str) -> Option<FieldValue>;
}

// ==========================================
// Trait: TabularRow
// ==========================================
// 用途: 终端表格、CSV 与 PDF 表格共用同一组列
pub trait TabularRow {
    /// 固定表头
    fn headers() -> &'static [&'static str]
    where
        Self: Sized;

    /// 单元格文本（与表头一一对应）
    fn cells(&self) -> Vec<String>;
}

/// 把一组行转成 (表头, 单元格矩阵)
pub fn to_table<R: TabularRow>(rows: &[R]) -> (Vec<String>, Vec<Vec<String>>) {
    let headers = R::headers().iter().map(|h| h.to_string()).collect();
    let body = rows.iter().map(|r| r.cells()).collect();
    (headers, body)
}

// ==========================================
// 数值格式化
// ==========================================

/// 千分位分组（保留原始小数部分，最多两位）
///
/// 例: 1234567.5 -> "1,234,567.5"
pub fn format_grouped(value: f64) -> String {
    let negative = value < 0.0;
    let rounded = (value.abs() * 100.0).round() / 100.0;
    let text = rounded.to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (text.clone(), None),
    };

    let mut grouped = String::new();
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(&frac);
    }
    out
}

/// 两位小数
pub fn format_fixed2(value: f64) -> String {
    format!("{:.2}", value)
}

/// 可选指标: 两位小数或 N/A
pub fn format_metric(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format_fixed2(v),
        _ => "N/A".to_string(),
    }
}
