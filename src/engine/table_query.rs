// ==========================================
// 米厂报表客户端 - 表格查询引擎
// ==========================================
// 职责: 内存数组的过滤、排序、分页
// 红线: 纯函数,不做 I/O,不修改输入
// ==========================================
// 过滤: 各字段条件取交集；空白条件视为不限
// 排序: 稳定排序,相等元素保持原相对顺序
// 分页: 页码钳制到 [1, total_pages]；空输入 total_pages = 1
// ==========================================

use crate::domain::row::{parse_iso_date, FieldAccess, FieldValue};
use crate::domain::types::{is_unconstrained, SortDirection};
use std::cmp::Ordering;

// ==========================================
// Predicate - 单字段条件
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// 相等（文本忽略首尾空白；"All" 视为不限）
    Equals { field: String, value: String },
    /// 子串匹配（忽略大小写）
    Contains { field: String, needle: String },
    /// 闭区间；min/max 任一为空表示该侧不限
    Range {
        field: String,
        min: Option<String>,
        max: Option<String>,
    },
}

impl Predicate {
    pub fn equals(field: &str, value: &str) -> Self {
        Predicate::Equals {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn contains(field: &str, needle: &str) -> Self {
        Predicate::Contains {
            field: field.to_string(),
            needle: needle.to_string(),
        }
    }

    pub fn range(field: &str, min: Option<&str>, max: Option<&str>) -> Self {
        Predicate::Range {
            field: field.to_string(),
            min: min.map(str::to_string),
            max: max.map(str::to_string),
        }
    }

    /// 条件是否为空（不限）
    pub fn is_blank(&self) -> bool {
        match self {
            Predicate::Equals { value, .. } => is_unconstrained(value),
            Predicate::Contains { needle, .. } => needle.trim().is_empty(),
            Predicate::Range { min, max, .. } => {
                let blank = |v: &Option<String>| v.as_deref().map_or(true, |s| s.trim().is_empty());
                blank(min) && blank(max)
            }
        }
    }

    /// 判断一行是否满足条件
    ///
    /// 字段缺失的行不满足任何非空条件
    pub fn matches<R: FieldAccess>(&self, row: &R) -> bool {
        if self.is_blank() {
            return true;
        }
        match self {
            Predicate::Equals { field, value } => match row.field(field) {
                Some(FieldValue::Number(n)) => value
                    .trim()
                    .parse::<f64>()
                    .map(|v| (n - v).abs() < f64::EPSILON)
                    .unwrap_or(false),
                Some(FieldValue::Date(d)) => parse_iso_date(value) == Some(d),
                Some(other) => other.to_string().trim() == value.trim(),
                None => false,
            },
            Predicate::Contains { field, needle } => match row.field(field) {
                Some(v) => v
                    .to_string()
                    .to_lowercase()
                    .contains(&needle.trim().to_lowercase()),
                None => false,
            },
            Predicate::Range { field, min, max } => match row.field(field) {
                Some(v) => {
                    in_bound(&v, min.as_deref(), Ordering::Less)
                        && in_bound(&v, max.as_deref(), Ordering::Greater)
                }
                None => false,
            },
        }
    }
}

/// 检查 value 没有越过 bound；reject 为越界方向
fn in_bound(value: &FieldValue, bound: Option<&str>, reject: Ordering) -> bool {
    let bound = match bound.map(str::trim) {
        Some(b) if !b.is_empty() => b,
        _ => return true,
    };
    let bound_value = match value {
        FieldValue::Number(_) => match bound.parse::<f64>() {
            Ok(n) => FieldValue::Number(n),
            Err(_) => return false,
        },
        FieldValue::Date(_) => match parse_iso_date(bound) {
            Some(d) => FieldValue::Date(d),
            None => return false,
        },
        _ => FieldValue::Text(bound.to_string()),
    };
    value.compare(&bound_value) != reject
}

// ==========================================
// FilterSet - 条件交集
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    predicates: Vec<Predicate>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn push(&mut self, predicate: Predicate) {
        self.predicates.push(predicate);
    }

    /// 全部条件为空
    pub fn is_blank(&self) -> bool {
        self.predicates.iter().all(Predicate::is_blank)
    }

    pub fn matches<R: FieldAccess>(&self, row: &R) -> bool {
        self.predicates.iter().all(|p| p.matches(row))
    }
}

// ==========================================
// 过滤 / 排序
// ==========================================

/// 过滤；保持输入顺序
pub fn filter_rows<R: FieldAccess + Clone>(rows: &[R], filters: &FilterSet) -> Vec<R> {
    if filters.is_blank() {
        return rows.to_vec();
    }
    rows.iter().filter(|r| filters.matches(*r)).cloned().collect()
}

/// 稳定排序
///
/// # 参数
/// - `field`: 排序字段；字段缺失的行排在最后（两个方向都一样）
/// - `direction`: 降序通过反转比较器实现，相等元素仍保持原顺序
pub fn sort_rows<R: FieldAccess + Clone>(rows: &[R], field: &str, direction: SortDirection) -> Vec<R> {
    let mut keyed: Vec<(Option<FieldValue>, R)> =
        rows.iter().map(|r| (r.field(field), r.clone())).collect();

    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => match direction {
            SortDirection::Asc => a.compare(b),
            SortDirection::Desc => b.compare(a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    keyed.into_iter().map(|(_, r)| r).collect()
}

// ==========================================
// 分页
// ==========================================

/// 一页结果
#[derive(Debug, Clone, PartialEq)]
pub struct Page<R> {
    pub items: Vec<R>,
    /// 钳制后的页码（从 1 开始）
    pub page: usize,
    /// 总页数，至少为 1
    pub total_pages: usize,
    pub total_items: usize,
}

impl<R> Page<R> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// 总页数 = ceil(len / page_size)，至少为 1
pub fn total_pages(len: usize, page_size: usize) -> usize {
    let size = page_size.max(1);
    len.div_ceil(size).max(1)
}

/// 后端返回的页数归一化（0 或缺失 -> 1）
pub fn normalize_total_pages(pages: u32) -> u32 {
    pages.max(1)
}

/// 分页
///
/// # 参数
/// - `page_size`: 0 视为 1
/// - `page`: 小于 1 钳制为 1；超过总页数时返回空切片，页码钳制为总页数
pub fn paginate<R: Clone>(rows: &[R], page_size: usize, page: usize) -> Page<R> {
    let size = page_size.max(1);
    let pages = total_pages(rows.len(), size);

    if page > pages {
        return Page {
            items: Vec::new(),
            page: pages,
            total_pages: pages,
            total_items: rows.len(),
        };
    }

    let page = page.max(1);
    let start = (page - 1) * size;
    let end = (start + size).min(rows.len());
    let items = if start < rows.len() {
        rows[start..end].to_vec()
    } else {
        Vec::new()
    };

    Page {
        items,
        page,
        total_pages: pages,
        total_items: rows.len(),
    }
}
