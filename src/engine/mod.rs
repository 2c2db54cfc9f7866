// ==========================================
// 米厂报表客户端 - 引擎层
// ==========================================
// 职责: 客户端表格过滤/排序/分页 + 获取状态机
// 红线: 引擎不发请求,不做 I/O
// ==========================================

pub mod fetch_state;
pub mod table_query;

// 重导出核心引擎
pub use fetch_state::{FetchState, InvalidTransition};
pub use table_query::{
    filter_rows, normalize_total_pages, paginate, sort_rows, total_pages, FilterSet, Page,
    Predicate,
};
