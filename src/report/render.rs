// ==========================================
// 米厂报表客户端 - 终端渲染
// ==========================================
// 职责: 分区视图、分页表格、KPI 卡片 -> 终端文本
// 工具: comfy-table
// ==========================================

use crate::domain::row::{to_table, TabularRow};
use crate::engine::table_query::Page;
use crate::i18n::{t, t_with_args};
use crate::report::sections::{SectionBody, SectionView};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use serde::Serialize;

/// 统一样式的表格
pub fn create_standard_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold).fg(Color::Cyan)
}

/// "Page X of Y"
pub fn pager_label(page: usize, total_pages: usize) -> String {
    t_with_args(
        "table.page_of",
        &[
            ("page", &page.to_string()),
            ("pages", &total_pages.to_string()),
        ],
    )
}

// ==========================================
// TableView - 一页表格的可渲染快照
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub page: usize,
    pub total_pages: usize,
}

impl TableView {
    pub fn from_rows<R: TabularRow>(rows: &[R], page: usize, total_pages: usize) -> Self {
        let (headers, rows) = to_table(rows);
        Self {
            headers,
            rows,
            page: page.max(1),
            total_pages: total_pages.max(1),
        }
    }

    pub fn from_page<R: TabularRow>(page: &Page<R>) -> Self {
        Self::from_rows(&page.items, page.page, page.total_pages)
    }

    /// 无记录时的提示（不是错误）
    pub fn empty_message(&self) -> Option<String> {
        self.rows.is_empty().then(|| t("table.no_records"))
    }

    pub fn pager_label(&self) -> String {
        pager_label(self.page, self.total_pages)
    }

    pub fn render(&self) -> String {
        let mut out = match self.empty_message() {
            Some(message) => message,
            None => render_table(&self.headers, &self.rows),
        };
        out.push('\n');
        out.push_str(&self.pager_label());
        out
    }
}

pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut table = create_standard_table();
    table.set_header(headers.iter().map(|h| header_cell(h)));
    for row in rows {
        table.add_row(row);
    }
    table.to_string()
}

/// 两列键值表
pub fn render_fields(fields: &[(String, String)]) -> String {
    let mut table = create_standard_table();
    for (label, value) in fields {
        table.add_row(vec![
            Cell::new(label).add_attribute(Attribute::Bold),
            Cell::new(value),
        ]);
    }
    table.to_string()
}

/// 分区视图: 标题、附加信息、内容或状态
pub fn render_section(view: &SectionView) -> String {
    let mut out = format!("== {} ==\n", view.title);
    for (label, value) in &view.meta {
        out.push_str(&format!("{}: {}\n", label, value));
    }
    let body = match &view.body {
        SectionBody::Loading => t("status.loading"),
        SectionBody::Failed(message) => {
            t_with_args("status.failed", &[("message", message.as_str())])
        }
        SectionBody::Empty(message) => message.clone(),
        SectionBody::Fields(fields) => render_fields(fields),
        SectionBody::Table { headers, rows } => render_table(headers, rows),
    };
    out.push_str(&body);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sales::SalesRecord;
    use crate::engine::table_query::paginate;

    #[test]
    fn test_empty_table_view_message_and_pager() {
        let rows: Vec<SalesRecord> = Vec::new();
        let view = TableView::from_page(&paginate(&rows, 8, 1));
        assert_eq!(
            view.empty_message().as_deref(),
            Some("No records found with selected filters")
        );
        assert_eq!(view.pager_label(), "Page 1 of 1");
    }

    #[test]
    fn test_render_table_contains_cells() {
        let text = render_table(
            &["Rice Type".to_string(), "Quantity".to_string()],
            &[vec!["RED".to_string(), "12".to_string()]],
        );
        assert!(text.contains("Rice Type"));
        assert!(text.contains("RED"));
    }

    #[test]
    fn test_render_failed_section() {
        let view = SectionView {
            key: crate::domain::types::SectionKey::Accuracy,
            title: "Forecast Accuracy Summary".to_string(),
            meta: Vec::new(),
            body: SectionBody::Failed("timeout".to_string()),
        };
        let text = render_section(&view);
        assert!(text.starts_with("== Forecast Accuracy Summary =="));
        assert!(text.contains("timeout"));
    }
}
