// ==========================================
// 米厂报表客户端 - 报表文档模型
// ==========================================
// 职责: 组合结果的中间表示，CSV / PDF 写出器共用
// ==========================================

use crate::domain::row::to_table;
use crate::domain::types::SectionKey;
use crate::i18n::t_in;
use crate::report::subsets::SectionData;

/// 默认 PDF 文件名
pub const DEFAULT_PDF_FILE_NAME: &str = "sales_forecast_report.pdf";
/// 默认 CSV 文件名
pub const DEFAULT_CSV_FILE_NAME: &str = "sales_forecast_report.csv";

#[derive(Debug, Clone, PartialEq)]
pub enum BlockBody {
    /// 带标签字段（汇总概览）
    Fields(Vec<(String, String)>),
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

/// 单个分区块: 标题 + 一段说明 + 内容
#[derive(Debug, Clone, PartialEq)]
pub struct ReportBlock {
    pub key: SectionKey,
    pub title: String,
    pub description: String,
    pub body: BlockBody,
}

impl ReportBlock {
    /// 由分区过滤结果构造块；空数据返回 None
    ///
    /// # 参数
    /// - data: 分区最近一次发布的过滤结果
    /// - locale: 标题/说明/字段标签使用的语言
    pub fn from_section(data: &SectionData, locale: &str) -> Option<Self> {
        if data.is_empty() {
            return None;
        }
        let key = data.key();
        let body = match data {
            SectionData::Summary(summary) => {
                let summary = summary.as_ref()?;
                BlockBody::Fields(
                    summary
                        .labeled_fields()
                        .into_iter()
                        .map(|(label, value)| (t_in(locale, label, &[]), value))
                        .collect(),
                )
            }
            SectionData::Accuracy(rows) => table(rows),
            SectionData::ForecastTable(rows) => table(rows),
            SectionData::InventoryImpact(rows) => table(rows),
            SectionData::RiceBreakdown(rows) => table(rows),
            SectionData::InventoryDistribution(rows) => table(rows),
        };
        Some(Self {
            key,
            title: t_in(locale, &key.title_key(), &[]),
            description: t_in(locale, &key.description_key(), &[]),
            body,
        })
    }

    pub fn row_count(&self) -> usize {
        match &self.body {
            BlockBody::Fields(fields) => fields.len(),
            BlockBody::Table { rows, .. } => rows.len(),
        }
    }
}

fn table<R: crate::domain::row::TabularRow>(rows: &[R]) -> BlockBody {
    let (headers, rows) = to_table(rows);
    BlockBody::Table { headers, rows }
}

/// 组合完成的报表
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub title: String,
    pub blocks: Vec<ReportBlock>,
}

impl ReportDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            blocks: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn section_keys(&self) -> Vec<SectionKey> {
        self.blocks.iter().map(|b| b.key).collect()
    }
}
