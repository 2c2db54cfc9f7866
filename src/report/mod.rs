// ==========================================
// 米厂报表客户端 - 报表层
// ==========================================
// 职责: 分区渲染器、过滤结果存储、报表组合器
// 数据流: 分区 --发布--> FilteredSubsetStore --导出时读取--> ReportComposer
// ==========================================

pub mod composer;
pub mod document;
pub mod render;
pub mod sections;
pub mod subsets;

pub use composer::{ComposerState, ReportComposer};
pub use document::{BlockBody, ReportBlock, ReportDocument, DEFAULT_CSV_FILE_NAME, DEFAULT_PDF_FILE_NAME};
pub use render::TableView;
pub use sections::{
    AccuracySection, DistributionFilter, ForecastFilter, ForecastTableSection,
    InventoryDistributionSection, InventoryImpactSection, ReportSectionRenderer,
    RiceBreakdownSection, SectionBody, SectionView, SummarySection,
};
pub use subsets::{FilteredSubsetStore, OnFilteredChange, SectionData};
