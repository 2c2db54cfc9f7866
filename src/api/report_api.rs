// ==========================================
// 米厂报表客户端 - 报表 API
// ==========================================
// 职责: 持有六个分区、过滤结果存储与组合器
// 数据流: 分区挂载/过滤 -> 发布到存储 -> 导出时组合器按勾选读取
// ==========================================

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::validator::validate_date_range;
use crate::client::ReportClient;
use crate::domain::types::{ExportFormat, SectionKey};
use crate::export;
use crate::perf::PerfGuard;
use crate::report::composer::ReportComposer;
use crate::report::document::{ReportDocument, DEFAULT_CSV_FILE_NAME, DEFAULT_PDF_FILE_NAME};
use crate::report::sections::{
    AccuracySection, DistributionFilter, ForecastFilter, ForecastTableSection,
    InventoryDistributionSection, InventoryImpactSection, ReportSectionRenderer,
    RiceBreakdownSection, SectionView, SummarySection,
};
use crate::report::subsets::FilteredSubsetStore;

pub struct ReportApi {
    client: ReportClient,
    store: Arc<FilteredSubsetStore>,
    composer: ReportComposer,
    summary: SummarySection,
    accuracy: AccuracySection,
    forecast_table: ForecastTableSection,
    inventory_impact: InventoryImpactSection,
    rice_breakdown: RiceBreakdownSection,
    inventory_distribution: InventoryDistributionSection,
}

impl ReportApi {
    /// # 参数
    /// - locale: 导出文档的语言
    pub fn new(client: ReportClient, locale: &str) -> Self {
        let store = FilteredSubsetStore::new();
        Self {
            client,
            composer: ReportComposer::new(locale),
            summary: SummarySection::new(store.subscriber()),
            accuracy: AccuracySection::new(store.subscriber()),
            forecast_table: ForecastTableSection::new(store.subscriber()),
            inventory_impact: InventoryImpactSection::new(store.subscriber()),
            rice_breakdown: RiceBreakdownSection::new(store.subscriber()),
            inventory_distribution: InventoryDistributionSection::new(store.subscriber()),
            store,
        }
    }

    pub fn store(&self) -> &Arc<FilteredSubsetStore> {
        &self.store
    }

    pub fn composer(&self) -> &ReportComposer {
        &self.composer
    }

    pub fn composer_mut(&mut self) -> &mut ReportComposer {
        &mut self.composer
    }

    /// 并发挂载全部分区；单个分区失败不影响其它分区
    pub async fn mount_all(&mut self) {
        let _perf = PerfGuard::new("report_api.mount_all");
        let Self {
            client,
            summary,
            accuracy,
            forecast_table,
            inventory_impact,
            rice_breakdown,
            inventory_distribution,
            ..
        } = self;
        let client: &ReportClient = client;
        tokio::join!(
            summary.mount(client),
            accuracy.mount(client),
            forecast_table.mount(client),
            inventory_impact.mount(client),
            rice_breakdown.mount(client),
            inventory_distribution.mount(client),
        );
    }

    fn section(&self, key: SectionKey) -> &dyn ReportSectionRenderer {
        match key {
            SectionKey::Summary => &self.summary,
            SectionKey::Accuracy => &self.accuracy,
            SectionKey::ForecastTable => &self.forecast_table,
            SectionKey::InventoryImpact => &self.inventory_impact,
            SectionKey::RiceBreakdown => &self.rice_breakdown,
            SectionKey::InventoryDistribution => &self.inventory_distribution,
        }
    }

    /// 单个分区视图
    pub fn view(&self, key: SectionKey) -> SectionView {
        self.section(key).view()
    }

    /// 全部分区视图（规范顺序）
    pub fn views(&self) -> Vec<SectionView> {
        SectionKey::CANONICAL_ORDER
            .iter()
            .map(|k| self.view(*k))
            .collect()
    }

    /// 重试失败的分区
    pub async fn retry(&mut self, key: SectionKey) -> ApiResult<()> {
        let client = &self.client;
        match key {
            SectionKey::Summary => self.summary.retry(client).await?,
            SectionKey::Accuracy => self.accuracy.retry(client).await?,
            SectionKey::ForecastTable => self.forecast_table.retry(client).await?,
            SectionKey::InventoryImpact => self.inventory_impact.retry(client).await?,
            SectionKey::RiceBreakdown => self.rice_breakdown.retry(client).await?,
            SectionKey::InventoryDistribution => self.inventory_distribution.retry(client).await?,
        }
        Ok(())
    }

    // ==========================================
    // 分区过滤条件
    // ==========================================

    pub fn set_forecast_filter(&mut self, filter: ForecastFilter) -> ApiResult<()> {
        validate_date_range(&filter.from_date, &filter.to_date)?;
        self.forecast_table.set_filter(filter);
        Ok(())
    }

    pub fn set_impact_status(&mut self, status: &str) {
        self.inventory_impact.set_status(status);
    }

    pub fn impact_status_options(&self) -> Vec<String> {
        self.inventory_impact.status_options()
    }

    /// 米种分解按日期区间重新向服务端获取
    pub async fn set_breakdown_range(&mut self, from_date: &str, to_date: &str) -> ApiResult<()> {
        validate_date_range(from_date, to_date)?;
        self.rice_breakdown
            .set_date_range(&self.client, from_date, to_date)
            .await;
        Ok(())
    }

    pub fn set_distribution_filter(&mut self, filter: DistributionFilter) -> ApiResult<()> {
        validate_date_range(&filter.from_date, &filter.to_date)?;
        self.inventory_distribution.set_filter(filter);
        Ok(())
    }

    pub fn warehouse_options(&self) -> Vec<String> {
        self.inventory_distribution.warehouse_options()
    }

    // ==========================================
    // 组合与导出
    // ==========================================

    pub fn compose(&mut self) -> ApiResult<ReportDocument> {
        Ok(self.composer.compose(&self.store)?)
    }

    pub fn export(&mut self, format: ExportFormat) -> ApiResult<Vec<u8>> {
        let _perf = PerfGuard::new("report_api.export");
        Ok(self.composer.export(&self.store, format)?)
    }

    /// 导出并写入目录
    ///
    /// # 参数
    /// - file_name: 为 None 时使用默认文件名
    pub fn export_to(
        &mut self,
        format: ExportFormat,
        dir: &Path,
        file_name: Option<&str>,
    ) -> ApiResult<PathBuf> {
        let bytes = self.export(format)?;
        let default_name = match format {
            ExportFormat::Pdf => DEFAULT_PDF_FILE_NAME,
            ExportFormat::Csv => DEFAULT_CSV_FILE_NAME,
        };
        let path = dir.join(file_name.unwrap_or(default_name));
        export::save(&path, &bytes)?;
        Ok(path)
    }
}
