// ==========================================
// 米厂报表客户端 - 报表分区
// ==========================================
// 职责: 六个互相独立的分区，各自持有数据与本地过滤条件
// 约定:
// - 挂载与每次过滤条件变化各发布一次当前过滤结果
// - 获取失败时显示错误并发布空结果，导出不会带出旧数据
// ==========================================

use crate::client::{ClientResult, ReportClient};
use crate::domain::forecast::ModelInfo;
use crate::domain::inventory::{distinct_values, InventoryBatch, InventoryImpactRow};
use crate::domain::report::{ReportSummary, RiceBreakdown};
use crate::domain::row::{to_table, TabularRow};
use crate::domain::forecast::ForecastPoint;
use crate::domain::types::{is_unconstrained, SectionKey};
use crate::engine::fetch_state::{FetchState, InvalidTransition};
use crate::engine::table_query::{filter_rows, FilterSet, Predicate};
use crate::i18n::t;
use crate::report::subsets::{OnFilteredChange, SectionData};
use async_trait::async_trait;

// ==========================================
// SectionView - 分区的可渲染快照
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum SectionBody {
    Loading,
    Failed(String),
    /// 无数据（不是错误）
    Empty(String),
    Fields(Vec<(String, String)>),
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionView {
    pub key: SectionKey,
    pub title: String,
    /// 附加信息（模型元数据、数据区间、当前过滤条件）
    pub meta: Vec<(String, String)>,
    pub body: SectionBody,
}

// ==========================================
// Trait: ReportSectionRenderer
// ==========================================
#[async_trait]
pub trait ReportSectionRenderer: Send {
    fn key(&self) -> SectionKey;

    /// 当前过滤结果（未就绪或失败时为空）
    fn filtered(&self) -> SectionData;

    fn view(&self) -> SectionView;

    /// 挂载: 获取数据并发布一次
    async fn mount(&mut self, client: &ReportClient);

    /// 手动重试（仅 Failed 状态可用）
    async fn retry(&mut self, client: &ReportClient) -> Result<(), InvalidTransition>;
}

// ==========================================
// SectionCore - 分区公共状态
// ==========================================
struct SectionCore<T> {
    key: SectionKey,
    state: FetchState<T>,
    on_change: OnFilteredChange,
}

impl<T> SectionCore<T> {
    fn new(key: SectionKey, on_change: OnFilteredChange) -> Self {
        Self {
            key,
            state: FetchState::Idle,
            on_change,
        }
    }

    /// 进入 Loading
    fn start(&mut self) {
        let result = if self.state.is_failed() {
            self.state.retry()
        } else if self.state.is_loading() {
            Ok(())
        } else {
            self.state.begin()
        };
        if let Err(e) = result {
            tracing::debug!(section = %self.key, error = %e, "忽略状态转换");
        }
    }

    fn finish(&mut self, result: ClientResult<T>) {
        self.start();
        if let Err(e) = &result {
            tracing::warn!(section = %self.key, error = %e, "分区数据获取失败");
        }
        if let Err(e) = self.state.resolve(result) {
            tracing::debug!(section = %self.key, error = %e, "忽略状态转换");
        }
    }

    fn publish(&self, data: SectionData) {
        (self.on_change)(data);
    }

    fn title(&self) -> String {
        t(&self.key.title_key())
    }

    /// 非 Ready 状态的渲染
    fn pending_body(&self) -> Option<SectionBody> {
        match &self.state {
            FetchState::Idle | FetchState::Loading => Some(SectionBody::Loading),
            FetchState::Failed(msg) => Some(SectionBody::Failed(msg.clone())),
            FetchState::Ready(_) => None,
        }
    }
}

fn table_body<R: TabularRow>(rows: &[R], empty_key: &str) -> SectionBody {
    if rows.is_empty() {
        return SectionBody::Empty(t(empty_key));
    }
    let (headers, rows) = to_table(rows);
    SectionBody::Table { headers, rows }
}

fn filter_meta(label_key: &str, value: &str) -> Option<(String, String)> {
    if is_unconstrained(value) {
        None
    } else {
        Some((t(label_key), value.trim().to_string()))
    }
}

// ==========================================
// SummarySection - 汇总概览
// ==========================================
pub struct SummarySection {
    core: SectionCore<ReportSummary>,
}

impl SummarySection {
    pub fn new(on_change: OnFilteredChange) -> Self {
        Self {
            core: SectionCore::new(SectionKey::Summary, on_change),
        }
    }

    pub fn load(&mut self, result: ClientResult<ReportSummary>) {
        self.core.finish(result);
        self.core.publish(self.filtered());
    }
}

#[async_trait]
impl ReportSectionRenderer for SummarySection {
    fn key(&self) -> SectionKey {
        SectionKey::Summary
    }

    fn filtered(&self) -> SectionData {
        SectionData::Summary(self.core.state.data().cloned())
    }

    fn view(&self) -> SectionView {
        let body = self.core.pending_body().unwrap_or_else(|| match self.core.state.data() {
            Some(summary) => SectionBody::Fields(
                summary
                    .labeled_fields()
                    .into_iter()
                    .map(|(k, v)| (t(k), v))
                    .collect(),
            ),
            None => SectionBody::Loading,
        });
        SectionView {
            key: SectionKey::Summary,
            title: self.core.title(),
            meta: Vec::new(),
            body,
        }
    }

    async fn mount(&mut self, client: &ReportClient) {
        self.core.start();
        let result = client.fetch_summary().await;
        self.load(result);
    }

    async fn retry(&mut self, client: &ReportClient) -> Result<(), InvalidTransition> {
        self.core.state.retry()?;
        let result = client.fetch_summary().await;
        self.load(result);
        Ok(())
    }
}

// ==========================================
// AccuracySection - 预测精度（无过滤条件）
// ==========================================
pub struct AccuracySection {
    core: SectionCore<ModelInfo>,
}

impl AccuracySection {
    pub fn new(on_change: OnFilteredChange) -> Self {
        Self {
            core: SectionCore::new(SectionKey::Accuracy, on_change),
        }
    }

    pub fn load(&mut self, result: ClientResult<ModelInfo>) {
        self.core.finish(result);
        self.core.publish(self.filtered());
    }
}

#[async_trait]
impl ReportSectionRenderer for AccuracySection {
    fn key(&self) -> SectionKey {
        SectionKey::Accuracy
    }

    fn filtered(&self) -> SectionData {
        SectionData::Accuracy(
            self.core
                .state
                .data()
                .map(|m| m.per_rice_type_metrics.clone())
                .unwrap_or_default(),
        )
    }

    fn view(&self) -> SectionView {
        let mut meta = Vec::new();
        if let Some(model) = self.core.state.data() {
            meta.push((t("report.accuracy.meta.trained_on"), model.training_date.clone()));
            meta.push((t("report.accuracy.meta.model"), model.model_name.clone()));
            meta.push((
                t("report.accuracy.meta.horizon"),
                format!("{} days", model.forecast_horizon_days),
            ));
            meta.push((
                t("report.accuracy.meta.rice_types"),
                model.total_rice_types_modeled.to_string(),
            ));
            meta.push((
                t("report.accuracy.meta.records"),
                model.total_records_used.to_string(),
            ));
        }
        let body = self.core.pending_body().unwrap_or_else(|| {
            let metrics = self
                .core
                .state
                .data()
                .map(|m| m.per_rice_type_metrics.as_slice())
                .unwrap_or_default();
            table_body(metrics, "report.accuracy.empty")
        });
        SectionView {
            key: SectionKey::Accuracy,
            title: self.core.title(),
            meta,
            body,
        }
    }

    async fn mount(&mut self, client: &ReportClient) {
        self.core.start();
        let result = client.fetch_model_info().await;
        self.load(result);
    }

    async fn retry(&mut self, client: &ReportClient) -> Result<(), InvalidTransition> {
        self.core.state.retry()?;
        let result = client.fetch_model_info().await;
        self.load(result);
        Ok(())
    }
}

// ==========================================
// ForecastTableSection - 预测明细
// ==========================================

/// 预测分区过滤条件
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastFilter {
    pub from_date: String,
    pub to_date: String,
    pub rice_type: String,
}

impl ForecastFilter {
    fn to_filter_set(&self) -> FilterSet {
        FilterSet::new()
            .with(Predicate::range(
                "date",
                Some(self.from_date.as_str()),
                Some(self.to_date.as_str()),
            ))
            .with(Predicate::equals("rice_type", &self.rice_type))
    }
}

pub struct ForecastTableSection {
    core: SectionCore<Vec<ForecastPoint>>,
    filter: ForecastFilter,
}

impl ForecastTableSection {
    pub fn new(on_change: OnFilteredChange) -> Self {
        Self {
            core: SectionCore::new(SectionKey::ForecastTable, on_change),
            filter: ForecastFilter::default(),
        }
    }

    pub fn load(&mut self, result: ClientResult<Vec<ForecastPoint>>) {
        self.core.finish(result);
        self.core.publish(self.filtered());
    }

    pub fn filter(&self) -> &ForecastFilter {
        &self.filter
    }

    /// 更新过滤条件并发布
    pub fn set_filter(&mut self, filter: ForecastFilter) {
        self.filter = filter;
        self.core.publish(self.filtered());
    }

    /// 清空过滤条件并发布
    pub fn reset_filter(&mut self) {
        self.set_filter(ForecastFilter::default());
    }

    fn rows(&self) -> Vec<ForecastPoint> {
        match self.core.state.data() {
            Some(points) => filter_rows(points, &self.filter.to_filter_set()),
            None => Vec::new(),
        }
    }
}

#[async_trait]
impl ReportSectionRenderer for ForecastTableSection {
    fn key(&self) -> SectionKey {
        SectionKey::ForecastTable
    }

    fn filtered(&self) -> SectionData {
        SectionData::ForecastTable(self.rows())
    }

    fn view(&self) -> SectionView {
        let meta = [
            filter_meta("filters.from_date", &self.filter.from_date),
            filter_meta("filters.to_date", &self.filter.to_date),
            filter_meta("filters.rice_type", &self.filter.rice_type),
        ]
        .into_iter()
        .flatten()
        .collect();
        let body = self
            .core
            .pending_body()
            .unwrap_or_else(|| table_body(&self.rows(), "report.forecastTable.empty"));
        SectionView {
            key: SectionKey::ForecastTable,
            title: self.core.title(),
            meta,
            body,
        }
    }

    async fn mount(&mut self, client: &ReportClient) {
        self.core.start();
        let result = client.fetch_forecast_points().await;
        self.load(result);
    }

    async fn retry(&mut self, client: &ReportClient) -> Result<(), InvalidTransition> {
        self.core.state.retry()?;
        let result = client.fetch_forecast_points().await;
        self.load(result);
        Ok(())
    }
}

// ==========================================
// InventoryImpactSection - 库存影响
// ==========================================
pub struct InventoryImpactSection {
    core: SectionCore<Vec<InventoryImpactRow>>,
    status: String,
}

impl InventoryImpactSection {
    pub fn new(on_change: OnFilteredChange) -> Self {
        Self {
            core: SectionCore::new(SectionKey::InventoryImpact, on_change),
            status: "All".to_string(),
        }
    }

    pub fn load(&mut self, result: ClientResult<Vec<InventoryImpactRow>>) {
        self.core.finish(result);
        self.core.publish(self.filtered());
    }

    /// 状态下拉: All + 数据中出现的状态
    pub fn status_options(&self) -> Vec<String> {
        let mut options = vec!["All".to_string()];
        if let Some(rows) = self.core.state.data() {
            options.extend(distinct_values(rows.iter().map(|r| r.status.as_str())));
        }
        options
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
        self.core.publish(self.filtered());
    }

    fn rows(&self) -> Vec<InventoryImpactRow> {
        match self.core.state.data() {
            Some(rows) => {
                let filters = FilterSet::new().with(Predicate::equals("status", &self.status));
                filter_rows(rows, &filters)
            }
            None => Vec::new(),
        }
    }
}

#[async_trait]
impl ReportSectionRenderer for InventoryImpactSection {
    fn key(&self) -> SectionKey {
        SectionKey::InventoryImpact
    }

    fn filtered(&self) -> SectionData {
        SectionData::InventoryImpact(self.rows())
    }

    fn view(&self) -> SectionView {
        let meta = filter_meta("filters.status", &self.status)
            .into_iter()
            .collect();
        let body = self
            .core
            .pending_body()
            .unwrap_or_else(|| table_body(&self.rows(), "report.inventoryImpact.empty"));
        SectionView {
            key: SectionKey::InventoryImpact,
            title: self.core.title(),
            meta,
            body,
        }
    }

    async fn mount(&mut self, client: &ReportClient) {
        self.core.start();
        let result = client.fetch_inventory_impact().await;
        self.load(result);
    }

    async fn retry(&mut self, client: &ReportClient) -> Result<(), InvalidTransition> {
        self.core.state.retry()?;
        let result = client.fetch_inventory_impact().await;
        self.load(result);
        Ok(())
    }
}

// ==========================================
// RiceBreakdownSection - 米种分解（服务端按日期过滤）
// ==========================================
pub struct RiceBreakdownSection {
    core: SectionCore<RiceBreakdown>,
    from_date: String,
    to_date: String,
}

impl RiceBreakdownSection {
    pub fn new(on_change: OnFilteredChange) -> Self {
        Self {
            core: SectionCore::new(SectionKey::RiceBreakdown, on_change),
            from_date: String::new(),
            to_date: String::new(),
        }
    }

    pub fn load(&mut self, result: ClientResult<RiceBreakdown>) {
        self.core.finish(result);
        self.core.publish(self.filtered());
    }

    /// 日期区间变化: 重新向服务端获取后发布
    pub async fn set_date_range(&mut self, client: &ReportClient, from_date: &str, to_date: &str) {
        self.from_date = from_date.trim().to_string();
        self.to_date = to_date.trim().to_string();
        self.core.start();
        let result = client
            .fetch_rice_breakdown(&self.from_date, &self.to_date)
            .await;
        self.load(result);
    }

    pub fn date_range(&self) -> (&str, &str) {
        (&self.from_date, &self.to_date)
    }
}

#[async_trait]
impl ReportSectionRenderer for RiceBreakdownSection {
    fn key(&self) -> SectionKey {
        SectionKey::RiceBreakdown
    }

    fn filtered(&self) -> SectionData {
        SectionData::RiceBreakdown(
            self.core
                .state
                .data()
                .map(|b| b.data.clone())
                .unwrap_or_default(),
        )
    }

    fn view(&self) -> SectionView {
        let mut meta: Vec<(String, String)> = [
            filter_meta("filters.from_date", &self.from_date),
            filter_meta("filters.to_date", &self.to_date),
        ]
        .into_iter()
        .flatten()
        .collect();
        if let Some(b) = self.core.state.data() {
            meta.push((
                t("report.riceBreakdown.meta.available"),
                format!(
                    "{} to {}",
                    b.earliest_date.as_deref().unwrap_or("N/A"),
                    b.latest_date.as_deref().unwrap_or("N/A")
                ),
            ));
        }
        let body = self.core.pending_body().unwrap_or_else(|| {
            let rows = self
                .core
                .state
                .data()
                .map(|b| b.data.as_slice())
                .unwrap_or_default();
            table_body(rows, "report.riceBreakdown.empty")
        });
        SectionView {
            key: SectionKey::RiceBreakdown,
            title: self.core.title(),
            meta,
            body,
        }
    }

    async fn mount(&mut self, client: &ReportClient) {
        self.core.start();
        let result = client
            .fetch_rice_breakdown(&self.from_date, &self.to_date)
            .await;
        self.load(result);
    }

    async fn retry(&mut self, client: &ReportClient) -> Result<(), InvalidTransition> {
        self.core.state.retry()?;
        let result = client
            .fetch_rice_breakdown(&self.from_date, &self.to_date)
            .await;
        self.load(result);
        Ok(())
    }
}

// ==========================================
// InventoryDistributionSection - 库存分布
// ==========================================

/// 库存分布过滤条件
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionFilter {
    pub from_date: String,
    pub to_date: String,
    pub warehouse: String,
}

impl Default for DistributionFilter {
    fn default() -> Self {
        Self {
            from_date: String::new(),
            to_date: String::new(),
            warehouse: "All".to_string(),
        }
    }
}

pub struct InventoryDistributionSection {
    core: SectionCore<Vec<InventoryBatch>>,
    filter: DistributionFilter,
}

impl InventoryDistributionSection {
    pub fn new(on_change: OnFilteredChange) -> Self {
        Self {
            core: SectionCore::new(SectionKey::InventoryDistribution, on_change),
            filter: DistributionFilter::default(),
        }
    }

    pub fn load(&mut self, result: ClientResult<Vec<InventoryBatch>>) {
        self.core.finish(result);
        self.core.publish(self.filtered());
    }

    /// 仓库下拉: All + 数据中出现的仓库
    pub fn warehouse_options(&self) -> Vec<String> {
        let mut options = vec!["All".to_string()];
        if let Some(rows) = self.core.state.data() {
            options.extend(distinct_values(rows.iter().map(|r| r.warehouse.as_str())));
        }
        options
    }

    pub fn set_filter(&mut self, filter: DistributionFilter) {
        self.filter = filter;
        self.core.publish(self.filtered());
    }

    fn rows(&self) -> Vec<InventoryBatch> {
        match self.core.state.data() {
            Some(rows) => {
                let filters = FilterSet::new()
                    .with(Predicate::range(
                        "date_received",
                        Some(self.filter.from_date.as_str()),
                        Some(self.filter.to_date.as_str()),
                    ))
                    .with(Predicate::equals("warehouse", &self.filter.warehouse));
                filter_rows(rows, &filters)
            }
            None => Vec::new(),
        }
    }
}

#[async_trait]
impl ReportSectionRenderer for InventoryDistributionSection {
    fn key(&self) -> SectionKey {
        SectionKey::InventoryDistribution
    }

    fn filtered(&self) -> SectionData {
        SectionData::InventoryDistribution(self.rows())
    }

    fn view(&self) -> SectionView {
        let meta = [
            filter_meta("filters.from_date", &self.filter.from_date),
            filter_meta("filters.to_date", &self.filter.to_date),
            filter_meta("filters.warehouse", &self.filter.warehouse),
        ]
        .into_iter()
        .flatten()
        .collect();
        let body = self
            .core
            .pending_body()
            .unwrap_or_else(|| table_body(&self.rows(), "report.inventoryDistribution.empty"));
        SectionView {
            key: SectionKey::InventoryDistribution,
            title: self.core.title(),
            meta,
            body,
        }
    }

    async fn mount(&mut self, client: &ReportClient) {
        self.core.start();
        let result = client.fetch_inventory_distribution().await;
        self.load(result);
    }

    async fn retry(&mut self, client: &ReportClient) -> Result<(), InvalidTransition> {
        self.core.state.retry()?;
        let result = client.fetch_inventory_distribution().await;
        self.load(result);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientError;
    use crate::report::subsets::FilteredSubsetStore;

    fn point(date: &str, rice: &str, qty: f64) -> ForecastPoint {
        ForecastPoint {
            date: date.to_string(),
            rice_type: rice.to_string(),
            forecast: qty,
        }
    }

    #[test]
    fn test_forecast_publishes_on_mount_and_each_filter_change() {
        let store = FilteredSubsetStore::new();
        let mut section = ForecastTableSection::new(store.subscriber());
        section.load(Ok(vec![
            point("2025-06-01", "A", 10.0),
            point("2025-06-02", "B", 12.0),
            point("2025-06-03", "A", 9.0),
        ]));
        assert_eq!(store.publish_count(SectionKey::ForecastTable), 1);
        assert_eq!(store.get(SectionKey::ForecastTable).len(), 3);

        section.set_filter(ForecastFilter {
            rice_type: "A".to_string(),
            from_date: "2025-06-02".to_string(),
            ..ForecastFilter::default()
        });
        assert_eq!(store.publish_count(SectionKey::ForecastTable), 2);
        assert_eq!(store.get(SectionKey::ForecastTable).len(), 1);
    }

    #[test]
    fn test_failed_fetch_publishes_empty() {
        let store = FilteredSubsetStore::new();
        let mut section = InventoryImpactSection::new(store.subscriber());
        section.load(Err(ClientError::Transport("connection refused".to_string())));

        assert!(store.get(SectionKey::InventoryImpact).is_empty());
        assert_eq!(store.publish_count(SectionKey::InventoryImpact), 1);
        assert!(matches!(section.view().body, SectionBody::Failed(_)));
    }

    #[test]
    fn test_failed_after_ready_clears_subset() {
        let store = FilteredSubsetStore::new();
        let mut section = SummarySection::new(store.subscriber());
        section.load(Ok(ReportSummary::default()));
        assert_eq!(store.get(SectionKey::Summary).len(), 1);

        section.load(Err(ClientError::Status {
            status: 500,
            message: "boom".to_string(),
        }));
        assert!(store.get(SectionKey::Summary).is_empty());
    }

    #[test]
    fn test_distribution_filter_and_options() {
        let store = FilteredSubsetStore::new();
        let mut section = InventoryDistributionSection::new(store.subscriber());
        let batch = |wh: &str, date: &str| InventoryBatch {
            id: None,
            rice_type: "R".to_string(),
            quantity: 5.0,
            warehouse: wh.to_string(),
            batch_no: "B1".to_string(),
            date_received: date.to_string(),
        };
        section.load(Ok(vec![
            batch("W1", "2025-01-01"),
            batch("W2", "2025-02-01"),
            batch("W1", "2025-03-01"),
        ]));
        assert_eq!(section.warehouse_options(), vec!["All", "W1", "W2"]);

        section.set_filter(DistributionFilter {
            from_date: "2025-01-15".to_string(),
            warehouse: "W1".to_string(),
            ..DistributionFilter::default()
        });
        assert_eq!(store.get(SectionKey::InventoryDistribution).len(), 1);
    }

    #[test]
    fn test_empty_ready_is_not_error() {
        let store = FilteredSubsetStore::new();
        let mut section = AccuracySection::new(store.subscriber());
        section.load(Ok(ModelInfo::default()));
        assert!(matches!(section.view().body, SectionBody::Empty(_)));
    }
}
