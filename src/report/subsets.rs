// ==========================================
// 米厂报表客户端 - 分区过滤结果存储
// ==========================================
// 职责: 各分区按自己的键发布当前过滤结果，导出时读取
// 语义: 每个键 last-write-wins,无版本无 diff
// ==========================================

use crate::domain::forecast::{AccuracyMetric, ForecastPoint};
use crate::domain::inventory::{InventoryBatch, InventoryImpactRow};
use crate::domain::report::{ReportSummary, RiceBreakdownRow};
use crate::domain::types::SectionKey;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

// ==========================================
// SectionData - 单个分区的过滤结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum SectionData {
    Summary(Option<ReportSummary>),
    Accuracy(Vec<AccuracyMetric>),
    ForecastTable(Vec<ForecastPoint>),
    InventoryImpact(Vec<InventoryImpactRow>),
    RiceBreakdown(Vec<RiceBreakdownRow>),
    InventoryDistribution(Vec<InventoryBatch>),
}

impl SectionData {
    /// 指定分区的空结果
    pub fn empty(key: SectionKey) -> Self {
        match key {
            SectionKey::Summary => SectionData::Summary(None),
            SectionKey::Accuracy => SectionData::Accuracy(Vec::new()),
            SectionKey::ForecastTable => SectionData::ForecastTable(Vec::new()),
            SectionKey::InventoryImpact => SectionData::InventoryImpact(Vec::new()),
            SectionKey::RiceBreakdown => SectionData::RiceBreakdown(Vec::new()),
            SectionKey::InventoryDistribution => SectionData::InventoryDistribution(Vec::new()),
        }
    }

    pub fn key(&self) -> SectionKey {
        match self {
            SectionData::Summary(_) => SectionKey::Summary,
            SectionData::Accuracy(_) => SectionKey::Accuracy,
            SectionData::ForecastTable(_) => SectionKey::ForecastTable,
            SectionData::InventoryImpact(_) => SectionKey::InventoryImpact,
            SectionData::RiceBreakdown(_) => SectionKey::RiceBreakdown,
            SectionData::InventoryDistribution(_) => SectionKey::InventoryDistribution,
        }
    }

    /// 行数（汇总分区有数据时计为 1）
    pub fn len(&self) -> usize {
        match self {
            SectionData::Summary(s) => usize::from(s.is_some()),
            SectionData::Accuracy(v) => v.len(),
            SectionData::ForecastTable(v) => v.len(),
            SectionData::InventoryImpact(v) => v.len(),
            SectionData::RiceBreakdown(v) => v.len(),
            SectionData::InventoryDistribution(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 分区发布回调
pub type OnFilteredChange = Arc<dyn Fn(SectionData) + Send + Sync>;

/// 不关心发布结果时使用
pub fn discard() -> OnFilteredChange {
    Arc::new(|_| {})
}

// ==========================================
// FilteredSubsetStore - 按键保存最近一次发布
// ==========================================
#[derive(Default)]
pub struct FilteredSubsetStore {
    inner: Mutex<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    latest: BTreeMap<SectionKey, SectionData>,
    publish_counts: BTreeMap<SectionKey, usize>,
}

impl FilteredSubsetStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// 覆盖该分区的结果
    pub fn publish(&self, data: SectionData) {
        let key = data.key();
        tracing::debug!(section = %key, rows = data.len(), "分区过滤结果更新");
        if let Ok(mut inner) = self.inner.lock() {
            *inner.publish_counts.entry(key).or_insert(0) += 1;
            inner.latest.insert(key, data);
        } else {
            tracing::warn!(section = %key, "分区结果存储锁已损坏，丢弃本次发布");
        }
    }

    /// 读取该分区最近一次发布；未发布过返回空结果
    pub fn get(&self, key: SectionKey) -> SectionData {
        self.inner
            .lock()
            .ok()
            .and_then(|inner| inner.latest.get(&key).cloned())
            .unwrap_or_else(|| SectionData::empty(key))
    }

    /// 该分区累计发布次数
    pub fn publish_count(&self, key: SectionKey) -> usize {
        self.inner
            .lock()
            .ok()
            .and_then(|inner| inner.publish_counts.get(&key).copied())
            .unwrap_or(0)
    }

    /// 生成写入本存储的回调
    pub fn subscriber(self: &Arc<Self>) -> OnFilteredChange {
        let store = Arc::clone(self);
        Arc::new(move |data| store.publish(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(warehouse: &str) -> InventoryBatch {
        InventoryBatch {
            id: None,
            rice_type: "R".to_string(),
            quantity: 1.0,
            warehouse: warehouse.to_string(),
            batch_no: "B".to_string(),
            date_received: "2025-01-01".to_string(),
        }
    }

    #[test]
    fn test_last_write_wins() {
        let store = FilteredSubsetStore::new();
        let cb = store.subscriber();
        cb(SectionData::InventoryDistribution(vec![batch("W1"), batch("W2")]));
        cb(SectionData::InventoryDistribution(vec![batch("W2")]));

        assert_eq!(store.get(SectionKey::InventoryDistribution).len(), 1);
        assert_eq!(store.publish_count(SectionKey::InventoryDistribution), 2);
    }

    #[test]
    fn test_unpublished_is_empty() {
        let store = FilteredSubsetStore::new();
        assert!(store.get(SectionKey::Accuracy).is_empty());
        assert_eq!(store.get(SectionKey::Summary), SectionData::Summary(None));
    }
}
