// ==========================================
// 米厂报表客户端 - 报表组合器
// ==========================================
// 职责: 维护分区勾选表，按规范顺序把已勾选且非空的分区组合成文档
// 状态机: Idle -> Composing -> Idle（同步执行，不可取消）
// 红线: 未勾选任何分区时拒绝导出
// ==========================================

use crate::domain::types::{ExportFormat, SectionKey};
use crate::export::error::{ExportError, ExportResult};
use crate::export::{csv_export, pdf};
use crate::i18n::t_in;
use crate::report::document::{ReportBlock, ReportDocument};
use crate::report::subsets::FilteredSubsetStore;
use std::collections::BTreeMap;

/// 内置 PDF 字体无法输出当前语言时使用的语言
pub const PDF_FALLBACK_LOCALE: &str = "en";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerState {
    Idle,
    Composing,
}

pub struct ReportComposer {
    selection: BTreeMap<SectionKey, bool>,
    state: ComposerState,
    locale: String,
}

impl ReportComposer {
    /// 初始全部未勾选
    pub fn new(locale: &str) -> Self {
        Self {
            selection: SectionKey::CANONICAL_ORDER
                .iter()
                .map(|k| (*k, false))
                .collect(),
            state: ComposerState::Idle,
            locale: locale.to_string(),
        }
    }

    pub fn state(&self) -> ComposerState {
        self.state
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn set_locale(&mut self, locale: &str) {
        self.locale = locale.to_string();
    }

    /// 切换勾选；返回切换后的值
    pub fn toggle(&mut self, key: SectionKey) -> bool {
        let entry = self.selection.entry(key).or_insert(false);
        *entry = !*entry;
        *entry
    }

    pub fn set(&mut self, key: SectionKey, selected: bool) {
        self.selection.insert(key, selected);
    }

    pub fn select_all(&mut self, selected: bool) {
        for value in self.selection.values_mut() {
            *value = selected;
        }
    }

    pub fn is_selected(&self, key: SectionKey) -> bool {
        self.selection.get(&key).copied().unwrap_or(false)
    }

    /// 已勾选分区（规范顺序）
    pub fn selected(&self) -> Vec<SectionKey> {
        SectionKey::CANONICAL_ORDER
            .iter()
            .copied()
            .filter(|k| self.is_selected(*k))
            .collect()
    }

    /// 导出按钮是否可用
    pub fn can_export(&self) -> bool {
        self.selection.values().any(|v| *v)
    }

    /// 组合文档
    ///
    /// # 返回
    /// - 未勾选任何分区: NothingSelected
    /// - 已勾选但过滤结果为空的分区不出现在文档中
    pub fn compose(&mut self, store: &FilteredSubsetStore) -> ExportResult<ReportDocument> {
        let locale = self.locale.clone();
        self.compose_in(store, &locale)
    }

    fn compose_in(&mut self, store: &FilteredSubsetStore, locale: &str) -> ExportResult<ReportDocument> {
        if !self.can_export() {
            return Err(ExportError::NothingSelected);
        }
        self.state = ComposerState::Composing;

        let mut document = ReportDocument::new(t_in(locale, "report.document_title", &[]));
        for key in self.selected() {
            let data = store.get(key);
            match ReportBlock::from_section(&data, locale) {
                Some(block) => document.blocks.push(block),
                None => tracing::debug!(section = %key, "分区无数据，跳过"),
            }
        }

        self.state = ComposerState::Idle;
        tracing::info!(
            selected = self.selected().len(),
            blocks = document.blocks.len(),
            "报表组合完成"
        );
        Ok(document)
    }

    /// 组合并写成指定格式的字节
    ///
    /// PDF 只有 WinAnsi 字体；标题等无法输出时以 PDF_FALLBACK_LOCALE 重新组合
    pub fn export(&mut self, store: &FilteredSubsetStore, format: ExportFormat) -> ExportResult<Vec<u8>> {
        let document = self.compose(store)?;
        match format {
            ExportFormat::Pdf if pdf::headings_encodable(&document) => Ok(pdf::write_report(&document)),
            ExportFormat::Pdf => {
                tracing::warn!(
                    locale = %self.locale,
                    fallback = PDF_FALLBACK_LOCALE,
                    "PDF 字体不支持当前语言，改用回退语言"
                );
                let document = self.compose_in(store, PDF_FALLBACK_LOCALE)?;
                Ok(pdf::write_report(&document))
            }
            ExportFormat::Csv => csv_export::write_report(&document),
        }
    }
}
