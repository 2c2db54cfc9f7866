// ==========================================
// 米厂报表客户端 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 分层: 内置默认值 -> 环境变量 -> 显式覆写（命令行参数）
// ==========================================

use serde_json::json;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::time::Duration;

/// 内置默认值
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_SALES_PAGE_SIZE: u32 = 8;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOCALE: &str = "en";
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// 本地存储目录名（位于系统数据目录下）
pub const APP_DATA_DIR: &str = "rice-mill-report";
pub const DEFAULT_DB_FILE: &str = "local_storage.db";

// ==========================================
// ConfigLayer - 配置来源
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLayer {
    Default,     // 内置默认值
    Environment, // 环境变量
    Override,    // 显式覆写
}

impl ConfigLayer {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigLayer::Default => "default",
            ConfigLayer::Environment => "env",
            ConfigLayer::Override => "override",
        }
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    env: HashMap<String, String>,
    overrides: HashMap<String, String>,
}

impl ConfigManager {
    /// 从当前进程环境变量创建
    pub fn from_env() -> Self {
        let env = config_keys::ALL
            .iter()
            .filter_map(|key| {
                std::env::var(config_keys::env_var(key))
                    .ok()
                    .map(|v| (key.to_string(), v))
            })
            .collect();
        Self {
            env,
            overrides: HashMap::new(),
        }
    }

    /// 用给定的环境变量表创建（测试用，避免修改进程环境）
    ///
    /// # 参数
    /// - vars: 环境变量名 -> 值，例如 `RICE_MILL_API_BASE_URL`
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> =
            vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        let env = config_keys::ALL
            .iter()
            .filter_map(|key| {
                vars.get(&config_keys::env_var(key))
                    .map(|v| (key.to_string(), v.clone()))
            })
            .collect();
        Self {
            env,
            overrides: HashMap::new(),
        }
    }

    /// 设置显式覆写（最高优先级）；空白值忽略
    pub fn set_override(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        if value.trim().is_empty() {
            return;
        }
        self.overrides.insert(key.to_string(), value);
    }

    /// 读取原始配置值及其来源
    ///
    /// # 返回
    /// - Some((值, 来源)): 覆写或环境变量中存在
    /// - None: 仅有内置默认值
    pub fn get_raw(&self, key: &str) -> Option<(&str, ConfigLayer)> {
        if let Some(v) = self.overrides.get(key) {
            return Some((v.as_str(), ConfigLayer::Override));
        }
        self.env
            .get(key)
            .map(|v| (v.as_str(), ConfigLayer::Environment))
    }

    fn source_of(&self, key: &str) -> ConfigLayer {
        self.get_raw(key)
            .map(|(_, layer)| layer)
            .unwrap_or(ConfigLayer::Default)
    }

    /// 解析数值配置；格式错误时告警并回退默认值
    fn get_parsed<T>(&self, key: &str, default: T, valid: impl Fn(&T) -> bool) -> T
    where
        T: std::str::FromStr + Copy,
    {
        match self.get_raw(key) {
            None => default,
            Some((raw, layer)) => match raw.trim().parse::<T>() {
                Ok(v) if valid(&v) => v,
                _ => {
                    tracing::warn!(
                        config_key = key,
                        raw_value = %raw,
                        source = layer.as_str(),
                        "配置值格式错误，使用默认值"
                    );
                    default
                }
            },
        }
    }

    // ===== 类型化读取 =====

    /// 后端基础地址（去掉末尾斜杠）
    pub fn api_base_url(&self) -> String {
        let raw = self
            .get_raw(config_keys::API_BASE_URL)
            .map(|(v, _)| v.trim())
            .unwrap_or(DEFAULT_API_BASE_URL);

        if !(raw.starts_with("http://") || raw.starts_with("https://")) {
            tracing::warn!(
                config_key = config_keys::API_BASE_URL,
                raw_value = %raw,
                "后端地址缺少 http(s) 协议，使用默认值"
            );
            return DEFAULT_API_BASE_URL.to_string();
        }
        raw.trim_end_matches('/').to_string()
    }

    /// 用户端销售表每页条数
    pub fn sales_page_size(&self) -> u32 {
        self.get_parsed(config_keys::SALES_PAGE_SIZE, DEFAULT_SALES_PAGE_SIZE, |v| *v > 0)
    }

    /// 单次请求超时
    pub fn request_timeout(&self) -> Duration {
        let secs = self.get_parsed(
            config_keys::REQUEST_TIMEOUT_SECS,
            DEFAULT_REQUEST_TIMEOUT_SECS,
            |v| *v > 0,
        );
        Duration::from_secs(secs)
    }

    /// 界面语言
    pub fn locale(&self) -> String {
        match self.get_raw(config_keys::LOCALE) {
            Some((raw, _)) if crate::i18n::is_supported_locale(raw.trim()) => raw.trim().to_string(),
            Some((raw, layer)) => {
                tracing::warn!(
                    config_key = config_keys::LOCALE,
                    raw_value = %raw,
                    source = layer.as_str(),
                    "不支持的语言，使用默认值"
                );
                DEFAULT_LOCALE.to_string()
            }
            None => DEFAULT_LOCALE.to_string(),
        }
    }

    /// 导出文件目录
    pub fn output_dir(&self) -> PathBuf {
        self.get_raw(config_keys::OUTPUT_DIR)
            .map(|(v, _)| PathBuf::from(v.trim()))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }

    /// 本地存储数据库路径
    pub fn db_path(&self) -> String {
        match self.get_raw(config_keys::DB_PATH) {
            Some((v, _)) => v.trim().to_string(),
            None => default_db_path(),
        }
    }

    /// 获取所有配置的快照（JSON格式）
    ///
    /// # 返回
    /// 每个键的生效值与来源
    pub fn get_config_snapshot(&self) -> serde_json::Value {
        let mut resolved: BTreeMap<&str, serde_json::Value> = BTreeMap::new();
        let values = [
            (config_keys::API_BASE_URL, json!(self.api_base_url())),
            (config_keys::SALES_PAGE_SIZE, json!(self.sales_page_size())),
            (
                config_keys::REQUEST_TIMEOUT_SECS,
                json!(self.request_timeout().as_secs()),
            ),
            (config_keys::LOCALE, json!(self.locale())),
            (
                config_keys::OUTPUT_DIR,
                json!(self.output_dir().display().to_string()),
            ),
            (config_keys::DB_PATH, json!(self.db_path())),
        ];

        for (key, value) in values {
            resolved.insert(
                key,
                json!({ "value": value, "source": self.source_of(key).as_str() }),
            );
        }
        json!(resolved)
    }
}

/// 默认数据库路径
///
/// 优先使用系统数据目录，不可用时退回当前目录
pub fn default_db_path() -> String {
    if let Some(data_dir) = dirs::data_dir() {
        let path = data_dir.join(APP_DATA_DIR).join(DEFAULT_DB_FILE);
        return path.to_string_lossy().to_string();
    }
    DEFAULT_DB_FILE.to_string()
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    pub const API_BASE_URL: &str = "api_base_url";
    pub const SALES_PAGE_SIZE: &str = "sales_page_size";
    pub const REQUEST_TIMEOUT_SECS: &str = "request_timeout_secs";
    pub const LOCALE: &str = "locale";
    pub const OUTPUT_DIR: &str = "output_dir";
    pub const DB_PATH: &str = "db_path";

    pub const ALL: [&str; 6] = [
        API_BASE_URL,
        SALES_PAGE_SIZE,
        REQUEST_TIMEOUT_SECS,
        LOCALE,
        OUTPUT_DIR,
        DB_PATH,
    ];

    /// 配置键对应的环境变量名
    pub fn env_var(key: &str) -> String {
        format!("RICE_MILL_{}", key.to_uppercase())
    }
}
