// ==========================================
// 米厂报表客户端 - 领域类型定义
// ==========================================
// 职责: 角色、排序方向、闭店过滤、报表分区、导出格式
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 米种目录 (Rice Type)
// ==========================================
// 前端下拉框使用的固定米种列表（等级 × 包装规格）
pub const RICE_TYPES: [&str; 11] = [
    "SIERRA RED RAW RICE -5KG",
    "SIERRA RED RAW RICE -10KG",
    "SIERRA RED RAW RICE -25KG",
    "SIERRA WHITE BASMATHI RICE -5KG",
    "SIERRA WHITE BASMATHI RICE -25KG",
    "SIERRA WHITE RAW RICE -5KG",
    "SIERRA WHITE RAW RICE -10KG",
    "SIERRA WHITE RAW RICE -25KG",
    "SAUMYA WHITE NADU RICE 5KG",
    "SAUMYA WHITE NADU RICE 10KG",
    "SAUMYA WHITE NADU RICE 25KG",
];

/// 判断是否为已知米种
pub fn is_known_rice_type(value: &str) -> bool {
    RICE_TYPES.iter().any(|t| *t == value)
}

/// 过滤值是否等价于"不限"（空白或 All）
pub fn is_unconstrained(value: &str) -> bool {
    let v = value.trim();
    v.is_empty() || v.eq_ignore_ascii_case("all")
}

// ==========================================
// 角色 (Role)
// ==========================================
// 管理员与普通用户使用各自独立的 bearer 凭证
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// 本地存储中的凭证键
    pub fn token_key(&self) -> &'static str {
        match self {
            Role::User => "user_token",
            Role::Admin => "admin_token",
        }
    }

    /// 登录接口路径
    pub fn login_path(&self) -> &'static str {
        match self {
            Role::User => "/user-login",
            Role::Admin => "/admin-login",
        }
    }

    /// 重置密码接口路径
    pub fn reset_password_path(&self) -> &'static str {
        match self {
            Role::User => "/reset-password",
            Role::Admin => "/admin-reset-password",
        }
    }

    /// 忘记密码（发送重置邮件）接口路径
    pub fn forgot_password_path(&self) -> &'static str {
        match self {
            Role::User => "/forgot-password",
            Role::Admin => "/admin-forgot-password",
        }
    }

    pub fn all() -> [Role; 2] {
        [Role::User, Role::Admin]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(format!("未知角色: {}", other)),
        }
    }
}

// ==========================================
// 排序方向 (Sort Direction)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// 反转方向
    pub fn toggled(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            other => Err(format!("未知排序方向: {}", other)),
        }
    }
}

// ==========================================
// 闭店过滤 (Closed Filter)
// ==========================================
// 序列化格式与后端查询参数一致: All / Closed / Open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClosedFilter {
    #[default]
    All,
    Closed,
    Open,
}

impl ClosedFilter {
    /// 作为查询参数的值；All 不下发
    pub fn as_query_value(&self) -> Option<&'static str> {
        match self {
            ClosedFilter::All => None,
            ClosedFilter::Closed => Some("Closed"),
            ClosedFilter::Open => Some("Open"),
        }
    }

    /// 本地判断记录是否满足过滤
    pub fn matches(&self, closed: bool) -> bool {
        match self {
            ClosedFilter::All => true,
            ClosedFilter::Closed => closed,
            ClosedFilter::Open => !closed,
        }
    }
}

impl fmt::Display for ClosedFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClosedFilter::All => write!(f, "All"),
            ClosedFilter::Closed => write!(f, "Closed"),
            ClosedFilter::Open => write!(f, "Open"),
        }
    }
}

impl FromStr for ClosedFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(ClosedFilter::All),
            "closed" => Ok(ClosedFilter::Closed),
            "open" => Ok(ClosedFilter::Open),
            other => Err(format!("未知闭店过滤值: {}", other)),
        }
    }
}

// ==========================================
// 报表分区 (Section Key)
// ==========================================
// 声明顺序即导出时的规范顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKey {
    Summary,
    Accuracy,
    ForecastTable,
    InventoryImpact,
    RiceBreakdown,
    InventoryDistribution,
}

impl SectionKey {
    /// 规范导出顺序
    pub const CANONICAL_ORDER: [SectionKey; 6] = [
        SectionKey::Summary,
        SectionKey::Accuracy,
        SectionKey::ForecastTable,
        SectionKey::InventoryImpact,
        SectionKey::RiceBreakdown,
        SectionKey::InventoryDistribution,
    ];

    pub fn as_key(&self) -> &'static str {
        match self {
            SectionKey::Summary => "summary",
            SectionKey::Accuracy => "accuracy",
            SectionKey::ForecastTable => "forecastTable",
            SectionKey::InventoryImpact => "inventoryImpact",
            SectionKey::RiceBreakdown => "riceBreakdown",
            SectionKey::InventoryDistribution => "inventoryDistribution",
        }
    }

    /// 勾选框标签的 i18n 键
    pub fn label_key(&self) -> String {
        format!("report.{}.label", self.as_key())
    }

    /// 导出标题的 i18n 键
    pub fn title_key(&self) -> String {
        format!("report.{}.title", self.as_key())
    }

    /// 分区说明的 i18n 键
    pub fn description_key(&self) -> String {
        format!("report.{}.description", self.as_key())
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_key())
    }
}

impl FromStr for SectionKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "summary" => Ok(SectionKey::Summary),
            "accuracy" => Ok(SectionKey::Accuracy),
            "forecasttable" | "forecast" => Ok(SectionKey::ForecastTable),
            "inventoryimpact" | "impact" => Ok(SectionKey::InventoryImpact),
            "ricebreakdown" | "breakdown" => Ok(SectionKey::RiceBreakdown),
            "inventorydistribution" | "distribution" => Ok(SectionKey::InventoryDistribution),
            _ => Err(format!("未知报表分区: {}", s.trim())),
        }
    }
}

// ==========================================
// 导出格式 (Export Format)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Pdf,
    Csv,
}

impl ExportFormat {
    pub fn file_extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Csv => "csv",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(format!("不支持的导出格式: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_key_canonical_order() {
        let mut shuffled = vec![
            SectionKey::InventoryDistribution,
            SectionKey::Summary,
            SectionKey::RiceBreakdown,
            SectionKey::Accuracy,
        ];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![
                SectionKey::Summary,
                SectionKey::Accuracy,
                SectionKey::RiceBreakdown,
                SectionKey::InventoryDistribution,
            ]
        );
    }

    #[test]
    fn test_section_key_parse() {
        assert_eq!("forecastTable".parse::<SectionKey>(), Ok(SectionKey::ForecastTable));
        assert_eq!("inventory-impact".parse::<SectionKey>(), Ok(SectionKey::InventoryImpact));
        assert_eq!("rice_breakdown".parse::<SectionKey>(), Ok(SectionKey::RiceBreakdown));
        assert!("charts".parse::<SectionKey>().is_err());
    }

    #[test]
    fn test_closed_filter() {
        assert_eq!("".parse::<ClosedFilter>(), Ok(ClosedFilter::All));
        assert_eq!(ClosedFilter::All.as_query_value(), None);
        assert!(ClosedFilter::Closed.matches(true));
        assert!(!ClosedFilter::Open.matches(true));
    }

    #[test]
    fn test_role_token_keys_are_distinct() {
        assert_eq!(Role::User.token_key(), "user_token");
        assert_eq!(Role::Admin.token_key(), "admin_token");
        assert_eq!(Role::User.forgot_password_path(), "/forgot-password");
        assert_eq!(Role::Admin.forgot_password_path(), "/admin-forgot-password");
    }

    #[test]
    fn test_unconstrained_values() {
        assert!(is_unconstrained(""));
        assert!(is_unconstrained("  "));
        assert!(is_unconstrained("All"));
        assert!(!is_unconstrained("Closed"));
    }
}
