// ==========================================
// 米厂报表客户端 - 提交前校验
// ==========================================
// 职责: 本地校验失败时直接返回 ValidationError，不发任何请求
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::account::AccountInput;
use crate::domain::inventory::InventoryRecordInput;
use crate::domain::row::parse_iso_date;
use crate::domain::sales::{ManualEntry, SalesRecordUpdate};
use crate::domain::types::is_known_rice_type;

/// 密码最小长度
pub const MIN_PASSWORD_LEN: usize = 6;

pub fn validate_non_blank(field: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::ValidationError(format!("{} 不能为空", field)));
    }
    Ok(())
}

/// YYYY-MM-DD
pub fn validate_iso_date(field: &str, value: &str) -> ApiResult<()> {
    validate_non_blank(field, value)?;
    if parse_iso_date(value).is_none() {
        return Err(ApiError::ValidationError(format!(
            "{} 日期格式无效: {}（应为 YYYY-MM-DD）",
            field,
            value.trim()
        )));
    }
    Ok(())
}

/// 可选日期区间: 空白表示不限；两端都给出时 from <= to
pub fn validate_date_range(from_date: &str, to_date: &str) -> ApiResult<()> {
    if !from_date.trim().is_empty() {
        validate_iso_date("from_date", from_date)?;
    }
    if !to_date.trim().is_empty() {
        validate_iso_date("to_date", to_date)?;
    }
    if let (Some(from), Some(to)) = (parse_iso_date(from_date), parse_iso_date(to_date)) {
        if from > to {
            return Err(ApiError::ValidationError(format!(
                "起始日期 {} 晚于结束日期 {}",
                from, to
            )));
        }
    }
    Ok(())
}

pub fn validate_rice_type(value: &str) -> ApiResult<()> {
    validate_non_blank("rice_type", value)?;
    if !is_known_rice_type(value.trim()) {
        return Err(ApiError::ValidationError(format!("未知米种: {}", value.trim())));
    }
    Ok(())
}

pub fn validate_non_negative(field: &str, value: f64) -> ApiResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ApiError::ValidationError(format!(
            "{} 必须是非负数: {}",
            field, value
        )));
    }
    Ok(())
}

/// 两次输入一致且长度不少于 6
pub fn validate_password_reset(password: &str, confirm: &str) -> ApiResult<()> {
    if password != confirm {
        return Err(ApiError::ValidationError("两次输入的密码不一致".to_string()));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::ValidationError(format!(
            "密码长度至少 {} 位",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

/// 闭店记录不要求米种与数量
pub fn validate_manual_entry(entry: &ManualEntry) -> ApiResult<()> {
    validate_iso_date("date", &entry.date)?;
    if entry.closed {
        return Ok(());
    }
    validate_rice_type(&entry.rice_type)?;
    validate_non_negative("quantity_kg", entry.quantity_kg)?;
    validate_non_negative("price_per_kg", entry.price_per_kg)?;
    Ok(())
}

/// 至少一个字段，且均为非负数
pub fn validate_sales_update(update: &SalesRecordUpdate) -> ApiResult<()> {
    if update.is_empty() {
        return Err(ApiError::ValidationError(
            "至少需要更新 quantity_kg / gross_amount / price_per_kg 之一".to_string(),
        ));
    }
    let fields = [
        ("quantity_kg", update.quantity_kg),
        ("gross_amount", update.gross_amount),
        ("price_per_kg", update.price_per_kg),
    ];
    for (field, value) in fields {
        if let Some(v) = value {
            validate_non_negative(field, v)?;
        }
    }
    Ok(())
}

pub fn validate_inventory_input(input: &InventoryRecordInput) -> ApiResult<()> {
    validate_rice_type(&input.rice_type)?;
    if input.quantity < 0 {
        return Err(ApiError::ValidationError(format!(
            "quantity 必须是非负数: {}",
            input.quantity
        )));
    }
    validate_non_blank("warehouse", &input.warehouse)?;
    validate_non_blank("batch_no", &input.batch_no)?;
    validate_iso_date("date_received", &input.date_received)?;
    Ok(())
}

/// 只检查 local@domain 形态
pub fn validate_email(value: &str) -> ApiResult<()> {
    validate_non_blank("email", value)?;
    let trimmed = value.trim();
    let valid = match trimmed.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if !valid || trimmed.contains(char::is_whitespace) {
        return Err(ApiError::ValidationError(format!("邮箱格式无效: {}", trimmed)));
    }
    Ok(())
}

/// 新增时密码必填；更新时留空表示不修改
pub fn validate_account_input(input: &AccountInput, updating: bool) -> ApiResult<()> {
    validate_non_blank("full_name", &input.full_name)?;
    validate_email(&input.email)?;
    validate_non_blank("username", &input.username)?;
    validate_non_blank("role", &input.role)?;
    if updating && input.password.is_empty() && input.confirm_password.is_empty() {
        return Ok(());
    }
    validate_password_reset(&input.password, &input.confirm_password)
}
