// ==========================================
// 米厂报表客户端 - 账户领域模型
// ==========================================
// 用户账户与管理员账户结构相同，分属两个集合
// 后端列表不返回密码；变更后重新拉取整表
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::row::{FieldAccess, FieldValue, TabularRow};
use crate::domain::types::Role;

/// 新建用户账户的默认岗位
pub const DEFAULT_USER_ROLE: &str = "Staff";
/// 管理员岗位（/admins 只返回这三类）
pub const ADMIN_ROLES: [&str; 3] = ["Admin", "Super Admin", "Moderator"];

// ==========================================
// Account - 账户
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "fullName", default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    /// 岗位名称（Staff、Admin、Super Admin 等），与登录角色无关
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub bio: String,
    #[serde(rename = "profilePic", default)]
    pub profile_pic: String,
}

impl FieldAccess for Account {
    fn field(&self, name: &str) -> Option<FieldValue> {
        let text = match name {
            "full_name" => &self.full_name,
            "email" => &self.email,
            "username" => &self.username,
            "role" => &self.role,
            "phone" => &self.phone,
            _ => return None,
        };
        Some(FieldValue::Text(text.clone()))
    }
}

impl TabularRow for Account {
    fn headers() -> &'static [&'static str] {
        &["ID", "Full Name", "Username", "Email", "Role", "Phone"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone().unwrap_or_default(),
            self.full_name.clone(),
            self.username.clone(),
            self.email.clone(),
            self.role.clone(),
            self.phone.clone(),
        ]
    }
}

// ==========================================
// AccountInput - 新增/更新表单
// ==========================================
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AccountInput {
    pub full_name: String,
    pub email: String,
    pub username: String,
    /// 更新时留空表示不修改密码
    pub password: String,
    pub confirm_password: String,
    pub role: String,
    pub phone: String,
    pub bio: String,
}

impl AccountInput {
    /// 表单字段（后端按 Form 接收）
    ///
    /// # 参数
    /// - kind: 账户所属集合；管理员更新额外携带 confirmPassword
    /// - updating: 更新时空密码不下发
    pub fn form_fields(&self, kind: Role, updating: bool) -> Vec<(String, String)> {
        let mut fields = vec![
            ("fullName", self.full_name.trim()),
            ("email", self.email.trim()),
            ("username", self.username.trim()),
        ];
        if !(updating && self.password.is_empty()) {
            fields.push(("password", self.password.as_str()));
            if updating && kind == Role::Admin {
                fields.push(("confirmPassword", self.confirm_password.as_str()));
            }
        }
        fields.push(("role", self.role.trim()));
        fields.push(("phone", self.phone.trim()));
        fields.push(("bio", self.bio.trim()));

        fields
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

/// 账户集合的接口路径
pub fn collection_path(kind: Role) -> &'static str {
    match kind {
        Role::User => "/users",
        Role::Admin => "/admins",
    }
}

pub fn add_path(kind: Role) -> &'static str {
    match kind {
        Role::User => "/add-user",
        Role::Admin => "/add-admin",
    }
}

pub fn update_path(kind: Role, id: &str) -> String {
    match kind {
        Role::User => format!("/update-user/{}", id),
        Role::Admin => format!("/update-admin/{}", id),
    }
}

pub fn delete_path(kind: Role, id: &str) -> String {
    match kind {
        Role::User => format!("/delete-user/{}", id),
        Role::Admin => format!("/delete-admin/{}", id),
    }
}
