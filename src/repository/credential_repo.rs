// ==========================================
// 米厂报表客户端 - 凭证仓储
// ==========================================
// 职责: bearer 凭证的唯一读写入口 (get/set/clear)
// 约束: 只保存 user_token / admin_token 两个键；生命周期止于显式登出
// ==========================================

use crate::domain::types::Role;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::Local;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// CredentialRepository - 凭证仓储
// ==========================================
// 红线: Repository 不做业务逻辑,只做数据映射
pub struct CredentialRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CredentialRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 读取角色凭证
    ///
    /// # 返回
    /// - `Ok(Some(token))`: 已登录
    /// - `Ok(None)`: 未登录
    pub fn get(&self, role: Role) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;
        let token = conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                params![role.token_key()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(token)
    }

    /// 写入角色凭证（覆盖旧值）
    pub fn set(&self, role: Role, token: &str) -> RepositoryResult<()> {
        if token.trim().is_empty() {
            return Err(RepositoryError::FieldValueError {
                field: role.token_key().to_string(),
                message: "凭证不能为空".to_string(),
            });
        }

        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO local_storage (key, value, updated_at) VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
            params![
                role.token_key(),
                token,
                Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
            ],
        )?;
        Ok(())
    }

    /// 清除角色凭证
    ///
    /// # 返回
    /// 是否确实删除了凭证
    pub fn clear(&self, role: Role) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let rows = conn.execute(
            "DELETE FROM local_storage WHERE key = ?1",
            params![role.token_key()],
        )?;
        Ok(rows > 0)
    }

    /// 持有凭证的角色
    pub fn authenticated_roles(&self) -> RepositoryResult<Vec<Role>> {
        let mut roles = Vec::new();
        for role in Role::all() {
            if self.get(role)?.is_some() {
                roles.push(role);
            }
        }
        Ok(roles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;

    fn repo() -> CredentialRepository {
        let conn = open_in_memory().unwrap();
        CredentialRepository::new(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn test_set_get_clear() {
        let repo = repo();
        assert_eq!(repo.get(Role::User).unwrap(), None);

        repo.set(Role::User, "tok-1").unwrap();
        repo.set(Role::User, "tok-2").unwrap();
        assert_eq!(repo.get(Role::User).unwrap().as_deref(), Some("tok-2"));
        assert_eq!(repo.get(Role::Admin).unwrap(), None);

        assert!(repo.clear(Role::User).unwrap());
        assert!(!repo.clear(Role::User).unwrap());
        assert_eq!(repo.get(Role::User).unwrap(), None);
    }

    #[test]
    fn test_roles_are_isolated() {
        let repo = repo();
        repo.set(Role::Admin, "admin-tok").unwrap();
        assert_eq!(repo.authenticated_roles().unwrap(), vec![Role::Admin]);
    }

    #[test]
    fn test_blank_token_rejected() {
        let repo = repo();
        assert!(repo.set(Role::User, "  ").is_err());
    }
}
