// ==========================================
// 米厂报表客户端 - 本地存储层
// ==========================================
// 职责: 在本地持久化 bearer 凭证，屏蔽数据库细节
// 约束: 所有查询使用参数化
// ==========================================

pub mod credential_repo;
pub mod error;

pub use credential_repo::CredentialRepository;
pub use error::{RepositoryError, RepositoryResult};
