// ==========================================
// 车间生产跟踪系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod entry_repo;
pub mod error;
pub mod material_repo;
pub mod project_repo;

// 重导出核心仓储
pub use entry_repo::EntryRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use material_repo::MaterialRepository;
pub use project_repo::ProjectRepository;
