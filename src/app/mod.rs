// ==========================================
// 车间生产跟踪系统 - 应用层
// ==========================================
// 职责: 状态装配与命令入口,连接调用方与后端
// ==========================================

pub mod commands;
pub mod state;

// 重导出
pub use state::{get_default_db_path, AppState, DB_PATH_ENV};
