// ==========================================
// 车间生产跟踪系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供命令层调用
// ==========================================

pub mod entry_api;
pub mod error;
pub mod project_api;
pub mod report_api;
pub mod validator;

// 重导出核心类型
pub use entry_api::{EntryApi, RecordEntryRequest};
pub use error::{ApiError, ApiResult};
pub use project_api::{EntryFormOptions, ProjectApi};
pub use report_api::ReportApi;
