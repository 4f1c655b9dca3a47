// ==========================================
// 车间生产跟踪系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod entry;
pub mod project;
pub mod report;
pub mod types;

// 重导出核心类型
pub use entry::{NewProductionEntry, ProductionEntry};
pub use project::{Material, Project};
pub use report::{DetailReportRow, ProcessReportRow, ReportWindow, WeeklyReport};
pub use types::{ProcessStep, UnknownProcessStep};
