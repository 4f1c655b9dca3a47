// ==========================================
// 车间生产跟踪系统 - 引擎层
// ==========================================
// 职责: 实现完成率规则与周报汇总,不拼 SQL
// ==========================================

pub mod aggregation;
pub mod completion;

// 重导出核心引擎
pub use aggregation::AggregationEngine;
pub use completion::{completion_percentage, ZERO_REQUIRED_PERCENTAGE};
