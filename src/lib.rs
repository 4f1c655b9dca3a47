// ==========================================
// 车间生产跟踪系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 生产录入 + 周完成率汇总报表
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 完成率与汇总规则
pub mod engine;

// 导出层 - xlsx / csv
pub mod exporter;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA/建表）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 状态装配与命令
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::ProcessStep;

// 领域实体
pub use domain::{
    DetailReportRow, Material, NewProductionEntry, ProcessReportRow, ProductionEntry, Project,
    ReportWindow, WeeklyReport,
};

// 引擎
pub use engine::AggregationEngine;

// 导出
pub use exporter::{ExportArtifact, ReportExporter, ReportView};

// API
pub use api::{EntryApi, ProjectApi, ReportApi};

// 应用
pub use app::AppState;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "车间生产跟踪系统";
