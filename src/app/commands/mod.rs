// ==========================================
// 车间生产跟踪系统 - 命令层
// ==========================================
// 职责: 与界面框架无关的命令入口
// 约定: 成功返回 JSON 字符串，失败返回 ErrorResponse JSON 字符串
// ==========================================

mod common;
mod config;
mod entry;
mod project;
mod report;

pub use common::{map_api_error, ErrorResponse, MessageResponse};
pub use config::{get_config, list_configs, update_config};
pub use entry::{delete_entry, get_entry_form_options, list_entries, record_entry, reset_entries};
pub use project::{
    add_material, add_project, delete_material, delete_project, list_materials, list_projects,
};
pub use report::{export_report_csv, export_weekly_report, get_weekly_report, ExportedFile};
