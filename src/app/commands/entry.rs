use crate::api::RecordEntryRequest;
use crate::app::state::AppState;
use crate::i18n::t_with_args;

use super::common::{map_api_error, message_json, parse_process, resolve_today, to_json};

// ==========================================
// 生产录入相关命令
// ==========================================

/// 录入生产数据
///
/// 录入前检查参考数据，缺少项目/材料时返回 MISSING_REFERENCE_DATA
pub fn record_entry(
    state: &AppState,
    project_name: &str,
    material_name: &str,
    produced_quantity: i64,
    process: &str,
    today: Option<&str>,
) -> Result<String, String> {
    let process = parse_process(process)?;
    let today = resolve_today(today)?;

    state
        .project_api
        .ensure_reference_data(project_name)
        .map_err(map_api_error)?;

    let request = RecordEntryRequest {
        project_name: project_name.to_string(),
        material_name: material_name.to_string(),
        produced_quantity,
        process,
    };
    let entry = state
        .entry_api
        .record_entry(request, today)
        .map_err(map_api_error)?;

    let message = t_with_args("entry.recorded", &[("material", entry.material_name.as_str())]);
    message_json(message, entry)
}

/// 查询全部录入
pub fn list_entries(state: &AppState) -> Result<String, String> {
    let result = state.entry_api.list_entries().map_err(map_api_error)?;
    to_json(&result)
}

/// 按 ID 删除录入
pub fn delete_entry(state: &AppState, id: i64) -> Result<String, String> {
    state.entry_api.delete_entry(id).map_err(map_api_error)?;

    let message = t_with_args("entry.deleted", &[("id", id.to_string().as_str())]);
    message_json(message, serde_json::json!({ "id": id }))
}

/// 清空全部录入
pub fn reset_entries(state: &AppState) -> Result<String, String> {
    let deleted = state.entry_api.reset_entries().map_err(map_api_error)?;

    let message = t_with_args("entry.reset", &[("count", deleted.to_string().as_str())]);
    message_json(message, serde_json::json!({ "deleted": deleted }))
}

/// 录入表单选项
pub fn get_entry_form_options(
    state: &AppState,
    selected_project: Option<&str>,
) -> Result<String, String> {
    let result = state
        .project_api
        .entry_form_options(selected_project)
        .map_err(map_api_error)?;
    to_json(&result)
}
