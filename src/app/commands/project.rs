use crate::app::state::AppState;
use crate::i18n::t_with_args;

use super::common::{map_api_error, message_json, to_json};

// ==========================================
// 项目与材料管理命令
// ==========================================

/// 新增项目
pub fn add_project(state: &AppState, project_name: &str) -> Result<String, String> {
    let project = state
        .project_api
        .add_project(project_name)
        .map_err(map_api_error)?;

    let message = t_with_args("project.added", &[("project", project.project_name.as_str())]);
    message_json(message, project)
}

/// 查询全部项目
pub fn list_projects(state: &AppState) -> Result<String, String> {
    let result = state.project_api.list_projects().map_err(map_api_error)?;
    to_json(&result)
}

/// 删除项目（级联删除材料，保留生产录入）
pub fn delete_project(state: &AppState, project_name: &str) -> Result<String, String> {
    let materials_deleted = state
        .project_api
        .delete_project(project_name)
        .map_err(map_api_error)?;

    let project_name = project_name.trim();
    let message = t_with_args(
        "project.deleted",
        &[
            ("project", project_name),
            ("count", materials_deleted.to_string().as_str()),
        ],
    );
    message_json(
        message,
        serde_json::json!({
            "project_name": project_name,
            "materials_deleted": materials_deleted,
        }),
    )
}

/// 新增材料
pub fn add_material(
    state: &AppState,
    project_name: &str,
    material_name: &str,
    required_quantity: i64,
) -> Result<String, String> {
    let material = state
        .project_api
        .add_material(project_name, material_name, required_quantity)
        .map_err(map_api_error)?;

    let message = t_with_args(
        "material.added",
        &[
            ("material", material.material_name.as_str()),
            ("project", material.project_name.as_str()),
        ],
    );
    message_json(message, material)
}

/// 查询材料，未指定项目时返回全部 (项目, 材料)
pub fn list_materials(state: &AppState, project_name: Option<&str>) -> Result<String, String> {
    let result = match project_name {
        Some(name) => state.project_api.list_materials(name),
        None => state.project_api.list_all_materials(),
    }
    .map_err(map_api_error)?;
    to_json(&result)
}

/// 删除单个材料
pub fn delete_material(
    state: &AppState,
    project_name: &str,
    material_name: &str,
) -> Result<String, String> {
    state
        .project_api
        .delete_material(project_name, material_name)
        .map_err(map_api_error)?;

    let (project_name, material_name) = (project_name.trim(), material_name.trim());
    let message = t_with_args(
        "material.deleted",
        &[("material", material_name), ("project", project_name)],
    );
    message_json(
        message,
        serde_json::json!({
            "project_name": project_name,
            "material_name": material_name,
        }),
    )
}
