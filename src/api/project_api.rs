// ==========================================
// 车间生产跟踪系统 - 项目与材料管理 API
// ==========================================
// 职责: 项目/材料增删查，录入表单选项
// 约束: 删除项目级联删除其材料，不触及历史生产录入
// ==========================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::{require_name, require_non_negative};
use crate::domain::project::{Material, Project};
use crate::domain::types::ProcessStep;
use crate::i18n::{t, t_with_args};
use crate::repository::{MaterialRepository, ProjectRepository, RepositoryError};

// ==========================================
// EntryFormOptions - 录入表单选项
// ==========================================
/// 录入表单所需的下拉框数据
///
/// form_enabled=false 时表单应禁用，warning 给出原因
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryFormOptions {
    pub projects: Vec<String>,
    pub selected_project: Option<String>,
    pub materials: Vec<Material>,
    pub processes: Vec<String>,
    pub form_enabled: bool,
    pub warning: Option<String>,
}

// ==========================================
// ProjectApi - 项目与材料管理 API
// ==========================================
pub struct ProjectApi {
    project_repo: Arc<ProjectRepository>,
    material_repo: Arc<MaterialRepository>,
}

impl ProjectApi {
    pub fn new(
        project_repo: Arc<ProjectRepository>,
        material_repo: Arc<MaterialRepository>,
    ) -> Self {
        Self {
            project_repo,
            material_repo,
        }
    }

    // ==========================================
    // 项目
    // ==========================================

    /// 新增项目
    ///
    /// # 返回
    /// - Err(InvalidInput): 项目名为空
    /// - Err(AlreadyExists): 项目名重复
    pub fn add_project(&self, project_name: &str) -> ApiResult<Project> {
        let project_name = require_name("fields.project", project_name)?;

        let id = self
            .project_repo
            .insert(&project_name)
            .map_err(|e| match e {
                RepositoryError::UniqueConstraintViolation(_) => ApiError::AlreadyExists(
                    t_with_args("errors.project_exists", &[("project", project_name.as_str())]),
                ),
                other => other.into(),
            })?;

        info!(id, project = %project_name, "项目已添加");
        Ok(Project { id, project_name })
    }

    /// 查询全部项目
    pub fn list_projects(&self) -> ApiResult<Vec<Project>> {
        Ok(self.project_repo.list_all()?)
    }

    /// 删除项目及其材料
    ///
    /// # 返回
    /// - Ok(usize): 同时删除的材料数
    /// - Err(NotFound): 项目不存在
    ///
    /// # 说明
    /// - 引用该项目名的生产录入保留不动（历史事实）
    pub fn delete_project(&self, project_name: &str) -> ApiResult<usize> {
        let project_name = require_name("fields.project", project_name)?;

        let (projects_deleted, materials_deleted) =
            self.project_repo.delete_with_materials(&project_name)?;
        if projects_deleted == 0 {
            return Err(project_not_found(&project_name));
        }

        info!(
            project = %project_name,
            materials_deleted,
            "项目已删除（生产录入保留）"
        );
        Ok(materials_deleted)
    }

    // ==========================================
    // 材料
    // ==========================================

    /// 新增材料
    ///
    /// # 返回
    /// - Err(InvalidInput): 材料名为空或需求数量为负
    /// - Err(NotFound): 项目不存在
    /// - Err(AlreadyExists): 项目内材料名重复
    pub fn add_material(
        &self,
        project_name: &str,
        material_name: &str,
        required_quantity: i64,
    ) -> ApiResult<Material> {
        let project_name = require_name("fields.project", project_name)?;
        let material_name = require_name("fields.material", material_name)?;
        let required_quantity = require_non_negative("fields.required_quantity", required_quantity)?;

        if self.project_repo.find_by_name(&project_name)?.is_none() {
            return Err(project_not_found(&project_name));
        }

        let id = self
            .material_repo
            .insert(&project_name, &material_name, required_quantity)
            .map_err(|e| match e {
                RepositoryError::UniqueConstraintViolation(_) => ApiError::AlreadyExists(
                    t_with_args(
                        "errors.material_exists",
                        &[
                            ("project", project_name.as_str()),
                            ("material", material_name.as_str()),
                        ],
                    ),
                ),
                other => other.into(),
            })?;

        info!(
            id,
            project = %project_name,
            material = %material_name,
            required_quantity,
            "材料已添加"
        );
        Ok(Material {
            id,
            project_name,
            material_name,
            required_quantity,
        })
    }

    /// 查询项目下的材料
    pub fn list_materials(&self, project_name: &str) -> ApiResult<Vec<Material>> {
        Ok(self.material_repo.list_by_project(project_name.trim())?)
    }

    /// 查询全部材料
    pub fn list_all_materials(&self) -> ApiResult<Vec<Material>> {
        Ok(self.material_repo.list_all()?)
    }

    /// 删除单个材料
    ///
    /// # 返回
    /// - Err(NotFound): (项目, 材料) 不存在
    pub fn delete_material(&self, project_name: &str, material_name: &str) -> ApiResult<()> {
        let project_name = require_name("fields.project", project_name)?;
        let material_name = require_name("fields.material", material_name)?;

        let rows = self.material_repo.delete(&project_name, &material_name)?;
        if rows == 0 {
            return Err(ApiError::NotFound(t_with_args(
                "errors.material_not_found",
                &[
                    ("project", project_name.as_str()),
                    ("material", material_name.as_str()),
                ],
            )));
        }

        info!(project = %project_name, material = %material_name, "材料已删除");
        Ok(())
    }

    // ==========================================
    // 录入表单
    // ==========================================

    /// 录入表单选项
    ///
    /// # 参数
    /// - selected_project: 当前选择的项目，None 或不存在时取第一个项目
    ///
    /// # 说明
    /// - 没有项目、或所选项目没有材料时，form_enabled=false 并给出提示
    pub fn entry_form_options(&self, selected_project: Option<&str>) -> ApiResult<EntryFormOptions> {
        let projects: Vec<String> = self
            .project_repo
            .list_all()?
            .into_iter()
            .map(|p| p.project_name)
            .collect();
        let processes = ProcessStep::labels()
            .into_iter()
            .map(str::to_string)
            .collect();

        let selected = selected_project
            .map(str::trim)
            .filter(|name| projects.iter().any(|p| p.as_str() == *name))
            .map(str::to_string)
            .or_else(|| projects.first().cloned());

        let Some(selected) = selected else {
            debug!("尚无项目，录入表单禁用");
            return Ok(EntryFormOptions {
                projects,
                selected_project: None,
                materials: Vec::new(),
                processes,
                form_enabled: false,
                warning: Some(t("form.no_projects")),
            });
        };

        let materials = self.material_repo.list_by_project(&selected)?;
        let (form_enabled, warning) = if materials.is_empty() {
            (
                false,
                Some(t_with_args("form.no_materials", &[("project", selected.as_str())])),
            )
        } else {
            (true, None)
        };

        Ok(EntryFormOptions {
            projects,
            selected_project: Some(selected),
            materials,
            processes,
            form_enabled,
            warning,
        })
    }

    /// 录入前检查参考数据是否齐全
    ///
    /// # 返回
    /// - Err(MissingReferenceData): 无项目或项目下无材料
    /// - Err(NotFound): 项目不存在
    pub fn ensure_reference_data(&self, project_name: &str) -> ApiResult<()> {
        let options = self.entry_form_options(Some(project_name))?;
        match options.selected_project.as_deref() {
            None => return Err(ApiError::MissingReferenceData(t("form.no_projects"))),
            Some(selected) if selected != project_name.trim() => {
                return Err(project_not_found(project_name.trim()));
            }
            Some(_) => {}
        }
        if let Some(warning) = options.warning {
            return Err(ApiError::MissingReferenceData(warning));
        }
        Ok(())
    }
}

fn project_not_found(project_name: &str) -> ApiError {
    ApiError::NotFound(t_with_args(
        "errors.project_not_found",
        &[("project", project_name)],
    ))
}
