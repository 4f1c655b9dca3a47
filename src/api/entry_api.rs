// ==========================================
// 车间生产跟踪系统 - 生产录入 API
// ==========================================
// 职责: 录入生产数据、查询、按 ID 删除、整表清空
// 红线: 需求数量在录入时快照，完成率在录入时计算
// ==========================================

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::{require_name, require_non_negative};
use crate::domain::entry::{NewProductionEntry, ProductionEntry};
use crate::domain::types::ProcessStep;
use crate::engine::completion::completion_percentage;
use crate::i18n::t_with_args;
use crate::repository::{EntryRepository, MaterialRepository};

// ==========================================
// RecordEntryRequest - 录入请求
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordEntryRequest {
    pub project_name: String,
    pub material_name: String,
    pub produced_quantity: i64,
    pub process: ProcessStep,
}

// ==========================================
// EntryApi - 生产录入 API
// ==========================================
pub struct EntryApi {
    entry_repo: Arc<EntryRepository>,
    material_repo: Arc<MaterialRepository>,
}

impl EntryApi {
    pub fn new(entry_repo: Arc<EntryRepository>, material_repo: Arc<MaterialRepository>) -> Self {
        Self {
            entry_repo,
            material_repo,
        }
    }

    /// 录入一条生产数据
    ///
    /// # 参数
    /// - request: 项目、材料、生产数量、工序
    /// - today: 录入日期（调用方传入系统日期）
    ///
    /// # 返回
    /// - Ok(ProductionEntry): 已写入的录入
    /// - Err(InvalidInput): 项目/材料为空或生产数量为负
    ///
    /// # 说明
    /// - 材料不存在时需求数量按 0 记录，完成率为 0
    pub fn record_entry(
        &self,
        request: RecordEntryRequest,
        today: NaiveDate,
    ) -> ApiResult<ProductionEntry> {
        let project_name = require_name("fields.project", &request.project_name)?;
        let material_name = require_name("fields.material", &request.material_name)?;
        let produced_quantity = require_non_negative("fields.produced_quantity", request.produced_quantity)?;

        let required_quantity = match self
            .material_repo
            .find_required_quantity(&project_name, &material_name)?
        {
            Some(qty) => qty,
            None => {
                warn!(
                    project = %project_name,
                    material = %material_name,
                    "材料不存在，需求数量按 0 记录"
                );
                0
            }
        };

        let entry = NewProductionEntry {
            entry_date: today,
            material_name,
            produced_quantity,
            required_quantity,
            completion_percentage: completion_percentage(produced_quantity, required_quantity),
            process: request.process,
            project_name,
        };

        let saved = self.entry_repo.insert(entry)?;
        info!(
            id = saved.id,
            project = %saved.project_name,
            material = %saved.material_name,
            process = %saved.process,
            produced = saved.produced_quantity,
            required = saved.required_quantity,
            "生产录入已保存"
        );
        Ok(saved)
    }

    /// 查询全部录入
    pub fn list_entries(&self) -> ApiResult<Vec<ProductionEntry>> {
        let entries = self.entry_repo.list_all()?;
        debug!(count = entries.len(), "查询生产录入");
        Ok(entries)
    }

    /// 按 ID 删除录入
    ///
    /// # 返回
    /// - Ok(()): 删除成功
    /// - Err(NotFound): id 不存在
    pub fn delete_entry(&self, id: i64) -> ApiResult<()> {
        let rows = self.entry_repo.delete_by_id(id)?;
        if rows == 0 {
            return Err(ApiError::NotFound(t_with_args(
                "errors.entry_not_found",
                &[("id", id.to_string().as_str())],
            )));
        }
        info!(id, "生产录入已删除");
        Ok(())
    }

    /// 清空全部录入（项目和材料不受影响）
    ///
    /// # 返回
    /// - Ok(usize): 删除条数
    pub fn reset_entries(&self) -> ApiResult<usize> {
        let rows = self.entry_repo.delete_all()?;
        warn!(deleted = rows, "生产录入表已清空");
        Ok(rows)
    }
}
