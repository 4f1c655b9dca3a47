// ==========================================
// 车间生产跟踪系统 - 生产录入领域模型
// ==========================================
// 红线: 录入为不可变事实记录，只允许按 ID 删除或整表清空
// 红线: required_quantity 为录入时刻的快照，不随材料定义变化
// ==========================================

use crate::domain::types::ProcessStep;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// ProductionEntry - 生产录入
// ==========================================
// 对齐: entries 表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionEntry {
    pub id: i64,
    pub entry_date: NaiveDate,      // 录入日期（无时间部分）
    pub material_name: String,      // 材料名
    pub produced_quantity: i64,     // 生产数量（非负）
    pub required_quantity: i64,     // 需求数量快照
    pub completion_percentage: f64, // 单条完成率（仅展示，报表不使用）
    pub process: ProcessStep,       // 工序
    pub project_name: String,       // 项目名
}

// ==========================================
// NewProductionEntry - 待写入的录入
// ==========================================
// 用途: API 层计算完成率后交给仓储写入，id 由数据库分配
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProductionEntry {
    pub entry_date: NaiveDate,
    pub material_name: String,
    pub produced_quantity: i64,
    pub required_quantity: i64,
    pub completion_percentage: f64,
    pub process: ProcessStep,
    pub project_name: String,
}

impl NewProductionEntry {
    /// 绑定数据库分配的 id
    pub fn with_id(self, id: i64) -> ProductionEntry {
        ProductionEntry {
            id,
            entry_date: self.entry_date,
            material_name: self.material_name,
            produced_quantity: self.produced_quantity,
            required_quantity: self.required_quantity,
            completion_percentage: self.completion_percentage,
            process: self.process,
            project_name: self.project_name,
        }
    }
}
