// ==========================================
// 车间生产跟踪系统 - 项目与材料领域模型
// ==========================================
// 项目名全局唯一；材料名在项目内唯一
// 用途: 管理界面维护的长期参考数据
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Project - 项目
// ==========================================
// 对齐: projects 表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,              // 自增主键
    pub project_name: String, // 项目名（身份键）
}

// ==========================================
// Material - 材料
// ==========================================
// 对齐: materials 表，UNIQUE(project_name, material_name)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub id: i64,
    pub project_name: String,   // 所属项目
    pub material_name: String,  // 材料名
    pub required_quantity: i64, // 需求数量（目标）
}
