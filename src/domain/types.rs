// ==========================================
// 车间生产跟踪系统 - 领域类型定义
// ==========================================
// 工序为封闭枚举: 共 10 个工位，顺序固定，标签原样保存
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 工序 (Process Step)
// ==========================================
// 序列化格式: 工位标签原文（与数据库 entries.process 一致）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProcessStep {
    #[serde(rename = "Guillotine")]
    Guillotine, // 剪板
    #[serde(rename = "Press-brake")]
    PressBrake, // 折弯
    #[serde(rename = "Roll-forming")]
    RollForming, // 辊压成型
    #[serde(rename = "Coil-slitting/length-cutting")]
    CoilSlitting, // 开卷/定尺
    #[serde(rename = "Punching/lug-hole/hydraulic-press")]
    Punching, // 冲孔/液压
    #[serde(rename = "Welding/profile-cutting")]
    Welding, // 焊接/型材切割
    #[serde(rename = "Panel-cutting")]
    PanelCutting, // 板材切割
    #[serde(rename = "Painting")]
    Painting, // 涂装
    #[serde(rename = "Assembly")]
    Assembly, // 装配
    #[serde(rename = "Shipping")]
    Shipping, // 发运
}

impl ProcessStep {
    /// 全部工序（按工位顺序）
    pub const ALL: [ProcessStep; 10] = [
        ProcessStep::Guillotine,
        ProcessStep::PressBrake,
        ProcessStep::RollForming,
        ProcessStep::CoilSlitting,
        ProcessStep::Punching,
        ProcessStep::Welding,
        ProcessStep::PanelCutting,
        ProcessStep::Painting,
        ProcessStep::Assembly,
        ProcessStep::Shipping,
    ];

    /// 工位标签
    pub fn label(&self) -> &'static str {
        match self {
            ProcessStep::Guillotine => "Guillotine",
            ProcessStep::PressBrake => "Press-brake",
            ProcessStep::RollForming => "Roll-forming",
            ProcessStep::CoilSlitting => "Coil-slitting/length-cutting",
            ProcessStep::Punching => "Punching/lug-hole/hydraulic-press",
            ProcessStep::Welding => "Welding/profile-cutting",
            ProcessStep::PanelCutting => "Panel-cutting",
            ProcessStep::Painting => "Painting",
            ProcessStep::Assembly => "Assembly",
            ProcessStep::Shipping => "Shipping",
        }
    }

    /// 全部工位标签（供下拉框使用）
    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|p| p.label()).collect()
    }
}

impl fmt::Display for ProcessStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 未知工序标签
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("未知工序: {0}")]
pub struct UnknownProcessStep(pub String);

impl FromStr for ProcessStep {
    type Err = UnknownProcessStep;

    /// 按标签精确匹配（去除首尾空白）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ProcessStep::ALL
            .iter()
            .copied()
            .find(|p| p.label() == trimmed)
            .ok_or_else(|| UnknownProcessStep(s.to_string()))
    }
}
