// ==========================================
// 车间生产跟踪系统 - 周报领域模型
// ==========================================
// 红线: 报表完成率一律由汇总数量重新计算，不对单条完成率取平均
// ==========================================

use crate::domain::types::ProcessStep;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// ISO 日期格式（与 entries.entry_date 一致）
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

// ==========================================
// ReportWindow - 报表时间窗口
// ==========================================
// 闭区间 [start, end]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportWindow {
    /// 以 today 为终点、向前 days 天的窗口
    ///
    /// days=7 时窗口为 [today-7, today]，共 8 个自然日
    ///
    /// 起点越过日期下界时截断为 NaiveDate::MIN
    pub fn ending_on(today: NaiveDate, days: u32) -> Self {
        let start = today
            .checked_sub_signed(Duration::days(i64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }

    /// 日期是否落在窗口内（两端包含）
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// 起始日期 ISO 字符串（用于 SQL 字典序比较）
    pub fn start_key(&self) -> String {
        self.start.format(ISO_DATE_FORMAT).to_string()
    }

    /// 结束日期 ISO 字符串
    pub fn end_key(&self) -> String {
        self.end.format(ISO_DATE_FORMAT).to_string()
    }
}

// ==========================================
// DetailReportRow - 明细汇总行
// ==========================================
// 分组键: (项目, 工序, 材料, 需求数量)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailReportRow {
    pub project_name: String,
    pub process: ProcessStep,
    pub material_name: String,
    pub required_quantity: i64,
    pub produced_quantity: i64,     // 组内生产数量合计
    pub completion_percentage: f64, // 合计生产 / 需求 × 100
}

// ==========================================
// ProcessReportRow - 工序汇总行
// ==========================================
// 由明细汇总行按工序再次汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessReportRow {
    pub process: ProcessStep,
    pub produced_quantity: i64, // 明细行生产数量合计
    pub required_quantity: i64, // 明细行需求数量合计
    pub completion_percentage: f64,
}

// ==========================================
// WeeklyReport - 周报（两个视图）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyReport {
    pub window: ReportWindow,
    pub detail: Vec<DetailReportRow>,
    pub by_process: Vec<ProcessReportRow>,
}

impl WeeklyReport {
    pub fn is_empty(&self) -> bool {
        self.detail.is_empty()
    }
}
