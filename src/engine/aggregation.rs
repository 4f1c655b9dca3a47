// ==========================================
// 车间生产跟踪系统 - 完成率汇总引擎
// ==========================================
// 职责: 生产录入 → 周报两个视图
// 输入: 录入集合 + 报表窗口
// 输出: WeeklyReport (明细汇总 + 工序汇总)
// ==========================================
// 红线: Engine 不拼 SQL
// 红线: 完成率一律由合计数量重新计算，不对已有完成率取平均
// ==========================================

use crate::domain::entry::ProductionEntry;
use crate::domain::report::{DetailReportRow, ProcessReportRow, ReportWindow, WeeklyReport};
use crate::domain::types::ProcessStep;
use crate::engine::completion::completion_percentage;
use std::collections::BTreeMap;

/// 明细分组键: (项目, 工序标签, 材料, 需求数量)
///
/// 需求数量属于分组键: 同一材料在窗口内需求变化时拆分为多行
type DetailKey = (String, &'static str, String, i64);

// ==========================================
// AggregationEngine - 完成率汇总引擎
// ==========================================
pub struct AggregationEngine {
    // 无状态引擎，数据读取由调用方处理
}

impl AggregationEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 生成周报
    ///
    /// # 参数
    /// - `entries`: 录入集合（可以是窗口的超集，窗口外的记录会被过滤）
    /// - `window`: 报表窗口
    ///
    /// # 返回
    /// 两个视图按分组键字典序排列；相同输入得到相同输出
    pub fn build_report(&self, entries: &[ProductionEntry], window: ReportWindow) -> WeeklyReport {
        let in_window = self.filter_window(entries, &window);
        let detail = self.aggregate_detail(&in_window);
        let by_process = self.aggregate_by_process(&detail);

        tracing::debug!(
            window_start = %window.start,
            window_end = %window.end,
            input_entries = entries.len(),
            window_entries = in_window.len(),
            detail_rows = detail.len(),
            process_rows = by_process.len(),
            "周报汇总完成"
        );

        WeeklyReport {
            window,
            detail,
            by_process,
        }
    }

    /// 步骤 1: 窗口过滤（两端包含）
    pub fn filter_window<'a>(
        &self,
        entries: &'a [ProductionEntry],
        window: &ReportWindow,
    ) -> Vec<&'a ProductionEntry> {
        entries
            .iter()
            .filter(|e| window.contains(e.entry_date))
            .collect()
    }

    /// 步骤 2: 按 (项目, 工序, 材料, 需求数量) 汇总生产数量并重算完成率
    pub fn aggregate_detail(&self, entries: &[&ProductionEntry]) -> Vec<DetailReportRow> {
        let mut groups: BTreeMap<DetailKey, (ProcessStep, i64)> = BTreeMap::new();

        for entry in entries {
            let key = (
                entry.project_name.clone(),
                entry.process.label(),
                entry.material_name.clone(),
                entry.required_quantity,
            );
            let slot = groups.entry(key).or_insert((entry.process, 0));
            slot.1 = slot.1.saturating_add(entry.produced_quantity);
        }

        groups
            .into_iter()
            .map(
                |((project_name, _, material_name, required_quantity), (process, produced))| {
                    DetailReportRow {
                        project_name,
                        process,
                        material_name,
                        required_quantity,
                        produced_quantity: produced,
                        completion_percentage: completion_percentage(produced, required_quantity),
                    }
                },
            )
            .collect()
    }

    /// 步骤 3: 由明细行按工序汇总生产/需求数量并重算完成率
    pub fn aggregate_by_process(&self, detail: &[DetailReportRow]) -> Vec<ProcessReportRow> {
        let mut groups: BTreeMap<&'static str, (ProcessStep, i64, i64)> = BTreeMap::new();

        for row in detail {
            let slot = groups
                .entry(row.process.label())
                .or_insert((row.process, 0, 0));
            slot.1 = slot.1.saturating_add(row.produced_quantity);
            slot.2 = slot.2.saturating_add(row.required_quantity);
        }

        groups
            .into_values()
            .map(|(process, produced, required)| ProcessReportRow {
                process,
                produced_quantity: produced,
                required_quantity: required,
                completion_percentage: completion_percentage(produced, required),
            })
            .collect()
    }
}

impl Default for AggregationEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn entry(
        id: i64,
        days_ago: i64,
        project: &str,
        material: &str,
        produced: i64,
        required: i64,
        process: ProcessStep,
    ) -> ProductionEntry {
        ProductionEntry {
            id,
            entry_date: today() - Duration::days(days_ago),
            material_name: material.to_string(),
            produced_quantity: produced,
            required_quantity: required,
            completion_percentage: completion_percentage(produced, required),
            process,
            project_name: project.to_string(),
        }
    }

    fn week() -> ReportWindow {
        ReportWindow::ending_on(today(), 7)
    }

    #[test]
    fn test_reference_example() {
        let engine = AggregationEngine::new();
        let entries = vec![
            entry(1, 1, "P1", "M1", 30, 100, ProcessStep::Welding),
            entry(2, 3, "P1", "M1", 20, 100, ProcessStep::Welding),
        ];

        let report = engine.build_report(&entries, week());

        assert_eq!(report.detail.len(), 1);
        let row = &report.detail[0];
        assert_eq!(row.project_name, "P1");
        assert_eq!(row.process, ProcessStep::Welding);
        assert_eq!(row.material_name, "M1");
        assert_eq!(row.required_quantity, 100);
        assert_eq!(row.produced_quantity, 50);
        assert_eq!(row.completion_percentage, 50.0);

        assert_eq!(report.by_process.len(), 1);
        let p = &report.by_process[0];
        assert_eq!(p.process, ProcessStep::Welding);
        assert_eq!(p.produced_quantity, 50);
        assert_eq!(p.required_quantity, 100);
        assert_eq!(p.completion_percentage, 50.0);
    }

    #[test]
    fn test_window_boundary() {
        let engine = AggregationEngine::new();
        let entries = vec![
            entry(1, 7, "P1", "M1", 10, 100, ProcessStep::Painting),
            entry(2, 8, "P1", "M1", 99, 100, ProcessStep::Painting),
            entry(3, -1, "P1", "M1", 99, 100, ProcessStep::Painting),
        ];

        let report = engine.build_report(&entries, week());

        assert_eq!(report.detail.len(), 1);
        assert_eq!(report.detail[0].produced_quantity, 10);
    }

    #[test]
    fn test_required_quantity_change_splits_groups() {
        let engine = AggregationEngine::new();
        let entries = vec![
            entry(1, 1, "P1", "M1", 10, 100, ProcessStep::Assembly),
            entry(2, 2, "P1", "M1", 15, 100, ProcessStep::Assembly),
            entry(3, 3, "P1", "M1", 40, 200, ProcessStep::Assembly),
        ];

        let report = engine.build_report(&entries, week());

        assert_eq!(report.detail.len(), 2);
        assert_eq!(report.detail[0].required_quantity, 100);
        assert_eq!(report.detail[0].produced_quantity, 25);
        assert_eq!(report.detail[0].completion_percentage, 25.0);
        assert_eq!(report.detail[1].required_quantity, 200);
        assert_eq!(report.detail[1].produced_quantity, 40);
        assert_eq!(report.detail[1].completion_percentage, 20.0);

        // 工序汇总: (25 + 40) / (100 + 200)
        assert_eq!(report.by_process.len(), 1);
        assert_eq!(report.by_process[0].produced_quantity, 65);
        assert_eq!(report.by_process[0].required_quantity, 300);
    }

    #[test]
    fn test_process_percentage_is_sum_ratio_not_average() {
        let engine = AggregationEngine::new();
        let entries = vec![
            entry(1, 1, "P1", "A", 10, 10, ProcessStep::Shipping),
            entry(2, 1, "P1", "B", 100, 1000, ProcessStep::Shipping),
        ];

        let report = engine.build_report(&entries, week());

        assert_eq!(report.detail[0].completion_percentage, 100.0);
        assert_eq!(report.detail[1].completion_percentage, 10.0);

        // 平均值为 55.0，合计比值为 110 / 1010
        let p = &report.by_process[0];
        let expected = 110.0 / 1010.0 * 100.0;
        assert!((p.completion_percentage - expected).abs() < 1e-9);
        assert!((p.completion_percentage - 55.0).abs() > 1.0);
    }

    #[test]
    fn test_zero_required_group_uses_fallback() {
        let engine = AggregationEngine::new();
        let entries = vec![entry(1, 0, "P1", "M0", 12, 0, ProcessStep::Guillotine)];

        let report = engine.build_report(&entries, week());

        assert_eq!(report.detail[0].completion_percentage, 0.0);
        assert_eq!(report.by_process[0].completion_percentage, 0.0);
        assert_eq!(report.by_process[0].produced_quantity, 12);
    }

    #[test]
    fn test_rows_sorted_by_group_key() {
        let engine = AggregationEngine::new();
        let entries = vec![
            entry(1, 1, "P2", "M1", 1, 10, ProcessStep::Assembly),
            entry(2, 1, "P1", "M2", 1, 10, ProcessStep::Welding),
            entry(3, 1, "P1", "M1", 1, 10, ProcessStep::Welding),
            entry(4, 1, "P1", "M1", 1, 10, ProcessStep::Assembly),
        ];

        let report = engine.build_report(&entries, week());

        let keys: Vec<(String, &str, String)> = report
            .detail
            .iter()
            .map(|r| (r.project_name.clone(), r.process.label(), r.material_name.clone()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("P1".to_string(), "Assembly", "M1".to_string()),
                ("P1".to_string(), "Welding/profile-cutting", "M1".to_string()),
                ("P1".to_string(), "Welding/profile-cutting", "M2".to_string()),
                ("P2".to_string(), "Assembly", "M1".to_string()),
            ]
        );

        let processes: Vec<&str> = report.by_process.iter().map(|r| r.process.label()).collect();
        assert_eq!(processes, vec!["Assembly", "Welding/profile-cutting"]);
    }

    #[test]
    fn test_idempotent() {
        let engine = AggregationEngine::new();
        let entries = vec![
            entry(1, 1, "P1", "M1", 30, 100, ProcessStep::Welding),
            entry(2, 2, "P2", "M9", 7, 50, ProcessStep::Painting),
        ];

        let first = engine.build_report(&entries, week());
        let second = engine.build_report(&entries, week());
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input() {
        let engine = AggregationEngine::new();
        let report = engine.build_report(&[], week());
        assert!(report.is_empty());
        assert!(report.by_process.is_empty());
    }
}
