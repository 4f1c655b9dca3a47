// ==========================================
// 车间生产跟踪系统 - 周报 API
// ==========================================
// 职责: 周报生成、Excel/CSV 导出
// 红线: 每次调用重新读取录入并重新汇总，不缓存汇总结果
// ==========================================

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::api::error::ApiResult;
use crate::config::ConfigManager;
use crate::domain::report::{ReportWindow, WeeklyReport};
use crate::engine::AggregationEngine;
use crate::exporter::{ExportArtifact, ReportExporter, ReportView};
use crate::repository::EntryRepository;

// ==========================================
// ReportApi - 周报 API
// ==========================================
pub struct ReportApi {
    entry_repo: Arc<EntryRepository>,
    config_manager: Arc<ConfigManager>,
    engine: AggregationEngine,
    exporter: ReportExporter,
}

impl ReportApi {
    pub fn new(entry_repo: Arc<EntryRepository>, config_manager: Arc<ConfigManager>) -> Self {
        Self {
            entry_repo,
            config_manager,
            engine: AggregationEngine::new(),
            exporter: ReportExporter::new(),
        }
    }

    /// 当前配置下以 today 结尾的报表窗口
    pub fn report_window(&self, today: NaiveDate) -> ApiResult<ReportWindow> {
        let days = self.config_manager.get_report_window_days()?;
        Ok(ReportWindow::ending_on(today, days))
    }

    /// 生成周报（明细汇总 + 工序汇总）
    pub fn weekly_report(&self, today: NaiveDate) -> ApiResult<WeeklyReport> {
        let window = self.report_window(today)?;
        let entries = self.entry_repo.list_in_window(&window)?;
        Ok(self.engine.build_report(&entries, window))
    }

    /// 导出周报 xlsx（两张工作表）
    pub fn export_weekly_report(&self, today: NaiveDate) -> ApiResult<ExportArtifact> {
        let report = self.weekly_report(today)?;
        let file_name = self.config_manager.get_export_file_name()?;
        let artifact = self.exporter.to_xlsx(&report, &file_name)?;

        info!(
            file_name = %artifact.file_name,
            window_start = %report.window.start,
            window_end = %report.window.end,
            "周报已导出"
        );
        Ok(artifact)
    }

    /// 导出周报单个视图的 CSV
    pub fn export_view_csv(&self, today: NaiveDate, view: ReportView) -> ApiResult<ExportArtifact> {
        let report = self.weekly_report(today)?;
        Ok(self.exporter.to_csv(&report, view)?)
    }
}
