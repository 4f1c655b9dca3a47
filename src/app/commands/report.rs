use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::api::error::ApiError;
use crate::app::state::AppState;
use crate::exporter::{ExportArtifact, ReportView};
use crate::i18n::t_with_args;

use super::common::{map_api_error, message_json, resolve_today, to_json};

// ==========================================
// 周报相关命令
// ==========================================

/// 导出结果（写盘后的文件信息）
#[derive(Debug, Clone, Serialize)]
pub struct ExportedFile {
    pub file_name: String,
    pub mime_type: String,
    pub path: String,
    pub size_bytes: usize,
}

/// 周报（明细汇总 + 工序汇总）
pub fn get_weekly_report(state: &AppState, today: Option<&str>) -> Result<String, String> {
    let today = resolve_today(today)?;
    let report = state
        .report_api
        .weekly_report(today)
        .map_err(map_api_error)?;
    to_json(&report)
}

/// 导出周报 xlsx 到指定目录
pub fn export_weekly_report(
    state: &AppState,
    output_dir: &str,
    today: Option<&str>,
) -> Result<String, String> {
    let today = resolve_today(today)?;
    let artifact = state
        .report_api
        .export_weekly_report(today)
        .map_err(map_api_error)?;
    write_artifact(output_dir, artifact)
}

/// 导出单个视图的 CSV 到指定目录
///
/// view: "detail" | "process"
pub fn export_report_csv(
    state: &AppState,
    view: &str,
    output_dir: &str,
    today: Option<&str>,
) -> Result<String, String> {
    let view = parse_view(view)?;
    let today = resolve_today(today)?;
    let artifact = state
        .report_api
        .export_view_csv(today, view)
        .map_err(map_api_error)?;
    write_artifact(output_dir, artifact)
}

fn parse_view(view: &str) -> Result<ReportView, String> {
    match view.trim() {
        "detail" => Ok(ReportView::Detail),
        "process" => Ok(ReportView::ByProcess),
        other => Err(map_api_error(ApiError::InvalidInput(format!(
            "未知的报表视图: {}（可选 detail / process）",
            other
        )))),
    }
}

fn write_artifact(output_dir: &str, artifact: ExportArtifact) -> Result<String, String> {
    let dir = Path::new(output_dir);
    std::fs::create_dir_all(dir).map_err(|e| export_io_error(dir, e))?;

    let path: PathBuf = dir.join(&artifact.file_name);
    std::fs::write(&path, &artifact.bytes).map_err(|e| export_io_error(&path, e))?;

    let path_str = path.to_string_lossy().to_string();
    tracing::info!(path = %path_str, size_bytes = artifact.bytes.len(), "导出文件已写入");

    let message = t_with_args("report.exported", &[("path", path_str.as_str())]);
    message_json(
        message,
        ExportedFile {
            file_name: artifact.file_name,
            mime_type: artifact.mime_type.to_string(),
            path: path_str,
            size_bytes: artifact.bytes.len(),
        },
    )
}

fn export_io_error(path: &Path, e: std::io::Error) -> String {
    map_api_error(ApiError::ExportError(format!(
        "写入 {} 失败: {}",
        path.display(),
        e
    )))
}
