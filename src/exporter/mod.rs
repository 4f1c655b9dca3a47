// ==========================================
// 车间生产跟踪系统 - 报表导出层
// ==========================================
// 职责: WeeklyReport → 可下载文件
// 支持: Excel (.xlsx，两张工作表) / CSV（单视图）
// 约束: 每次调用即时生成，不缓存
// ==========================================

pub mod error;

pub use error::{ExportError, ExportResult};

use crate::domain::report::{DetailReportRow, ProcessReportRow, WeeklyReport};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use serde::Serialize;

/// 默认导出文件名
pub const DEFAULT_EXPORT_FILE_NAME: &str = "weekly_production_report.xlsx";

/// xlsx MIME 类型
pub const XLSX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// CSV MIME 类型
pub const CSV_MIME_TYPE: &str = "text/csv";

/// 明细视图工作表名
pub const DETAIL_SHEET_NAME: &str = "Weekly Production Report";

/// 工序视图工作表名
pub const PROCESS_SHEET_NAME: &str = "Process Completion";

/// 明细视图表头
pub const DETAIL_HEADERS: [&str; 6] = [
    "Project",
    "Process",
    "Material",
    "Required Quantity",
    "Produced Quantity",
    "Completion %",
];

/// 工序视图表头
pub const PROCESS_HEADERS: [&str; 4] = [
    "Process",
    "Produced Quantity",
    "Required Quantity",
    "Completion %",
];

// ==========================================
// ExportArtifact - 下载产物
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// 周报的单个视图（CSV 导出时选择）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportView {
    Detail,
    ByProcess,
}

// ==========================================
// ReportExporter - 报表导出器
// ==========================================
pub struct ReportExporter {
    // 无状态
}

impl ReportExporter {
    pub fn new() -> Self {
        Self {}
    }

    /// 生成 xlsx 下载产物（两张工作表，各带表头行）
    pub fn to_xlsx(&self, report: &WeeklyReport, file_name: &str) -> ExportResult<ExportArtifact> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        let detail_sheet = workbook.add_worksheet();
        detail_sheet.set_name(DETAIL_SHEET_NAME)?;
        write_headers(detail_sheet, &DETAIL_HEADERS, &header_format)?;
        for (idx, row) in report.detail.iter().enumerate() {
            write_detail_row(detail_sheet, idx as u32 + 1, row)?;
        }

        let process_sheet = workbook.add_worksheet();
        process_sheet.set_name(PROCESS_SHEET_NAME)?;
        write_headers(process_sheet, &PROCESS_HEADERS, &header_format)?;
        for (idx, row) in report.by_process.iter().enumerate() {
            write_process_row(process_sheet, idx as u32 + 1, row)?;
        }

        let bytes = workbook.save_to_buffer()?;

        tracing::info!(
            file_name,
            detail_rows = report.detail.len(),
            process_rows = report.by_process.len(),
            size_bytes = bytes.len(),
            "周报 xlsx 已生成"
        );

        Ok(ExportArtifact {
            file_name: file_name.to_string(),
            mime_type: XLSX_MIME_TYPE,
            bytes,
        })
    }

    /// 生成单个视图的 CSV 下载产物
    pub fn to_csv(&self, report: &WeeklyReport, view: ReportView) -> ExportResult<ExportArtifact> {
        let (bytes, file_name) = match view {
            ReportView::Detail => (
                write_csv(&DETAIL_HEADERS, report.detail.iter().map(DetailCsvRow::from))?,
                "weekly_production_report_detail.csv",
            ),
            ReportView::ByProcess => (
                write_csv(
                    &PROCESS_HEADERS,
                    report.by_process.iter().map(ProcessCsvRow::from),
                )?,
                "weekly_production_report_process.csv",
            ),
        };

        Ok(ExportArtifact {
            file_name: file_name.to_string(),
            mime_type: CSV_MIME_TYPE,
            bytes,
        })
    }
}

impl Default for ReportExporter {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// xlsx 写出辅助
// ==========================================

fn write_headers(sheet: &mut Worksheet, headers: &[&str], format: &Format) -> ExportResult<()> {
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, format)?;
    }
    Ok(())
}

fn write_detail_row(sheet: &mut Worksheet, row: u32, data: &DetailReportRow) -> ExportResult<()> {
    sheet.write_string(row, 0, &data.project_name)?;
    sheet.write_string(row, 1, data.process.label())?;
    sheet.write_string(row, 2, &data.material_name)?;
    sheet.write_number(row, 3, data.required_quantity as f64)?;
    sheet.write_number(row, 4, data.produced_quantity as f64)?;
    sheet.write_number(row, 5, data.completion_percentage)?;
    Ok(())
}

fn write_process_row(sheet: &mut Worksheet, row: u32, data: &ProcessReportRow) -> ExportResult<()> {
    sheet.write_string(row, 0, data.process.label())?;
    sheet.write_number(row, 1, data.produced_quantity as f64)?;
    sheet.write_number(row, 2, data.required_quantity as f64)?;
    sheet.write_number(row, 3, data.completion_percentage)?;
    Ok(())
}

// ==========================================
// CSV 写出辅助
// ==========================================

#[derive(Serialize)]
struct DetailCsvRow<'a> {
    project: &'a str,
    process: &'static str,
    material: &'a str,
    required_quantity: i64,
    produced_quantity: i64,
    completion_percentage: f64,
}

impl<'a> From<&'a DetailReportRow> for DetailCsvRow<'a> {
    fn from(row: &'a DetailReportRow) -> Self {
        Self {
            project: &row.project_name,
            process: row.process.label(),
            material: &row.material_name,
            required_quantity: row.required_quantity,
            produced_quantity: row.produced_quantity,
            completion_percentage: row.completion_percentage,
        }
    }
}

#[derive(Serialize)]
struct ProcessCsvRow {
    process: &'static str,
    produced_quantity: i64,
    required_quantity: i64,
    completion_percentage: f64,
}

impl From<&ProcessReportRow> for ProcessCsvRow {
    fn from(row: &ProcessReportRow) -> Self {
        Self {
            process: row.process.label(),
            produced_quantity: row.produced_quantity,
            required_quantity: row.required_quantity,
            completion_percentage: row.completion_percentage,
        }
    }
}

fn write_csv<R, I>(headers: &[&str], rows: I) -> ExportResult<Vec<u8>>
where
    R: Serialize,
    I: IntoIterator<Item = R>,
{
    // 表头与 xlsx 保持一致，不使用字段名
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(headers)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))
}
