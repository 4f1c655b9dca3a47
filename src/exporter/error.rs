// ==========================================
// 车间生产跟踪系统 - 导出层错误类型
// ==========================================

use thiserror::Error;

/// 导出错误
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Excel 写出失败: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("CSV 写出失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("文件写入失败: {0}")]
    Io(#[from] std::io::Error),
}

/// Result 类型别名
pub type ExportResult<T> = Result<T, ExportError>;
