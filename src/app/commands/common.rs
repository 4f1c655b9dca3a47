use crate::api::error::ApiError;
use crate::domain::types::ProcessStep;
use crate::i18n::t_with_args;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// 公共工具：错误映射、日期/工序解析、结果序列化
// ==========================================

/// 错误响应（返回给调用方）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 错误代码
    pub code: String,

    /// 错误消息
    pub message: String,

    /// 详细信息（可选）
    pub details: Option<serde_json::Value>,
}

/// 成功响应（带本地化提示的变更类命令）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse<T> {
    pub message: String,
    pub data: T,
}

/// 稳定的机器可读错误代码
pub(super) fn error_code(err: &ApiError) -> &'static str {
    match err {
        ApiError::InvalidInput(_) => "INVALID_INPUT",
        ApiError::NotFound(_) => "NOT_FOUND",
        ApiError::AlreadyExists(_) => "ALREADY_EXISTS",
        ApiError::MissingReferenceData(_) => "MISSING_REFERENCE_DATA",
        ApiError::DatabaseError(_) => "DATABASE_ERROR",
        ApiError::DatabaseConnectionError(_) => "DATABASE_CONNECTION_ERROR",
        ApiError::ValidationError(_) => "VALIDATION_ERROR",
        ApiError::ExportError(_) => "EXPORT_ERROR",
        ApiError::InternalError(_) => "INTERNAL_ERROR",
        ApiError::Other(_) => "OTHER_ERROR",
    }
}

/// 面向用户的错误消息
///
/// 业务错误携带的已是本地化消息，直接返回；其余错误保留分类前缀
fn user_message(err: &ApiError) -> String {
    match err {
        ApiError::InvalidInput(msg)
        | ApiError::NotFound(msg)
        | ApiError::AlreadyExists(msg)
        | ApiError::MissingReferenceData(msg)
        | ApiError::ValidationError(msg) => msg.clone(),
        other => other.to_string(),
    }
}

/// 将ApiError转换为JSON字符串
pub fn map_api_error(err: ApiError) -> String {
    let error_response = ErrorResponse {
        code: error_code(&err).to_string(),
        message: user_message(&err),
        details: None,
    };

    serde_json::to_string(&error_response).unwrap_or_else(|_| err.to_string())
}

/// 序列化命令结果
pub(super) fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("序列化失败: {}", e))
}

/// 序列化带提示消息的命令结果
pub(super) fn message_json<T: Serialize>(message: String, data: T) -> Result<String, String> {
    to_json(&MessageResponse { message, data })
}

/// 解析日期字符串
pub(super) fn parse_date(date_str: &str) -> Result<NaiveDate, String> {
    let trimmed = date_str.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|e| {
        tracing::debug!(value = trimmed, error = %e, "日期解析失败");
        map_api_error(ApiError::InvalidInput(t_with_args(
            "errors.invalid_date",
            &[("value", trimmed)],
        )))
    })
}

/// 解析工序标签（须与十个固定标签之一完全一致）
pub(super) fn parse_process(label: &str) -> Result<ProcessStep, String> {
    label
        .parse::<ProcessStep>()
        .map_err(|e| map_api_error(ApiError::InvalidInput(e.to_string())))
}

/// 解析可选的 "今天"，缺省取本地系统日期
pub(super) fn resolve_today(today: Option<&str>) -> Result<NaiveDate, String> {
    match today {
        Some(s) => parse_date(s),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_api_error_codes() {
        let json = map_api_error(ApiError::AlreadyExists("P1".to_string()));
        let resp: ErrorResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(resp.code, "ALREADY_EXISTS");
        assert_eq!(resp.message, "P1");
        assert!(resp.details.is_none());

        let json = map_api_error(ApiError::NotFound("id=9".to_string()));
        let resp: ErrorResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(resp.code, "NOT_FOUND");

        // 非业务错误保留分类前缀
        let json = map_api_error(ApiError::DatabaseError("disk I/O".to_string()));
        let resp: ErrorResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(resp.code, "DATABASE_ERROR");
        assert!(resp.message.ends_with("disk I/O"));
        assert_ne!(resp.message, "disk I/O");
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-03-08").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 8).unwrap()
        );
        let err = parse_date("08/03/2024").unwrap_err();
        assert!(err.contains("INVALID_INPUT"));
    }

    #[test]
    fn test_parse_process() {
        assert_eq!(parse_process("Painting").unwrap(), ProcessStep::Painting);
        assert_eq!(
            parse_process("Coil-slitting/length-cutting").unwrap(),
            ProcessStep::CoilSlitting
        );
        assert!(parse_process("painting").unwrap_err().contains("INVALID_INPUT"));
    }
}
