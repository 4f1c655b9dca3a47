// ==========================================
// 车间生产跟踪系统 - 输入校验
// ==========================================
// 职责: 写库前拒绝空名称、负数量
// 约定: field 为 locales 中 fields.* 的键，出错时才翻译
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::i18n::{t, t_with_args};

/// 校验名称非空，返回去除首尾空白后的值
pub fn require_name(field: &str, value: &str) -> ApiResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput(t_with_args(
            "errors.blank_field",
            &[("field", t(field).as_str())],
        )));
    }
    Ok(trimmed.to_string())
}

/// 校验数量非负
pub fn require_non_negative(field: &str, value: i64) -> ApiResult<i64> {
    if value < 0 {
        return Err(ApiError::InvalidInput(t_with_args(
            "errors.negative_quantity",
            &[("field", t(field).as_str()), ("value", value.to_string().as_str())],
        )));
    }
    Ok(value)
}
