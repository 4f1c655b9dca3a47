use crate::api::error::ApiError;
use crate::app::state::AppState;
use crate::config::{config_keys, MAX_REPORT_WINDOW_DAYS};
use crate::i18n::{self, t, t_with_args};

use super::common::{map_api_error, message_json, to_json};

// ==========================================
// 配置管理相关命令
// ==========================================

/// 查询所有配置（JSON 对象，键有序）
pub fn list_configs(state: &AppState) -> Result<String, String> {
    state
        .config_manager
        .get_config_snapshot()
        .map_err(|e| map_api_error(e.into()))
}

/// 查询单个配置的生效值（未设置时返回默认值）
pub fn get_config(state: &AppState, key: &str) -> Result<String, String> {
    let value = match key {
        config_keys::REPORT_WINDOW_DAYS => state
            .config_manager
            .get_report_window_days()
            .map(|days| days.to_string()),
        config_keys::EXPORT_FILE_NAME => state.config_manager.get_export_file_name(),
        config_keys::LOCALE => state.config_manager.get_locale(),
        other => return Err(unknown_key(other)),
    }
    .map_err(|e| map_api_error(e.into()))?;

    to_json(&serde_json::json!({ "key": key, "value": value }))
}

/// 更新配置
///
/// 写入前校验取值；locale 更新后立即切换界面语言
pub fn update_config(state: &AppState, key: &str, value: &str) -> Result<String, String> {
    let value = value.trim();
    match key {
        config_keys::REPORT_WINDOW_DAYS => match value.parse::<u32>() {
            Ok(days) if days <= MAX_REPORT_WINDOW_DAYS => {}
            _ => {
                let max = MAX_REPORT_WINDOW_DAYS.to_string();
                let reason = t_with_args("errors.window_days_range", &[("max", max.as_str())]);
                return Err(invalid_value(key, value, &reason));
            }
        },
        config_keys::EXPORT_FILE_NAME => {
            if value.is_empty() || value.contains(['/', '\\']) {
                return Err(invalid_value(key, value, &t("errors.file_name_invalid")));
            }
        }
        config_keys::LOCALE => {
            if !i18n::SUPPORTED_LOCALES.contains(&value) {
                return Err(invalid_value(key, value, &t("errors.locale_unsupported")));
            }
        }
        other => return Err(unknown_key(other)),
    }

    state
        .config_manager
        .set_config_value(key, value)
        .map_err(|e| map_api_error(e.into()))?;

    if key == config_keys::LOCALE {
        i18n::set_locale(value);
    }

    let message = t_with_args("config.updated", &[("key", key)]);
    message_json(message, serde_json::json!({ "key": key, "value": value }))
}

fn unknown_key(key: &str) -> String {
    let allowed = config_keys::ALL.join(" / ");
    map_api_error(ApiError::InvalidInput(t_with_args(
        "errors.unknown_config_key",
        &[("key", key), ("allowed", allowed.as_str())],
    )))
}

fn invalid_value(key: &str, value: &str, reason: &str) -> String {
    map_api_error(ApiError::ValidationError(t_with_args(
        "errors.invalid_config_value",
        &[("key", key), ("value", value), ("reason", reason)],
    )))
}
