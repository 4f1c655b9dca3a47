// ==========================================
// 车间生产跟踪系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value)
// ==========================================

use crate::exporter::DEFAULT_EXPORT_FILE_NAME;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// 报表窗口默认天数
pub const DEFAULT_REPORT_WINDOW_DAYS: u32 = 7;

/// 报表窗口天数上限（约十年）
pub const MAX_REPORT_WINDOW_DAYS: u32 = 3650;

/// 默认语言
pub const DEFAULT_LOCALE: &str = "zh-CN";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 从已有连接创建 ConfigManager
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 读取配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> RepositoryResult<String> {
        Ok(self
            .get_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// 写入配置值（UPSERT）
    pub fn set_config_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO config_kv (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')
            "#,
            params![key, value],
        )?;
        tracing::info!(key, value, "配置已更新");
        Ok(())
    }

    /// 获取所有配置的快照（JSON，键有序）
    pub fn get_config_snapshot(&self) -> RepositoryResult<String> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT key, value FROM config_kv ORDER BY key")?;

        let mut config_map: BTreeMap<String, String> = BTreeMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        serde_json::to_string(&json!(config_map))
            .map_err(|e| RepositoryError::InternalError(e.to_string()))
    }

    // ===== 报表配置 =====

    /// 报表窗口天数（窗口为 [today-N, today]）
    ///
    /// 配置缺失、格式错误或超过 MAX_REPORT_WINDOW_DAYS 时返回默认 7 天
    pub fn get_report_window_days(&self) -> RepositoryResult<u32> {
        let default = DEFAULT_REPORT_WINDOW_DAYS.to_string();
        let value = self.get_config_or_default(config_keys::REPORT_WINDOW_DAYS, &default)?;
        match value.trim().parse::<u32>() {
            Ok(days) if days <= MAX_REPORT_WINDOW_DAYS => Ok(days),
            _ => {
                tracing::warn!(
                    config_key = config_keys::REPORT_WINDOW_DAYS,
                    raw_value = %value,
                    max = MAX_REPORT_WINDOW_DAYS,
                    "报表窗口配置无效，使用默认值"
                );
                Ok(DEFAULT_REPORT_WINDOW_DAYS)
            }
        }
    }

    /// 导出文件名
    pub fn get_export_file_name(&self) -> RepositoryResult<String> {
        let value =
            self.get_config_or_default(config_keys::EXPORT_FILE_NAME, DEFAULT_EXPORT_FILE_NAME)?;
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(DEFAULT_EXPORT_FILE_NAME.to_string());
        }
        Ok(trimmed.to_string())
    }

    // ===== 界面配置 =====

    /// 界面语言
    pub fn get_locale(&self) -> RepositoryResult<String> {
        self.get_config_or_default(config_keys::LOCALE, DEFAULT_LOCALE)
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 报表
    pub const REPORT_WINDOW_DAYS: &str = "report_window_days";
    pub const EXPORT_FILE_NAME: &str = "export_file_name";

    // 界面
    pub const LOCALE: &str = "locale";

    /// 允许通过命令设置的键
    pub const ALL: [&str; 3] = [REPORT_WINDOW_DAYS, EXPORT_FILE_NAME, LOCALE];
}
