// ==========================================
// 车间生产跟踪系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 约束: 进程内只持有一个数据库连接，AppState 释放时连接随之关闭
// ==========================================

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::api::{EntryApi, ProjectApi, ReportApi};
use crate::config::config_manager::ConfigManager;
use crate::db::open_and_migrate;
use crate::i18n;
use crate::repository::{EntryRepository, MaterialRepository, ProjectRepository};

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "PRODUCTION_TRACKER_DB_PATH";

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 生产录入API
    pub entry_api: Arc<EntryApi>,

    /// 项目与材料API
    pub project_api: Arc<ProjectApi>,

    /// 周报API
    pub report_api: Arc<ReportApi>,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径（不存在时自动创建并建表）
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(String): 初始化错误
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开数据库并补齐表结构
    /// 2. 初始化所有Repository
    /// 3. 创建所有API实例
    /// 4. 按配置切换界面语言
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_and_migrate(&db_path).map_err(|e| format!("无法打开数据库: {}", e))?;
        Ok(Self::from_connection(db_path, conn))
    }

    /// 基于已打开的连接构建（测试可传入内存库）
    pub fn from_connection(db_path: String, conn: Connection) -> Self {
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================
        let project_repo = Arc::new(ProjectRepository::from_connection(conn.clone()));
        let material_repo = Arc::new(MaterialRepository::from_connection(conn.clone()));
        let entry_repo = Arc::new(EntryRepository::from_connection(conn.clone()));
        let config_manager = Arc::new(ConfigManager::from_connection(conn));

        // ==========================================
        // 初始化API层
        // ==========================================
        let entry_api = Arc::new(EntryApi::new(entry_repo.clone(), material_repo.clone()));
        let project_api = Arc::new(ProjectApi::new(project_repo, material_repo));
        let report_api = Arc::new(ReportApi::new(entry_repo, config_manager.clone()));

        match config_manager.get_locale() {
            Ok(locale) => {
                i18n::set_locale(&locale);
            }
            Err(e) => tracing::warn!("读取语言配置失败，保持默认语言: {}", e),
        }

        tracing::info!("AppState初始化完成");
        Self {
            db_path,
            entry_api,
            project_api,
            report_api,
            config_manager,
        }
    }
}

/// 获取默认数据库路径
///
/// 优先级: 环境变量 > 用户数据目录 > 当前目录
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./production_tracker.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("production-tracker");
        match std::fs::create_dir_all(&dir) {
            Ok(()) => path = dir.join("production_tracker.db"),
            Err(e) => tracing::warn!("无法创建数据目录 {:?}，使用当前目录: {}", dir, e),
        }
    }

    path.to_string_lossy().to_string()
}
