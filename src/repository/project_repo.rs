// ==========================================
// 车间生产跟踪系统 - 项目数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::project::Project;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};
use std::sync::{Arc, Mutex};

// ==========================================
// ProjectRepository - 项目仓储
// ==========================================
/// 项目仓储
/// 职责: 管理 projects 表的 CRUD 操作
pub struct ProjectRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ProjectRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 新增项目
    ///
    /// # 返回
    /// - Ok(i64): 新项目 id
    /// - Err(UniqueConstraintViolation): 项目名已存在
    pub fn insert(&self, project_name: &str) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO projects (project_name) VALUES (?1)",
            params![project_name],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// 查询全部项目（按 id 升序，即创建顺序）
    pub fn list_all(&self) -> RepositoryResult<Vec<Project>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT id, project_name FROM projects ORDER BY id")?;

        let projects = stmt
            .query_map([], |row| {
                Ok(Project {
                    id: row.get(0)?,
                    project_name: row.get(1)?,
                })
            })?
            .collect::<SqliteResult<Vec<Project>>>()?;

        Ok(projects)
    }

    /// 按名称查询项目
    pub fn find_by_name(&self, project_name: &str) -> RepositoryResult<Option<Project>> {
        let conn = self.get_conn()?;
        let project = conn
            .query_row(
                "SELECT id, project_name FROM projects WHERE project_name = ?1",
                params![project_name],
                |row| {
                    Ok(Project {
                        id: row.get(0)?,
                        project_name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(project)
    }

    /// 删除项目及其全部材料（同一事务）
    ///
    /// # 返回
    /// - Ok((projects_deleted, materials_deleted))
    ///
    /// # 说明
    /// - entries 按名称引用项目，不在此处删除
    pub fn delete_with_materials(&self, project_name: &str) -> RepositoryResult<(usize, usize)> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let projects_deleted = tx.execute(
            "DELETE FROM projects WHERE project_name = ?1",
            params![project_name],
        )?;
        let materials_deleted = tx.execute(
            "DELETE FROM materials WHERE project_name = ?1",
            params![project_name],
        )?;

        tx.commit()?;
        Ok((projects_deleted, materials_deleted))
    }
}
