// ==========================================
// 车间生产跟踪系统 - 材料数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::project::Material;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// MaterialRepository - 材料仓储
// ==========================================
/// 材料仓储
/// 职责: 管理 materials 表的 CRUD 操作
pub struct MaterialRepository {
    conn: Arc<Mutex<Connection>>,
}

fn map_material(row: &Row<'_>) -> SqliteResult<Material> {
    Ok(Material {
        id: row.get(0)?,
        project_name: row.get(1)?,
        material_name: row.get(2)?,
        required_quantity: row.get(3)?,
    })
}

impl MaterialRepository {
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

    /// 新增材料
    ///
    /// # 返回
    /// - Ok(i64): 新材料 id
    /// - Err(UniqueConstraintViolation): 项目内材料名已存在
    pub fn insert(
        &self,
        project_name: &str,
        material_name: &str,
        required_quantity: i64,
    ) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO materials (project_name, material_name, required_quantity)
            VALUES (?1, ?2, ?3)
            "#,
            params![project_name, material_name, required_quantity],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// 查询项目下的材料
    pub fn list_by_project(&self, project_name: &str) -> RepositoryResult<Vec<Material>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, project_name, material_name, required_quantity
            FROM materials
            WHERE project_name = ?1
            ORDER BY id
            "#,
        )?;

        let materials = stmt
            .query_map(params![project_name], map_material)?
            .collect::<SqliteResult<Vec<Material>>>()?;

        Ok(materials)
    }

    /// 查询全部材料（删除选择器使用）
    pub fn list_all(&self) -> RepositoryResult<Vec<Material>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, project_name, material_name, required_quantity
            FROM materials
            ORDER BY project_name, id
            "#,
        )?;

        let materials = stmt
            .query_map([], map_material)?
            .collect::<SqliteResult<Vec<Material>>>()?;

        Ok(materials)
    }

    /// 查询材料当前需求数量
    ///
    /// # 返回
    /// - Ok(Some(qty)): 找到材料
    /// - Ok(None): 材料不存在
    pub fn find_required_quantity(
        &self,
        project_name: &str,
        material_name: &str,
    ) -> RepositoryResult<Option<i64>> {
        let conn = self.get_conn()?;
        let qty = conn
            .query_row(
                r#"
                SELECT required_quantity FROM materials
                WHERE project_name = ?1 AND material_name = ?2
                "#,
                params![project_name, material_name],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(qty)
    }

    /// 删除单个 (项目, 材料)
    ///
    /// # 返回
    /// - Ok(usize): 删除行数（0 或 1）
    pub fn delete(&self, project_name: &str, material_name: &str) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let rows = conn.execute(
            "DELETE FROM materials WHERE project_name = ?1 AND material_name = ?2",
            params![project_name, material_name],
        )?;
        Ok(rows)
    }
}
