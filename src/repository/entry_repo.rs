// ==========================================
// 车间生产跟踪系统 - 生产录入数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑（完成率由 API 层计算后传入）
// 约束: entry_date 以 ISO 文本存储，区间查询依赖字典序
// ==========================================

use crate::domain::entry::{NewProductionEntry, ProductionEntry};
use crate::domain::report::ReportWindow;
use crate::domain::types::ProcessStep;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// ProcessStep <-> TEXT 映射
// ==========================================
impl ToSql for ProcessStep {
    fn to_sql(&self) -> SqliteResult<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.label()))
    }
}

impl FromSql for ProcessStep {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse::<ProcessStep>()
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, entry_date, material_name, produced_quantity, required_quantity,
           completion_percentage, process, project_name
    FROM entries
"#;

fn map_entry(row: &Row<'_>) -> SqliteResult<ProductionEntry> {
    Ok(ProductionEntry {
        id: row.get(0)?,
        entry_date: row.get(1)?,
        material_name: row.get(2)?,
        produced_quantity: row.get(3)?,
        required_quantity: row.get(4)?,
        completion_percentage: row.get(5)?,
        process: row.get(6)?,
        project_name: row.get(7)?,
    })
}

// ==========================================
// EntryRepository - 生产录入仓储
// ==========================================
/// 生产录入仓储
/// 职责: entries 表追加、查询、按 id 删除、整表清空
pub struct EntryRepository {
    conn: Arc<Mutex<Connection>>,
}

impl EntryRepository {
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

    /// 追加一条录入
    ///
    /// # 返回
    /// - Ok(ProductionEntry): 带数据库 id 的录入
    pub fn insert(&self, entry: NewProductionEntry) -> RepositoryResult<ProductionEntry> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO entries (
                entry_date, material_name, produced_quantity, required_quantity,
                completion_percentage, process, project_name
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                entry.entry_date,
                entry.material_name,
                entry.produced_quantity,
                entry.required_quantity,
                entry.completion_percentage,
                entry.process,
                entry.project_name,
            ],
        )?;
        let id = conn.last_insert_rowid();
        Ok(entry.with_id(id))
    }

    /// 按 id 查询
    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<ProductionEntry>> {
        let conn = self.get_conn()?;
        let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
        let entry = conn.query_row(&sql, params![id], map_entry).optional()?;
        Ok(entry)
    }

    /// 查询全部录入（按 id 升序）
    pub fn list_all(&self) -> RepositoryResult<Vec<ProductionEntry>> {
        let conn = self.get_conn()?;
        let sql = format!("{} ORDER BY id", SELECT_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;

        let entries = stmt
            .query_map([], map_entry)?
            .collect::<SqliteResult<Vec<ProductionEntry>>>()?;

        Ok(entries)
    }

    /// 查询窗口内的录入（两端包含，ISO 字符串比较）
    pub fn list_in_window(&self, window: &ReportWindow) -> RepositoryResult<Vec<ProductionEntry>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "{} WHERE entry_date >= ?1 AND entry_date <= ?2 ORDER BY entry_date, id",
            SELECT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;

        let entries = stmt
            .query_map(params![window.start_key(), window.end_key()], map_entry)?
            .collect::<SqliteResult<Vec<ProductionEntry>>>()?;

        Ok(entries)
    }

    /// 按 id 删除
    ///
    /// # 返回
    /// - Ok(usize): 删除行数（0 表示 id 不存在）
    pub fn delete_by_id(&self, id: i64) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let rows = conn.execute("DELETE FROM entries WHERE id = ?1", params![id])?;
        Ok(rows)
    }

    /// 清空全部录入（项目/材料不受影响）
    pub fn delete_all(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let rows = conn.execute("DELETE FROM entries", [])?;
        Ok(rows)
    }

    /// 录入总数
    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let n = conn.query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;
        Ok(n)
    }
}
