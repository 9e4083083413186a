//! Generic CRUD execution against PostgreSQL. Each call is a single statement.

use crate::db::Database;
use crate::error::AppError;
use crate::model::{Entity, NewRecord};
use crate::sql::{insert, select_live, select_live_by_id, select_live_where_any, soft_delete};

pub struct CrudService;

impl CrudService {
    /// Every live row, ordered by id. An empty table yields an empty vec.
    pub async fn list<E: Entity>(db: &Database) -> Result<Vec<E>, AppError> {
        let sql = select_live(&E::SCHEMA);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, E>(&sql).fetch_all(db.pool()).await?;
        Ok(rows)
    }

    /// Fetch one live row by primary key.
    pub async fn read<E: Entity>(db: &Database, id: i64) -> Result<Option<E>, AppError> {
        let sql = select_live_by_id(&E::SCHEMA);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(db.pool())
            .await?;
        Ok(row)
    }

    /// Live rows whose `column` matches one of `values`. Used for batch-loading related rows.
    pub async fn fetch_where_any<E: Entity>(
        db: &Database,
        column: &str,
        values: &[i64],
    ) -> Result<Vec<E>, AppError> {
        if values.is_empty() {
            return Ok(Vec::new());
        }
        let sql = select_live_where_any(&E::SCHEMA, column);
        tracing::debug!(sql = %sql, values = ?values, "query");
        let rows = sqlx::query_as::<_, E>(&sql)
            .bind(values)
            .fetch_all(db.pool())
            .await?;
        Ok(rows)
    }

    /// Insert one row and return it with id and timestamps. Constraint violations
    /// come back as `Conflict` / `Validation`.
    pub async fn create<N: NewRecord>(db: &Database, new: N) -> Result<N::Record, AppError> {
        let sql = insert(&<N::Record as Entity>::SCHEMA);
        tracing::debug!(sql = %sql, "query");
        let row = new
            .bind(sqlx::query_as::<_, N::Record>(&sql))
            .fetch_one(db.pool())
            .await
            .map_err(AppError::from_db)?;
        tracing::info!(entity = <N::Record as Entity>::LABEL, id = row.id(), "created");
        Ok(row)
    }

    /// Soft-delete one live row. Returns the flagged row, or None if no live row had that id.
    pub async fn delete<E: Entity>(db: &Database, id: i64) -> Result<Option<E>, AppError> {
        let sql = soft_delete(&E::SCHEMA);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(db.pool())
            .await?;
        if row.is_some() {
            tracing::info!(entity = E::LABEL, id, "soft-deleted");
        }
        Ok(row)
    }
}
