//! Schema synchronizer: bring the physical schema in line with the entity definitions.
//! Additive only. Tables, missing columns, unique indexes and foreign keys are created;
//! nothing is dropped or altered.

use crate::db::Database;
use crate::error::AppError;
use crate::model::schema::{ForeignKey, TableSchema, ID_COLUMN, TIMESTAMP_COLUMNS};
use crate::model::{Book, Entity, Person};
use crate::sql::quoted;

/// DDL statements for one table, in execution order.
pub fn table_statements(schema: &TableSchema) -> Vec<String> {
    let table = quoted(schema.table);
    let mut out = vec![format!(
        "CREATE TABLE IF NOT EXISTS {} ({} BIGSERIAL PRIMARY KEY)",
        table,
        quoted(ID_COLUMN)
    )];
    for c in schema.columns.iter().chain(TIMESTAMP_COLUMNS.iter()) {
        out.push(format!(
            "ALTER TABLE {} ADD COLUMN IF NOT EXISTS {} {}",
            table,
            quoted(c.name),
            c.ddl
        ));
    }
    for idx in schema.unique {
        out.push(format!(
            "CREATE UNIQUE INDEX IF NOT EXISTS {} ON {} ({})",
            quoted(idx.name),
            table,
            quoted(idx.column)
        ));
    }
    out
}

/// Foreign key constraints. PostgreSQL has no `ADD CONSTRAINT IF NOT EXISTS`,
/// so the caller checks the catalog first.
fn foreign_key_statement(schema: &TableSchema, fk: &ForeignKey) -> String {
    format!(
        "ALTER TABLE {} ADD CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
        quoted(schema.table),
        quoted(fk.name),
        quoted(fk.column),
        quoted(fk.references),
        quoted(ID_COLUMN)
    )
}

async fn sync_table(db: &Database, schema: &TableSchema) -> Result<(), AppError> {
    for sql in table_statements(schema) {
        tracing::debug!(sql = %sql, "schema sync");
        sqlx::query(&sql).execute(db.pool()).await?;
    }
    for fk in schema.foreign_keys {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM pg_constraint WHERE conname = $1 AND conrelid = to_regclass($2))",
        )
        .bind(fk.name)
        .bind(quoted(schema.table))
        .fetch_one(db.pool())
        .await?;
        if !exists.0 {
            let sql = foreign_key_statement(schema, fk);
            tracing::debug!(sql = %sql, "schema sync");
            sqlx::query(&sql).execute(db.pool()).await?;
        }
    }
    tracing::info!(table = schema.table, "schema synchronized");
    Ok(())
}

/// Run once at startup, for each entity. Referenced tables go first.
pub async fn sync_schema(db: &Database) -> Result<(), AppError> {
    sync_table(db, &Person::SCHEMA).await?;
    sync_table(db, &Book::SCHEMA).await?;
    Ok(())
}
