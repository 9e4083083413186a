//! Builds parameterized SELECT, INSERT and soft-delete UPDATE from a table definition.
//! Every read excludes soft-deleted rows.

use crate::model::schema::{TableSchema, DELETED_AT, ID_COLUMN};

/// Quote identifier for PostgreSQL (safe: only from static definitions).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn column_list(schema: &TableSchema) -> String {
    schema
        .all_columns()
        .iter()
        .map(|c| quoted(c))
        .collect::<Vec<_>>()
        .join(", ")
}

fn live() -> String {
    format!("{} IS NULL", quoted(DELETED_AT))
}

/// SELECT every live row, ordered by id.
pub fn select_live(schema: &TableSchema) -> String {
    format!(
        "SELECT {} FROM {} WHERE {} ORDER BY {}",
        column_list(schema),
        quoted(schema.table),
        live(),
        quoted(ID_COLUMN)
    )
}

/// SELECT one live row by primary key. Caller binds the id as `$1`.
pub fn select_live_by_id(schema: &TableSchema) -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = $1 AND {}",
        column_list(schema),
        quoted(schema.table),
        quoted(ID_COLUMN),
        live()
    )
}

/// SELECT live rows whose `column` is in the array bound as `$1`. Used for batch-loading related rows.
pub fn select_live_where_any(schema: &TableSchema, column: &str) -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = ANY($1) AND {} ORDER BY {}",
        column_list(schema),
        quoted(schema.table),
        quoted(column),
        live(),
        quoted(ID_COLUMN)
    )
}

/// INSERT the data columns ($1..$n in definition order) and return the stored row.
pub fn insert(schema: &TableSchema) -> String {
    let cols: Vec<String> = schema.data_columns().map(quoted).collect();
    let placeholders: Vec<String> = (1..=cols.len()).map(|n| format!("${}", n)).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(schema.table),
        cols.join(", "),
        placeholders.join(", "),
        column_list(schema)
    )
}

/// Flag a live row as deleted and return it. Already-deleted rows do not match.
pub fn soft_delete(schema: &TableSchema) -> String {
    format!(
        "UPDATE {} SET {} = NOW(), \"updated_at\" = NOW() WHERE {} = $1 AND {} RETURNING {}",
        quoted(schema.table),
        quoted(DELETED_AT),
        quoted(ID_COLUMN),
        live(),
        column_list(schema)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Book, Entity, Person};

    const PERSON_COLS: &str =
        "\"id\", \"name\", \"email\", \"created_at\", \"updated_at\", \"deleted_at\"";

    #[test]
    fn quoting_escapes_double_quotes() {
        assert_eq!(quoted("people"), "\"people\"");
        assert_eq!(quoted("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn list_filters_deleted_and_orders_by_id() {
        assert_eq!(
            select_live(&Person::SCHEMA),
            format!(
                "SELECT {} FROM \"people\" WHERE \"deleted_at\" IS NULL ORDER BY \"id\"",
                PERSON_COLS
            )
        );
    }

    #[test]
    fn read_by_id_is_also_filtered() {
        let sql = select_live_by_id(&Book::SCHEMA);
        assert!(sql.starts_with("SELECT \"id\", \"title\", \"author\", \"call_number\", \"person_id\","));
        assert!(sql.ends_with("FROM \"books\" WHERE \"id\" = $1 AND \"deleted_at\" IS NULL"));
    }

    #[test]
    fn insert_binds_data_columns_in_order() {
        let sql = insert(&Book::SCHEMA);
        assert!(sql.starts_with(
            "INSERT INTO \"books\" (\"title\", \"author\", \"call_number\", \"person_id\") VALUES ($1, $2, $3, $4) RETURNING \"id\""
        ));
        assert_eq!(
            insert(&Person::SCHEMA),
            format!(
                "INSERT INTO \"people\" (\"name\", \"email\") VALUES ($1, $2) RETURNING {}",
                PERSON_COLS
            )
        );
    }

    #[test]
    fn soft_delete_only_touches_live_rows() {
        assert_eq!(
            soft_delete(&Person::SCHEMA),
            format!(
                "UPDATE \"people\" SET \"deleted_at\" = NOW(), \"updated_at\" = NOW() WHERE \"id\" = $1 AND \"deleted_at\" IS NULL RETURNING {}",
                PERSON_COLS
            )
        );
    }

    #[test]
    fn batch_lookup_uses_any() {
        let sql = select_live_where_any(&Book::SCHEMA, "person_id");
        assert!(sql.contains("WHERE \"person_id\" = ANY($1) AND \"deleted_at\" IS NULL ORDER BY \"id\""));
    }
}
