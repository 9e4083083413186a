use super::schema::{Column, ForeignKey, TableSchema, UniqueIndex};
use super::{Entity, NewRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{FromRow, Postgres};

#[derive(Clone, Debug, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub call_number: i32,
    pub person_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Entity for Book {
    const SCHEMA: TableSchema = TableSchema {
        table: "books",
        columns: &[
            Column {
                name: "title",
                ddl: "TEXT NOT NULL DEFAULT ''",
            },
            Column {
                name: "author",
                ddl: "TEXT NOT NULL DEFAULT ''",
            },
            Column {
                name: "call_number",
                ddl: "INTEGER NOT NULL DEFAULT 0",
            },
            Column {
                name: "person_id",
                ddl: "BIGINT",
            },
        ],
        unique: &[UniqueIndex {
            name: "idx_books_call_number",
            column: "call_number",
        }],
        foreign_keys: &[ForeignKey {
            name: "fk_books_person_id",
            column: "person_id",
            references: "people",
        }],
    };
    const LABEL: &'static str = "book";

    fn id(&self) -> i64 {
        self.id
    }
}

/// Body of `POST /create/book`. `personId` is optional.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub call_number: i32,
    pub person_id: Option<i64>,
}

impl NewRecord for NewBook {
    type Record = Book;

    fn bind<'q>(
        self,
        query: QueryAs<'q, Postgres, Book, PgArguments>,
    ) -> QueryAs<'q, Postgres, Book, PgArguments> {
        query
            .bind(self.title)
            .bind(self.author)
            .bind(self.call_number)
            .bind(self.person_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_book_reads_camel_case_and_ignores_id() {
        let b: NewBook =
            serde_json::from_str(r#"{"id":99,"title":"Dune","author":"Herbert","callNumber":42}"#).unwrap();
        assert_eq!(b.title, "Dune");
        assert_eq!(b.author, "Herbert");
        assert_eq!(b.call_number, 42);
        assert_eq!(b.person_id, None);
    }

    #[test]
    fn missing_fields_take_zero_values() {
        let b: NewBook = serde_json::from_str("{}").unwrap();
        assert_eq!(b.title, "");
        assert_eq!(b.call_number, 0);
    }

    #[test]
    fn book_serializes_camel_case() {
        let now = Utc::now();
        let b = Book {
            id: 3,
            title: "Dune".into(),
            author: "Herbert".into(),
            call_number: 42,
            person_id: Some(1),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        let v = serde_json::to_value(&b).unwrap();
        assert_eq!(v["callNumber"], 42);
        assert_eq!(v["personId"], 1);
        assert!(v["deletedAt"].is_null());
        assert!(v.get("call_number").is_none());
    }
}
