use super::schema::{Column, TableSchema, UniqueIndex};
use super::{Book, Entity, NewRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{FromRow, Postgres};

#[derive(Clone, Debug, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Live books owned by this person; filled by the service, not the row.
    #[sqlx(skip)]
    pub books: Vec<Book>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Entity for Person {
    const SCHEMA: TableSchema = TableSchema {
        table: "people",
        columns: &[
            Column {
                name: "name",
                ddl: "TEXT NOT NULL DEFAULT ''",
            },
            Column {
                name: "email",
                ddl: "VARCHAR(100) NOT NULL DEFAULT ''",
            },
        ],
        unique: &[UniqueIndex {
            name: "idx_people_email",
            column: "email",
        }],
        foreign_keys: &[],
    };
    const LABEL: &'static str = "person";

    fn id(&self) -> i64 {
        self.id
    }
}

/// Body of `POST /create/person`. Missing fields default to empty; `id` is ignored.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewPerson {
    pub name: String,
    pub email: String,
}

impl NewRecord for NewPerson {
    type Record = Person;

    fn bind<'q>(
        self,
        query: QueryAs<'q, Postgres, Person, PgArguments>,
    ) -> QueryAs<'q, Postgres, Person, PgArguments> {
        query.bind(self.name).bind(self.email)
    }
}
