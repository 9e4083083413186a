//! Persisted entities: Person and Book.

mod book;
mod person;
pub mod schema;

pub use book::{Book, NewBook};
pub use person::{NewPerson, Person};
pub use schema::TableSchema;

use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, Postgres};

/// A row type with a fixed table. Reads select `schema::all_columns` in that order.
pub trait Entity: for<'r> FromRow<'r, PgRow> + Serialize + Send + Unpin + 'static {
    const SCHEMA: TableSchema;
    /// Singular name used in messages and logs.
    const LABEL: &'static str;

    fn id(&self) -> i64;
}

/// Request body for creating an entity.
pub trait NewRecord: DeserializeOwned + Send + 'static {
    type Record: Entity;

    /// Bind values in `SCHEMA.columns` order.
    fn bind<'q>(
        self,
        query: QueryAs<'q, Postgres, Self::Record, PgArguments>,
    ) -> QueryAs<'q, Postgres, Self::Record, PgArguments>;
}
