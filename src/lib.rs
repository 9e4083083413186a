//! Bookshelf API: people and their books over REST, stored in PostgreSQL.

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod migration;
pub mod model;
pub mod response;
pub mod sql;
pub mod state;
pub mod service;
pub mod handlers;
pub mod routes;

pub use config::{DbSettings, Settings};
pub use db::Database;
pub use error::{AppError, ConfigError};
pub use migration::sync_schema;
pub use model::{Book, NewBook, NewPerson, Person};
pub use routes::{app, common_routes, entity_routes};
pub use service::CrudService;
pub use state::AppState;
