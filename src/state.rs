//! Shared application state for all routes.

use crate::db::Database;

#[derive(Clone)]
pub struct AppState {
    /// The persistence gateway, shared by every request.
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}
