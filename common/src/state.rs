//! Application state container shared across axum route handlers.
//!
//! Holds the SeaORM database connection and is passed into handlers via
//! axum's `State<T>` extractor.

use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns a shared reference to the internal `DatabaseConnection`.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Returns a cloned copy of the database connection, for contexts that
    /// need ownership (spawned tasks and the like).
    pub fn db_clone(&self) -> DatabaseConnection {
        self.db.clone()
    }
}
