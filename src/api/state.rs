use std::path::PathBuf;

use sqlx::SqlitePool;

use crate::services::search::SearchAggregator;

/// Shared application state
///
/// The pool is the only cross-request state; handlers acquire connections
/// per query and everything releases on all exit paths.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub search: SearchAggregator,
    pub upload_dir: PathBuf,
}

impl AppState {
    pub fn new(pool: SqlitePool, search: SearchAggregator, upload_dir: PathBuf) -> Self {
        Self {
            pool,
            search,
            upload_dir,
        }
    }
}
