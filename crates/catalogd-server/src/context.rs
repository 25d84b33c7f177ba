//! Application context shared across route handlers.

use std::sync::Arc;

use catalogd_core::config::Config;
use catalogd_db::pool::DbPool;

use crate::images::ImageStore;

/// Application context shared by all request handlers (via Axum state).
///
/// This is cheaply cloneable because it only holds the pool handle and
/// `Arc`s.
#[derive(Clone)]
pub struct AppContext {
    /// Database connection pool.
    pub db: DbPool,
    /// Content-addressed image store.
    pub images: Arc<ImageStore>,
    /// Immutable application configuration.
    pub config: Arc<Config>,
}
