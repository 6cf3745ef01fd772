use sqlx::SqlitePool;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no cached records; every request goes to the pool.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
}
