//! Shared application state passed to route builders and the readiness check.

/// Cloned per handler; both fields are cheap to clone (the connection is a pool handle).
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: database::postgres::DatabaseConnection,
}
