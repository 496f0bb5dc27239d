//! Application state management

use database::postgres::DatabaseConnection;

/// Shared application state
///
/// Cloned into every router; the connection is a pool handle.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub db: DatabaseConnection,
}
