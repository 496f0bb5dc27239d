/// Errors raised outside the per-query path: readiness probes and schema upgrades.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Database unhealthy: {0}")]
    Unhealthy(String),

    #[cfg(feature = "postgres")]
    #[error("Migrations for {app} failed: {source}")]
    Migration {
        app: String,
        #[source]
        source: sea_orm::DbErr,
    },
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
