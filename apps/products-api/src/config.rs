//! Configuration for Products API

use core_config::{AppInfo, FromEnv, app_info, env_optional, env_parse, server::ServerConfig};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Externally visible origin, prefixed to JSON:API `self` links
    pub public_url: String,
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // DATABASE_URL is required
        let server = ServerConfig::from_env()?;

        let public_url = env_optional("PUBLIC_URL")
            .unwrap_or_else(|| format!("http://localhost:{}", server.port))
            .trim_end_matches('/')
            .to_string();
        let run_migrations = env_parse("RUN_MIGRATIONS", "true")?;

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
            public_url,
            run_migrations,
        })
    }

    /// Absolute URL of the JSON:API collection.
    pub fn json_api_base(&self) -> String {
        format!("{}/api/v2/products", self.public_url)
    }
}
