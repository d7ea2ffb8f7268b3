use crate::auth::JwtConfig;

/// Server configuration
///
/// Every value can be overridden through environment variables:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | /var/lib/mandi | data directory, holds the database |
/// | DATABASE_PATH | WORK_DIR/mandi.db | SQLite database file override |
/// | HTTP_PORT | 3000 | HTTP listen port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | JWT_SECRET | (generated) | token signing secret, 32+ bytes |
/// | JWT_EXPIRATION_MINUTES | 10080 | token lifetime |
#[derive(Debug, Clone)]
pub struct Config {
    /// Data directory
    pub work_dir: String,
    /// SQLite database file path
    pub db_path: String,
    /// HTTP API port
    pub http_port: u16,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Runtime environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables, with defaults
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/mandi".into());
        Self {
            db_path: resolve_db_path(&work_dir, std::env::var("DATABASE_PATH").ok()),
            work_dir,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// DATABASE_PATH wins when set; otherwise the database lives in the
/// work directory.
fn resolve_db_path(work_dir: &str, override_path: Option<String>) -> String {
    match override_path {
        Some(path) if !path.trim().is_empty() => path,
        _ => std::path::Path::new(work_dir)
            .join("mandi.db")
            .to_string_lossy()
            .into_owned(),
    }
}
