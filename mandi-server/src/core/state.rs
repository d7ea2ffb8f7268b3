use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::{JwtService, LogOtpSender, OtpSender, OtpStore, RevokedSessions};
use crate::core::Config;
use crate::db::DbService;
use shared::AppError;

/// Server state - shared handles to every service
///
/// Cloning is cheap: everything inside is either `Copy`-ish config or an
/// `Arc`/pool handle.
///
/// | Field | Description |
/// |-------|-------------|
/// | config | immutable configuration |
/// | pool | SQLite connection pool |
/// | jwt_service | session token signing/validation |
/// | otp_store | pending login codes |
/// | revoked_sessions | logged-out session IDs |
/// | otp_sender | code delivery channel (SMS in production, log otherwise) |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
    pub otp_store: Arc<OtpStore>,
    pub revoked_sessions: Arc<RevokedSessions>,
    pub otp_sender: Arc<dyn OtpSender>,
}

impl ServerState {
    /// Open the database and wire up all services
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        std::fs::create_dir_all(&config.work_dir).map_err(|e| {
            AppError::config(format!(
                "Cannot create work directory {}: {e}",
                config.work_dir
            ))
        })?;
        let db = DbService::new(&config.db_path).await?;
        Ok(Self::with_parts(
            config.clone(),
            db.pool,
            Arc::new(LogOtpSender),
        ))
    }

    /// Assemble state from pre-built parts. Tests use this to inject a
    /// temporary database and a recording OTP sender.
    pub fn with_parts(config: Config, pool: SqlitePool, otp_sender: Arc<dyn OtpSender>) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config,
            pool,
            jwt_service,
            otp_store: Arc::new(OtpStore::new()),
            revoked_sessions: Arc::new(RevokedSessions::new()),
            otp_sender,
        }
    }
}
