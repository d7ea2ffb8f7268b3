//! Mandi Server - phone-OTP storefront and ordering backend
//!
//! # Architecture
//!
//! - **Auth** (`auth`): phone-OTP login, JWT sessions, revocation
//! - **Database** (`db`): embedded SQLite via sqlx, free-function repositories
//! - **Workflow** (`workflow`): the order state machine and role projections
//! - **HTTP API** (`api`): route groups for users, company, sell, purchase
//!
//! # Module structure
//!
//! ```text
//! mandi-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # OTP, JWT, middleware, extractor
//! ├── db/            # pool setup and repositories
//! ├── workflow/      # order engine and money math
//! ├── api/           # HTTP handlers
//! ├── routes/        # router assembly and middleware stack
//! ├── middleware/    # request logging
//! └── utils/         # logging setup, error re-exports
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod middleware;
pub mod routes;
pub mod utils;
pub mod workflow;

// Re-export common types
pub use auth::{CurrentUser, JwtService, OtpSender};
pub use core::{Config, Server, ServerState};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - events worth finding in one grep
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
    ($level:expr, $event:expr) => {
        tracing::info!(target: "security", level = $level, event = $event);
    };
}

/// Load .env and set up logging
pub fn setup_environment() {
    dotenv::dotenv().ok();
    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}

pub fn print_banner() {
    println!(
        r#"
    __  ___                 ___
   /  |/  /___ _____  ____/ (_)
  / /|_/ / __ `/ __ \/ __  / /
 / /  / / /_/ / / / / /_/ / /
/_/  /_/\__,_/_/ /_/\__,_/_/
    "#
    );
}
