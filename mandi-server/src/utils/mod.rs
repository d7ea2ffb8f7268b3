//! Utility module
//!
//! - Error types re-exported from `shared::error`
//! - Logging setup

pub mod logger;

pub use shared::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
