//! Shared types for the Mandi order service
//!
//! Wire models and the unified error system used by the server crate and by
//! any future client crates: entities, request/response payloads, error
//! codes, and ID/time utilities.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{Order, OrderStatus};
