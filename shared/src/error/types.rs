use super::{ErrorCategory, ErrorCode};
use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Application error carried from handlers down to the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            message: code.message().to_string(),
            details: None,
        }
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: HashMap<String, Value>) -> Self {
        self.details = Some(details);
        self
    }

    pub fn detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    // ==================== Convenience constructors ====================

    pub fn validation(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, message)
    }

    pub fn not_found(what: impl fmt::Display) -> Self {
        Self::with_message(ErrorCode::NotFound, format!("{what} not found"))
    }

    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    pub fn permission_denied() -> Self {
        Self::new(ErrorCode::PermissionDenied)
    }

    pub fn invalid_otp() -> Self {
        Self::new(ErrorCode::InvalidOtp)
    }

    pub fn otp_expired() -> Self {
        Self::new(ErrorCode::OtpExpired)
    }

    /// Illegal order status change, with `from` and `to` in the details map
    pub fn invalid_transition(from: impl fmt::Display, to: impl fmt::Display) -> Self {
        Self::with_message(
            ErrorCode::InvalidStatusTransition,
            format!("cannot transition order from {from} to {to}"),
        )
        .detail("from", from.to_string())
        .detail("to", to.to_string())
    }

    pub fn concurrent_update() -> Self {
        Self::new(ErrorCode::ConcurrentUpdate)
    }

    /// Delete refused because purchases reference the product. The client
    /// keys off the `hasPurchases` flag to show a specific dialog.
    pub fn product_has_purchases() -> Self {
        Self::new(ErrorCode::ProductHasPurchases).detail("hasPurchases", true)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ConfigError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)
    }
}

impl std::error::Error for AppError {}

impl From<ErrorCode> for AppError {
    fn from(code: ErrorCode) -> Self {
        Self::new(code)
    }
}

/// Wire envelope for error responses
///
/// Success responses are plain JSON bodies; only failures carry this shape.
/// The mobile client reads the `error` field first, then `code`/`details`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    #[serde(rename = "error", skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            code: None,
            error: None,
            data: Some(data),
            details: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn from_error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            error: Some(err.message.clone()),
            data: None,
            details: err.details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.code.category() == ErrorCategory::System {
            tracing::error!(code = self.code.code(), message = %self.message, "system error");
        } else {
            tracing::debug!(code = self.code.code(), message = %self.message, "request error");
        }
        let status = self.code.http_status();
        (status, Json(ApiResponse::from_error(&self))).into_response()
    }
}

/// Standard result alias for handler and service layers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_transition_carries_details() {
        let err = AppError::invalid_transition("COMPLETED", "PENDING");
        let details = err.details.as_ref().unwrap();
        assert_eq!(details["from"], "COMPLETED");
        assert_eq!(details["to"], "PENDING");
        assert_eq!(err.code, ErrorCode::InvalidStatusTransition);
    }

    #[test]
    fn error_body_shape() {
        let err = AppError::product_has_purchases();
        let body = serde_json::to_value(ApiResponse::from_error(&err)).unwrap();
        assert_eq!(body["code"], 6002);
        assert!(body["error"].is_string());
        assert_eq!(body["details"]["hasPurchases"], true);
        assert!(body.get("data").is_none());
    }
}
