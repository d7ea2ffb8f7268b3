//! Unified error codes for the Mandi order service
//!
//! Error codes are shared between the server and the mobile client so that
//! failures stay machine-distinguishable across the wire. They are organized
//! by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Company errors
//! - 4xxx: Order errors
//! - 6xxx: Product errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// One-time code does not match
    InvalidOtp = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Session was revoked (logout)
    SessionRevoked = 1005,
    /// One-time code has expired
    OtpExpired = 1006,
    /// Too many failed verification attempts
    TooManyOtpAttempts = 1007,
    /// Phone number is malformed
    InvalidPhoneNumber = 1008,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,

    // ==================== 3xxx: Company ====================
    /// Company profile not found for this account
    CompanyNotFound = 3001,
    /// Company profile already exists (profiles are create-once)
    CompanyAlreadyExists = 3002,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Requested status change is not a legal transition
    InvalidStatusTransition = 4002,
    /// Concurrent update lost the race; retry with a fresh read
    ConcurrentUpdate = 4003,
    /// Quantity must be at least 1
    InvalidQuantity = 4004,
    /// Unknown order status value
    InvalidStatus = 4005,

    // ==================== 6xxx: Product ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Product has referencing purchases and cannot be deleted
    ProductHasPurchases = 6002,
    /// Selling price must be a positive number
    InvalidPrice = 6003,
    /// Unknown unit of measure
    InvalidUnit = 6004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the default human-readable message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidOtp => "Verification code does not match",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::SessionRevoked => "Session has been revoked",
            ErrorCode::OtpExpired => "Verification code has expired",
            ErrorCode::TooManyOtpAttempts => "Too many failed verification attempts",
            ErrorCode::InvalidPhoneNumber => "Phone number is malformed",

            ErrorCode::PermissionDenied => "Permission denied",

            ErrorCode::CompanyNotFound => "Company profile not found",
            ErrorCode::CompanyAlreadyExists => "Company profile already exists",

            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::InvalidStatusTransition => "Status transition is not allowed",
            ErrorCode::ConcurrentUpdate => "Order was updated concurrently, retry",
            ErrorCode::InvalidQuantity => "Quantity must be at least 1",
            ErrorCode::InvalidStatus => "Unknown order status",

            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductHasPurchases => "Product has existing purchases",
            ErrorCode::InvalidPrice => "Selling price must be positive",
            ErrorCode::InvalidUnit => "Unknown unit of measure",

            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            7 => Self::RequiredField,
            8 => Self::ValueOutOfRange,

            1001 => Self::NotAuthenticated,
            1002 => Self::InvalidOtp,
            1003 => Self::TokenExpired,
            1004 => Self::TokenInvalid,
            1005 => Self::SessionRevoked,
            1006 => Self::OtpExpired,
            1007 => Self::TooManyOtpAttempts,
            1008 => Self::InvalidPhoneNumber,

            2001 => Self::PermissionDenied,

            3001 => Self::CompanyNotFound,
            3002 => Self::CompanyAlreadyExists,

            4001 => Self::OrderNotFound,
            4002 => Self::InvalidStatusTransition,
            4003 => Self::ConcurrentUpdate,
            4004 => Self::InvalidQuantity,
            4005 => Self::InvalidStatus,

            6001 => Self::ProductNotFound,
            6002 => Self::ProductHasPurchases,
            6003 => Self::InvalidPrice,
            6004 => Self::InvalidUnit,

            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            9003 => Self::ConfigError,

            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code.code()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.code(), self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_u16() {
        for code in [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::InvalidOtp,
            ErrorCode::InvalidStatusTransition,
            ErrorCode::ProductHasPurchases,
            ErrorCode::DatabaseError,
        ] {
            let raw: u16 = code.into();
            assert_eq!(ErrorCode::try_from(raw), Ok(code));
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert_eq!(ErrorCode::try_from(5555), Err(InvalidErrorCode(5555)));
    }

    #[test]
    fn serializes_as_number() {
        let json = serde_json::to_string(&ErrorCode::InvalidStatusTransition).unwrap();
        assert_eq!(json, "4002");
    }
}
