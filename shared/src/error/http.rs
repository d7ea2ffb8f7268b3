use super::{ErrorCategory, ErrorCode};
use http::StatusCode;

impl ErrorCode {
    /// HTTP status code this error maps to on the wire
    pub fn http_status(&self) -> StatusCode {
        match self {
            ErrorCode::Success => StatusCode::OK,

            ErrorCode::NotFound
            | ErrorCode::CompanyNotFound
            | ErrorCode::OrderNotFound
            | ErrorCode::ProductNotFound => StatusCode::NOT_FOUND,

            ErrorCode::AlreadyExists
            | ErrorCode::CompanyAlreadyExists
            | ErrorCode::InvalidStatusTransition
            | ErrorCode::ConcurrentUpdate
            | ErrorCode::ProductHasPurchases => StatusCode::CONFLICT,

            ErrorCode::TooManyOtpAttempts => StatusCode::TOO_MANY_REQUESTS,

            // Bad input, not a failed authentication
            ErrorCode::InvalidPhoneNumber => StatusCode::BAD_REQUEST,

            _ => match self.category() {
                ErrorCategory::Auth => StatusCode::UNAUTHORIZED,
                ErrorCategory::Permission => StatusCode::FORBIDDEN,
                ErrorCategory::System => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::BAD_REQUEST,
            },
        }
    }
}
