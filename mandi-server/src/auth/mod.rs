//! Authentication Module
//!
//! Phone-OTP login, JWT session tokens, and the middleware/extractor pair
//! that guards protected routes.

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod otp;
pub mod session;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;
pub use otp::{LogOtpSender, OtpError, OtpSender, OtpStore};
pub use session::RevokedSessions;
