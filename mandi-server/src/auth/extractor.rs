//! JWT Extractor
//!
//! Lets protected handlers take [`CurrentUser`] as an argument. Normally
//! the auth middleware has already validated the token and stashed the
//! user in extensions; the header path below covers routes mounted
//! outside the middleware.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::security_log;
use shared::AppError;

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Already extracted by the middleware
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let token = match auth_header {
            Some(header) => JwtService::extract_from_header(header).ok_or_else(|| {
                AppError::with_message(
                    shared::ErrorCode::TokenInvalid,
                    "Invalid authorization header",
                )
            })?,
            None => {
                security_log!("WARN", "auth_missing", uri = format!("{:?}", parts.uri));
                return Err(AppError::not_authenticated());
            }
        };

        let claims = state.jwt_service.validate_token(token)?;
        if state.revoked_sessions.is_revoked(&claims.jti) {
            return Err(AppError::new(shared::ErrorCode::SessionRevoked));
        }
        let user = CurrentUser::try_from(claims)?;
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}
