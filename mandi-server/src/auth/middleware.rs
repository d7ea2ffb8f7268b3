//! Authentication middleware
//!
//! Extracts and validates the `Authorization: Bearer <token>` header and
//! injects [`CurrentUser`] into request extensions for downstream handlers.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::security_log;
use shared::AppError;

/// Routes reachable without a token: the login flow itself plus health.
/// The user-info route carries its token in the body, so it validates
/// the session in the handler rather than here.
fn is_public_path(path: &str) -> bool {
    matches!(
        path,
        "/users/send-otp" | "/users/verify-otp" | "/users/userInfo" | "/health"
    )
}

/// Require a valid, unrevoked session on every non-public route
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Let CORS preflight through
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    if is_public_path(req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header).ok_or_else(|| {
            AppError::with_message(shared::ErrorCode::TokenInvalid, "Invalid authorization header")
        })?,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::not_authenticated());
        }
    };

    match state.jwt_service.validate_token(token) {
        Ok(claims) => {
            if state.revoked_sessions.is_revoked(&claims.jti) {
                security_log!("WARN", "revoked_session", uri = format!("{:?}", req.uri()));
                return Err(AppError::new(shared::ErrorCode::SessionRevoked));
            }
            let user = CurrentUser::try_from(claims)?;
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );
            Err(e.into())
        }
    }
}
