//! User API Handlers

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::user;
use crate::security_log;
use shared::models::UserProfile;
use shared::{AppError, AppResult, ErrorCode};

/// Digits only, optional leading +
fn is_valid_phone(phone: &str) -> bool {
    let rest = phone.strip_prefix('+').unwrap_or(phone);
    !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit())
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpRequest {
    #[validate(length(min = 8, max = 16, message = "Phone number length is invalid"))]
    pub phone_number: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    pub phone_number: String,
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct UserInfoRequest {
    pub token: String,
}

/// POST /users/send-otp - issue a login code for a phone number
pub async fn send_otp(
    State(state): State<ServerState>,
    Json(req): Json<SendOtpRequest>,
) -> AppResult<Json<Value>> {
    req.validate().map_err(|_| {
        AppError::with_message(ErrorCode::InvalidPhoneNumber, "Phone number is malformed")
    })?;
    if !is_valid_phone(&req.phone_number) {
        return Err(AppError::with_message(
            ErrorCode::InvalidPhoneNumber,
            "Phone number is malformed",
        ));
    }

    let code = state.otp_store.issue(&req.phone_number);
    state.otp_sender.send_code(&req.phone_number, &code);
    Ok(Json(json!({ "message": "OTP sent" })))
}

/// POST /users/verify-otp - trade a code for a session token
///
/// The account is created on first successful verification.
pub async fn verify_otp(
    State(state): State<ServerState>,
    Json(req): Json<VerifyOtpRequest>,
) -> AppResult<Json<Value>> {
    if let Err(e) = state.otp_store.verify(&req.phone_number, &req.code) {
        security_log!("WARN", "otp_verify_failed", error = format!("{}", e));
        return Err(e.into());
    }

    let account = user::find_or_create_by_phone(&state.pool, &req.phone_number).await?;
    let (token, _) = state
        .jwt_service
        .generate_token(account.id, &account.phone_number)?;

    security_log!("INFO", "login", user_id = account.id);
    Ok(Json(json!({ "token": token })))
}

/// POST /users/userInfo - resolve a session token to its account profile
///
/// Takes the token in the body (legacy client contract), so this route is
/// public and the validation happens here.
pub async fn user_info(
    State(state): State<ServerState>,
    Json(req): Json<UserInfoRequest>,
) -> AppResult<Json<Value>> {
    let claims = state.jwt_service.validate_token(&req.token)?;
    if state.revoked_sessions.is_revoked(&claims.jti) {
        return Err(AppError::new(ErrorCode::SessionRevoked));
    }
    let current = CurrentUser::try_from(claims)?;

    let account = user::find_by_id(&state.pool, current.id)
        .await?
        .ok_or_else(AppError::not_authenticated)?;

    Ok(Json(json!({ "user": UserProfile::from(&account) })))
}

/// POST /users/logout - revoke the current session
pub async fn logout(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<Value>> {
    // The token itself is not invalidated cryptographically; keep the jti
    // in the revocation set for the longest a token could still live.
    let exp = chrono::Utc::now().timestamp() + state.config.jwt.expiration_minutes * 60;
    state.revoked_sessions.revoke(&current.jti, exp);

    security_log!("INFO", "logout", user_id = current.id);
    Ok(Json(json!({ "message": "Logged out" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_validation() {
        assert!(is_valid_phone("+919876543210"));
        assert!(is_valid_phone("5551234567"));
        assert!(!is_valid_phone("+"));
        assert!(!is_valid_phone("555-123-4567"));
        assert!(!is_valid_phone("notaphone"));
    }
}
