//! User API module
//!
//! Phone-OTP login flow plus session introspection and logout.

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/users", user_routes())
}

fn user_routes() -> Router<ServerState> {
    Router::new()
        .route("/send-otp", post(handler::send_otp))
        .route("/verify-otp", post(handler::verify_otp))
        .route("/userInfo", post(handler::user_info))
        .route("/logout", post(handler::logout))
}
