//! Purchase API module
//!
//! Order creation, the two role projections, and status transitions.

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/purchase", purchase_routes())
}

fn purchase_routes() -> Router<ServerState> {
    Router::new()
        .route("/create", post(handler::create))
        .route("/all", get(handler::list_purchases))
        .route("/vendor/sales", get(handler::list_sales))
        .route("/status/{status}", get(handler::list_by_status))
        .route("/{id}/status", put(handler::update_status))
}
