//! Sell API module
//!
//! A vendor's management of their own catalog.

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/sell", sell_routes())
}

fn sell_routes() -> Router<ServerState> {
    Router::new()
        .route("/getProducts", get(handler::list_products))
        .route("/addProduct", post(handler::add_product))
        .route(
            "/product/{id}",
            put(handler::update_product).delete(handler::delete_product),
        )
}
