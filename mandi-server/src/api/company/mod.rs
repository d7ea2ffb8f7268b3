//! Company API module
//!
//! The vendor directory buyers browse, plus the viewer's own company
//! profile (create-once).

mod handler;

use axum::{
    Router,
    routing::get,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/company", company_routes())
}

fn company_routes() -> Router<ServerState> {
    Router::new()
        .route("/all", get(handler::list_all))
        .route("/products/{vendor_id}", get(handler::storefront_products))
        .route(
            "/details",
            get(handler::get_details).post(handler::create_details),
        )
}
