//! Purchase API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::str::FromStr;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::workflow;
use shared::models::{
    CreateOrderRequest, Order, OrderStatus, PurchaseView, SaleView, UpdateOrderStatusRequest,
};
use shared::{AppError, AppResult, ErrorCode};

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RoleQuery {
    /// "purchase" (default) or "sale"
    #[serde(rename = "type")]
    pub role: Option<String>,
}

fn parse_status_param(raw: &str) -> AppResult<OrderStatus> {
    OrderStatus::from_str(raw).map_err(|_| {
        AppError::with_message(ErrorCode::InvalidStatus, format!("unknown status {raw:?}"))
    })
}

fn parse_status_filter(query: &StatusQuery) -> AppResult<Option<OrderStatus>> {
    query.status.as_deref().map(parse_status_param).transpose()
}

/// POST /purchase/create - place an order as the current buyer
pub async fn create(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(req): Json<CreateOrderRequest>,
) -> AppResult<Json<Order>> {
    let order = workflow::create_order(&state.pool, current.id, &req).await?;
    Ok(Json(order))
}

/// GET /purchase/all - the buyer projection, optional ?status= filter
pub async fn list_purchases(
    State(state): State<ServerState>,
    current: CurrentUser,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<Vec<PurchaseView>>> {
    let status = parse_status_filter(&query)?;
    let purchases = workflow::list_purchases(&state.pool, current.id, status).await?;
    Ok(Json(purchases))
}

/// GET /purchase/vendor/sales - the vendor projection, optional ?status=
pub async fn list_sales(
    State(state): State<ServerState>,
    current: CurrentUser,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<Vec<SaleView>>> {
    let status = parse_status_filter(&query)?;
    let sales = workflow::list_sales(&state.pool, current.id, status).await?;
    Ok(Json(sales))
}

/// GET /purchase/status/{status}?type=purchase|sale - one status, either role
///
/// Responds with the matching projection as untyped JSON since the two
/// roles serialize different shapes.
pub async fn list_by_status(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(status): Path<String>,
    Query(query): Query<RoleQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let status = parse_status_param(&status)?;
    match query.role.as_deref() {
        Some("sale") => {
            let sales = workflow::list_sales(&state.pool, current.id, Some(status)).await?;
            Ok(Json(serde_json::to_value(sales).map_err(|e| {
                AppError::internal(format!("serialization failed: {e}"))
            })?))
        }
        Some("purchase") | None => {
            let purchases =
                workflow::list_purchases(&state.pool, current.id, Some(status)).await?;
            Ok(Json(serde_json::to_value(purchases).map_err(|e| {
                AppError::internal(format!("serialization failed: {e}"))
            })?))
        }
        Some(other) => Err(AppError::validation(format!(
            "type must be purchase or sale, got {other:?}"
        ))),
    }
}

/// PUT /purchase/{id}/status - drive a status transition
pub async fn update_status(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<Order>> {
    let order = workflow::update_status(&state.pool, current.id, id, req.status).await?;
    Ok(Json(order))
}
