//! Sell API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};
use std::str::FromStr;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{company, product};
use crate::workflow::{self, money};
use shared::models::{CreateProductRequest, Product, UnitOfMeasure, UpdateProductRequest};
use shared::{AppError, AppResult, ErrorCode};

async fn require_company(
    state: &ServerState,
    current: &CurrentUser,
) -> AppResult<shared::models::Company> {
    company::find_by_owner(&state.pool, current.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CompanyNotFound))
}

/// GET /sell/getProducts - the viewer's full catalog
pub async fn list_products(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<Vec<Product>>> {
    let owned = require_company(&state, &current).await?;
    let products = product::find_by_company(&state.pool, owned.id).await?;
    Ok(Json(products))
}

/// POST /sell/addProduct - add a product to the viewer's catalog
pub async fn add_product(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(req): Json<CreateProductRequest>,
) -> AppResult<Json<Product>> {
    let owned = require_company(&state, &current).await?;

    if req.product_name.trim().is_empty() {
        return Err(AppError::validation("productName is required"));
    }
    money::validate_price(req.selling_price)?;
    UnitOfMeasure::from_str(&req.units).map_err(|_| {
        AppError::with_message(
            ErrorCode::InvalidUnit,
            format!("unknown unit {:?}", req.units),
        )
    })?;

    let created = product::create(&state.pool, owned.id, req).await?;
    tracing::info!(product_id = created.id, company_id = owned.id, "product added");
    Ok(Json(created))
}

/// PUT /sell/product/{id} - edit fields of an owned product
pub async fn update_product(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateProductRequest>,
) -> AppResult<Json<Product>> {
    let owned = require_company(&state, &current).await?;

    let existing = product::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;
    if existing.company_id != owned.id {
        return Err(AppError::permission_denied());
    }

    if let Some(name) = &req.product_name
        && name.trim().is_empty()
    {
        return Err(AppError::validation("productName must not be empty"));
    }
    if let Some(price) = req.selling_price {
        money::validate_price(price)?;
    }
    if let Some(units) = &req.units {
        UnitOfMeasure::from_str(units).map_err(|_| {
            AppError::with_message(ErrorCode::InvalidUnit, format!("unknown unit {units:?}"))
        })?;
    }

    let updated = product::update(&state.pool, id, req).await?;
    tracing::info!(product_id = id, company_id = owned.id, "product updated");
    Ok(Json(updated))
}

/// DELETE /sell/product/{id} - remove a product, unless purchases reference it
pub async fn delete_product(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Value>> {
    workflow::delete_product(&state.pool, current.id, id).await?;
    Ok(Json(json!({ "message": "Product deleted" })))
}
