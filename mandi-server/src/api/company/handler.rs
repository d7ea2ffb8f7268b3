//! Company API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{RepoError, company, product};
use shared::models::{Company, CompanySummary, CreateCompanyRequest, ProductSummary};
use shared::{AppError, AppResult, ErrorCode};

/// GET /company/all - vendor directory
pub async fn list_all(State(state): State<ServerState>) -> AppResult<Json<Vec<CompanySummary>>> {
    let companies = company::find_all(&state.pool).await?;
    Ok(Json(companies))
}

/// GET /company/products/{vendor_id} - a vendor's storefront listing
pub async fn storefront_products(
    State(state): State<ServerState>,
    Path(vendor_id): Path<i64>,
) -> AppResult<Json<Vec<ProductSummary>>> {
    company::find_by_id(&state.pool, vendor_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CompanyNotFound))?;

    let products = product::list_for_storefront(&state.pool, vendor_id).await?;
    Ok(Json(products))
}

/// GET /company/details - the viewer's own company profile
pub async fn get_details(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<Company>> {
    let owned = company::find_by_owner(&state.pool, current.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CompanyNotFound))?;
    Ok(Json(owned))
}

/// POST /company/details - create the viewer's company profile
///
/// Profiles are create-once and immutable; a second POST conflicts.
pub async fn create_details(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(req): Json<CreateCompanyRequest>,
) -> AppResult<Json<Company>> {
    if req.brand_name.trim().is_empty() || req.company_name.trim().is_empty() {
        return Err(AppError::validation("brandName and companyName are required"));
    }

    match company::create(&state.pool, current.id, req).await {
        Ok(created) => {
            tracing::info!(company_id = created.id, owner = current.id, "company created");
            Ok(Json(created))
        }
        Err(RepoError::Duplicate(_)) => Err(AppError::new(ErrorCode::CompanyAlreadyExists)),
        Err(e) => Err(e.into()),
    }
}
