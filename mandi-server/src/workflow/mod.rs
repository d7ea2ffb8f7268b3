//! Order Workflow Engine
//!
//! Creates purchase orders with a price snapshot and derived total, drives
//! the status state machine, and serves the two role projections (buyer
//! purchases, vendor sales). Status preconditions are enforced with a
//! conditional UPDATE so concurrent transitions cannot both win.

pub mod money;

use crate::db::repository::{company, product, purchase};
use shared::models::{
    BuyerInfo, CreateOrderRequest, Order, OrderStatus, ProductInfo, PurchaseView, SaleView,
    VendorInfo,
};
use shared::{AppError, AppResult, ErrorCode};
use sqlx::SqlitePool;
use std::str::FromStr;

fn parse_status(raw: &str) -> AppResult<OrderStatus> {
    OrderStatus::from_str(raw).map_err(|_| {
        AppError::with_message(ErrorCode::InvalidStatus, format!("unknown status {raw}"))
    })
}

/// Create a new order in PENDING state
///
/// The product's current selling price is snapshotted as the order's unit
/// price; later price edits never touch existing orders.
pub async fn create_order(
    pool: &SqlitePool,
    buyer_id: i64,
    req: &CreateOrderRequest,
) -> AppResult<Order> {
    money::validate_quantity(req.quantity)?;

    let vendor = company::find_by_id(pool, req.vendor_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CompanyNotFound))?;

    let product = product::find_by_id(pool, req.product_id)
        .await?
        .filter(|p| p.company_id == vendor.id)
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;

    let price = product.selling_price;
    let total = money::line_total(price, req.quantity)?;

    let order = purchase::create(
        pool,
        buyer_id,
        vendor.id,
        product.id,
        req.quantity,
        price,
        total,
        OrderStatus::Pending.as_str(),
    )
    .await?;

    tracing::info!(
        order_id = order.id,
        buyer_id,
        vendor_id = vendor.id,
        product_id = product.id,
        total,
        "order created"
    );
    Ok(order)
}

/// Apply a status transition to an order
///
/// Only participants (the buyer, or the owner of the vendor company) may
/// drive transitions. The update is conditional on the status we validated
/// against; if a concurrent transition got there first, the request is
/// re-evaluated against the fresh row instead of a stale read.
pub async fn update_status(
    pool: &SqlitePool,
    viewer_id: i64,
    order_id: i64,
    new_status: OrderStatus,
) -> AppResult<Order> {
    let order = purchase::find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

    if !is_participant(pool, viewer_id, &order).await? {
        return Err(AppError::permission_denied());
    }

    let current = parse_status(&order.status)?;
    if !current.can_transition_to(new_status) {
        return Err(AppError::invalid_transition(current, new_status));
    }

    let won = purchase::transition_status(
        pool,
        order_id,
        current.as_str(),
        new_status.as_str(),
    )
    .await?;

    if !won {
        // Lost the race. Re-read and report against the actual state.
        let fresh = purchase::find_by_id(pool, order_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
        let fresh_status = parse_status(&fresh.status)?;
        if fresh_status == new_status {
            return Err(AppError::concurrent_update());
        }
        return Err(AppError::invalid_transition(fresh_status, new_status));
    }

    tracing::info!(
        order_id,
        from = current.as_str(),
        to = new_status.as_str(),
        "order status updated"
    );

    purchase::find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))
}

async fn is_participant(pool: &SqlitePool, viewer_id: i64, order: &Order) -> AppResult<bool> {
    if order.buyer_id == viewer_id {
        return Ok(true);
    }
    let owned = company::find_by_owner(pool, viewer_id).await?;
    Ok(owned.map(|c| c.id) == Some(order.company_id))
}

/// Buyer projection: the viewer's purchases with vendor and product info
pub async fn list_purchases(
    pool: &SqlitePool,
    buyer_id: i64,
    status: Option<OrderStatus>,
) -> AppResult<Vec<PurchaseView>> {
    let rows = purchase::list_for_buyer(pool, buyer_id, status.map(|s| s.as_str())).await?;
    rows.into_iter()
        .map(|row| {
            Ok(PurchaseView {
                id: row.id,
                quantity: row.quantity,
                price: row.price,
                total: row.total,
                status: parse_status(&row.status)?,
                created_at: row.created_at,
                vendor: VendorInfo {
                    brand_name: row.brand_name,
                    company_name: row.company_name,
                },
                product: ProductInfo {
                    product_name: row.product_name,
                },
            })
        })
        .collect()
}

/// Vendor projection: the viewer's sales with buyer and product info
///
/// The viewer must own a company; without one there is no vendor side to
/// project.
pub async fn list_sales(
    pool: &SqlitePool,
    viewer_id: i64,
    status: Option<OrderStatus>,
) -> AppResult<Vec<SaleView>> {
    let viewer_company = company::find_by_owner(pool, viewer_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CompanyNotFound))?;

    let rows =
        purchase::list_for_company(pool, viewer_company.id, status.map(|s| s.as_str())).await?;
    rows.into_iter()
        .map(|row| {
            Ok(SaleView {
                id: row.id,
                quantity: row.quantity,
                price: row.price,
                total: row.total,
                status: parse_status(&row.status)?,
                created_at: row.created_at,
                buyer: BuyerInfo {
                    phone_number: row.phone_number,
                },
                product: ProductInfo {
                    product_name: row.product_name,
                },
            })
        })
        .collect()
}

/// Delete a vendor's product unless purchases reference it
pub async fn delete_product(pool: &SqlitePool, viewer_id: i64, product_id: i64) -> AppResult<()> {
    let owned = company::find_by_owner(pool, viewer_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CompanyNotFound))?;

    let target = product::find_by_id(pool, product_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;
    if target.company_id != owned.id {
        return Err(AppError::permission_denied());
    }

    if product::purchase_count(pool, product_id).await? > 0 {
        return Err(AppError::product_has_purchases());
    }

    // The delete itself carries the referential guard, so a purchase
    // created after the count above still blocks it.
    if !product::delete(pool, product_id).await? {
        return Err(match product::find_by_id(pool, product_id).await? {
            Some(_) => AppError::product_has_purchases(),
            None => AppError::new(ErrorCode::ProductNotFound),
        });
    }
    tracing::info!(product_id, company_id = owned.id, "product deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::user;
    use shared::models::CreateCompanyRequest;
    use shared::models::CreateProductRequest;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        for sql in [
            "CREATE TABLE user (id INTEGER PRIMARY KEY, phone_number TEXT NOT NULL UNIQUE, created_at INTEGER NOT NULL)",
            "CREATE TABLE company (id INTEGER PRIMARY KEY, owner_user_id INTEGER NOT NULL UNIQUE, brand_name TEXT NOT NULL, company_name TEXT NOT NULL, created_at INTEGER NOT NULL)",
            "CREATE TABLE product (id INTEGER PRIMARY KEY, company_id INTEGER NOT NULL, product_name TEXT NOT NULL, selling_price REAL NOT NULL, units TEXT NOT NULL, description TEXT, image TEXT, created_at INTEGER NOT NULL)",
            "CREATE TABLE purchase (id INTEGER PRIMARY KEY, buyer_id INTEGER NOT NULL, company_id INTEGER NOT NULL, product_id INTEGER NOT NULL, quantity INTEGER NOT NULL, price REAL NOT NULL, total REAL NOT NULL, status TEXT NOT NULL DEFAULT 'PENDING', created_at INTEGER NOT NULL)",
        ] {
            sqlx::query(sql).execute(&pool).await.unwrap();
        }
        pool
    }

    /// Returns (buyer_id, vendor_owner_id, vendor_company_id, product_id)
    async fn seed(pool: &SqlitePool, price: f64) -> (i64, i64, i64, i64) {
        let buyer = user::find_or_create_by_phone(pool, "5551110001").await.unwrap();
        let owner = user::find_or_create_by_phone(pool, "5552220002").await.unwrap();
        let vendor = company::create(
            pool,
            owner.id,
            CreateCompanyRequest {
                brand_name: "Fresh Farms".into(),
                company_name: "Fresh Farms Pvt Ltd".into(),
            },
        )
        .await
        .unwrap();
        let prod = product::create(
            pool,
            vendor.id,
            CreateProductRequest {
                product_name: "Tomatoes".into(),
                selling_price: price,
                units: "Kilograms".into(),
                description: None,
                image: None,
            },
        )
        .await
        .unwrap();
        (buyer.id, owner.id, vendor.id, prod.id)
    }

    fn order_req(vendor_id: i64, product_id: i64, quantity: i64) -> CreateOrderRequest {
        CreateOrderRequest {
            vendor_id,
            product_id,
            quantity,
        }
    }

    #[tokio::test]
    async fn create_snapshots_price_and_computes_total() {
        let pool = setup().await;
        let (buyer, _, vendor, prod) = seed(&pool, 100.0).await;

        let order = create_order(&pool, buyer, &order_req(vendor, prod, 3))
            .await
            .unwrap();
        assert_eq!(order.total, 300.0);
        assert_eq!(order.price, 100.0);
        assert_eq!(order.status, "PENDING");
    }

    #[tokio::test]
    async fn create_rejects_zero_quantity_without_persisting() {
        let pool = setup().await;
        let (buyer, _, vendor, prod) = seed(&pool, 100.0).await;

        let err = create_order(&pool, buyer, &order_req(vendor, prod, 0))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidQuantity);

        let purchases = list_purchases(&pool, buyer, None).await.unwrap();
        assert!(purchases.is_empty());
    }

    #[tokio::test]
    async fn create_rejects_unknown_vendor_and_foreign_product() {
        let pool = setup().await;
        let (buyer, _, vendor, prod) = seed(&pool, 100.0).await;

        let err = create_order(&pool, buyer, &order_req(999, prod, 1))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CompanyNotFound);

        // Product exists but belongs to a different vendor
        let other_owner = user::find_or_create_by_phone(&pool, "5553330003").await.unwrap();
        let other = company::create(
            &pool,
            other_owner.id,
            CreateCompanyRequest {
                brand_name: "Other".into(),
                company_name: "Other Ltd".into(),
            },
        )
        .await
        .unwrap();
        let err = create_order(&pool, buyer, &order_req(other.id, prod, 1))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductNotFound);

        let _ = vendor;
    }

    #[tokio::test]
    async fn happy_path_transitions_and_terminal_rejection() {
        let pool = setup().await;
        let (buyer, owner, vendor, prod) = seed(&pool, 50.0).await;
        let order = create_order(&pool, buyer, &order_req(vendor, prod, 2))
            .await
            .unwrap();

        let order = update_status(&pool, owner, order.id, OrderStatus::InProgress)
            .await
            .unwrap();
        assert_eq!(order.status, "IN_PROGRESS");

        let order = update_status(&pool, owner, order.id, OrderStatus::Completed)
            .await
            .unwrap();
        assert_eq!(order.status, "COMPLETED");

        let err = update_status(&pool, owner, order.id, OrderStatus::Pending)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStatusTransition);
        let details = err.details.unwrap();
        assert_eq!(details["from"], "COMPLETED");
        assert_eq!(details["to"], "PENDING");
    }

    #[tokio::test]
    async fn pending_cannot_jump_to_completed() {
        let pool = setup().await;
        let (buyer, owner, vendor, prod) = seed(&pool, 50.0).await;
        let order = create_order(&pool, buyer, &order_req(vendor, prod, 1))
            .await
            .unwrap();

        let err = update_status(&pool, owner, order.id, OrderStatus::Completed)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStatusTransition);

        // Status unchanged after the rejected transition
        let purchases = list_purchases(&pool, buyer, None).await.unwrap();
        assert_eq!(purchases[0].status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn total_survives_status_updates() {
        let pool = setup().await;
        let (buyer, owner, vendor, prod) = seed(&pool, 100.0).await;
        let order = create_order(&pool, buyer, &order_req(vendor, prod, 3))
            .await
            .unwrap();

        let order = update_status(&pool, owner, order.id, OrderStatus::InProgress)
            .await
            .unwrap();
        assert_eq!(order.total, 300.0);
        assert_eq!(order.price, 100.0);
    }

    #[tokio::test]
    async fn non_participant_cannot_transition() {
        let pool = setup().await;
        let (buyer, _, vendor, prod) = seed(&pool, 50.0).await;
        let order = create_order(&pool, buyer, &order_req(vendor, prod, 1))
            .await
            .unwrap();

        let stranger = user::find_or_create_by_phone(&pool, "5559990009").await.unwrap();
        let err = update_status(&pool, stranger.id, order.id, OrderStatus::InProgress)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PermissionDenied);
    }

    #[tokio::test]
    async fn projections_are_scoped_to_the_viewer() {
        let pool = setup().await;
        let (buyer, owner, vendor, prod) = seed(&pool, 20.0).await;
        create_order(&pool, buyer, &order_req(vendor, prod, 1))
            .await
            .unwrap();

        let other_buyer = user::find_or_create_by_phone(&pool, "5554440004").await.unwrap();
        assert!(
            list_purchases(&pool, other_buyer.id, None)
                .await
                .unwrap()
                .is_empty()
        );

        let purchases = list_purchases(&pool, buyer, None).await.unwrap();
        assert_eq!(purchases.len(), 1);
        assert_eq!(purchases[0].vendor.brand_name, "Fresh Farms");
        assert_eq!(purchases[0].product.product_name, "Tomatoes");

        let sales = list_sales(&pool, owner, None).await.unwrap();
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].buyer.phone_number, "5551110001");

        // A user with no company has no sales side
        let err = list_sales(&pool, other_buyer.id, None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CompanyNotFound);
    }

    #[tokio::test]
    async fn status_filter_is_applied_server_side() {
        let pool = setup().await;
        let (buyer, owner, vendor, prod) = seed(&pool, 10.0).await;
        let a = create_order(&pool, buyer, &order_req(vendor, prod, 1))
            .await
            .unwrap();
        let _b = create_order(&pool, buyer, &order_req(vendor, prod, 2))
            .await
            .unwrap();
        update_status(&pool, owner, a.id, OrderStatus::InProgress)
            .await
            .unwrap();

        let pending = list_purchases(&pool, buyer, Some(OrderStatus::Pending))
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        let in_progress = list_sales(&pool, owner, Some(OrderStatus::InProgress))
            .await
            .unwrap();
        assert_eq!(in_progress.len(), 1);
        assert_eq!(in_progress[0].id, a.id);
    }

    #[tokio::test]
    async fn delete_product_guard() {
        let pool = setup().await;
        let (buyer, owner, vendor, prod) = seed(&pool, 10.0).await;

        create_order(&pool, buyer, &order_req(vendor, prod, 1))
            .await
            .unwrap();
        let err = delete_product(&pool, owner, prod).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductHasPurchases);
        assert_eq!(err.details.unwrap()["hasPurchases"], true);

        // A fresh product with no purchases deletes fine
        let fresh = product::create(
            &pool,
            vendor,
            CreateProductRequest {
                product_name: "Onions".into(),
                selling_price: 5.0,
                units: "Kilograms".into(),
                description: None,
                image: None,
            },
        )
        .await
        .unwrap();
        delete_product(&pool, owner, fresh.id).await.unwrap();

        // Only the owner may delete
        let err = delete_product(&pool, buyer, prod).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CompanyNotFound);
    }
}
