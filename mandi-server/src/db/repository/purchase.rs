//! Purchase Repository
//!
//! Orders live in one table and are read through two joins: the buyer side
//! pulls in vendor and product columns, the vendor side pulls in buyer and
//! product columns. The flat row structs here get mapped to the nested
//! wire views by the workflow layer.

use super::{RepoError, RepoResult};
use shared::models::Order;
use sqlx::{FromRow, SqlitePool};

const ORDER_SELECT: &str = "SELECT id, buyer_id, company_id, product_id, quantity, price, total, status, created_at FROM purchase";

/// Buyer-side row: order columns plus vendor and product info
#[derive(Debug, Clone, FromRow)]
pub struct PurchaseJoinRow {
    pub id: i64,
    pub quantity: i64,
    pub price: f64,
    pub total: f64,
    pub status: String,
    pub created_at: i64,
    pub brand_name: String,
    pub company_name: String,
    pub product_name: String,
}

/// Vendor-side row: order columns plus buyer and product info
#[derive(Debug, Clone, FromRow)]
pub struct SaleJoinRow {
    pub id: i64,
    pub quantity: i64,
    pub price: f64,
    pub total: f64,
    pub status: String,
    pub created_at: i64,
    pub phone_number: String,
    pub product_name: String,
}

const PURCHASE_JOIN_SELECT: &str = "SELECT p.id, p.quantity, p.price, p.total, p.status, p.created_at, c.brand_name, c.company_name, pr.product_name FROM purchase p JOIN company c ON p.company_id = c.id JOIN product pr ON p.product_id = pr.id";

const SALE_JOIN_SELECT: &str = "SELECT p.id, p.quantity, p.price, p.total, p.status, p.created_at, u.phone_number, pr.product_name FROM purchase p JOIN user u ON p.buyer_id = u.id JOIN product pr ON p.product_id = pr.id";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("{ORDER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(
    pool: &SqlitePool,
    buyer_id: i64,
    company_id: i64,
    product_id: i64,
    quantity: i64,
    price: f64,
    total: f64,
    status: &str,
) -> RepoResult<Order> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO purchase (id, buyer_id, company_id, product_id, quantity, price, total, status, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )
    .bind(id)
    .bind(buyer_id)
    .bind(company_id)
    .bind(product_id)
    .bind(quantity)
    .bind(price)
    .bind(total)
    .bind(status)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create purchase".into()))
}

/// Orders placed by a buyer, newest first, optionally filtered by status
pub async fn list_for_buyer(
    pool: &SqlitePool,
    buyer_id: i64,
    status: Option<&str>,
) -> RepoResult<Vec<PurchaseJoinRow>> {
    let rows = match status {
        Some(status) => {
            let sql = format!(
                "{PURCHASE_JOIN_SELECT} WHERE p.buyer_id = ? AND p.status = ? ORDER BY p.created_at DESC, p.id DESC"
            );
            sqlx::query_as::<_, PurchaseJoinRow>(&sql)
                .bind(buyer_id)
                .bind(status)
                .fetch_all(pool)
                .await?
        }
        None => {
            let sql = format!(
                "{PURCHASE_JOIN_SELECT} WHERE p.buyer_id = ? ORDER BY p.created_at DESC, p.id DESC"
            );
            sqlx::query_as::<_, PurchaseJoinRow>(&sql)
                .bind(buyer_id)
                .fetch_all(pool)
                .await?
        }
    };
    Ok(rows)
}

/// Orders received by a vendor's company, newest first, optionally filtered
pub async fn list_for_company(
    pool: &SqlitePool,
    company_id: i64,
    status: Option<&str>,
) -> RepoResult<Vec<SaleJoinRow>> {
    let rows = match status {
        Some(status) => {
            let sql = format!(
                "{SALE_JOIN_SELECT} WHERE p.company_id = ? AND p.status = ? ORDER BY p.created_at DESC, p.id DESC"
            );
            sqlx::query_as::<_, SaleJoinRow>(&sql)
                .bind(company_id)
                .bind(status)
                .fetch_all(pool)
                .await?
        }
        None => {
            let sql = format!(
                "{SALE_JOIN_SELECT} WHERE p.company_id = ? ORDER BY p.created_at DESC, p.id DESC"
            );
            sqlx::query_as::<_, SaleJoinRow>(&sql)
                .bind(company_id)
                .fetch_all(pool)
                .await?
        }
    };
    Ok(rows)
}

/// Conditional status update: succeeds only if the row is still in the
/// expected state. Returns false when the precondition no longer holds,
/// which the caller disambiguates with a fresh read.
pub async fn transition_status(
    pool: &SqlitePool,
    id: i64,
    expected: &str,
    new_status: &str,
) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE purchase SET status = ?1 WHERE id = ?2 AND status = ?3")
        .bind(new_status)
        .bind(id)
        .bind(expected)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
