//! Product Repository

use super::{RepoError, RepoResult};
use shared::models::{CreateProductRequest, Product, ProductSummary, UpdateProductRequest};
use sqlx::SqlitePool;

const PRODUCT_SELECT: &str = "SELECT id, company_id, product_name, selling_price, units, description, image, created_at FROM product";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let sql = format!("{PRODUCT_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Product>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Full product rows for the owning vendor's own catalog screen
pub async fn find_by_company(pool: &SqlitePool, company_id: i64) -> RepoResult<Vec<Product>> {
    let sql = format!("{PRODUCT_SELECT} WHERE company_id = ? ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, Product>(&sql)
        .bind(company_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Buyer-facing storefront listing (id, name, price only)
pub async fn list_for_storefront(
    pool: &SqlitePool,
    company_id: i64,
) -> RepoResult<Vec<ProductSummary>> {
    let rows = sqlx::query_as::<_, ProductSummary>(
        "SELECT id, product_name, selling_price FROM product WHERE company_id = ? ORDER BY created_at DESC",
    )
    .bind(company_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn create(
    pool: &SqlitePool,
    company_id: i64,
    data: CreateProductRequest,
) -> RepoResult<Product> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO product (id, company_id, product_name, selling_price, units, description, image, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )
    .bind(id)
    .bind(company_id)
    .bind(&data.product_name)
    .bind(data.selling_price)
    .bind(&data.units)
    .bind(&data.description)
    .bind(&data.image)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create product".into()))
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: UpdateProductRequest,
) -> RepoResult<Product> {
    let rows = sqlx::query(
        "UPDATE product SET product_name = COALESCE(?1, product_name), selling_price = COALESCE(?2, selling_price), units = COALESCE(?3, units), description = COALESCE(?4, description), image = COALESCE(?5, image) WHERE id = ?6",
    )
    .bind(&data.product_name)
    .bind(data.selling_price)
    .bind(&data.units)
    .bind(&data.description)
    .bind(&data.image)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
}

/// Count purchases referencing a product, for the delete guard
pub async fn purchase_count(pool: &SqlitePool, product_id: i64) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM purchase WHERE product_id = ?")
        .bind(product_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Delete a product in one statement, refusing while any purchase still
/// references it. Returns false when nothing was deleted, either because
/// the row is missing or because a purchase holds it.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query(
        "DELETE FROM product WHERE id = ?1 AND NOT EXISTS (SELECT 1 FROM purchase WHERE product_id = ?1)",
    )
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::query(
            "CREATE TABLE product (id INTEGER PRIMARY KEY, company_id INTEGER NOT NULL, product_name TEXT NOT NULL, selling_price REAL NOT NULL, units TEXT NOT NULL, description TEXT, image TEXT, created_at INTEGER NOT NULL)",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query(
            "CREATE TABLE purchase (id INTEGER PRIMARY KEY, buyer_id INTEGER NOT NULL, company_id INTEGER NOT NULL, product_id INTEGER NOT NULL, quantity INTEGER NOT NULL, price REAL NOT NULL, total REAL NOT NULL, status TEXT NOT NULL, created_at INTEGER NOT NULL)",
        )
        .execute(&pool)
        .await
        .unwrap();
        pool
    }

    fn req(name: &str, price: f64) -> CreateProductRequest {
        CreateProductRequest {
            product_name: name.to_string(),
            selling_price: price,
            units: "Kilograms".to_string(),
            description: None,
            image: None,
        }
    }

    #[tokio::test]
    async fn create_and_list_by_company() {
        let pool = setup().await;
        create(&pool, 10, req("Tomatoes", 40.0)).await.unwrap();
        create(&pool, 10, req("Onions", 25.5)).await.unwrap();
        create(&pool, 99, req("Apples", 120.0)).await.unwrap();

        let mine = find_by_company(&pool, 10).await.unwrap();
        assert_eq!(mine.len(), 2);

        let storefront = list_for_storefront(&pool, 10).await.unwrap();
        assert_eq!(storefront.len(), 2);
    }

    #[tokio::test]
    async fn purchase_count_reflects_references() {
        let pool = setup().await;
        let p = create(&pool, 10, req("Tomatoes", 40.0)).await.unwrap();
        assert_eq!(purchase_count(&pool, p.id).await.unwrap(), 0);

        sqlx::query(
            "INSERT INTO purchase (id, buyer_id, company_id, product_id, quantity, price, total, status, created_at) VALUES (1, 2, 10, ?, 3, 40.0, 120.0, 'PENDING', 0)",
        )
        .bind(p.id)
        .execute(&pool)
        .await
        .unwrap();
        assert_eq!(purchase_count(&pool, p.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn update_touches_only_provided_fields() {
        let pool = setup().await;
        let p = create(&pool, 10, req("Tomatoes", 40.0)).await.unwrap();

        let updated = update(
            &pool,
            p.id,
            UpdateProductRequest {
                selling_price: Some(55.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.selling_price, 55.0);
        assert_eq!(updated.product_name, "Tomatoes");
        assert_eq!(updated.units, "Kilograms");

        let missing = update(&pool, 424242, UpdateProductRequest::default()).await;
        assert!(matches!(missing, Err(RepoError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_reports_whether_row_existed() {
        let pool = setup().await;
        let p = create(&pool, 10, req("Tomatoes", 40.0)).await.unwrap();
        assert!(delete(&pool, p.id).await.unwrap());
        assert!(!delete(&pool, p.id).await.unwrap());
    }

    #[tokio::test]
    async fn delete_refuses_while_a_purchase_references_the_row() {
        let pool = setup().await;
        let p = create(&pool, 10, req("Tomatoes", 40.0)).await.unwrap();
        sqlx::query(
            "INSERT INTO purchase (id, buyer_id, company_id, product_id, quantity, price, total, status, created_at) VALUES (1, 2, 10, ?, 3, 40.0, 120.0, 'PENDING', 0)",
        )
        .bind(p.id)
        .execute(&pool)
        .await
        .unwrap();

        assert!(!delete(&pool, p.id).await.unwrap());
        assert!(find_by_id(&pool, p.id).await.unwrap().is_some());

        sqlx::query("DELETE FROM purchase WHERE product_id = ?")
            .bind(p.id)
            .execute(&pool)
            .await
            .unwrap();
        assert!(delete(&pool, p.id).await.unwrap());
    }
}
