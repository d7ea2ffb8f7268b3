//! Company Repository

use super::{RepoError, RepoResult};
use shared::models::{Company, CompanySummary, CreateCompanyRequest};
use sqlx::SqlitePool;

const COMPANY_SELECT: &str =
    "SELECT id, owner_user_id, brand_name, company_name, created_at FROM company";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<CompanySummary>> {
    let rows = sqlx::query_as::<_, CompanySummary>(
        "SELECT id, brand_name, company_name FROM company ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Company>> {
    let sql = format!("{COMPANY_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Company>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_owner(pool: &SqlitePool, owner_user_id: i64) -> RepoResult<Option<Company>> {
    let sql = format!("{COMPANY_SELECT} WHERE owner_user_id = ?");
    let row = sqlx::query_as::<_, Company>(&sql)
        .bind(owner_user_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Create the owner's company profile. Profiles are create-once; a second
/// create for the same owner hits the unique constraint and surfaces as
/// [`RepoError::Duplicate`].
pub async fn create(
    pool: &SqlitePool,
    owner_user_id: i64,
    data: CreateCompanyRequest,
) -> RepoResult<Company> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO company (id, owner_user_id, brand_name, company_name, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(id)
    .bind(owner_user_id)
    .bind(&data.brand_name)
    .bind(&data.company_name)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create company".into()))
}
