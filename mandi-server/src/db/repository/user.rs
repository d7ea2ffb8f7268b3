//! User Repository

use super::RepoResult;
use shared::models::User;
use sqlx::SqlitePool;

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let row = sqlx::query_as::<_, User>(
        "SELECT id, phone_number, created_at FROM user WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn find_by_phone(pool: &SqlitePool, phone_number: &str) -> RepoResult<Option<User>> {
    let row = sqlx::query_as::<_, User>(
        "SELECT id, phone_number, created_at FROM user WHERE phone_number = ?",
    )
    .bind(phone_number)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Fetch the account for a phone number, creating it on first login
pub async fn find_or_create_by_phone(pool: &SqlitePool, phone_number: &str) -> RepoResult<User> {
    if let Some(user) = find_by_phone(pool, phone_number).await? {
        return Ok(user);
    }
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    // Another verify for the same phone may race us; fall back to the
    // existing row on a unique violation.
    let inserted = sqlx::query(
        "INSERT OR IGNORE INTO user (id, phone_number, created_at) VALUES (?1, ?2, ?3)",
    )
    .bind(id)
    .bind(phone_number)
    .bind(now)
    .execute(pool)
    .await?;
    if inserted.rows_affected() > 0 {
        Ok(User {
            id,
            phone_number: phone_number.to_string(),
            created_at: now,
        })
    } else {
        find_by_phone(pool, phone_number)
            .await?
            .ok_or_else(|| super::RepoError::Database("Failed to create user".into()))
    }
}
