use serde::{Deserialize, Serialize};

/// Account record. Accounts are keyed by verified phone number and created
/// lazily on first successful OTP verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub phone_number: String,
    pub created_at: i64,
}

/// Public profile shape returned by the user-info endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub phone_number: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            phone_number: user.phone_number.clone(),
        }
    }
}
