use serde::{Deserialize, Serialize};

/// Vendor profile. Each account owns at most one company, and the profile
/// is immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: i64,
    pub owner_user_id: i64,
    pub brand_name: String,
    pub company_name: String,
    pub created_at: i64,
}

/// Directory listing shape for the vendor catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct CompanySummary {
    pub id: i64,
    pub brand_name: String,
    pub company_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyRequest {
    pub brand_name: String,
    pub company_name: String,
}
