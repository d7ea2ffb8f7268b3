use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unit of measure a product is sold in
///
/// Serialized in title case to match the values the client shows in its
/// unit picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitOfMeasure {
    Pieces,
    Kilograms,
    Liters,
    Dozens,
}

impl UnitOfMeasure {
    pub const ALL: [UnitOfMeasure; 4] = [
        UnitOfMeasure::Pieces,
        UnitOfMeasure::Kilograms,
        UnitOfMeasure::Liters,
        UnitOfMeasure::Dozens,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            UnitOfMeasure::Pieces => "Pieces",
            UnitOfMeasure::Kilograms => "Kilograms",
            UnitOfMeasure::Liters => "Liters",
            UnitOfMeasure::Dozens => "Dozens",
        }
    }
}

impl FromStr for UnitOfMeasure {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pieces" => Ok(UnitOfMeasure::Pieces),
            "Kilograms" => Ok(UnitOfMeasure::Kilograms),
            "Liters" => Ok(UnitOfMeasure::Liters),
            "Dozens" => Ok(UnitOfMeasure::Dozens),
            _ => Err(()),
        }
    }
}

impl fmt::Display for UnitOfMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog product owned by a company
///
/// `units` is stored as the unit's wire string; parse with
/// [`UnitOfMeasure::from_str`] when the enum form is needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub company_id: i64,
    pub product_name: String,
    pub selling_price: f64,
    pub units: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub created_at: i64,
}

/// Buyer-facing listing shape for a vendor's storefront
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: i64,
    pub product_name: String,
    pub selling_price: f64,
}

/// Partial update; absent fields keep their current values
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub selling_price: Option<f64>,
    #[serde(default)]
    pub units: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub product_name: String,
    pub selling_price: f64,
    pub units: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_round_trips_through_str() {
        for unit in UnitOfMeasure::ALL {
            assert_eq!(unit.as_str().parse::<UnitOfMeasure>(), Ok(unit));
        }
    }

    #[test]
    fn unknown_unit_is_rejected() {
        assert!("Grams".parse::<UnitOfMeasure>().is_err());
        assert!("pieces".parse::<UnitOfMeasure>().is_err());
    }
}
