//! Money calculation for order totals using rust_decimal
//!
//! Unit prices arrive and are stored as `f64`; the total is computed in
//! `Decimal` and rounded to 2 places before going back to `f64`.

use rust_decimal::prelude::*;
use shared::{AppError, AppResult, ErrorCode};

const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed unit price
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per order
pub const MAX_QUANTITY: i64 = 9999;

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field_name: &str) -> AppResult<()> {
    if !value.is_finite() {
        return Err(AppError::with_message(
            ErrorCode::InvalidPrice,
            format!("{field_name} must be a finite number, got {value}"),
        ));
    }
    Ok(())
}

/// Validate a selling price as entered by a vendor
pub fn validate_price(price: f64) -> AppResult<()> {
    require_finite(price, "sellingPrice")?;
    if price <= 0.0 {
        return Err(AppError::with_message(
            ErrorCode::InvalidPrice,
            format!("sellingPrice must be positive, got {price}"),
        ));
    }
    if price > MAX_PRICE {
        return Err(AppError::with_message(
            ErrorCode::InvalidPrice,
            format!("sellingPrice exceeds maximum allowed ({MAX_PRICE}), got {price}"),
        ));
    }
    Ok(())
}

pub fn validate_quantity(quantity: i64) -> AppResult<()> {
    if quantity < 1 {
        return Err(AppError::with_message(
            ErrorCode::InvalidQuantity,
            format!("quantity must be at least 1, got {quantity}"),
        ));
    }
    if quantity > MAX_QUANTITY {
        return Err(AppError::with_message(
            ErrorCode::InvalidQuantity,
            format!("quantity exceeds maximum allowed ({MAX_QUANTITY}), got {quantity}"),
        ));
    }
    Ok(())
}

/// quantity * price, rounded half-up to 2 decimal places
pub fn line_total(price: f64, quantity: i64) -> AppResult<f64> {
    validate_price(price)?;
    validate_quantity(quantity)?;
    let price = Decimal::from_f64(price).ok_or_else(|| {
        AppError::with_message(ErrorCode::InvalidPrice, format!("invalid price {price}"))
    })?;
    let total = (price * Decimal::from(quantity))
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    total.to_f64().ok_or_else(|| {
        AppError::with_message(ErrorCode::InvalidPrice, "total is out of range".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_is_quantity_times_price() {
        assert_eq!(line_total(100.0, 3).unwrap(), 300.0);
        assert_eq!(line_total(40.0, 1).unwrap(), 40.0);
    }

    #[test]
    fn total_rounds_to_two_places() {
        // 0.1 * 3 accumulates binary noise in f64; Decimal keeps it exact
        assert_eq!(line_total(0.1, 3).unwrap(), 0.3);
        assert_eq!(line_total(33.335, 2).unwrap(), 66.67);
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let err = line_total(100.0, 0).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidQuantity);
    }

    #[test]
    fn bad_prices_are_rejected() {
        assert_eq!(
            line_total(0.0, 1).unwrap_err().code,
            ErrorCode::InvalidPrice
        );
        assert_eq!(
            line_total(-5.0, 1).unwrap_err().code,
            ErrorCode::InvalidPrice
        );
        assert_eq!(
            line_total(f64::NAN, 1).unwrap_err().code,
            ErrorCode::InvalidPrice
        );
        assert_eq!(
            line_total(MAX_PRICE * 2.0, 1).unwrap_err().code,
            ErrorCode::InvalidPrice
        );
    }

    #[test]
    fn oversized_quantity_is_rejected() {
        assert_eq!(
            line_total(1.0, MAX_QUANTITY + 1).unwrap_err().code,
            ErrorCode::InvalidQuantity
        );
    }
}
