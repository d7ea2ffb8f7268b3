use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a purchase/sale order
///
/// `PENDING` is the initial state. `COMPLETED` and `FAILED` are terminal.
/// Legal transitions:
///
/// - `PENDING` -> `IN_PROGRESS` (vendor accepts)
/// - `PENDING` -> `FAILED` (vendor rejects)
/// - `IN_PROGRESS` -> `COMPLETED` (fulfilled)
/// - `IN_PROGRESS` -> `FAILED` (aborted)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::InProgress,
        OrderStatus::Completed,
        OrderStatus::Failed,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::InProgress => "IN_PROGRESS",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Failed => "FAILED",
        }
    }

    /// Terminal states accept no further transitions
    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Failed)
    }

    /// Whether moving from `self` to `target` is a legal edge
    ///
    /// Self-transitions are not legal; re-applying a transition after it
    /// has already landed is treated as any other illegal edge.
    pub const fn can_transition_to(&self, target: OrderStatus) -> bool {
        matches!(
            (*self, target),
            (OrderStatus::Pending, OrderStatus::InProgress)
                | (OrderStatus::Pending, OrderStatus::Failed)
                | (OrderStatus::InProgress, OrderStatus::Completed)
                | (OrderStatus::InProgress, OrderStatus::Failed)
        )
    }
}

impl FromStr for OrderStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(OrderStatus::Pending),
            "IN_PROGRESS" => Ok(OrderStatus::InProgress),
            "COMPLETED" => Ok(OrderStatus::Completed),
            "FAILED" => Ok(OrderStatus::Failed),
            _ => Err(()),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Purchase/sale order record
///
/// One entity viewed from two roles: the buyer's "purchases" list and the
/// vendor's "sales" list are the same rows joined differently, see
/// [`PurchaseView`] and [`SaleView`].
///
/// `price` is a snapshot of the product's selling price at creation time
/// and `total` is the derived `quantity * price`, cached but never treated
/// as authoritative. `status` holds an [`OrderStatus`] wire string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub buyer_id: i64,
    pub company_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub price: f64,
    pub total: f64,
    pub status: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub vendor_id: i64,
    pub product_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

/// Vendor details embedded in the buyer-side projection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorInfo {
    pub brand_name: String,
    pub company_name: String,
}

/// Product details embedded in both projections
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInfo {
    pub product_name: String,
}

/// Buyer details embedded in the vendor-side projection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerInfo {
    pub phone_number: String,
}

/// An order as the buyer sees it: their purchase, with vendor and product
/// information joined in
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseView {
    pub id: i64,
    pub quantity: i64,
    pub price: f64,
    pub total: f64,
    pub status: OrderStatus,
    pub created_at: i64,
    pub vendor: VendorInfo,
    pub product: ProductInfo,
}

/// An order as the vendor sees it: their sale, with buyer and product
/// information joined in
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleView {
    pub id: i64,
    pub quantity: i64,
    pub price: f64,
    pub total: f64,
    pub status: OrderStatus,
    pub created_at: i64,
    pub buyer: BuyerInfo,
    pub product: ProductInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_listed_edges_are_legal() {
        use OrderStatus::*;

        let legal = [
            (Pending, InProgress),
            (Pending, Failed),
            (InProgress, Completed),
            (InProgress, Failed),
        ];
        for from in OrderStatus::ALL {
            for to in OrderStatus::ALL {
                let expected = legal.contains(&(from, to));
                assert_eq!(
                    from.can_transition_to(to),
                    expected,
                    "{from} -> {to} should be {expected}"
                );
            }
        }
    }

    #[test]
    fn terminal_states_accept_nothing() {
        for from in [OrderStatus::Completed, OrderStatus::Failed] {
            assert!(from.is_terminal());
            for to in OrderStatus::ALL {
                assert!(!from.can_transition_to(to));
            }
        }
    }

    #[test]
    fn self_transition_is_illegal() {
        for status in OrderStatus::ALL {
            assert!(!status.can_transition_to(status));
        }
    }

    #[test]
    fn pending_cannot_jump_to_completed() {
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Completed));
    }

    #[test]
    fn status_serializes_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::InProgress).unwrap(),
            "\"IN_PROGRESS\""
        );
        let parsed: OrderStatus = serde_json::from_str("\"FAILED\"").unwrap();
        assert_eq!(parsed, OrderStatus::Failed);
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }
        assert!("DONE".parse::<OrderStatus>().is_err());
    }
}
