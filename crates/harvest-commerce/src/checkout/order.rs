//! Order types.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::{OrderId, OrderItemId};
use crate::money::Money;

/// How long an order must sit in `pending` before the backend lets the
/// customer delete it.
pub const DELETABLE_AFTER_DAYS: i64 = 7;

/// Order status, as stored by the backend.
///
/// A single column carries both the payment outcome and the fulfillment step;
/// [`OrderStatus::payment_state`] and [`OrderStatus::fulfillment_stage`] read
/// it from each angle so callers never match on raw statuses for either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Created at payment initialization, not yet verified.
    #[default]
    Pending,
    /// Payment verified by the gateway.
    Success,
    /// Payment declined or verification failed.
    Failed,
    /// Marked shipped by an admin.
    Shipped,
    /// Marked delivered by an admin.
    Delivered,
    /// Cancelled before payment.
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Success => "success",
            OrderStatus::Failed => "failed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Success => "Success",
            OrderStatus::Failed => "Failed",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Parse a backend status string, case-insensitively.
    pub fn parse(s: &str) -> Result<Self, CommerceError> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "success" => Ok(OrderStatus::Success),
            "failed" => Ok(OrderStatus::Failed),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(CommerceError::UnknownStatus(other.to_string())),
        }
    }

    /// Check if no further transition is expected.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Delivered | OrderStatus::Failed | OrderStatus::Cancelled
        )
    }

    /// The payment side of the status.
    pub fn payment_state(&self) -> PaymentState {
        match self {
            OrderStatus::Pending => PaymentState::Unpaid,
            OrderStatus::Success | OrderStatus::Shipped | OrderStatus::Delivered => {
                PaymentState::Paid
            }
            OrderStatus::Failed => PaymentState::Failed,
            OrderStatus::Cancelled => PaymentState::Void,
        }
    }

    /// The fulfillment side of the status.
    pub fn fulfillment_stage(&self) -> FulfillmentStage {
        match self {
            OrderStatus::Shipped => FulfillmentStage::Shipped,
            OrderStatus::Delivered => FulfillmentStage::Delivered,
            _ => FulfillmentStage::NotShipped,
        }
    }
}

/// Whether the order's money has settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentState {
    /// Awaiting gateway verification.
    Unpaid,
    /// Charge confirmed.
    Paid,
    /// Charge declined.
    Failed,
    /// Order cancelled, nothing charged.
    Void,
}

/// Where the order's goods are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FulfillmentStage {
    NotShipped,
    Shipped,
    Delivered,
}

/// An order as served by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Backend row id.
    pub id: OrderId,
    /// Gateway transaction reference, set at payment initialization.
    pub reference: Option<String>,
    /// Human-facing order number ("ORD-xxxxxx").
    pub sku: Option<String>,
    /// Amount charged, including tax and any shipping fee.
    pub total_amount: Money,
    /// Current status.
    pub status: OrderStatus,
    /// Items at the time of checkout.
    pub orderitems: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Total item count.
    pub fn item_count(&self) -> u32 {
        self.orderitems.iter().map(|i| i.quantity).sum()
    }

    /// The order number to show, falling back to the row id.
    pub fn display_number(&self) -> String {
        match &self.sku {
            Some(sku) => sku.clone(),
            None => format!("#{}", self.id),
        }
    }

    /// Check whether the backend would accept a delete for this order.
    ///
    /// Only pending orders at least seven days old may be deleted; checking
    /// up front lets the UI disable the action instead of surfacing a 403.
    pub fn is_deletable(&self, now: DateTime<Utc>) -> bool {
        self.status == OrderStatus::Pending
            && now - self.created_at >= Duration::days(DELETABLE_AFTER_DAYS)
    }
}

/// A line in an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Backend row id.
    pub id: OrderItemId,
    /// The product, denormalized into the line.
    pub product: Product,
    /// Quantity ordered.
    pub quantity: u32,
}

impl OrderItem {
    /// price × quantity at today's price.
    ///
    /// The backend does not snapshot unit prices on order lines, so this
    /// reflects the current catalog price, as the web UI does.
    pub fn line_total(&self) -> Option<Money> {
        self.product.price.try_multiply(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(status: OrderStatus, now: DateTime<Utc>, age_days: i64) -> Order {
        let created = now - Duration::days(age_days);
        Order {
            id: OrderId::new(7),
            reference: Some("5f2b1c9e8d7a4b3c".to_string()),
            sku: Some("ORD-1A2B3C".to_string()),
            total_amount: Money::from_paise(12999),
            status,
            orderitems: vec![],
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_status_roundtrip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Success,
            OrderStatus::Failed,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()).unwrap(), status);
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
        assert!(OrderStatus::parse("unknown").is_err());
        assert_eq!(
            OrderStatus::parse("SHIPPED").unwrap(),
            OrderStatus::Shipped
        );
    }

    #[test]
    fn test_payment_state_projection() {
        assert_eq!(OrderStatus::Pending.payment_state(), PaymentState::Unpaid);
        assert_eq!(OrderStatus::Success.payment_state(), PaymentState::Paid);
        assert_eq!(OrderStatus::Shipped.payment_state(), PaymentState::Paid);
        assert_eq!(OrderStatus::Delivered.payment_state(), PaymentState::Paid);
        assert_eq!(OrderStatus::Failed.payment_state(), PaymentState::Failed);
        assert_eq!(OrderStatus::Cancelled.payment_state(), PaymentState::Void);
    }

    #[test]
    fn test_fulfillment_projection() {
        assert_eq!(
            OrderStatus::Success.fulfillment_stage(),
            FulfillmentStage::NotShipped
        );
        assert_eq!(
            OrderStatus::Shipped.fulfillment_stage(),
            FulfillmentStage::Shipped
        );
        assert_eq!(
            OrderStatus::Delivered.fulfillment_stage(),
            FulfillmentStage::Delivered
        );
    }

    #[test]
    fn test_deletable_only_when_pending_and_old() {
        let now = Utc::now();
        assert!(order(OrderStatus::Pending, now, 8).is_deletable(now));
        assert!(order(OrderStatus::Pending, now, 7).is_deletable(now));
        assert!(!order(OrderStatus::Pending, now, 6).is_deletable(now));
        assert!(!order(OrderStatus::Success, now, 30).is_deletable(now));
        assert!(!order(OrderStatus::Failed, now, 30).is_deletable(now));
    }

    #[test]
    fn test_order_from_wire() {
        let json = r#"{
            "id": 3,
            "reference": "2c9f8e7d6b5a4938",
            "sku": "ORD-9F8E7D",
            "total_amount": "140.39",
            "status": "success",
            "orderitems": [{
                "id": 5,
                "product": {
                    "id": 12,
                    "name": "Tomatoes",
                    "slug": "tomatoes",
                    "sku": "VEG-1A2B3C",
                    "category": "vegetables",
                    "description": "",
                    "price": "45.00",
                    "quantity": 30,
                    "featured": false,
                    "minimumStock": 10,
                    "image": null,
                    "created_at": "2025-07-14T08:30:00Z"
                },
                "quantity": 2
            }],
            "created_at": "2025-08-01T10:00:00Z",
            "updated_at": "2025-08-01T10:05:00Z"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.status, OrderStatus::Success);
        assert_eq!(order.total_amount, Money::from_paise(14039));
        assert_eq!(order.item_count(), 2);
        assert_eq!(order.display_number(), "ORD-9F8E7D");
        assert_eq!(
            order.orderitems[0].line_total().unwrap(),
            Money::from_paise(9000)
        );
    }
}
