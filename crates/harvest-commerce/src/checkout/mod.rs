//! Checkout module.
//!
//! Contains order history types, shipping details, and the payment math.

mod order;
mod payment;
mod shipping;

pub use order::{FulfillmentStage, Order, OrderItem, OrderStatus, PaymentState};
pub use payment::{OrderSummary, FLAT_SHIPPING_PAISE, FREE_SHIPPING_ABOVE_PAISE, TAX_RATE_PERCENT};
pub use shipping::ShippingInfo;
