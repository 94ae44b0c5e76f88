//! Domain types for the Harvest Market client.
//!
//! Everything in this crate mirrors the marketplace backend's wire contract;
//! the client holds derived read copies and never owns an entity's lifecycle.
//!
//! - **Catalog**: products, categories, stock levels
//! - **Cart**: the server cart snapshot plus the local mirror mutators
//! - **Checkout**: orders, shipping info, payment math
//! - **Page**: the backend's pagination envelope and page bookkeeping
//! - **Reporting**: admin dashboard and analytics payloads
//!
//! # Example
//!
//! ```rust,ignore
//! use harvest_commerce::prelude::*;
//!
//! let mut cart: Cart = serde_json::from_str(&body)?;
//! let item_id = cart.cartitems[0].id;
//!
//! cart.apply_increase(item_id)?;
//! assert_eq!(cart.cart_total, cart.computed_total()?);
//! println!("{} items, {}", cart.item_count(), cart.cart_total);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod page;
pub mod reporting;

pub use error::CommerceError;
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{Category, NewProduct, Product, ProductUpdate};

    // Cart
    pub use crate::cart::{Cart, CartItem};

    // Checkout
    pub use crate::checkout::{
        FulfillmentStage, Order, OrderItem, OrderStatus, OrderSummary, PaymentState, ShippingInfo,
    };

    // Pagination
    pub use crate::page::{Page, Pager};

    // Reporting
    pub use crate::reporting::{Analytics, DashboardStats};
}
