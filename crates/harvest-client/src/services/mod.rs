//! Typed wrappers over the backend REST endpoints.
//!
//! Each service is a thin handle onto the client's refresh-aware send path;
//! the services hold no state of their own.

mod auth;
mod cart;
mod checkout;
mod orders;
mod products;
mod reporting;

pub use auth::{
    AccountSummary, AdminStatus, AuthService, LoginStatus, SignInResponse, SignUpResponse,
};
pub use cart::{CartItemUpdate, CartService};
pub use checkout::{CheckoutService, PaymentInit, PaymentVerification, ShippingSaved};
pub use orders::OrdersService;
pub use products::{GeneratedDescription, ProductsService};
pub use reporting::ReportingService;

use serde::Deserialize;

/// Plain `{"message": ...}` body several endpoints answer with.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
