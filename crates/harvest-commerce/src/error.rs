//! Commerce error types.

use thiserror::Error;

use crate::ids::CartItemId;

/// Errors from client-side cart and money arithmetic.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Increase would exceed the product's available stock.
    #[error("Insufficient stock for {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: String,
        requested: u32,
        available: u32,
    },

    /// Decrease below the quantity floor of 1.
    #[error("Cart item quantity cannot go below 1")]
    QuantityFloor,

    /// Item not in the cart mirror.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(CartItemId),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Unparseable monetary amount.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Product image fails the backend's upload rules.
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// Unknown product category.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Unknown order status.
    #[error("Unknown order status: {0}")]
    UnknownStatus(String),

    /// Shipping info missing a required field.
    #[error("Shipping info incomplete: missing {0}")]
    IncompleteShipping(&'static str),
}
