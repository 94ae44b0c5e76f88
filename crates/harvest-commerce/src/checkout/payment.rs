//! Payment math, mirroring the backend's charge computation.

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::error::CommerceError;
use crate::money::Money;

/// Tax applied to the cart total at payment initialization.
pub const TAX_RATE_PERCENT: f64 = 8.0;

/// Flat shipping fee, charged only on small orders.
pub const FLAT_SHIPPING_PAISE: i64 = 999;

/// Orders strictly above this subtotal ship free.
pub const FREE_SHIPPING_ABOVE_PAISE: i64 = 5000;

/// The charge breakdown the backend computes at payment initialization.
///
/// Recomputed client-side so the order summary shown before the redirect
/// matches the amount the gateway will actually collect.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderSummary {
    pub subtotal: Money,
    pub tax: Money,
    /// Zero when the order ships free.
    pub shipping: Money,
    pub total: Money,
}

impl OrderSummary {
    /// Compute the breakdown for a cart subtotal.
    pub fn compute(subtotal: Money) -> Result<Self, CommerceError> {
        let tax = subtotal.percentage(TAX_RATE_PERCENT);
        let shipping = if subtotal.paise() <= FREE_SHIPPING_ABOVE_PAISE {
            Money::from_paise(FLAT_SHIPPING_PAISE)
        } else {
            Money::zero()
        };
        let total = subtotal
            .try_add(&tax)
            .and_then(|t| t.try_add(&shipping))
            .ok_or(CommerceError::Overflow)?;
        Ok(Self {
            subtotal,
            tax,
            shipping,
            total,
        })
    }

    /// Compute the breakdown for a cart's current contents.
    pub fn for_cart(cart: &Cart) -> Result<Self, CommerceError> {
        Self::compute(cart.computed_total()?)
    }

    /// Whether the flat shipping fee applies.
    pub fn shipping_charged(&self) -> bool {
        !self.shipping.is_zero()
    }

    /// The amount the gateway is asked to collect, in its subunit (paise).
    pub fn gateway_amount(&self) -> i64 {
        self.total.paise()
    }
}
