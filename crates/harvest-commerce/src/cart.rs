//! Cart snapshot and the local mirror arithmetic.
//!
//! The backend owns the cart; this type is the client's mirror of the last
//! confirmed snapshot. The `apply_*` mutators reproduce the server's effect
//! locally so the UI can update without a re-fetch, and are only invoked
//! after the paired backend call succeeds.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::{CartCode, CartId, CartItemId};
use crate::money::Money;

/// A shopping cart as served by `GET /get_cart/{cart_code}/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Backend row id.
    pub id: CartId,
    /// The client-generated code the cart is keyed by.
    pub cart_code: CartCode,
    /// Items, in backend order.
    pub cartitems: Vec<CartItem>,
    /// Server-computed total at snapshot time.
    pub cart_total: Money,
}

/// A cart line as served by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Backend row id.
    pub id: CartItemId,
    /// The product, denormalized into the line.
    pub product: Product,
    /// Quantity, floored at 1; removal is the only path to zero.
    pub quantity: u32,
    /// price × quantity, recomputed locally on mutation.
    pub sub_total: Money,
}

impl CartItem {
    /// Recompute `sub_total` from the current quantity.
    fn refresh_sub_total(&mut self) -> Result<(), CommerceError> {
        self.sub_total = self
            .product
            .price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)?;
        Ok(())
    }

    /// Check the stock ceiling before an increase request goes out.
    ///
    /// Best effort only: the backend's stock can move underneath us, and the
    /// ceiling is not re-validated server-side on increment.
    pub fn can_increase(&self) -> Result<(), CommerceError> {
        if self.quantity >= self.product.quantity {
            return Err(CommerceError::InsufficientStock {
                product: self.product.name.clone(),
                requested: self.quantity + 1,
                available: self.product.quantity,
            });
        }
        Ok(())
    }
}

impl Cart {
    /// The state a just-reset mirror holds before the next fetch.
    pub fn empty() -> Self {
        Self {
            id: CartId::new(0),
            cart_code: CartCode::new(""),
            cartitems: Vec::new(),
            cart_total: Money::zero(),
        }
    }

    /// Total item count (sum of quantities), recomputed on every read.
    pub fn item_count(&self) -> u32 {
        self.cartitems.iter().map(|i| i.quantity).sum()
    }

    /// Sum of all sub-totals, recomputed on every read.
    pub fn computed_total(&self) -> Result<Money, CommerceError> {
        Money::try_sum(self.cartitems.iter().map(|i| &i.sub_total))
            .ok_or(CommerceError::Overflow)
    }

    /// Check if the cart has no items.
    pub fn is_empty(&self) -> bool {
        self.cartitems.is_empty()
    }

    /// Get an item by id.
    pub fn get_item(&self, item_id: CartItemId) -> Option<&CartItem> {
        self.cartitems.iter().find(|i| i.id == item_id)
    }

    /// Check whether a product is already in the mirror.
    pub fn contains_product(&self, product_id: crate::ids::ProductId) -> bool {
        self.cartitems.iter().any(|i| i.product.id == product_id)
    }

    /// Append a confirmed new line and bump the total by its sub-total.
    pub fn push_item(&mut self, item: CartItem) -> Result<(), CommerceError> {
        self.cart_total = self
            .cart_total
            .try_add(&item.sub_total)
            .ok_or(CommerceError::Overflow)?;
        self.cartitems.push(item);
        Ok(())
    }

    /// Apply a confirmed quantity increase to one line.
    pub fn apply_increase(&mut self, item_id: CartItemId) -> Result<(), CommerceError> {
        let item = self
            .cartitems
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or(CommerceError::ItemNotInCart(item_id))?;
        item.quantity += 1;
        item.refresh_sub_total()?;
        self.recompute_total()
    }

    /// Apply a confirmed quantity decrease to one line, floored at 1.
    pub fn apply_decrease(&mut self, item_id: CartItemId) -> Result<(), CommerceError> {
        let item = self
            .cartitems
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or(CommerceError::ItemNotInCart(item_id))?;
        item.quantity = item.quantity.saturating_sub(1).max(1);
        item.refresh_sub_total()?;
        self.recompute_total()
    }

    /// Remove a line and recompute the total.
    pub fn remove_item(&mut self, item_id: CartItemId) -> Result<bool, CommerceError> {
        let len_before = self.cartitems.len();
        self.cartitems.retain(|i| i.id != item_id);
        let removed = self.cartitems.len() < len_before;
        if removed {
            self.recompute_total()?;
        }
        Ok(removed)
    }

    fn recompute_total(&mut self) -> Result<(), CommerceError> {
        self.cart_total = self.computed_total()?;
        Ok(())
    }
}
