//! Cart session: a durable cart code plus a local mirror of the server cart.
//!
//! The mirror only changes when the backend has confirmed the matching
//! mutation, so what the user sees is always something the server has
//! agreed to. `refresh()` is the explicit resync; nothing refetches behind
//! the caller's back.

use crate::SessionError;
use harvest_client::{ApiClient, ClientError};
use harvest_commerce::cart::Cart;
use harvest_commerce::error::CommerceError;
use harvest_commerce::ids::{CartCode, CartItemId, ProductId};
use harvest_commerce::money::Money;
use harvest_store::keys;
use tracing::{debug, info};

/// Shopping cart state for one installation.
pub struct CartSession {
    client: ApiClient,
    code: CartCode,
    mirror: Cart,
}

impl CartSession {
    /// Open the session, minting and persisting a cart code the first time.
    ///
    /// The code survives restarts and sign-outs; only
    /// [`reset_after_payment`](Self::reset_after_payment) replaces it.
    pub fn open(client: ApiClient) -> Result<Self, SessionError> {
        let store = client.store();
        let code = match store.get::<CartCode>(keys::CART_CODE)? {
            Some(code) => code,
            None => {
                let code = CartCode::generate();
                store.set(keys::CART_CODE, &code)?;
                debug!(code = %code, "minted cart code");
                code
            }
        };
        Ok(Self {
            client,
            code,
            mirror: Cart::empty(),
        })
    }

    pub fn code(&self) -> &CartCode {
        &self.code
    }

    /// The local mirror. Empty until the first refresh or mutation.
    pub fn cart(&self) -> &Cart {
        &self.mirror
    }

    /// Total units across all lines, from the mirror.
    pub fn item_count(&self) -> u32 {
        self.mirror.item_count()
    }

    /// Cart total, from the mirror.
    pub fn total(&self) -> Money {
        self.mirror.cart_total
    }

    pub fn is_empty(&self) -> bool {
        self.mirror.is_empty()
    }

    /// Replace the mirror with the backend's snapshot.
    ///
    /// A code the backend has never seen yields an empty cart rather than
    /// an error; the backend creates cart rows lazily on the first add.
    pub async fn refresh(&mut self) -> Result<&Cart, SessionError> {
        match self.client.cart().get(&self.code).await {
            Ok(cart) => self.mirror = cart,
            Err(ClientError::Api { status: 404, .. }) => self.mirror = Cart::empty(),
            Err(error) => return Err(error.into()),
        }
        Ok(&self.mirror)
    }

    /// Add a product; the backend's full-cart response becomes the mirror.
    ///
    /// Re-adding a product already in the cart resets its quantity to 1 on
    /// the backend, and the mirror follows.
    pub async fn add(&mut self, product: ProductId) -> Result<&Cart, SessionError> {
        self.mirror = self.client.cart().add_item(&self.code, product).await?;
        Ok(&self.mirror)
    }

    /// Bump an item's quantity by one.
    ///
    /// The stock guard runs first: an item already at the product's
    /// available quantity fails locally and no request is issued.
    pub async fn increase(&mut self, item: CartItemId) -> Result<(), SessionError> {
        let current = self
            .mirror
            .get_item(item)
            .ok_or(CommerceError::ItemNotInCart(item))?;
        current.can_increase()?;

        self.client.cart().increase(item).await?;
        self.mirror.apply_increase(item)?;
        Ok(())
    }

    /// Drop an item's quantity by one, never below one.
    ///
    /// At quantity 1 no request is issued and the mirror stays untouched.
    pub async fn decrease(&mut self, item: CartItemId) -> Result<(), SessionError> {
        let current = self
            .mirror
            .get_item(item)
            .ok_or(CommerceError::ItemNotInCart(item))?;
        if current.quantity <= 1 {
            return Err(CommerceError::QuantityFloor.into());
        }

        self.client.cart().decrease(item).await?;
        self.mirror.apply_decrease(item)?;
        Ok(())
    }

    /// Remove an item. Returns the backend's confirmation text.
    pub async fn remove(&mut self, item: CartItemId) -> Result<String, SessionError> {
        if self.mirror.get_item(item).is_none() {
            return Err(CommerceError::ItemNotInCart(item).into());
        }
        let message = self.client.cart().remove(item).await?;
        self.mirror.remove_item(item)?;
        Ok(message)
    }

    /// Ask the backend whether a product is in the cart.
    pub async fn contains(&self, product: ProductId) -> Result<bool, SessionError> {
        Ok(self.client.cart().contains(&self.code, product).await?)
    }

    /// Retire the spent code after a verified payment and mint a fresh one.
    ///
    /// The backend deletes the server cart when a payment verifies, so the
    /// old code points at nothing from then on.
    pub fn reset_after_payment(&mut self) -> Result<&CartCode, SessionError> {
        let store = self.client.store();
        store.remove(keys::CART_CODE)?;
        let code = CartCode::generate();
        store.set(keys::CART_CODE, &code)?;
        info!(code = %code, "cart code reset after payment");
        self.code = code;
        self.mirror = Cart::empty();
        Ok(&self.code)
    }
}
