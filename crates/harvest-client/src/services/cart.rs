//! Cart endpoints.
//!
//! The cart lives server-side under a client-generated cart code; these
//! calls work for anonymous and signed-in sessions alike.

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::services::MessageResponse;
use harvest_commerce::cart::{Cart, CartItem};
use harvest_commerce::ids::{CartCode, CartItemId, ProductId};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct AddToCartRequest<'a> {
    cart_code: &'a str,
    product_id: i64,
}

#[derive(Serialize)]
struct ItemIdRequest {
    item_id: i64,
}

#[derive(Deserialize)]
struct InCartResponse {
    in_cart: bool,
}

/// A quantity change echoed back by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct CartItemUpdate {
    pub data: CartItem,
    pub message: String,
}

/// Cart reads and item mutations.
pub struct CartService {
    client: ApiClient,
}

impl CartService {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch the cart for a code. 404 if the backend has never seen it.
    pub async fn get(&self, code: &CartCode) -> Result<Cart, ClientError> {
        let path = format!("/get_cart/{code}/");
        self.client.send(self.client.get(&path)).await?.json()
    }

    /// Put a product in the cart and get the whole cart back.
    ///
    /// The backend creates the cart row on first sight of the code and
    /// pins the item at quantity 1, even when it was already in the cart.
    pub async fn add_item(&self, code: &CartCode, product: ProductId) -> Result<Cart, ClientError> {
        let request = self.client.post("/add_to_cart/").json(&AddToCartRequest {
            cart_code: code.as_str(),
            product_id: product.get(),
        })?;
        self.client.send(request).await?.json()
    }

    /// Check whether a product is already in the cart.
    ///
    /// An unknown cart code is not an error, just `false`.
    pub async fn contains(&self, code: &CartCode, product: ProductId) -> Result<bool, ClientError> {
        let path = format!(
            "/check_product_in_cart/?cart_code={}&product_id={}",
            code, product
        );
        let response: InCartResponse = self.client.send(self.client.get(&path)).await?.json()?;
        Ok(response.in_cart)
    }

    /// Bump an item's quantity by one.
    pub async fn increase(&self, item: CartItemId) -> Result<CartItemUpdate, ClientError> {
        let request = self
            .client
            .put("/increase_cartitem_quantity/")
            .json(&ItemIdRequest { item_id: item.get() })?;
        self.client.send(request).await?.json()
    }

    /// Drop an item's quantity by one.
    ///
    /// The backend applies this unconditionally; callers keep the quantity
    /// above zero by not asking below one.
    pub async fn decrease(&self, item: CartItemId) -> Result<CartItemUpdate, ClientError> {
        let request = self
            .client
            .put("/decrease_cartitem_quantity/")
            .json(&ItemIdRequest { item_id: item.get() })?;
        self.client.send(request).await?.json()
    }

    /// Remove an item entirely. Returns the backend's confirmation text.
    pub async fn remove(&self, item: CartItemId) -> Result<String, ClientError> {
        let path = format!("/delete_cartitem/{item}/");
        let response: MessageResponse = self.client.send(self.client.delete(&path)).await?.json()?;
        Ok(response.message)
    }
}
