//! File-backed typed key-value store for the Harvest Market client.
//!
//! The web storefront keeps its session state (tokens, the cart code) in
//! browser local storage; this crate is the equivalent for a local client.
//! One JSON file per key, written atomically so a crash mid-write never
//! truncates a previously stored value.
//!
//! # Example
//!
//! ```rust,ignore
//! use harvest_store::{keys, Store};
//!
//! let store = Store::open_default()?;
//!
//! store.set(keys::CART_CODE, &code)?;
//! let code: Option<String> = store.get(keys::CART_CODE)?;
//! store.remove(keys::CART_CODE)?;
//! ```

mod error;
pub mod keys;
mod kv;

pub use error::StoreError;
pub use kv::Store;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{keys, Store, StoreError};
}
