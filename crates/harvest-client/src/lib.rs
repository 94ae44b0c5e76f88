//! Authenticated HTTP client for the Harvest Market backend.
//!
//! The backend issues short-lived JWT access tokens and long-lived refresh
//! tokens. [`ApiClient`] attaches the stored access token to every request
//! and, on a 401, exchanges the refresh token for a new access token and
//! replays the request exactly once. Endpoint wrappers live in [`services`],
//! one typed method per backend operation.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use harvest_client::{ApiClient, ClientConfig, ReqwestTransport};
//! use harvest_store::Store;
//!
//! let client = ApiClient::new(
//!     ClientConfig::from_env()?,
//!     Arc::new(ReqwestTransport::new()),
//!     Arc::new(Store::open_default()?),
//! );
//!
//! let page = client.products().list(1).await?;
//! for product in &page.results {
//!     println!("{} {}", product.name, product.price);
//! }
//! ```

mod client;
mod config;
mod error;
pub mod services;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use client::ApiClient;
pub use config::{ClientConfig, BASE_URL_ENV};
pub use error::{ClientError, TransportError, FALLBACK_ERROR_MESSAGE};
pub use transport::{
    Body, FormPart, HttpTransport, Method, MultipartForm, ReqwestTransport, Request,
    RequestBuilder, Response,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::services::{
        AuthService, CartService, CheckoutService, OrdersService, ProductsService,
        ReportingService,
    };
    pub use crate::{ApiClient, ClientConfig, ClientError, HttpTransport, ReqwestTransport};
}
