//! Product catalog module.
//!
//! Contains the product DTO, the fixed category list, and the multipart
//! payload builders for the admin product endpoints.

mod category;
mod product;

pub use category::Category;
pub use product::{ImageUpload, NewProduct, Product, ProductUpdate, MAX_IMAGE_BYTES};
