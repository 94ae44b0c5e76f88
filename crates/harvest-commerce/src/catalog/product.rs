//! Product types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Category;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;

/// Maximum accepted product image size (backend rejects anything larger).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// A product as served by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Backend row id.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// URL-friendly slug (unique, backend-generated from the name).
    pub slug: String,
    /// Stock keeping unit, `{CAT}-{6 hex}` with a category prefix or `GEN`.
    pub sku: String,
    /// Category, if assigned.
    pub category: Option<Category>,
    /// Full description.
    #[serde(default)]
    pub description: String,
    /// Unit price.
    pub price: Money,
    /// Units in stock.
    pub quantity: u32,
    /// Featured on the home page.
    pub featured: bool,
    /// Restock threshold.
    #[serde(rename = "minimumStock")]
    pub minimum_stock: u32,
    /// Absolute image URL, when one was uploaded.
    pub image: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Check if any stock remains.
    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }

    /// Check if stock has fallen under the restock threshold.
    pub fn is_low_stock(&self) -> bool {
        self.quantity < self.minimum_stock
    }
}

/// An image file attached to a product create/update request.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    /// Original file name, extension included.
    pub file_name: String,
    /// MIME type (`image/jpeg` or `image/png`).
    pub content_type: String,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Build an upload from a file name and raw bytes, inferring the MIME
    /// type from the extension.
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase());
        let content_type = match extension.as_deref() {
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("png") => "image/png",
            _ => "application/octet-stream",
        };
        Self {
            file_name,
            content_type: content_type.to_string(),
            bytes,
        }
    }

    /// Apply the backend's upload rules locally so a doomed multipart request
    /// is never sent: 5MB cap, jpg/jpeg/png only.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.bytes.len() > MAX_IMAGE_BYTES {
            return Err(CommerceError::InvalidImage(format!(
                "larger than {}MB",
                MAX_IMAGE_BYTES / (1024 * 1024)
            )));
        }
        let extension = self
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();
        if !ALLOWED_IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            return Err(CommerceError::InvalidImage(format!(
                "unsupported file type: {}",
                self.file_name
            )));
        }
        Ok(())
    }
}

/// Fields for `POST /add_product/` (multipart).
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub category: Option<Category>,
    pub price: Money,
    pub quantity: u32,
    pub minimum_stock: u32,
    pub featured: bool,
    pub image: Option<ImageUpload>,
}

impl NewProduct {
    /// Create a product payload with the backend's defaults.
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            category: None,
            price,
            quantity: 0,
            minimum_stock: 10,
            featured: false,
            image: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_stock(mut self, quantity: u32, minimum_stock: u32) -> Self {
        self.quantity = quantity;
        self.minimum_stock = minimum_stock;
        self
    }

    pub fn with_featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }

    pub fn with_image(mut self, image: ImageUpload) -> Self {
        self.image = Some(image);
        self
    }

    /// Text fields for the multipart form, in the names the backend reads.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("name", self.name.clone()),
            ("description", self.description.clone()),
            ("price", self.price.display_amount()),
            ("quantity", self.quantity.to_string()),
            ("minimumStock", self.minimum_stock.to_string()),
            ("featured", self.featured.to_string()),
        ];
        if let Some(category) = self.category {
            fields.push(("category", category.as_str().to_string()));
        }
        fields
    }
}

/// Fields for `PUT /update_product/{id}/` (multipart); unset fields keep
/// their current backend values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub price: Option<Money>,
    pub quantity: Option<u32>,
    pub minimum_stock: Option<u32>,
    pub featured: Option<bool>,
    pub image: Option<ImageUpload>,
}

impl ProductUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn price(mut self, price: Money) -> Self {
        self.price = Some(price);
        self
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn minimum_stock(mut self, minimum_stock: u32) -> Self {
        self.minimum_stock = Some(minimum_stock);
        self
    }

    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured);
        self
    }

    pub fn image(mut self, image: ImageUpload) -> Self {
        self.image = Some(image);
        self
    }

    /// Check if the update carries anything at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.quantity.is_none()
            && self.minimum_stock.is_none()
            && self.featured.is_none()
            && self.image.is_none()
    }

    /// Text fields for the multipart form; only the set ones are sent.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if let Some(name) = &self.name {
            fields.push(("name", name.clone()));
        }
        if let Some(description) = &self.description {
            fields.push(("description", description.clone()));
        }
        if let Some(category) = self.category {
            fields.push(("category", category.as_str().to_string()));
        }
        if let Some(price) = self.price {
            fields.push(("price", price.display_amount()));
        }
        if let Some(quantity) = self.quantity {
            fields.push(("quantity", quantity.to_string()));
        }
        if let Some(minimum_stock) = self.minimum_stock {
            fields.push(("minimumStock", minimum_stock.to_string()));
        }
        if let Some(featured) = self.featured {
            fields.push(("featured", featured.to_string()));
        }
        fields
    }
}
