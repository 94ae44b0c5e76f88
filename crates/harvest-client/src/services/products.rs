//! Product catalog endpoints.

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::services::MessageResponse;
use crate::transport::MultipartForm;
use harvest_commerce::catalog::{Category, ImageUpload, NewProduct, Product, ProductUpdate};
use harvest_commerce::ids::ProductId;
use harvest_commerce::page::Page;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct DescriptionRequest<'a> {
    name: &'a str,
}

/// AI-written description for a product name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedDescription {
    pub name: String,
    pub description: String,
}

/// Catalog reads plus the admin-only writes.
pub struct ProductsService {
    client: ApiClient,
}

impl ProductsService {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// One page of the admin product table, newest first.
    pub async fn list(&self, page: i64) -> Result<Page<Product>, ClientError> {
        let path = format!("/get_products/?page={page}");
        self.client.send(self.client.get(&path)).await?.json()
    }

    /// Admin table search over name and category.
    pub async fn admin_search(&self, page: i64, search: &str) -> Result<Page<Product>, ClientError> {
        let path = format!("/get_products/?page={page}&search={search}");
        self.client.send(self.client.get(&path)).await?.json()
    }

    /// One page of the storefront grid.
    ///
    /// The backend expects a category on every call; `None` becomes the
    /// `all` pseudo-category, which turns filtering off.
    pub async fn browse(
        &self,
        page: i64,
        search: &str,
        category: Option<Category>,
    ) -> Result<Page<Product>, ClientError> {
        let category = category.map(|c| c.as_str()).unwrap_or("all");
        let path = format!("/get_all_products/?page={page}&search={search}&category={category}");
        self.client.send(self.client.get(&path)).await?.json()
    }

    pub async fn get(&self, id: ProductId) -> Result<Product, ClientError> {
        let path = format!("/get_product/{id}/");
        self.client.send(self.client.get(&path)).await?.json()
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Product, ClientError> {
        let path = format!("/get_product_by_slug/{slug}/");
        self.client.send(self.client.get(&path)).await?.json()
    }

    /// Products flagged for the home page. Not paginated.
    pub async fn featured(&self) -> Result<Vec<Product>, ClientError> {
        self.client
            .send(self.client.get("/get_featured_products/"))
            .await?
            .json()
    }

    /// Create a product (admin).
    ///
    /// Run [`ImageUpload::validate`] before calling when an image is
    /// attached; the upload goes out exactly as given.
    pub async fn create(&self, product: &NewProduct) -> Result<Product, ClientError> {
        let form = product_form(product.form_fields(), product.image.as_ref());
        let request = self.client.post("/add_product/").multipart(form);
        self.client.send(request).await?.json()
    }

    /// Update the set fields of a product (admin).
    pub async fn update(&self, id: ProductId, update: &ProductUpdate) -> Result<Product, ClientError> {
        let form = product_form(update.form_fields(), update.image.as_ref());
        let path = format!("/update_product/{id}/");
        let request = self.client.put(&path).multipart(form);
        self.client.send(request).await?.json()
    }

    /// Delete a product (admin). Returns the backend's confirmation text.
    pub async fn delete(&self, id: ProductId) -> Result<String, ClientError> {
        let path = format!("/delete_product/{id}/");
        let response: MessageResponse = self.client.send(self.client.delete(&path)).await?.json()?;
        Ok(response.message)
    }

    /// Ask the backend's text model for a product description.
    pub async fn generate_description(&self, name: &str) -> Result<GeneratedDescription, ClientError> {
        let request = self
            .client
            .post("/generate_product_description/")
            .json(&DescriptionRequest { name })?;
        self.client.send(request).await?.json()
    }
}

fn product_form(fields: Vec<(&'static str, String)>, image: Option<&ImageUpload>) -> MultipartForm {
    let mut form = MultipartForm::new();
    for (name, value) in fields {
        form = form.text(name, value);
    }
    if let Some(image) = image {
        form = form.file(
            "image",
            image.file_name.clone(),
            image.content_type.clone(),
            image.bytes.clone(),
        );
    }
    form
}
