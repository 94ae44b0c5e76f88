//! Test doubles for session tests.

use async_trait::async_trait;
use harvest_client::{ApiClient, ClientConfig, HttpTransport, Request, Response, TransportError};
use harvest_store::Store;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Transport that replays queued responses and records every request.
pub(crate) struct ScriptedTransport {
    script: Mutex<VecDeque<Result<Response, TransportError>>>,
    seen: Mutex<Vec<Request>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn push_json(&self, status: u16, body: &str) {
        self.script
            .lock()
            .unwrap()
            .push_back(Ok(Response::new(status, body.as_bytes().to_vec())));
    }

    pub(crate) fn push_error(&self, error: TransportError) {
        self.script.lock().unwrap().push_back(Err(error));
    }

    pub(crate) fn requests(&self) -> Vec<Request> {
        self.seen.lock().unwrap().clone()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        self.seen.lock().unwrap().push(request);
        match self.script.lock().unwrap().pop_front() {
            Some(result) => result,
            None => panic!("request sent but no scripted response left"),
        }
    }
}

/// Client wired to a scripted transport and a throwaway store.
///
/// Keep the returned TempDir alive; dropping it deletes the store directory.
pub(crate) fn scripted_client() -> (ApiClient, Arc<ScriptedTransport>, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(Store::open(dir.path()).unwrap());
    let transport = Arc::new(ScriptedTransport::new());
    let config = ClientConfig::new("http://api.test").unwrap();
    let client = ApiClient::new(config, transport.clone(), store);
    (client, transport, dir)
}

/// JSON for a product with the given id, name, unit price in paise and stock.
pub(crate) fn product_json(id: i64, name: &str, price_paise: i64, stock: u32) -> String {
    format!(
        r#"{{
            "id": {id},
            "name": "{name}",
            "slug": "{slug}",
            "sku": "VEG-1A2B3C",
            "category": "vegetables",
            "description": "",
            "price": "{rupees}.{paise:02}",
            "quantity": {stock},
            "featured": false,
            "minimumStock": 5,
            "image": null,
            "created_at": "2025-07-14T08:30:00Z"
        }}"#,
        slug = name.to_lowercase().replace(' ', "-"),
        rupees = price_paise / 100,
        paise = price_paise % 100,
    )
}

/// JSON for a one-item cart; totals follow from the unit price.
pub(crate) fn cart_json(
    code: &str,
    item_id: i64,
    product: &str,
    quantity: u32,
    unit_paise: i64,
) -> String {
    let sub_total = unit_paise * quantity as i64;
    format!(
        r#"{{
            "id": 4,
            "cart_code": "{code}",
            "cartitems": [
                {{
                    "id": {item_id},
                    "product": {product},
                    "quantity": {quantity},
                    "sub_total": "{st_rupees}.{st_paise:02}"
                }}
            ],
            "cart_total": "{st_rupees}.{st_paise:02}"
        }}"#,
        st_rupees = sub_total / 100,
        st_paise = sub_total % 100,
    )
}
