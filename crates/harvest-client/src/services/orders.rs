//! Order history endpoints.

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::services::MessageResponse;
use harvest_commerce::checkout::{Order, OrderStatus};
use harvest_commerce::ids::OrderId;
use harvest_commerce::page::Page;
use serde::Serialize;

#[derive(Serialize)]
struct StatusRequest<'a> {
    status: &'a str,
}

/// The customer's own orders plus the admin order table.
pub struct OrdersService {
    client: ApiClient,
}

impl OrdersService {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// One page of the signed-in user's orders, newest first.
    pub async fn mine(&self, page: i64) -> Result<Page<Order>, ClientError> {
        let path = format!("/get_user_orders/?page={page}");
        self.client.send(self.client.get(&path)).await?.json()
    }

    /// One page of every order (admin), optionally filtered by status.
    ///
    /// `None` becomes the `all` pseudo-status, which turns filtering off.
    pub async fn all(&self, page: i64, status: Option<OrderStatus>) -> Result<Page<Order>, ClientError> {
        let status = status.map(|s| s.as_str()).unwrap_or("all");
        let path = format!("/get_all_orders/?page={page}&status={status}");
        self.client.send(self.client.get(&path)).await?.json()
    }

    /// Look up orders by SKU (admin), matched case-insensitively.
    pub async fn find_by_sku(&self, page: i64, sku: &str) -> Result<Page<Order>, ClientError> {
        let path = format!("/get_all_orders/?sku={sku}&page={page}");
        self.client.send(self.client.get(&path)).await?.json()
    }

    /// Move an order to a new status (admin). Returns the updated order.
    pub async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, ClientError> {
        let path = format!("/update_order_status/{id}/");
        let request = self.client.put(&path).json(&StatusRequest {
            status: status.as_str(),
        })?;
        self.client.send(request).await?.json()
    }

    /// Delete an order.
    ///
    /// The backend only allows this for pending orders at least seven days
    /// old; [`Order::is_deletable`] mirrors that check for the UI.
    pub async fn delete(&self, id: OrderId) -> Result<String, ClientError> {
        let path = format!("/delete_order/{id}/");
        let response: MessageResponse = self.client.send(self.client.delete(&path)).await?.json()?;
        Ok(response.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::scripted_client;
    use crate::transport::{Body, Method};

    fn order_page_json() -> &'static str {
        r#"{
            "count": 1,
            "next": null,
            "previous": null,
            "results": [
                {
                    "id": 21,
                    "reference": "ref_780up93q",
                    "sku": "ORD-9F2A71",
                    "total_amount": "140.39",
                    "status": "success",
                    "orderitems": [],
                    "created_at": "2025-07-18T11:00:00Z",
                    "updated_at": "2025-07-20T09:15:00Z"
                }
            ]
        }"#
    }

    #[tokio::test]
    async fn test_mine_hits_user_orders() {
        let (client, transport, _dir) = scripted_client();
        transport.push_json(200, order_page_json());

        let page = client.orders().mine(1).await.unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.results[0].status, OrderStatus::Success);

        assert_eq!(transport.requests()[0].url, "http://api.test/get_user_orders/?page=1");
    }

    #[tokio::test]
    async fn test_all_defaults_status_to_all() {
        let (client, transport, _dir) = scripted_client();
        transport.push_json(200, order_page_json());

        client.orders().all(3, None).await.unwrap();
        assert_eq!(
            transport.requests()[0].url,
            "http://api.test/get_all_orders/?page=3&status=all"
        );
    }

    #[tokio::test]
    async fn test_all_sends_selected_status() {
        let (client, transport, _dir) = scripted_client();
        transport.push_json(200, order_page_json());

        client.orders().all(1, Some(OrderStatus::Shipped)).await.unwrap();
        assert_eq!(
            transport.requests()[0].url,
            "http://api.test/get_all_orders/?page=1&status=shipped"
        );
    }

    #[tokio::test]
    async fn test_find_by_sku_puts_sku_first() {
        let (client, transport, _dir) = scripted_client();
        transport.push_json(200, order_page_json());

        client.orders().find_by_sku(1, "ORD-9F2A71").await.unwrap();
        assert_eq!(
            transport.requests()[0].url,
            "http://api.test/get_all_orders/?sku=ORD-9F2A71&page=1"
        );
    }

    #[tokio::test]
    async fn test_update_status_sends_wire_name() {
        let (client, transport, _dir) = scripted_client();
        transport.push_json(
            200,
            r#"{
                "id": 21,
                "reference": "ref_780up93q",
                "sku": "ORD-9F2A71",
                "total_amount": "140.39",
                "status": "shipped",
                "orderitems": [],
                "created_at": "2025-07-18T11:00:00Z",
                "updated_at": "2025-07-21T10:00:00Z"
            }"#,
        );

        let order = client
            .orders()
            .update_status(OrderId::new(21), OrderStatus::Shipped)
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Shipped);

        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::Put);
        assert_eq!(requests[0].url, "http://api.test/update_order_status/21/");
        match &requests[0].body {
            Body::Json(bytes) => {
                let value: serde_json::Value = serde_json::from_slice(bytes).unwrap();
                assert_eq!(value["status"], "shipped");
            }
            other => panic!("expected JSON body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_too_young_surfaces_backend_error() {
        let (client, transport, _dir) = scripted_client();
        transport.push_json(400, r#"{"error": "Orders can only be deleted after 7 days."}"#);

        let error = client.orders().delete(OrderId::new(21)).await.unwrap_err();
        assert_eq!(error.message(), "Orders can only be deleted after 7 days.");
    }

    #[tokio::test]
    async fn test_delete_returns_message() {
        let (client, transport, _dir) = scripted_client();
        transport.push_json(204, r#"{"message": "Order deleted successfully."}"#);

        let message = client.orders().delete(OrderId::new(21)).await.unwrap();
        assert_eq!(message, "Order deleted successfully.");
        assert_eq!(transport.requests()[0].url, "http://api.test/delete_order/21/");
    }
}
