//! Shipping address and payment endpoints. All of these require a session.

use crate::client::ApiClient;
use crate::error::ClientError;
use harvest_commerce::checkout::ShippingInfo;
use harvest_commerce::ids::CartCode;
use harvest_commerce::money::Money;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct CartCodeRequest<'a> {
    cart_code: &'a str,
}

/// Response to saving a shipping address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingSaved {
    /// "created" or "updated" wording depending on what the backend did.
    pub message: String,
    pub shipping_info: ShippingInfo,
}

/// Gateway hand-off for a freshly initialized payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInit {
    /// Where to send the customer to pay.
    pub authorization_url: String,
    pub access_code: String,
    /// Gateway reference, later fed to [`CheckoutService::verify_payment`].
    pub reference: String,
}

/// Outcome of a payment verification.
///
/// The amount, currency and payment date are only present the first time a
/// payment verifies; asking again returns just the message and status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentVerification {
    pub message: String,
    pub reference: String,
    pub status: String,
    #[serde(default)]
    pub amount: Option<Money>,
    #[serde(default)]
    pub currency: Option<String>,
    /// Gateway timestamp, passed through as-is.
    #[serde(default)]
    pub payment_date: Option<String>,
}

impl PaymentVerification {
    /// Whether the gateway reports the payment as settled.
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Shipping details plus the two-step payment flow.
pub struct CheckoutService {
    client: ApiClient,
}

impl CheckoutService {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Create or update the shipping address.
    ///
    /// Call [`ShippingInfo::is_complete`] first; the backend rejects any
    /// blank field with a per-field error.
    pub async fn save_shipping(&self, info: &ShippingInfo) -> Result<ShippingSaved, ClientError> {
        let request = self
            .client
            .post("/create_or_update_shipping_info/")
            .json(&info.request_body())?;
        self.client.send(request).await?.json()
    }

    /// The saved shipping address.
    pub async fn shipping_address(&self) -> Result<ShippingInfo, ClientError> {
        self.client
            .send(self.client.get("/get_shipping_address/"))
            .await?
            .json()
    }

    /// Turn the cart into a pending order and open a payment with the
    /// gateway. The returned URL is where the customer completes it.
    pub async fn initialize_payment(&self, code: &CartCode) -> Result<PaymentInit, ClientError> {
        let request = self
            .client
            .post("/initialize_payment/")
            .json(&CartCodeRequest {
                cart_code: code.as_str(),
            })?;
        self.client.send(request).await?.json()
    }

    /// Confirm a payment with the gateway.
    ///
    /// On first success the backend marks the order paid, deletes the
    /// server cart and decrements stock, so callers should drop their
    /// local cart code afterwards.
    pub async fn verify_payment(&self, reference: &str) -> Result<PaymentVerification, ClientError> {
        let path = format!("/verify_payment/{reference}/");
        self.client.send(self.client.get(&path)).await?.json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::scripted_client;
    use crate::transport::Body;

    fn filled_shipping() -> ShippingInfo {
        ShippingInfo {
            first_name: "Asha".to_string(),
            last_name: "Patel".to_string(),
            email: "asha@example.com".to_string(),
            address: "14 Market Road".to_string(),
            city: "Pune".to_string(),
            state: "Maharashtra".to_string(),
            zip_code: "411001".to_string(),
        }
    }

    #[tokio::test]
    async fn test_save_shipping_sends_camel_case_fields() {
        let (client, transport, _dir) = scripted_client();
        transport.push_json(
            200,
            r#"{
                "message": "Shipping address updated successfully",
                "shipping_info": {
                    "first_name": "Asha",
                    "last_name": "Patel",
                    "email": "asha@example.com",
                    "address": "14 Market Road",
                    "city": "Pune",
                    "state": "Maharashtra",
                    "zip_code": "411001"
                }
            }"#,
        );

        let saved = client.checkout().save_shipping(&filled_shipping()).await.unwrap();
        assert_eq!(saved.shipping_info.city, "Pune");

        match &transport.requests()[0].body {
            Body::Json(bytes) => {
                let value: serde_json::Value = serde_json::from_slice(bytes).unwrap();
                assert_eq!(value["firstName"], "Asha");
                assert_eq!(value["zipCode"], "411001");
                assert!(value.get("first_name").is_none());
            }
            other => panic!("expected JSON body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_shipping_address_parses_extra_id_field() {
        let (client, transport, _dir) = scripted_client();
        transport.push_json(
            200,
            r#"{
                "id": 3,
                "first_name": "Asha",
                "last_name": "Patel",
                "email": "asha@example.com",
                "address": "14 Market Road",
                "city": "Pune",
                "state": "Maharashtra",
                "zip_code": "411001"
            }"#,
        );

        let info = client.checkout().shipping_address().await.unwrap();
        assert_eq!(info.full_name(), "Asha Patel");
    }

    #[tokio::test]
    async fn test_initialize_payment_posts_cart_code() {
        let (client, transport, _dir) = scripted_client();
        transport.push_json(
            200,
            r#"{
                "authorization_url": "https://checkout.paystack.com/abc123",
                "access_code": "abc123",
                "reference": "ref_780up93q"
            }"#,
        );

        let code = CartCode::new("cart_1721468200000_a1B2c3");
        let init = client.checkout().initialize_payment(&code).await.unwrap();
        assert_eq!(init.reference, "ref_780up93q");

        assert_eq!(transport.requests()[0].url, "http://api.test/initialize_payment/");
        match &transport.requests()[0].body {
            Body::Json(bytes) => {
                let value: serde_json::Value = serde_json::from_slice(bytes).unwrap();
                assert_eq!(value["cart_code"], "cart_1721468200000_a1B2c3");
            }
            other => panic!("expected JSON body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_verify_payment_first_success_carries_amount() {
        let (client, transport, _dir) = scripted_client();
        transport.push_json(
            200,
            r#"{
                "message": "Payment verified successfully",
                "reference": "ref_780up93q",
                "amount": 58.59,
                "currency": "NGN",
                "payment_date": "2025-07-20T09:14:22.000Z",
                "status": "success"
            }"#,
        );

        let verified = client.checkout().verify_payment("ref_780up93q").await.unwrap();
        assert!(verified.is_success());
        assert_eq!(verified.amount, Some(Money::from_paise(5859)));
        assert_eq!(verified.currency.as_deref(), Some("NGN"));

        assert_eq!(
            transport.requests()[0].url,
            "http://api.test/verify_payment/ref_780up93q/"
        );
    }

    #[tokio::test]
    async fn test_verify_payment_repeat_omits_amount() {
        let (client, transport, _dir) = scripted_client();
        transport.push_json(
            200,
            r#"{
                "message": "Payment already verified previously",
                "reference": "ref_780up93q",
                "status": "success"
            }"#,
        );

        let verified = client.checkout().verify_payment("ref_780up93q").await.unwrap();
        assert!(verified.is_success());
        assert_eq!(verified.amount, None);
        assert_eq!(verified.payment_date, None);
    }

    #[tokio::test]
    async fn test_failed_payment_is_an_api_error() {
        let (client, transport, _dir) = scripted_client();
        transport.push_json(400, r#"{"error": "Payment not successful"}"#);

        let error = client.checkout().verify_payment("ref_bad").await.unwrap_err();
        assert_eq!(error.message(), "Payment not successful");
    }
}
