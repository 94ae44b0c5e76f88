//! The API client and its token refresh flow.

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::services::{
    AuthService, CartService, CheckoutService, OrdersService, ProductsService, ReportingService,
};
use crate::transport::{HttpTransport, Method, RequestBuilder, Response};
use harvest_store::{keys, Store};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

const REFRESH_PATH: &str = "/token_refresh/";

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh: &'a str,
}

#[derive(Deserialize)]
struct RefreshResponse {
    access: String,
}

/// Backend API client.
///
/// Every request picks up the stored access token as a bearer header. When
/// the backend answers 401 the client swaps the refresh token for a new
/// access token and replays the request once; a failed swap clears both
/// tokens and surfaces [`ClientError::SessionExpired`].
#[derive(Clone)]
pub struct ApiClient {
    config: ClientConfig,
    transport: Arc<dyn HttpTransport>,
    store: Arc<Store>,
}

impl ApiClient {
    pub fn new(config: ClientConfig, transport: Arc<dyn HttpTransport>, store: Arc<Store>) -> Self {
        Self {
            config,
            transport,
            store,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The token and cart-code store backing this client.
    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.clone())
    }

    pub fn products(&self) -> ProductsService {
        ProductsService::new(self.clone())
    }

    pub fn cart(&self) -> CartService {
        CartService::new(self.clone())
    }

    pub fn checkout(&self) -> CheckoutService {
        CheckoutService::new(self.clone())
    }

    pub fn orders(&self) -> OrdersService {
        OrdersService::new(self.clone())
    }

    pub fn reporting(&self) -> ReportingService {
        ReportingService::new(self.clone())
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        RequestBuilder::new(Method::Get, self.config.url_for(path))
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        RequestBuilder::new(Method::Post, self.config.url_for(path))
    }

    pub(crate) fn put(&self, path: &str) -> RequestBuilder {
        RequestBuilder::new(Method::Put, self.config.url_for(path))
    }

    pub(crate) fn delete(&self, path: &str) -> RequestBuilder {
        RequestBuilder::new(Method::Delete, self.config.url_for(path))
    }

    /// Send a request, refreshing the access token once on 401.
    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<Response, ClientError> {
        let first = self.attach_bearer(builder.clone())?.build();
        let response = self.transport.send(first).await?;
        if response.status != 401 {
            return response.error_for_status();
        }

        match self.refresh_access().await? {
            Some(access) => {
                // bearer_auth replaces the stale Authorization header
                let retry = builder.bearer_auth(&access).build();
                let response = self.transport.send(retry).await?;
                response.error_for_status()
            }
            // Nothing to refresh with; hand the caller the original 401.
            None => response.error_for_status(),
        }
    }

    fn attach_bearer(&self, builder: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        match self.store.get::<String>(keys::ACCESS_TOKEN)? {
            Some(token) => Ok(builder.bearer_auth(token)),
            None => Ok(builder),
        }
    }

    /// Swap the stored refresh token for a fresh access token.
    ///
    /// Returns `Ok(None)` when no refresh token is stored. Any failure of
    /// the swap itself, from transport errors to a rejected refresh token,
    /// clears both tokens and ends the session.
    async fn refresh_access(&self) -> Result<Option<String>, ClientError> {
        let Some(refresh) = self.store.get::<String>(keys::REFRESH_TOKEN)? else {
            return Ok(None);
        };
        debug!("access token rejected, attempting refresh");

        match self.exchange_refresh(&refresh).await {
            Ok(access) => {
                self.store.set(keys::ACCESS_TOKEN, &access)?;
                Ok(Some(access))
            }
            Err(error) => {
                warn!("token refresh failed, clearing session: {error}");
                self.store.remove(keys::ACCESS_TOKEN)?;
                self.store.remove(keys::REFRESH_TOKEN)?;
                Err(ClientError::SessionExpired)
            }
        }
    }

    // The refresh call goes straight to the transport: no bearer header and
    // no retry on 401, otherwise an expired session would loop.
    async fn exchange_refresh(&self, refresh: &str) -> Result<String, ClientError> {
        let request = RequestBuilder::new(Method::Post, self.config.url_for(REFRESH_PATH))
            .json(&RefreshRequest { refresh })?
            .build();
        let response = self.transport.send(request).await?.error_for_status()?;
        let body: RefreshResponse = response.json()?;
        Ok(body.access)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{TransportError, FALLBACK_ERROR_MESSAGE};
    use crate::testing::scripted_client;
    use crate::transport::Body;

    #[tokio::test]
    async fn test_attaches_stored_access_token() {
        let (client, transport, _dir) = scripted_client();
        client.store().set(keys::ACCESS_TOKEN, &"jwt-access").unwrap();
        transport.push_json(200, r#"{"ok": true}"#);

        client.send(client.get("/get_products/?page=1")).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "http://api.test/get_products/?page=1");
        assert_eq!(requests[0].header("Authorization"), Some("Bearer jwt-access"));
    }

    #[tokio::test]
    async fn test_no_token_sends_no_auth_header() {
        let (client, transport, _dir) = scripted_client();
        transport.push_json(200, r#"{"ok": true}"#);

        client.send(client.get("/get_products/?page=1")).await.unwrap();

        assert_eq!(transport.requests()[0].header("Authorization"), None);
    }

    #[tokio::test]
    async fn test_refreshes_and_replays_once_on_401() {
        let (client, transport, _dir) = scripted_client();
        client.store().set(keys::ACCESS_TOKEN, &"stale").unwrap();
        client.store().set(keys::REFRESH_TOKEN, &"refresh-jwt").unwrap();
        transport.push_json(401, r#"{"error": "Token is invalid or expired"}"#);
        transport.push_json(200, r#"{"access": "fresh"}"#);
        transport.push_json(200, r#"{"ok": true}"#);

        let response = client.send(client.get("/get_user_orders/?page=1")).await.unwrap();
        assert_eq!(response.status, 200);

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].header("Authorization"), Some("Bearer stale"));

        // the refresh call itself carries no bearer header
        assert_eq!(requests[1].url, "http://api.test/token_refresh/");
        assert_eq!(requests[1].header("Authorization"), None);
        match &requests[1].body {
            Body::Json(bytes) => {
                let value: serde_json::Value = serde_json::from_slice(bytes).unwrap();
                assert_eq!(value["refresh"], "refresh-jwt");
            }
            other => panic!("expected JSON body, got {:?}", other),
        }

        assert_eq!(requests[2].url, "http://api.test/get_user_orders/?page=1");
        assert_eq!(requests[2].header("Authorization"), Some("Bearer fresh"));

        let stored: Option<String> = client.store().get(keys::ACCESS_TOKEN).unwrap();
        assert_eq!(stored.as_deref(), Some("fresh"));
    }

    #[tokio::test]
    async fn test_401_without_refresh_token_surfaces_original_error() {
        let (client, transport, _dir) = scripted_client();
        client.store().set(keys::ACCESS_TOKEN, &"stale").unwrap();
        transport.push_json(401, r#"{"error": "Authentication credentials were not provided."}"#);

        let error = client
            .send(client.get("/get_user_orders/?page=1"))
            .await
            .unwrap_err();

        assert_eq!(transport.requests().len(), 1);
        match error {
            ClientError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Authentication credentials were not provided.");
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rejected_refresh_clears_session() {
        let (client, transport, _dir) = scripted_client();
        client.store().set(keys::ACCESS_TOKEN, &"stale").unwrap();
        client.store().set(keys::REFRESH_TOKEN, &"expired-refresh").unwrap();
        transport.push_json(401, r#"{"error": "Token is invalid or expired"}"#);
        transport.push_json(401, r#"{"error": "Token is invalid or expired"}"#);

        let error = client
            .send(client.get("/get_user_orders/?page=1"))
            .await
            .unwrap_err();

        assert!(matches!(error, ClientError::SessionExpired));
        assert!(!client.store().exists(keys::ACCESS_TOKEN).unwrap());
        assert!(!client.store().exists(keys::REFRESH_TOKEN).unwrap());
    }

    #[tokio::test]
    async fn test_refresh_transport_failure_clears_session() {
        let (client, transport, _dir) = scripted_client();
        client.store().set(keys::ACCESS_TOKEN, &"stale").unwrap();
        client.store().set(keys::REFRESH_TOKEN, &"refresh-jwt").unwrap();
        transport.push_json(401, r#"{"error": "Token is invalid or expired"}"#);
        transport.push_error(TransportError::Timeout);

        let error = client
            .send(client.get("/get_user_orders/?page=1"))
            .await
            .unwrap_err();

        assert!(matches!(error, ClientError::SessionExpired));
        assert!(!client.store().exists(keys::REFRESH_TOKEN).unwrap());
    }

    #[tokio::test]
    async fn test_retry_that_still_401s_is_not_retried_again() {
        let (client, transport, _dir) = scripted_client();
        client.store().set(keys::ACCESS_TOKEN, &"stale").unwrap();
        client.store().set(keys::REFRESH_TOKEN, &"refresh-jwt").unwrap();
        transport.push_json(401, r#"{"error": "Token is invalid or expired"}"#);
        transport.push_json(200, r#"{"access": "fresh"}"#);
        transport.push_json(401, r#"{"error": "User is not an admin"}"#);

        let error = client.send(client.get("/dashboard-stats/")).await.unwrap_err();

        assert_eq!(transport.requests().len(), 3);
        assert!(error.is_unauthorized());
    }

    #[tokio::test]
    async fn test_error_body_without_known_fields_uses_fallback() {
        let (client, transport, _dir) = scripted_client();
        transport.push_json(500, "<html>Internal Server Error</html>");

        let error = client.send(client.get("/get_products/?page=1")).await.unwrap_err();
        assert_eq!(error.message(), FALLBACK_ERROR_MESSAGE);
        assert_eq!(error.status(), Some(500));
    }
}
