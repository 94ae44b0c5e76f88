//! Account endpoints and local session bookkeeping.

use crate::client::ApiClient;
use crate::error::ClientError;
use harvest_store::keys;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// The user block returned by sign-up and sign-in.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AccountSummary {
    pub email: String,
    pub username: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignUpResponse {
    pub message: String,
    pub user: AccountSummary,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignInResponse {
    pub message: String,
    pub refresh: String,
    pub access: String,
    pub user: AccountSummary,
}

/// Result of a session check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginStatus {
    pub is_logged_in: bool,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl LoginStatus {
    fn logged_out() -> Self {
        Self {
            is_logged_in: false,
            email: None,
            username: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AdminStatus {
    pub is_admin: bool,
}

/// Sign-up, sign-in and session checks.
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Create an account. Nothing is stored locally; the caller still has
    /// to sign in.
    pub async fn sign_up(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<SignUpResponse, ClientError> {
        let request = self.client.post("/auth/signup/").json(&SignUpRequest {
            email,
            username,
            password,
        })?;
        self.client.send(request).await?.json()
    }

    /// Sign in and persist the session.
    ///
    /// On success the access and refresh tokens plus the username land in
    /// the store, so subsequent requests authenticate automatically.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SignInResponse, ClientError> {
        let request = self
            .client
            .post("/auth/signin/")
            .json(&SignInRequest { email, password })?;
        let response: SignInResponse = self.client.send(request).await?.json()?;

        let store = self.client.store();
        store.set(keys::ACCESS_TOKEN, &response.access)?;
        store.set(keys::REFRESH_TOKEN, &response.refresh)?;
        store.set(keys::AUTH_USERNAME, &response.user.username)?;
        Ok(response)
    }

    /// Check whether the stored session is still valid.
    ///
    /// The backend signals logged-out with a 401, so that case comes back
    /// as a successful logged-out status rather than an error.
    pub async fn is_logged_in(&self) -> Result<LoginStatus, ClientError> {
        match self.client.send(self.client.get("/user_is_logged_in/")).await {
            Ok(response) => response.json(),
            Err(ClientError::Api { status: 401, .. }) | Err(ClientError::SessionExpired) => {
                Ok(LoginStatus::logged_out())
            }
            Err(error) => Err(error),
        }
    }

    /// Check whether the signed-in user has admin rights.
    ///
    /// Unlike [`is_logged_in`](Self::is_logged_in) a 401 here stays an
    /// error, so callers can tell "not signed in" from "not an admin".
    pub async fn is_admin(&self) -> Result<AdminStatus, ClientError> {
        self.client
            .send(self.client.get("/user_is_admin/"))
            .await?
            .json()
    }

    /// The locally stored username, if signed in.
    pub fn stored_username(&self) -> Result<Option<String>, ClientError> {
        Ok(self.client.store().get(keys::AUTH_USERNAME)?)
    }

    /// Drop the local session.
    ///
    /// Purely local, no backend call. The cart code survives so the
    /// anonymous cart stays reachable after signing out.
    pub fn sign_out(&self) -> Result<(), ClientError> {
        let store = self.client.store();
        store.remove(keys::ACCESS_TOKEN)?;
        store.remove(keys::REFRESH_TOKEN)?;
        store.remove(keys::AUTH_USERNAME)?;
        Ok(())
    }
}
