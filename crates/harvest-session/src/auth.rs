//! Auth session state.

use crate::SessionError;
use harvest_client::ApiClient;
use harvest_store::keys;

/// The two states a session can be in.
///
/// Presence of a stored access token is what makes a session
/// `Authenticated`; no token validation happens locally. A stale token
/// surfaces naturally on the first backend call through the refresh path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticated { username: String },
}

/// Sign-in state machine over the client's token store.
pub struct AuthSession {
    client: ApiClient,
    state: AuthState,
}

impl AuthSession {
    /// Load the session from whatever the store holds.
    pub fn load(client: ApiClient) -> Result<Self, SessionError> {
        let store = client.store();
        let state = if store.exists(keys::ACCESS_TOKEN)? {
            let username = store
                .get::<String>(keys::AUTH_USERNAME)?
                .unwrap_or_default();
            AuthState::Authenticated { username }
        } else {
            AuthState::Anonymous
        };
        Ok(Self { client, state })
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, AuthState::Authenticated { .. })
    }

    /// The signed-in username, if any.
    pub fn username(&self) -> Option<&str> {
        match &self.state {
            AuthState::Authenticated { username } => Some(username),
            AuthState::Anonymous => None,
        }
    }

    /// Sign in, persist the session and move to `Authenticated`.
    ///
    /// Returns the signed-in username. On failure the state is left as it
    /// was; the auth service stores nothing unless the backend accepted
    /// the credentials.
    pub async fn login_with(&mut self, email: &str, password: &str) -> Result<String, SessionError> {
        let response = self.client.auth().sign_in(email, password).await?;
        let username = response.user.username;
        self.state = AuthState::Authenticated {
            username: username.clone(),
        };
        Ok(username)
    }

    /// Clear the stored tokens and return to `Anonymous`.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.client.auth().sign_out()?;
        self.state = AuthState::Anonymous;
        Ok(())
    }
}
