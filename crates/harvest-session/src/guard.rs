//! Route guards.

use harvest_client::ApiClient;
use tracing::debug;

/// Where anonymous visitors get sent.
pub const SIGNIN_ROUTE: &str = "/signin";

/// Result of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Allow,
    /// Go to `to`, remembering `from` so the visitor can be sent back
    /// after signing in.
    Redirect { to: String, from: String },
}

impl GuardOutcome {
    fn to_signin(from: &str) -> Self {
        GuardOutcome::Redirect {
            to: SIGNIN_ROUTE.to_string(),
            from: from.to_string(),
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardOutcome::Allow)
    }
}

/// Let signed-in users through; everyone else goes to sign-in.
///
/// Nothing is cached, every call re-checks with the backend, and any
/// failure of the check itself counts as not signed in.
pub async fn guard_signed_in(client: &ApiClient, from: &str) -> GuardOutcome {
    match client.auth().is_logged_in().await {
        Ok(status) if status.is_logged_in => GuardOutcome::Allow,
        Ok(_) => GuardOutcome::to_signin(from),
        Err(error) => {
            debug!("sign-in check failed: {error}");
            GuardOutcome::to_signin(from)
        }
    }
}

/// Let admins through; everyone else goes to sign-in.
pub async fn guard_admin(client: &ApiClient, from: &str) -> GuardOutcome {
    match client.auth().is_admin().await {
        Ok(status) if status.is_admin => GuardOutcome::Allow,
        Ok(_) => GuardOutcome::to_signin(from),
        Err(error) => {
            debug!("admin check failed: {error}");
            GuardOutcome::to_signin(from)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::scripted_client;
    use harvest_client::TransportError;

    #[tokio::test]
    async fn test_signed_in_user_is_allowed() {
        let (client, transport, _dir) = scripted_client();
        transport.push_json(
            200,
            r#"{"is_logged_in": true, "email": "asha@example.com", "username": "asha"}"#,
        );

        let outcome = guard_signed_in(&client, "/checkout").await;
        assert_eq!(outcome, GuardOutcome::Allow);
        assert!(outcome.is_allowed());
    }

    #[tokio::test]
    async fn test_anonymous_visitor_redirects_with_origin() {
        let (client, transport, _dir) = scripted_client();
        transport.push_json(401, r#"{"is_logged_in": false}"#);

        let outcome = guard_signed_in(&client, "/profile").await;
        assert_eq!(
            outcome,
            GuardOutcome::Redirect {
                to: "/signin".to_string(),
                from: "/profile".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_network_failure_counts_as_not_signed_in() {
        let (client, transport, _dir) = scripted_client();
        transport.push_error(TransportError::Connect("refused".to_string()));

        let outcome = guard_signed_in(&client, "/checkout").await;
        assert!(!outcome.is_allowed());
    }

    #[tokio::test]
    async fn test_non_admin_is_redirected() {
        let (client, transport, _dir) = scripted_client();
        transport.push_json(200, r#"{"is_admin": false}"#);

        let outcome = guard_admin(&client, "/admin").await;
        assert_eq!(
            outcome,
            GuardOutcome::Redirect {
                to: "/signin".to_string(),
                from: "/admin".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_admin_is_allowed() {
        let (client, transport, _dir) = scripted_client();
        transport.push_json(200, r#"{"is_admin": true}"#);

        assert!(guard_admin(&client, "/admin").await.is_allowed());
    }

    #[tokio::test]
    async fn test_guards_do_not_cache() {
        let (client, transport, _dir) = scripted_client();
        transport.push_json(200, r#"{"is_admin": true}"#);
        transport.push_json(200, r#"{"is_admin": false}"#);

        assert!(guard_admin(&client, "/admin").await.is_allowed());
        assert!(!guard_admin(&client, "/admin").await.is_allowed());
        assert_eq!(transport.request_count(), 2);
    }
}
