//! Authentication use case.
//!
//! Coordinates the API client and the session manager: the API produces the
//! bearer token, the session manager owns it from then on.

use anyhow::Result;
use aqua_client::ApiClient;
use aqua_core::error::AquaError;
use aqua_core::session::SessionManager;
use aqua_core::user::{Credentials, ProfileUpdate};

/// Use case for signing in and out and gating authenticated calls.
#[derive(Clone)]
pub struct AuthUseCase {
    api: ApiClient,
    session: SessionManager,
}

impl AuthUseCase {
    /// Creates a new use case over the shared client and session state.
    pub fn new(api: ApiClient, session: SessionManager) -> Self {
        Self { api, session }
    }

    /// Restores the persisted session at application start.
    ///
    /// Must run before any other operation; see [`SessionManager::restore`].
    pub async fn restore_session(&self) {
        self.session.restore().await;
        tracing::debug!(
            authenticated = self.session.is_authenticated().await,
            "session restored"
        );
    }

    /// Authenticates against the backend and stores the returned token.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<()> {
        let credentials = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self.api.login(&credentials).await?;
        self.session.login(response.token).await;
        Ok(())
    }

    /// Registers a new account and signs it in.
    pub async fn sign_up(&self, username: &str, password: &str) -> Result<()> {
        let credentials = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self.api.signup(&credentials).await?;
        self.session.login(response.token).await;
        Ok(())
    }

    /// Clears the session. Safe to call when already signed out.
    pub async fn sign_out(&self) {
        self.session.logout().await;
    }

    /// Updates the profile name of the signed-in user.
    pub async fn update_profile(&self, first_name: &str, last_name: &str) -> Result<()> {
        let token = self.require_token().await?;
        let update = ProfileUpdate {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        };
        self.api.update_profile(&token, &update).await?;
        Ok(())
    }

    /// Returns the current token, or an auth error when signed out.
    pub async fn require_token(&self) -> Result<String> {
        self.session
            .auth_token()
            .await
            .ok_or_else(|| AquaError::auth("Not authenticated").into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aqua_client::ApiConfig;
    use aqua_infrastructure::MemoryKeyValueStore;
    use std::sync::Arc;

    fn usecase() -> AuthUseCase {
        let api = ApiClient::new(&ApiConfig::default()).unwrap();
        let session = SessionManager::new(Arc::new(MemoryKeyValueStore::new()));
        AuthUseCase::new(api, session)
    }

    #[tokio::test]
    async fn test_require_token_when_signed_out() {
        let auth = usecase();
        auth.restore_session().await;

        let err = auth.require_token().await.unwrap_err();
        let aqua_err = err.downcast_ref::<AquaError>().unwrap();
        assert!(aqua_err.is_auth());
    }

    #[tokio::test]
    async fn test_sign_out_is_idempotent() {
        let auth = usecase();
        auth.restore_session().await;

        auth.sign_out().await;
        auth.sign_out().await;

        assert!(auth.require_token().await.is_err());
    }
}
