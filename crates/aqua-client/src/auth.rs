//! Authentication and user-profile endpoints.

use aqua_core::error::Result;
use aqua_core::user::{Credentials, ProfileUpdate};
use serde::Deserialize;

use crate::client::ApiClient;

/// Successful authentication response carrying the bearer token.
///
/// The token is opaque to the client; it is stored as-is by the session
/// manager and attached to subsequent requests.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

impl ApiClient {
    /// Authenticates with username/password and returns the bearer token.
    pub async fn login(&self, credentials: &Credentials) -> Result<TokenResponse> {
        self.send_json(self.post("/user/login/").json(credentials))
            .await
    }

    /// Registers a new account and returns the bearer token.
    pub async fn signup(&self, credentials: &Credentials) -> Result<TokenResponse> {
        self.send_json(self.post("/user/signup/").json(credentials))
            .await
    }

    /// Updates the authenticated user's profile name.
    pub async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> Result<()> {
        self.send_unit(
            self.put("/user/profile/update/")
                .bearer_auth(token)
                .json(update),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_decodes() {
        let response: TokenResponse = serde_json::from_str(r#"{"token": "abc123"}"#).unwrap();
        assert_eq!(response.token, "abc123");
    }
}
