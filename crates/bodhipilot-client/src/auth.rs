//! Account endpoints: `POST /token`, `POST /register`, `GET /me`.
//!
//! Login and registration are form-encoded (`username`, `password`), the
//! way the server's OAuth2 password flow expects them.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use bodhipilot_core::types::{ErrorDetail, MeResponse, RegisterResponse, TokenResponse};

use crate::error::ClientError;
use crate::http_client::HttpChatClient;

impl HttpChatClient {
    /// Exchange a username and password for a bearer token.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ClientError> {
        debug!(username, "Requesting access token");
        let response = self
            .client
            .post(self.url("/token"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;
        parse_json(response).await
    }

    /// Create an account. Returns the server's confirmation message.
    pub async fn register(&self, username: &str, password: &str) -> Result<String, ClientError> {
        debug!(username, "Registering account");
        let response = self
            .client
            .post(self.url("/register"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;
        let body: RegisterResponse = parse_json(response).await?;
        Ok(body.msg)
    }

    /// Ask the server who `token` belongs to.
    pub async fn me(&self, token: &str) -> Result<String, ClientError> {
        let response = self
            .client
            .get(self.url("/me"))
            .bearer_auth(token)
            .send()
            .await?;
        let body: MeResponse = parse_json(response).await?;
        Ok(body.username)
    }
}

/// Decode a 2xx JSON body, or turn the status + `detail` into an error.
async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        return serde_json::from_str(&body).map_err(|e| {
            warn!(status = %status, error = %e, "Unexpected response body");
            ClientError::InvalidResponse(e.to_string())
        });
    }

    let detail = serde_json::from_str::<ErrorDetail>(&body)
        .map(|d| d.message())
        .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown error").to_string());

    if status == StatusCode::UNAUTHORIZED {
        return Err(ClientError::Unauthorized(detail));
    }
    Err(ClientError::Rejected {
        status: status.as_u16(),
        detail,
    })
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
