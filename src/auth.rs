//! OAuth2 client-credentials authentication against Azure AD.
//!
//! Acquires a bearer token for the Resource Manager API from the Azure AD
//! v1 endpoint `https://login.windows.net/{tenant_id}/oauth2/token`. The v1
//! form carries a `resource` identifier rather than the v2 `scope`.
//!
//! Tokens are not cached: every call to [`Authenticator::authenticate`]
//! performs a fresh exchange, and the returned string is used for exactly
//! one invocation.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default host of the Azure AD v1 token endpoint.
const LOGIN_BASE_URL: &str = "https://login.windows.net";

/// Resource identifier the token is scoped to — the ARM management API.
const MANAGEMENT_RESOURCE: &str = "https://management.azure.com/";

/// Form body sent to the token endpoint.
/// Fields are serialized as `application/x-www-form-urlencoded` by
/// reqwest's `.form()`.
#[derive(Serialize)]
struct TokenRequest<'a> {
    grant_type: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    resource: &'a str,
}

/// Subset of the Azure AD token response that we need.
/// The endpoint returns additional fields (`token_type`, `expires_in`,
/// `expires_on`, ...) which serde ignores because the struct is not marked
/// `deny_unknown_fields`.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Performs the client-credentials token exchange for one invocation.
///
/// Holds the service principal credentials and a `reqwest::Client`. No
/// timeout is configured on the client — the hosting environment bounds
/// the run externally.
pub struct Authenticator {
    client: reqwest::Client,
    base_url: String,
    tenant_id: String,
    client_id: String,
    client_secret: String,
}

impl Authenticator {
    /// Creates an authenticator for the given tenant and service principal.
    pub fn new(tenant_id: &str, client_id: &str, client_secret: &str) -> Self {
        Self::with_base_url(tenant_id, client_id, client_secret, LOGIN_BASE_URL)
    }

    /// Constructor that accepts a custom login host, used by tests to point
    /// at a local mock server instead of Azure AD.
    pub fn with_base_url(
        tenant_id: &str,
        client_id: &str,
        client_secret: &str,
        base_url: &str,
    ) -> Self {
        Authenticator {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            tenant_id: tenant_id.to_string(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        }
    }

    /// Exchanges the client credentials for a bearer token scoped to the
    /// management API.
    ///
    /// The response body is read as text before the status check so that on
    /// failure the raw AADSTS error message is preserved in the error chain.
    /// Every failure — transport, non-2xx status, undecodable body — maps to
    /// [`Error::Auth`]. No retry is attempted.
    pub async fn authenticate(&self) -> Result<String> {
        tracing::info!("Authenticating...");

        let body = TokenRequest {
            grant_type: "client_credentials",
            client_id: &self.client_id,
            client_secret: &self.client_secret,
            resource: MANAGEMENT_RESOURCE,
        };

        let url = format!("{}/{}/oauth2/token", self.base_url, self.tenant_id);

        let response = self
            .client
            .post(&url)
            .form(&body)
            .send()
            .await
            .map_err(|e| Error::Auth {
                source: Box::new(e),
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| Error::Auth {
            source: Box::new(e),
        })?;

        if !status.is_success() {
            return Err(Error::Auth {
                source: format!("Token request failed ({status}): {text}").into(),
            });
        }

        let resp: TokenResponse = serde_json::from_str(&text).map_err(|e| Error::Auth {
            source: Box::new(e),
        })?;

        Ok(resp.access_token)
    }
}
