//! Micro client for the Azure Resource Manager API.
//!
//! [`ArmClient`] wraps a `reqwest::Client` and issues the one request this
//! task needs: a bearer-authenticated PUT against a resource-group-scoped
//! management endpoint. The response is classified by status code alone —
//! 201 Created is success, everything else is a failure carrying the status
//! and the raw body.

use reqwest::StatusCode;
use serde::Serialize;

use crate::error::{Error, Result};

/// Default host of the Azure Resource Manager API.
const MANAGEMENT_BASE_URL: &str = "https://management.azure.com";

/// Bearer-authenticated HTTP client for ARM requests.
///
/// `base_url` is stored as a `String` rather than a `&'static str` so it
/// can be overridden in tests (e.g. pointing at a wiremock server). No
/// timeout is configured — the hosting environment bounds the run
/// externally.
pub struct ArmClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for ArmClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ArmClient {
    /// Creates a client pointed at the real management API.
    pub fn new() -> Self {
        Self::with_base_url(MANAGEMENT_BASE_URL)
    }

    /// Constructor that accepts a custom base URL, used by tests to point
    /// at a local mock server instead of the real ARM endpoint.
    pub fn with_base_url(base_url: &str) -> Self {
        ArmClient {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Issues a bearer-authenticated JSON PUT to
    /// `{base}/subscriptions/{subscription_id}/resourceGroups/{resource_group}{path}`.
    ///
    /// `path` must carry everything below the resource group, including the
    /// API version query string.
    ///
    /// Classification is mutually exclusive:
    /// - transport failure → [`Error::Network`], passed through unwrapped;
    /// - any status other than 201 (other 2xx included) → [`Error::Api`]
    ///   with the status and raw body;
    /// - 201 → the body parsed as JSON and returned unchanged.
    ///
    /// No retry, no 4xx/5xx distinction.
    pub async fn put_job<B: Serialize + ?Sized>(
        &self,
        access_token: &str,
        subscription_id: &str,
        resource_group: &str,
        path: &str,
        body: &B,
    ) -> Result<serde_json::Value> {
        tracing::info!(path, "Sending request");

        let url = format!(
            "{}/subscriptions/{}/resourceGroups/{}{}",
            self.base_url, subscription_id, resource_group, path
        );

        let response = self
            .client
            .put(&url)
            .bearer_auth(access_token)
            .json(body)
            .send()
            .await?;

        // Read the body before classifying so a non-201 error keeps ARM's
        // diagnostic payload.
        let status = response.status();
        let text = response.text().await?;

        if status != StatusCode::CREATED {
            return Err(Error::Api { status, body: text });
        }

        Ok(serde_json::from_str(&text)?)
    }
}
