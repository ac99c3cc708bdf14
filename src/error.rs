//! Typed error hierarchy for the runbook-start crate.
//!
//! Every failure surfaces to the caller exactly once through [`Error`];
//! nothing is retried and nothing is logged-and-swallowed. Variants map to
//! the system's failure boundaries:
//! - `MissingSettings` — required configuration absent, detected before any
//!   network I/O.
//! - `Auth` — the Azure AD token exchange failed.
//! - `Api` — the management API answered with a status other than 201.
//! - `Network` — transport-level failure at either call site, passed
//!   through unwrapped.
//! - `Parse` — a 201 response body that was not valid JSON.

use reqwest::StatusCode;

/// Unified error type for all runbook-start operations.
///
/// The `#[source]` attribute on inner errors enables `Error::source()`
/// chaining so callers can traverse the full cause chain.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// One or more required settings are absent or empty.
    ///
    /// `missing` holds the offending key names in the declared
    /// required-settings order; the display joins them with commas so a
    /// single failure reports every missing key at once. Raised before any
    /// network service is contacted.
    #[error("Missing settings: {}", .missing.join(", "))]
    MissingSettings {
        /// Names of the settings that were absent or empty.
        missing: Vec<String>,
    },

    /// The client-credentials token exchange failed.
    ///
    /// Covers non-2xx responses from the token endpoint (the body with its
    /// AADSTS diagnostic is preserved in the cause), transport failures
    /// reaching the endpoint, and token responses that could not be
    /// decoded. The display is a single fixed message; the underlying
    /// detail is reachable via `source()`.
    #[error("Error authenticating.")]
    Auth {
        /// The underlying transport, status, or decode error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The management API returned a status other than 201 Created.
    ///
    /// Any non-201 status is a failure, including other 2xx codes — the
    /// automation jobs endpoint signals acceptance only with 201. The raw
    /// response body is preserved because ARM error bodies carry the
    /// diagnostic code and message.
    #[error("management API returned {status}: {body}")]
    Api {
        /// The HTTP status code the management API returned.
        status: StatusCode,
        /// The raw response body text.
        body: String,
    },

    /// A network-level failure (DNS, TCP, TLS, connection reset).
    ///
    /// No HTTP status is available because the request did not complete.
    /// The underlying `reqwest::Error` is passed through unwrapped.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A 201 response carried a body that was not valid JSON.
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
