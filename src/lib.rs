//! Async Rust client for starting Azure Automation runbook jobs.
//!
//! Authenticates against Azure AD with the OAuth2 client-credentials grant,
//! then issues one PUT to the Azure Resource Manager Automation API to
//! create a runbook job, forwarding caller-supplied parameters to the
//! runbook. One linear chain per invocation: validate settings, exchange
//! credentials for a bearer token, build the job request, submit it.
//!
//! # Modules
//!
//! - [`auth`] — OAuth2 client-credentials token exchange.
//! - [`client`] — Bearer-authenticated PUT against the management API.
//! - [`error`] — Typed error hierarchy ([`error::Error`]).
//! - [`job`] — Job request body types and the `start_job` orchestration.
//! - [`settings`] — Required-settings model and validation.
//!
//! # Quick Start
//!
//! ```ignore
//! use runbook_start::auth::Authenticator;
//! use runbook_start::client::ArmClient;
//! use runbook_start::job::{start_job, Query};
//! use runbook_start::settings::Settings;
//!
//! let settings = Settings::from_env()?;
//! let authenticator = Authenticator::new(
//!     &settings.tenant_id,
//!     &settings.client_id,
//!     &settings.service_principal_password,
//! );
//! let client = ArmClient::new();
//! let query: Query = [("RUNBOOK_NAME".into(), "restart-vms".into())].into();
//! let body = start_job(&authenticator, &client, &settings, &query).await?;
//! ```

#![warn(missing_docs)]

pub mod auth;
pub mod client;
pub mod error;
pub mod job;
pub mod settings;
