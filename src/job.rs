//! Runbook job request types and orchestration.
//!
//! Starting a runbook job is one PUT against the Automation provider:
//!
//! ```text
//! PUT /subscriptions/{sub}/resourceGroups/lab/providers/Microsoft.Automation
//!     /automationAccounts/automation-lab/jobs/{jobId}?api-version=2015-01-01-preview
//! ```
//!
//! The job id is a fresh UUID v4 per invocation, so two runs with identical
//! inputs target different URLs. The caller's query parameters travel to the
//! runbook inside the body's single `parameters.context` field as a
//! JSON-stringified object.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::Authenticator;
use crate::client::ArmClient;
use crate::error::Result;
use crate::settings::Settings;

/// Resource group that owns the automation account.
const RESOURCE_GROUP: &str = "lab";

/// Automation account the jobs are created under.
const AUTOMATION_ACCOUNT: &str = "automation-lab";

/// API version of the Automation jobs endpoint.
const API_VERSION: &str = "2015-01-01-preview";

/// Fixed started-by marker the Automation service expects; the value is a
/// JSON-quoted string, quotes included.
const STARTED_BY: &str = "\"A Webtask\"";

/// Caller-supplied job parameters, forwarded to the runbook.
pub type Query = HashMap<String, String>;

// ── Request types ──────────────────────────────────────────────────────

/// Top-level request body for the Automation jobs endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct JobRequest {
    /// Job definition.
    pub properties: JobProperties,
    /// Resource tags; always submitted empty.
    pub tags: serde_json::Map<String, serde_json::Value>,
}

/// The `properties` object of a job request.
#[derive(Debug, Serialize, Deserialize)]
pub struct JobProperties {
    /// Which runbook to run.
    pub runbook: RunbookRef,
    /// Parameters handed to the runbook.
    pub parameters: JobParameters,
}

/// Reference to a runbook by name.
#[derive(Debug, Serialize, Deserialize)]
pub struct RunbookRef {
    /// The runbook's name within the automation account.
    pub name: String,
}

/// The `parameters` object of a job request.
///
/// The Automation service takes runbook parameters as named strings; this
/// task funnels the whole merged parameter map through the single `context`
/// entry as a JSON-stringified object.
#[derive(Debug, Serialize, Deserialize)]
pub struct JobParameters {
    /// JSON-stringified merged query + internal parameters.
    pub context: String,
    /// Fixed marker recorded by the Automation service.
    #[serde(rename = "MicrosoftApplicationManagementStartedBy")]
    pub started_by: String,
}

// ── Request construction ───────────────────────────────────────────────

/// Merges the caller's query with the fixed internal fields.
///
/// Internal fields win on key collision: `someInternalValue` is the
/// constant tag `1`, and `someSecretValue` forwards the client id to the
/// runbook.
fn build_context(query: &Query, client_id: &str) -> serde_json::Map<String, serde_json::Value> {
    let mut context: serde_json::Map<String, serde_json::Value> = query
        .iter()
        .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
        .collect();
    context.insert("someInternalValue".to_string(), 1.into());
    context.insert("someSecretValue".to_string(), client_id.into());
    context
}

/// Builds the job request body.
///
/// The runbook name is read from the query's `RUNBOOK_NAME` entry, not from
/// the validated settings; a query without it yields an empty name, which
/// the Automation service rejects.
fn build_job_request(query: &Query, client_id: &str) -> Result<JobRequest> {
    let context = build_context(query, client_id);
    Ok(JobRequest {
        properties: JobProperties {
            runbook: RunbookRef {
                name: query.get("RUNBOOK_NAME").cloned().unwrap_or_default(),
            },
            parameters: JobParameters {
                context: serde_json::to_string(&context)?,
                started_by: STARTED_BY.to_string(),
            },
        },
        tags: serde_json::Map::new(),
    })
}

/// Path below the resource group for a job with the given id.
fn job_path(job_id: Uuid) -> String {
    format!(
        "/providers/Microsoft.Automation/automationAccounts/{AUTOMATION_ACCOUNT}/jobs/{job_id}?api-version={API_VERSION}"
    )
}

// ── Orchestration ──────────────────────────────────────────────────────

/// Starts a runbook job: authenticate, build the request, submit it.
///
/// The chain is strictly linear — the management API is never contacted
/// when authentication fails, and each run completes with exactly one
/// outcome: the 201 response body unchanged, or the first error.
///
/// Settings validation is step zero: `settings` can only be constructed
/// through the validator, so it has already passed by the time this
/// function can be called.
pub async fn start_job(
    authenticator: &Authenticator,
    client: &ArmClient,
    settings: &Settings,
    query: &Query,
) -> Result<serde_json::Value> {
    let access_token = authenticator.authenticate().await?;

    let job_id = Uuid::new_v4();
    let request = build_job_request(query, &settings.client_id)?;
    let path = job_path(job_id);

    match client
        .put_job(
            &access_token,
            &settings.subscription_id,
            RESOURCE_GROUP,
            &path,
            &request,
        )
        .await
    {
        Ok(body) => {
            tracing::info!(job_id = %job_id, "Runbook job started");
            Ok(body)
        }
        Err(e) => {
            tracing::error!(error = %e, "Error starting Runbook");
            Err(e)
        }
    }
}
