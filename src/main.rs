//! CLI entry point for runbook-start.
//!
//! Stands in for the serverless host: reads the five required settings from
//! environment variables, takes runbook parameters as `KEY=VALUE` arguments,
//! runs the job start chain once, and prints the management API's response.
//!
//! Exit codes:
//! - 0: job created (management API returned 201)
//! - 1: runtime error (missing settings, auth failure, API error, network)
//! - 2: argument validation error (clap handles this automatically)

use std::process::ExitCode;

use clap::Parser;

use runbook_start::auth::Authenticator;
use runbook_start::client::ArmClient;
use runbook_start::job::{start_job, Query};
use runbook_start::settings::Settings;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Runbook parameters as KEY=VALUE pairs, forwarded to the runbook as
    /// its job context. RUNBOOK_NAME selects the runbook to run.
    #[arg(value_parser = parse_key_val)]
    params: Vec<(String, String)>,
}

/// Splits a `KEY=VALUE` argument at the first `=`.
/// The value may itself contain `=` (e.g. base64 payloads).
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Cli::parse();

    // All five settings are checked at once so a misconfigured deployment
    // reports every missing key, not the first one clap happens to hit.
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let query: Query = args.params.into_iter().collect();

    let authenticator = Authenticator::new(
        &settings.tenant_id,
        &settings.client_id,
        &settings.service_principal_password,
    );
    let client = ArmClient::new();

    match start_job(&authenticator, &client, &settings, &query).await {
        Ok(body) => {
            println!("{body:#}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
