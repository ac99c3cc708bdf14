//! Required-settings model and validation.
//!
//! The task needs exactly five settings before it can do any work. They are
//! checked up front, all at once, so a misconfigured deployment reports
//! every missing key in a single failure instead of one per run. Validation
//! is purely local — no network service is contacted.

use std::collections::HashMap;

use crate::error::{Error, Result};

/// The settings that must be present, in reporting order.
pub const REQUIRED_SETTINGS: [&str; 5] = [
    "AD_CLIENT_ID",
    "AD_SERVICE_PRINCIPAL_PASSWORD",
    "AD_TENANT_ID",
    "AZURE_SUBSCRIPTION_ID",
    "RUNBOOK_NAME",
];

/// Validated configuration for one invocation.
///
/// A `Settings` value can only be obtained through [`Settings::from_map`]
/// or [`Settings::from_env`], so holding one proves that all five required
/// keys were present and non-empty. Immutable for the duration of a run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Azure AD application (client) ID of the service principal.
    pub client_id: String,
    /// Client secret of the service principal.
    pub service_principal_password: String,
    /// Azure AD tenant (directory) ID.
    pub tenant_id: String,
    /// Azure subscription that owns the automation account.
    pub subscription_id: String,
    /// Name of the runbook registered in the automation account.
    pub runbook_name: String,
}

impl Settings {
    /// Validates the given settings map and extracts the required values.
    ///
    /// A key counts as missing when it is absent or maps to an empty
    /// string. On failure, [`Error::MissingSettings`] lists every missing
    /// key in [`REQUIRED_SETTINGS`] order.
    pub fn from_map(settings: &HashMap<String, String>) -> Result<Self> {
        let missing: Vec<String> = REQUIRED_SETTINGS
            .iter()
            .filter(|key| settings.get(**key).is_none_or(|v| v.is_empty()))
            .map(|key| key.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(Error::MissingSettings { missing });
        }

        Ok(Settings {
            client_id: settings["AD_CLIENT_ID"].clone(),
            service_principal_password: settings["AD_SERVICE_PRINCIPAL_PASSWORD"].clone(),
            tenant_id: settings["AD_TENANT_ID"].clone(),
            subscription_id: settings["AZURE_SUBSCRIPTION_ID"].clone(),
            runbook_name: settings["RUNBOOK_NAME"].clone(),
        })
    }

    /// Collects the required keys from process environment variables and
    /// validates them via [`Settings::from_map`].
    ///
    /// Unset variables are simply left out of the map, so they are reported
    /// by the same missing-key path as an empty value.
    pub fn from_env() -> Result<Self> {
        let map: HashMap<String, String> = REQUIRED_SETTINGS
            .iter()
            .filter_map(|key| std::env::var(key).ok().map(|v| (key.to_string(), v)))
            .collect();
        Self::from_map(&map)
    }
}
