//! Toolkit settings and configuration loading.
//!
//! Settings are read from an optional `Formworks.toml` file and then
//! overridden by environment variables, so deployments can tune logging
//! without editing files:
//!
//! - `FORMWORKS_DEBUG`: "true"/"1" enables debug mode
//! - `FORMWORKS_LOG_LEVEL`: a tracing filter directive (e.g. "debug",
//!   "formworks_designer=trace")

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FormworksError, FormworksResult};

/// Runtime settings for the toolkit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Whether debug mode is enabled. Debug mode switches logging to a
    /// pretty human-readable format.
    pub debug: bool,
    /// The log filter directive passed to the tracing subscriber.
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Parses settings from a TOML string.
    pub fn from_toml_str(raw: &str) -> FormworksResult<Self> {
        toml::from_str(raw)
            .map_err(|e| FormworksError::ImproperlyConfigured(format!("invalid settings: {e}")))
    }

    /// Loads settings from a TOML file, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: impl AsRef<Path>) -> FormworksResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|e| {
            FormworksError::ImproperlyConfigured(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&raw)
    }

    /// Applies environment-variable overrides on top of these settings.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(debug) = std::env::var("FORMWORKS_DEBUG") {
            self.debug = matches!(debug.to_lowercase().as_str(), "true" | "1" | "yes");
        }
        if let Ok(level) = std::env::var("FORMWORKS_LOG_LEVEL") {
            if !level.is_empty() {
                self.log_level = level;
            }
        }
        self
    }
}
