//! Configuration file support for sds-client.
//!
//! Provides YAML-based configuration through `sds-client.config.yml` files,
//! including data structures, file loading, and validation. Command-line
//! flags always win over values from the file.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::adapters::outbound::network::ClientSettings;
use crate::application::dto::OutputFormat;
use crate::shared::error::SdsError;
use crate::shared::security::{validate_file_size, validate_regular_file, MAX_CONFIG_FILE_SIZE};
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "sds-client.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
    pub upload_timeout_secs: Option<u64>,
    pub poll_interval_ms: Option<u64>,
    pub max_upload_bytes: Option<u64>,
    pub format: Option<OutputFormat>,
    pub language_code: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let size = validate_regular_file(path, "config file").with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;
    validate_file_size(size, path, MAX_CONFIG_FILE_SIZE)?;

    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);
    tracing::debug!(path = %path.display(), "config file loaded");

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

fn invalid(message: impl Into<String>) -> anyhow::Error {
    SdsError::InvalidConfig {
        message: message.into(),
    }
    .into()
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(base_url) = &config.base_url {
        ClientSettings::parse_base_url(base_url)?;
    }

    let positive = [
        ("timeout_secs", config.timeout_secs),
        ("upload_timeout_secs", config.upload_timeout_secs),
        ("poll_interval_ms", config.poll_interval_ms),
        ("max_upload_bytes", config.max_upload_bytes),
    ];
    for (field, value) in positive {
        if value == Some(0) {
            return Err(invalid(format!(
                "{} must be greater than 0.\n\n💡 Hint: Remove the field to use the default.",
                field
            )));
        }
    }

    if let Some(language) = &config.language_code {
        if language.trim().is_empty() {
            return Err(invalid(
                "language_code must not be empty.\n\n💡 Hint: Use a language code such as \"en\".",
            ));
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        tracing::warn!("Unknown config field '{}' will be ignored.", key);
    }
}
