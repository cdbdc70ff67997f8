/// `load_config` module: Loads and merges the storage settings (an optional
/// `config.json` in the working directory plus environment overrides) into
/// the internal [`Settings`] struct.
///
/// This module is the only place where untrusted configuration is parsed;
/// the resulting struct is constructed once at startup and passed by
/// reference into every operation. Core logic never reads ambient state.
///
/// # Responsibilities
/// - Parse the optional `config.json` (`AccountName`, `AccountKey`,
///   `Directory`, `Endpoint` keys) into typed fields
/// - Apply environment overrides: `ACCOUNT_NAME`, `ACCOUNT_KEY`,
///   `DIRECTORY`, `BLOB_ENDPOINT` (environment wins over file)
/// - Default every missing value to empty, as the original deployment did;
///   credential validation happens later, in the store client
///
/// # Errors
/// A present-but-malformed `config.json` is an error (anyhow, surfaced at
/// the CLI boundary); an absent file is not.
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;
use tracing::{error, info};

/// Storage account settings for one invocation.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub account_name: String,
    pub account_key: String,
    /// Local directory scanned for uploadable drops.
    pub directory: PathBuf,
    /// Explicit blob endpoint, e.g. for an emulator. Defaults to the
    /// public endpoint derived from the account name.
    pub endpoint: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    #[serde(rename = "AccountName")]
    account_name: Option<String>,
    #[serde(rename = "AccountKey")]
    account_key: Option<String>,
    #[serde(rename = "Directory")]
    directory: Option<PathBuf>,
    #[serde(rename = "Endpoint")]
    endpoint: Option<String>,
}

/// Loads settings from `base_path/config.json` (optional) and the
/// environment. Environment variables override file values.
pub fn load(base_path: &Path) -> Result<Settings> {
    let config_path = base_path.join("config.json");
    let mut settings = Settings::default();

    if config_path.is_file() {
        let content = fs::read_to_string(&config_path).map_err(|e| {
            error!(error = ?e, config_path = ?config_path, "Failed to read config file");
            anyhow::anyhow!("Failed to read config file {:?}: {}", config_path, e)
        })?;
        let raw: RawSettings = serde_json::from_str(&content).map_err(|e| {
            error!(error = ?e, config_path = ?config_path, "Failed to parse config JSON");
            anyhow::anyhow!("Failed to parse config JSON: {e}")
        })?;
        info!(config_path = ?config_path, "Parsed config file successfully");
        settings.account_name = raw.account_name.unwrap_or_default();
        settings.account_key = raw.account_key.unwrap_or_default();
        settings.directory = raw.directory.unwrap_or_default();
        settings.endpoint = raw.endpoint;
    } else {
        info!(config_path = ?config_path, "No config file present, using environment only");
    }

    if let Ok(name) = env::var("ACCOUNT_NAME") {
        settings.account_name = name;
    }
    if let Ok(key) = env::var("ACCOUNT_KEY") {
        settings.account_key = key;
    }
    if let Ok(dir) = env::var("DIRECTORY") {
        settings.directory = PathBuf::from(dir);
    }
    if let Ok(endpoint) = env::var("BLOB_ENDPOINT") {
        settings.endpoint = Some(endpoint);
    }

    info!(
        account_name_set = !settings.account_name.is_empty(),
        directory = %settings.directory.display(),
        "Settings loaded"
    );
    Ok(settings)
}
