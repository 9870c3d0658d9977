//! Application configuration: an optional `chemstock.toml` overlaid with
//! environment variables.
//!
//! ```toml
//! server_url = "https://api.chemstock.example/"
//! store_url = "sqlite://chemstock.sqlite?mode=rwc"
//! page_limit = 25
//! request_timeout_secs = 30
//! ```
//!
//! Environment wins over the file: `CHEMSTOCK_SERVER_URL` (or the older
//! `NEXT_PUBLIC_SERVER_URL`), `CHEMSTOCK_STORE_URL`, `CHEMSTOCK_PAGE_LIMIT`.

use crate::errors::{Error, Result};
use crate::models::DEFAULT_LIMIT;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Name the persisted store is saved under.
pub const STORE_NAME: &str = "chemstock-storage";

const DEFAULT_CONFIG_PATH: &str = "chemstock.toml";
const DEFAULT_STORE_URL: &str = "sqlite://chemstock.sqlite?mode=rwc";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Contents of `chemstock.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Backend base URL
    pub server_url: Option<String>,
    /// SeaORM connection string of the persisted store
    pub store_url: Option<String>,
    /// Rows per page for list commands
    pub page_limit: Option<u32>,
    /// HTTP timeout in seconds
    pub request_timeout_secs: Option<u64>,
}

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend base URL, always ending with `/`
    pub server_url: String,
    /// SeaORM connection string of the persisted store
    pub store_url: String,
    /// Name the session is stored under
    pub store_name: String,
    /// Rows per page for list commands
    pub page_limit: u32,
    /// HTTP timeout in seconds
    pub request_timeout_secs: u64,
}

impl AppConfig {
    /// HTTP timeout as a [`Duration`].
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Loads a TOML configuration file.
///
/// # Errors
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<FileConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path.as_ref().display()),
    })
}

/// Loads the configuration from `CHEMSTOCK_CONFIG` (default `chemstock.toml`,
/// skipped when absent) and the process environment.
///
/// # Errors
/// Returns an error if the file is malformed or no server URL is configured.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = std::env::var("CHEMSTOCK_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let file = if Path::new(&path).exists() {
        debug!(%path, "reading configuration file");
        load_config(&path)?
    } else {
        debug!(%path, "no configuration file, using environment only");
        FileConfig::default()
    };

    let config = resolve(file, |key| std::env::var(key).ok())?;
    info!(server = %config.server_url, store = %config.store_url, "configuration loaded");
    Ok(config)
}

/// Overlays environment values from `lookup` on top of `file`.
///
/// # Errors
/// Returns an error if no server URL is set or `CHEMSTOCK_PAGE_LIMIT` is not a number.
pub fn resolve(file: FileConfig, lookup: impl Fn(&str) -> Option<String>) -> Result<AppConfig> {
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let server_url = non_empty("CHEMSTOCK_SERVER_URL")
        .or_else(|| non_empty("NEXT_PUBLIC_SERVER_URL"))
        .or(file.server_url)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| Error::Config {
            message: "Server URL is not defined".to_string(),
        })?;

    let page_limit = match non_empty("CHEMSTOCK_PAGE_LIMIT") {
        Some(raw) => raw.trim().parse::<u32>().map_err(|e| Error::Config {
            message: format!("CHEMSTOCK_PAGE_LIMIT must be a number: {e}"),
        })?,
        None => file.page_limit.unwrap_or(DEFAULT_LIMIT),
    };

    Ok(AppConfig {
        server_url: with_trailing_slash(server_url.trim()),
        store_url: non_empty("CHEMSTOCK_STORE_URL")
            .or(file.store_url)
            .unwrap_or_else(|| DEFAULT_STORE_URL.to_string()),
        store_name: STORE_NAME.to_string(),
        page_limit: page_limit.max(1),
        request_timeout_secs: file.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
    })
}

fn with_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    }
}
