//! Configuration loader
//!
//! Resolves client configuration from explicit arguments, environment
//! variables and files.
//!
//! ## Precedence (per credential value)
//! 1. Explicit argument
//! 2. Environment variable
//! 3. Config file value (only for [`load_from_file`])
//!
//! Empty or whitespace-only values count as missing at every level.
//!
//! ## Environment Variables
//! - `YOSMART_UAID`: User Access ID
//! - `YOSMART_SECRET`: Secret key
//!
//! Missing credentials are reported as `YoLinkError::Config` before any
//! network activity.

use std::path::Path;

use yolink_common::auth::Credentials;
use yolink_domain::constants::{ENV_SECRET, ENV_UAID};
use yolink_domain::{Result, YoLinkError};

use super::settings::ClientConfig;
use crate::errors::InfraError;

/// Resolve credentials from explicit values, falling back to environment
/// variables
///
/// # Errors
/// Returns `YoLinkError::Config` if either value is missing everywhere.
pub fn credentials_from_env_or(
    uaid: Option<&str>,
    secret_key: Option<&str>,
) -> Result<Credentials> {
    load(uaid, secret_key)?.credentials()
}

/// Load configuration with default endpoints
///
/// Explicit arguments override `YOSMART_UAID` / `YOSMART_SECRET`.
///
/// # Errors
/// Returns `YoLinkError::Config` if the credentials cannot be resolved.
pub fn load(uaid: Option<&str>, secret_key: Option<&str>) -> Result<ClientConfig> {
    resolve(ClientConfig::default(), uaid, secret_key, env_lookup)
}

/// Load configuration from a file
///
/// Supports JSON and TOML formats (detected by file extension). Explicit
/// arguments and environment variables override the file's credentials.
///
/// # Errors
/// Returns `YoLinkError::Config` if:
/// - File not found or unreadable
/// - File format is invalid
/// - Credentials are missing after applying overrides
/// - `request_timeout_secs` is zero
pub fn load_from_file(
    path: &Path,
    uaid: Option<&str>,
    secret_key: Option<&str>,
) -> Result<ClientConfig> {
    if !path.exists() {
        return Err(YoLinkError::Config(format!("Config file not found: {}", path.display())));
    }

    tracing::info!(path = %path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(path).map_err(InfraError::from)?;
    let config = parse_config(&contents, path)?;

    resolve(config, uaid, secret_key, env_lookup)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents).map_err(|e| InfraError::from(e).into()),
        "json" => serde_json::from_str(contents).map_err(|e| InfraError::from(e).into()),
        _ => Err(YoLinkError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Apply explicit > env > base precedence to the credentials and validate.
fn resolve<F>(
    base: ClientConfig,
    uaid: Option<&str>,
    secret_key: Option<&str>,
    env: F,
) -> Result<ClientConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let resolved_uaid = pick(uaid, env(ENV_UAID), base.uaid.as_deref());
    let resolved_secret = pick(secret_key, env(ENV_SECRET), base.secret_key());

    let mut config = base;
    config.uaid = resolved_uaid;
    config.set_secret_key(resolved_secret);

    // Fails with the precise missing-value message
    config.validate()?;

    tracing::debug!(uaid = ?config.uaid, "Configuration resolved");
    Ok(config)
}

fn pick(explicit: Option<&str>, env: Option<String>, base: Option<&str>) -> Option<String> {
    non_empty(explicit)
        .map(str::to_string)
        .or_else(|| env.filter(|v| !v.trim().is_empty()))
        .or_else(|| non_empty(base).map(str::to_string))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
