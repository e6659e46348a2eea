//! Endpoint configuration

use serde::{Deserialize, Serialize};

use crate::constants::{API_URL, PRODUCTION_URL, TOKEN_URL};

/// Remote endpoints the client talks to
///
/// Defaults point at the public YoSmart service. Every field can be
/// overridden (tests point them at a local mock server).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// OAuth token endpoint (client-credentials and refresh grants)
    pub token_url: String,
    /// Home/device RPC endpoint
    pub api_url: String,
    /// Device-provisioning RPC endpoint
    pub production_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            token_url: TOKEN_URL.to_string(),
            api_url: API_URL.to_string(),
            production_url: PRODUCTION_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Point all three endpoints at one base URL.
    ///
    /// Produces `{base}/token`, `{base}/api` and `{base}/production`.
    #[must_use]
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            token_url: format!("{base}/token"),
            api_url: format!("{base}/api"),
            production_url: format!("{base}/production"),
        }
    }
}
