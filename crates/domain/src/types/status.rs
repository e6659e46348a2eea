//! Client status snapshot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Read-only view of the client's current state
///
/// Building one has no side effects: no token renewal, no network call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientStatus {
    /// An access token is currently held
    pub authenticated: bool,
    /// The held token has not yet reached its expiry instant
    pub token_valid: bool,
    pub token_expires_at: Option<DateTime<Utc>>,
    /// Home id captured by the last successful home-info lookup
    pub home_id: Option<String>,
    /// Device count captured by the last successful device listing
    pub device_count: usize,
}
