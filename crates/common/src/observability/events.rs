//! Events reported by the client core

use chrono::{DateTime, Utc};

/// Something the token manager, dispatcher or a domain operation wants
/// reported
///
/// Events never carry the client secret or token values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// Client-credentials grant succeeded
    Authenticated { expires_at: DateTime<Utc> },

    /// Client-credentials grant failed (rejection, transport or parse error)
    AuthenticationFailed { reason: String },

    /// Held token is inside the renewal margin
    RenewalTriggered { expires_at: DateTime<Utc> },

    /// Renewal requested but no refresh token is held
    RefreshUnavailable,

    /// Refresh grant succeeded
    Refreshed { expires_at: DateTime<Utc> },

    /// Refresh grant failed
    RefreshFailed { reason: String },

    /// A dispatched call ended without a remote application answer
    /// (no token, transport failure, non-200 status, unreadable body)
    CallFailed { method: String, code: String, desc: String },

    /// A domain operation received a failure result
    OperationFailed { operation: &'static str, code: String, desc: String },

    /// Home id captured from `Home.getGeneralInfo`
    HomeResolved { home_id: String },

    /// Device list captured from `Home.getDeviceList`
    DevicesListed { count: usize },
}

impl ClientEvent {
    /// Stable label for log fields and test assertions
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Authenticated { .. } => "authenticated",
            Self::AuthenticationFailed { .. } => "authentication_failed",
            Self::RenewalTriggered { .. } => "renewal_triggered",
            Self::RefreshUnavailable => "refresh_unavailable",
            Self::Refreshed { .. } => "refreshed",
            Self::RefreshFailed { .. } => "refresh_failed",
            Self::CallFailed { .. } => "call_failed",
            Self::OperationFailed { .. } => "operation_failed",
            Self::HomeResolved { .. } => "home_resolved",
            Self::DevicesListed { .. } => "devices_listed",
        }
    }

    /// Whether the event describes a failure
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationFailed { .. }
                | Self::RefreshFailed { .. }
                | Self::CallFailed { .. }
                | Self::OperationFailed { .. }
        )
    }
}
