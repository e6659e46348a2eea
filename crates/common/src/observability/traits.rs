//! Observer seam for client events

use std::fmt::Debug;
use std::sync::Arc;

use tracing::{error, info, warn};

use super::events::ClientEvent;

/// Sink for [`ClientEvent`]s
///
/// Implementations must be cheap and must not block: the token manager calls
/// them while holding the token-state lock.
pub trait ClientObserver: Send + Sync + Debug {
    /// Record an event
    fn on_event(&self, event: &ClientEvent);
}

impl<T: ClientObserver + ?Sized> ClientObserver for Arc<T> {
    fn on_event(&self, event: &ClientEvent) {
        (**self).on_event(event);
    }
}

/// Default observer: forwards events to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ClientObserver for TracingObserver {
    fn on_event(&self, event: &ClientEvent) {
        let label = event.label();
        match event {
            ClientEvent::Authenticated { expires_at } => {
                info!(event = label, %expires_at, "authentication successful");
            }
            ClientEvent::AuthenticationFailed { reason } => {
                error!(event = label, reason = %reason, "authentication failed");
            }
            ClientEvent::RenewalTriggered { expires_at } => {
                info!(event = label, %expires_at, "token expiring soon, renewing");
            }
            ClientEvent::RefreshUnavailable => {
                warn!(event = label, "no refresh token available, re-authenticating");
            }
            ClientEvent::Refreshed { expires_at } => {
                info!(event = label, %expires_at, "token refreshed");
            }
            ClientEvent::RefreshFailed { reason } => {
                error!(event = label, reason = %reason, "token refresh failed");
            }
            ClientEvent::CallFailed { method, code, desc } => {
                error!(event = label, method = %method, code = %code, desc = %desc, "api call failed");
            }
            ClientEvent::OperationFailed { operation, code, desc } => {
                error!(event = label, operation, code = %code, desc = %desc, "operation failed");
            }
            ClientEvent::HomeResolved { home_id } => {
                info!(event = label, home_id = %home_id, "home resolved");
            }
            ClientEvent::DevicesListed { count } => {
                info!(event = label, count, "devices listed");
            }
        }
    }
}

/// Observer that drops every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl ClientObserver for NoOpObserver {
    fn on_event(&self, _event: &ClientEvent) {}
}
