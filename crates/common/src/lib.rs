//! Shared building blocks for the YoLink client crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `runtime`: time source and observer sink
//! - `platform`: credentials, token endpoint client, token lifecycle manager
//! - `test-utils`: mock token client and recording observer

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Runtime tier
// --------------------------------------------------------------------
#[cfg(feature = "runtime")]
pub mod observability;
#[cfg(feature = "runtime")]
pub mod time;

// Platform tier
// -------------------------------------------------------------------
#[cfg(feature = "platform")]
pub mod auth;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "platform")]
pub use auth::{Credentials, TokenClient, TokenClientError, TokenManager, TokenSet};
#[cfg(feature = "runtime")]
pub use observability::{ClientEvent, ClientObserver, TracingObserver};
#[cfg(feature = "runtime")]
pub use time::{Clock, MockClock, SystemClock};
