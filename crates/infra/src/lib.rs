//! # YoLink Infrastructure
//!
//! HTTP-facing side of the YoLink client.
//!
//! This crate contains:
//! - Configuration loading (explicit arguments, environment, files)
//! - The bounded-timeout HTTP client
//! - The request dispatcher, domain operations and [`YoLinkClient`] facade
//! - Tracing subscriber bootstrap
//!
//! ## Architecture
//! - Token lifecycle lives in `yolink-common`
//! - Wire and payload types live in `yolink-domain`
//! - Contains all network I/O

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod logging;

// Re-export commonly used items
pub use api::{ApiDispatcher, ApiFailure, Endpoint, FailureCategory, YoLinkClient};
pub use config::ClientConfig;
pub use errors::InfraError;
pub use http::HttpClient;
pub use logging::{init_tracing, LogFormat};
