//! Error types used throughout the client

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the YoLink client
///
/// Only construction and infrastructure setup surface this type. Dispatched
/// calls never fail with it; they fold every failure into an
/// [`ApiResult`](crate::ApiResult).
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum YoLinkError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),
}

/// Result type alias for YoLink operations
pub type Result<T> = std::result::Result<T, YoLinkError>;
