//! Configuration loading and management
//!
//! This module provides utilities for resolving client credentials and
//! endpoint settings from explicit arguments, environment variables and
//! files.

pub mod loader;
pub mod settings;

// Re-export commonly used items
pub use loader::{credentials_from_env_or, load, load_from_file};
pub use settings::ClientConfig;
