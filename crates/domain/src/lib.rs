//! # YoLink Domain
//!
//! Wire and domain types for the YoSmart/YoLink Open API V2.
//!
//! This crate contains:
//! - The RPC envelope and result shapes shared by every remote call
//! - Home and device payload types returned by domain operations
//! - Endpoint configuration and protocol constants
//! - Domain error types and Result definitions
//!
//! ## Architecture
//! - No dependencies on other YoLink crates
//! - Only external dependencies allowed
//! - Pure data structures, no I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
