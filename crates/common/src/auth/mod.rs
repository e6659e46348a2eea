//! Authentication for the YoLink cloud API
//!
//! - [`types`]: client credentials and token state
//! - [`client`]: HTTP client for the token endpoint
//! - [`token_manager`]: lazy token lifecycle (authenticate, refresh, validate)
//! - [`traits`]: seam between the manager and the token endpoint
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use yolink_common::auth::{Credentials, TokenClient, TokenManager};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let grants = TokenClient::new("https://api.yosmart.com/open/yolink/token")?;
//! let manager = TokenManager::new(Credentials::new("ua_id", "sec_key"), Arc::new(grants));
//!
//! if let Some(token) = manager.valid_access_token().await {
//!     println!("bearer token has {} chars", token.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod token_manager;
pub mod traits;
pub mod types;

pub use client::{TokenClient, TokenClientError, TOKEN_REQUEST_TIMEOUT};
pub use token_manager::{TokenManager, DEFAULT_REFRESH_MARGIN};
pub use traits::TokenGrantClient;
pub use types::{Credentials, TokenResponse, TokenSet, DEFAULT_EXPIRES_IN_SECS};
