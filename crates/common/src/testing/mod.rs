//! Testing utilities and helpers
//!
//! - **[`mocks`]**: scripted token endpoint and a recording observer
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use yolink_common::testing::{MockTokenClient, RecordingObserver};
//! use yolink_common::{Credentials, TokenManager};
//!
//! let grants = Arc::new(MockTokenClient::new());
//! grants.push_credentials_ok("tok1", None, Some(3600));
//!
//! let observer = Arc::new(RecordingObserver::new());
//! let manager = TokenManager::new(Credentials::new("ua", "sec"), grants.clone())
//!     .with_observer(observer.clone());
//! # let _ = manager;
//! ```

pub mod mocks;

pub use mocks::{MockTokenClient, RecordingObserver};
pub use crate::time::{Clock, MockClock, SystemClock};
