//! YoLink Open API access
//!
//! - [`dispatcher`]: authorized envelope dispatch, one POST per call
//! - [`client`]: [`YoLinkClient`] facade and builder
//! - `home` / `production`: domain operations on [`YoLinkClient`]
//! - [`errors`]: [`ApiFailure`] and retry classification
//! - [`auth`]: access token seam

pub mod auth;
pub mod client;
pub mod dispatcher;
pub mod errors;
mod home;
mod production;

pub use auth::{AccessTokenProvider, TOKEN_UNAVAILABLE};
pub use client::{YoLinkClient, YoLinkClientBuilder};
pub use dispatcher::{ApiDispatcher, Endpoint};
pub use errors::{ApiFailure, FailureCategory};
