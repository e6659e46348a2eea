//! Domain types and models
//!
//! - [`rpc`]: the envelope/result pair wrapping every remote call
//! - [`home`]: home and device payloads
//! - [`status`]: read-only client status snapshot

pub mod home;
pub mod rpc;
pub mod status;

pub use home::{Device, HomeInfo, TargetDevice};
pub use rpc::{ApiResult, RequestEnvelope};
pub use status::ClientStatus;

use serde::{Deserialize, Deserializer};

/// Read an explicit `null` the same way as a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
