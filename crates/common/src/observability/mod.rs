//! Observability primitives
//!
//! The token manager and dispatcher hold no global logging state. They report
//! what happens to an injected [`ClientObserver`]:
//! - [`events`]: the [`ClientEvent`] vocabulary
//! - [`traits`]: the observer seam plus [`TracingObserver`] (default) and
//!   [`NoOpObserver`]

pub mod events;
pub mod traits;

pub use events::ClientEvent;
pub use traits::{ClientObserver, NoOpObserver, TracingObserver};
