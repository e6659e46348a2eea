//! Time source abstraction
//!
//! Token expiry comparisons and envelope timestamps read the current time
//! through [`Clock`] so tests can control it with [`MockClock`].
//!
//! ```rust
//! use std::time::Duration;
//!
//! use yolink_common::time::{Clock, MockClock};
//!
//! let clock = MockClock::new();
//! let start = clock.now();
//! clock.advance(Duration::from_secs(90));
//! assert_eq!((clock.now() - start).num_seconds(), 90);
//! ```

pub mod clock;

pub use clock::{Clock, MockClock, SystemClock};
