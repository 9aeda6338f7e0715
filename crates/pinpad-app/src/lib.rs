//! Runtime layer for the PIN entry screen
//!
//! Connects the pure [`pinpad_core::PinEntryController`] to the outside
//! world: keypad input and rendering through a [`Driver`], PIN checks
//! through a [`Verifier`], and timed feedback playback through a
//! [`FeedbackSchedule`].
//!
//! # Components
//!
//! - [`Runtime`]: Generic orchestration loop for one PIN screen session
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Verifier`]: Trait for PIN verification backends
//! - [`SystemEnv`]: Production clock and entropy

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod driver;
mod observer;
mod runtime;
mod schedule;
mod system_env;
mod verifier;

pub use driver::Driver;
pub use observer::{ObserverId, ObserverList, SnapshotObserver};
pub use runtime::Runtime;
pub use schedule::FeedbackSchedule;
pub use system_env::SystemEnv;
pub use verifier::{StaticVerifier, Verifier};
