//! PIN entry core for payment terminals
//!
//! Pure state machine for a 4-digit PIN screen shown on a randomized keypad.
//! No I/O: the controller consumes [`PinEvent`] inputs and produces
//! [`PinAction`] instructions, so the same logic runs under a terminal front
//! end and in deterministic simulation.
//!
//! # Components
//!
//! - [`PinEntryState`]: entered digits, remaining attempts, lockout signal
//! - [`PinEntryController`]: phase transitions and validation rules
//! - [`FeedbackDispatcher`]: failed-attempt haptic and shake sequence
//! - [`KeypadOrder`]: per-session digit permutation
//! - [`Environment`]: time and randomness abstraction

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod config;
mod controller;
pub mod env;
mod error;
mod event;
pub mod feedback;
pub mod keypad;
mod pin;
mod prompt;
mod snapshot;
mod state;

pub use action::{PinAction, SessionOutcome, Tone};
pub use config::{PaymentContext, SessionConfig};
pub use controller::{Phase, PinEntryController};
pub use env::Environment;
pub use error::{PinError, RejectReason};
pub use event::{PinEvent, VerifyOutcome};
pub use feedback::{FeedbackCommand, FeedbackConfig, FeedbackDispatcher, FeedbackSequence};
pub use keypad::{KeypadKey, KeypadOrder};
pub use pin::{Digit, PIN_LENGTH, PinCode};
pub use prompt::{Prompt, PromptKind};
pub use snapshot::{Notice, RenderSnapshot};
pub use state::{INITIAL_ATTEMPTS, PinEntryState};
