//! Controller input events.
//!
//! This module defines [`PinEvent`], the complete set of inputs that drive the
//! [`crate::PinEntryController`].
//!
//! Events originate from two sources:
//! - Keypad taps, already resolved to canonical digits by
//!   [`crate::KeypadOrder::resolve`].
//! - Runtime notifications: the verifier's answer and the end of a feedback
//!   sequence.

use serde::{Deserialize, Serialize};

use crate::Digit;

/// Events processed by the PIN entry controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PinEvent {
    /// Digit key tapped.
    Digit(Digit),

    /// Backspace key tapped.
    Backspace,

    /// Confirm key tapped.
    Confirm,

    /// Cancel key tapped, or the screen was navigated away from.
    Cancel,

    /// The verifier answered a pending confirmation.
    Verified(VerifyOutcome),

    /// The failed-attempt feedback sequence finished playing.
    FeedbackComplete,
}

/// Result of asking the verifier about a PIN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerifyOutcome {
    /// PIN is correct.
    Accepted,
    /// PIN is wrong. Consumes one attempt.
    Rejected,
    /// The PIN could not be checked (timeout, transport failure). Consumes
    /// no attempt.
    Unavailable,
}
