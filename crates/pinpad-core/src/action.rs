//! Controller side effects.
//!
//! This module defines [`PinAction`], the instructions produced by the
//! [`crate::PinEntryController`] for the runtime to execute.

use serde::{Deserialize, Serialize};

use crate::{FeedbackSequence, PinCode};

/// Actions produced by the PIN entry controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinAction {
    /// Push a fresh [`crate::RenderSnapshot`] to the rendering surface.
    Render,

    /// Ask the verifier whether this PIN is correct.
    Verify {
        /// The four entered digits.
        pin: PinCode,
    },

    /// Play the failed-attempt feedback sequence.
    Feedback(FeedbackSequence),

    /// Stop any in-flight feedback and return actuators to rest.
    StopFeedback,

    /// Play an audio cue. Fire-and-forget.
    PlayTone(Tone),

    /// The session reached a terminal phase.
    Finished(SessionOutcome),
}

/// Audio cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tone {
    /// Accepted keypad tap.
    KeyPress,
    /// PIN confirmed by the verifier.
    Confirmed,
    /// Final attempt rejected; the session is locked out.
    Rejected,
}

/// How a PIN entry session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionOutcome {
    /// The verifier accepted the PIN.
    Confirmed,
    /// The user cancelled or navigated away.
    Cancelled,
    /// The last attempt was rejected.
    LockedOut,
}
