//! Operations for model-based testing.
//!
//! Operations represent everything that can happen to a PIN screen. They are
//! generated randomly by proptest (or by the fuzzer through [`Arbitrary`])
//! and applied to both the model and the real controller.

use arbitrary::Arbitrary;
use pinpad_core::VerifyOutcome;

/// Verifier answer in model terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub enum ModelVerdict {
    /// PIN correct.
    Accept,
    /// PIN wrong.
    Reject,
    /// Verifier could not decide.
    Unavailable,
}

impl From<ModelVerdict> for VerifyOutcome {
    fn from(verdict: ModelVerdict) -> Self {
        match verdict {
            ModelVerdict::Accept => Self::Accepted,
            ModelVerdict::Reject => Self::Rejected,
            ModelVerdict::Unavailable => Self::Unavailable,
        }
    }
}

/// Operations that can be applied to a PIN screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub enum Operation {
    /// Tap a digit key by screen position. Reduced modulo 10.
    Tap {
        /// Screen position.
        position: u8,
    },
    /// Tap backspace.
    Backspace,
    /// Tap confirm.
    Confirm,
    /// Tap cancel or navigate away.
    Cancel,
    /// The verifier answers.
    Verify(ModelVerdict),
    /// The failure feedback sequence finished playing.
    FeedbackComplete,
}

/// What applying an operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationResult {
    /// State changed.
    Applied,
    /// The operation was absorbed or dropped; state is unchanged.
    Ignored,
}
