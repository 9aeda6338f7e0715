//! Error types for PIN entry.
//!
//! Two very different kinds of failure share one enum: rejected input that the
//! controller absorbs without telling the user, and contract breaches that
//! must never happen given the controller's transition guards. Construction
//! errors for [`crate::Digit`], [`crate::PinCode`] and [`crate::KeypadOrder`]
//! live here too.

use thiserror::Error;

/// Why a state mutation was refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Digit appended while all PIN positions are filled.
    #[error("PIN is already full")]
    PinFull,

    /// Backspace pressed with nothing entered.
    #[error("PIN is empty")]
    PinEmpty,
}

/// Errors raised by PIN entry state and value types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PinError {
    /// Input that does not fit the current state. Absorbed silently.
    #[error("input rejected: {0}")]
    InputRejected(RejectReason),

    /// Attempt counter decremented at zero.
    #[error("attempts exhausted: cannot decrement with zero attempts remaining")]
    AttemptsExhausted,

    /// Numeric digit outside `0..=9`.
    #[error("invalid digit: {0} is not in 0..=9")]
    InvalidDigit(u8),

    /// Character that is not an ASCII decimal digit.
    #[error("invalid digit character: {0:?}")]
    NotADigit(char),

    /// PIN built from the wrong number of digits.
    #[error("invalid PIN length: expected {expected}, got {actual}")]
    InvalidPinLength {
        /// Required number of digits
        expected: usize,
        /// Number of digits supplied
        actual: usize,
    },

    /// Keypad order that is not a permutation of the ten digits.
    #[error("invalid keypad order: {reason}")]
    InvalidKeypadOrder {
        /// What is wrong with the supplied order
        reason: &'static str,
    },
}

impl PinError {
    /// Returns true if this error is a broken caller contract.
    ///
    /// Fatal errors indicate a bug in the state machine driving the state,
    /// never a user mistake. Input rejections are the opposite: expected,
    /// silently absorbed, and safe to ignore.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::AttemptsExhausted)
    }

    /// Returns true if the controller absorbs this error without feedback.
    pub fn is_absorbed(&self) -> bool {
        matches!(self, Self::InputRejected(_))
    }
}
