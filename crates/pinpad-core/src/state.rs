//! PIN entry session state.
//!
//! [`PinEntryState`] is the data model behind one presentation of the PIN
//! screen. It is exclusively owned by the [`crate::PinEntryController`] and
//! dropped when the screen exits. Its mutators enforce the data invariants on
//! their own; phase transitions are the controller's job.

use crate::{Digit, KeypadOrder, PIN_LENGTH, PinCode, PinError, RejectReason};

/// Attempts granted to a fresh session.
pub const INITIAL_ATTEMPTS: u8 = 3;

/// State of one PIN entry session.
///
/// # Invariants
///
/// - `entered.len() <= PIN_LENGTH`
/// - `attempts_remaining` never increases and never underflows
/// - `keypad` never changes after construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinEntryState {
    entered: Vec<Digit>,
    attempts_remaining: u8,
    lockout_signal_active: bool,
    keypad: KeypadOrder,
}

impl PinEntryState {
    /// Fresh session with [`INITIAL_ATTEMPTS`] attempts.
    pub fn new(keypad: KeypadOrder) -> Self {
        Self::with_attempts(keypad, INITIAL_ATTEMPTS)
    }

    /// Session starting with a specific attempt budget.
    pub fn with_attempts(keypad: KeypadOrder, attempts_remaining: u8) -> Self {
        Self {
            entered: Vec::with_capacity(PIN_LENGTH),
            attempts_remaining,
            lockout_signal_active: false,
            keypad,
        }
    }

    /// Append a digit.
    pub fn append_digit(&mut self, digit: Digit) -> Result<(), PinError> {
        if self.is_full() {
            return Err(PinError::InputRejected(RejectReason::PinFull));
        }
        self.entered.push(digit);
        Ok(())
    }

    /// Remove and return the last digit.
    pub fn remove_last_digit(&mut self) -> Result<Digit, PinError> {
        self.entered.pop().ok_or(PinError::InputRejected(RejectReason::PinEmpty))
    }

    /// Clear entered digits. Leaves the attempt counter alone.
    pub fn reset(&mut self) {
        self.entered.clear();
    }

    /// Consume one attempt, returning how many remain.
    ///
    /// Callers must check for exhaustion first; reaching this at zero is a
    /// contract breach.
    pub fn decrement_attempts(&mut self) -> Result<u8, PinError> {
        self.attempts_remaining =
            self.attempts_remaining.checked_sub(1).ok_or(PinError::AttemptsExhausted)?;
        Ok(self.attempts_remaining)
    }

    /// Raise or clear the failed-attempt feedback flag.
    pub fn set_lockout_signal(&mut self, active: bool) {
        self.lockout_signal_active = active;
    }

    /// Entered digits in order.
    pub fn entered_digits(&self) -> &[Digit] {
        &self.entered
    }

    /// Number of entered digits.
    pub fn entered_len(&self) -> usize {
        self.entered.len()
    }

    /// All PIN positions are filled.
    pub fn is_full(&self) -> bool {
        self.entered.len() >= PIN_LENGTH
    }

    /// Nothing entered.
    pub fn is_empty(&self) -> bool {
        self.entered.is_empty()
    }

    /// Remaining verification attempts.
    pub fn attempts_remaining(&self) -> u8 {
        self.attempts_remaining
    }

    /// Failed-attempt feedback window is open.
    pub fn lockout_signal_active(&self) -> bool {
        self.lockout_signal_active
    }

    /// The session's keypad permutation.
    pub fn keypad_order(&self) -> &KeypadOrder {
        &self.keypad
    }

    /// The entered PIN, once complete.
    pub fn pin(&self) -> Option<PinCode> {
        PinCode::from_digits(&self.entered).ok()
    }
}
