//! Model PIN screen.

use pinpad_core::{INITIAL_ATTEMPTS, PIN_LENGTH, Phase};

use super::operation::{ModelVerdict, Operation, OperationResult};

/// Observable state for oracle comparison.
///
/// This is the subset of session state that can be compared against the
/// real controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservableState {
    /// Entered digit values, in entry order.
    pub digits: Vec<u8>,
    /// Remaining attempts.
    pub attempts_remaining: u8,
    /// Failure alert active.
    pub alert: bool,
    /// Current phase.
    pub phase: Phase,
    /// Verifier-unavailable notice shown.
    pub notice: bool,
    /// Feedback sequences dispatched so far.
    pub feedback_dispatches: usize,
    /// Verification requests issued so far.
    pub verify_requests: usize,
}

/// Model PIN screen - the reference implementation.
#[derive(Debug, Clone)]
pub struct ModelSession {
    keypad: [u8; 10],
    digits: Vec<u8>,
    attempts: u8,
    alert: bool,
    verifying: bool,
    outcome: Option<Phase>,
    notice: bool,
    feedback_dispatches: usize,
    verify_requests: usize,
}

impl ModelSession {
    /// Fresh session on the given keypad (digit value per screen position).
    pub fn new(keypad: [u8; 10]) -> Self {
        Self {
            keypad,
            digits: Vec::new(),
            attempts: INITIAL_ATTEMPTS,
            alert: false,
            verifying: false,
            outcome: None,
            notice: false,
            feedback_dispatches: 0,
            verify_requests: 0,
        }
    }

    /// Apply an operation.
    pub fn apply(&mut self, op: Operation) -> OperationResult {
        if self.outcome.is_some() {
            return OperationResult::Ignored;
        }
        let busy = self.verifying || self.alert;

        match op {
            Operation::Cancel => {
                self.digits.clear();
                self.alert = false;
                self.verifying = false;
                self.outcome = Some(Phase::Cancelled);
                OperationResult::Applied
            },
            Operation::Tap { position } if !busy && self.digits.len() < PIN_LENGTH => {
                self.digits.push(self.keypad[usize::from(position % 10)]);
                self.notice = false;
                OperationResult::Applied
            },
            Operation::Backspace if !busy && !self.digits.is_empty() => {
                self.digits.pop();
                self.notice = false;
                OperationResult::Applied
            },
            Operation::Confirm if !busy && self.digits.len() == PIN_LENGTH => {
                self.verifying = true;
                self.notice = false;
                self.verify_requests += 1;
                OperationResult::Applied
            },
            Operation::Verify(verdict) if self.verifying => {
                self.verifying = false;
                self.on_verdict(verdict);
                OperationResult::Applied
            },
            Operation::FeedbackComplete if self.alert => {
                self.alert = false;
                OperationResult::Applied
            },
            Operation::Tap { .. }
            | Operation::Backspace
            | Operation::Confirm
            | Operation::Verify(_)
            | Operation::FeedbackComplete => OperationResult::Ignored,
        }
    }

    fn on_verdict(&mut self, verdict: ModelVerdict) {
        match verdict {
            ModelVerdict::Accept => {
                self.digits.clear();
                self.outcome = Some(Phase::Confirmed);
            },
            ModelVerdict::Reject => {
                self.attempts -= 1;
                self.digits.clear();
                if self.attempts == 0 {
                    self.outcome = Some(Phase::LockedOut);
                } else {
                    self.alert = true;
                    self.feedback_dispatches += 1;
                }
            },
            ModelVerdict::Unavailable => self.notice = true,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        if let Some(outcome) = self.outcome {
            return outcome;
        }
        if self.verifying {
            return Phase::Verifying;
        }
        match self.digits.len() {
            0 => Phase::Idle,
            PIN_LENGTH => Phase::Ready,
            _ => Phase::Entering,
        }
    }

    /// Extract observable state for comparison.
    pub fn observable_state(&self) -> ObservableState {
        ObservableState {
            digits: self.digits.clone(),
            attempts_remaining: self.attempts,
            alert: self.alert,
            phase: self.phase(),
            notice: self.notice,
            feedback_dispatches: self.feedback_dispatches,
            verify_requests: self.verify_requests,
        }
    }
}
