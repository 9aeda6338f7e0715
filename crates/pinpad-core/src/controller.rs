//! PIN entry state machine.
//!
//! This module defines [`PinEntryController`], which owns the
//! [`PinEntryState`] of one PIN screen presentation and applies the
//! validation rules to every input.
//!
//! This is a pure state machine: it consumes [`PinEvent`] inputs and produces
//! [`PinAction`] instructions. It never calls the verifier, never sleeps, and
//! never touches an actuator.
//!
//! # Phases
//!
//! ```text
//!  Idle ──digit──▶ Entering ──4th digit──▶ Ready ──confirm──▶ Verifying
//!   ▲                 │  ▲                   │                   │
//!   └──backspace to 0─┘  └─────backspace─────┘                   │
//!   ▲                                                            │
//!   └────────── rejected, attempts left (feedback) ──────────────┤
//!                                                                ├─▶ Confirmed
//!                                                                └─▶ LockedOut
//!  any non-terminal ──cancel──▶ Cancelled
//! ```
//!
//! # Serialization of input
//!
//! While a verification is pending or a feedback sequence is playing, digit,
//! backspace and confirm events are dropped, never queued. Cancel is always
//! honored.

use serde::{Deserialize, Serialize};

use crate::{
    Digit, FeedbackDispatcher, KeypadOrder, Notice, PIN_LENGTH, PinAction, PinEntryState,
    PinError, PinEvent, PromptKind, RenderSnapshot, SessionConfig, SessionOutcome, Tone,
    VerifyOutcome,
};

/// Controller phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No digits entered.
    Idle,
    /// Some, but not all, digits entered.
    Entering,
    /// All digits entered; confirm is enabled.
    Ready,
    /// Waiting for the verifier.
    Verifying,
    /// Verifier accepted the PIN.
    Confirmed,
    /// User cancelled.
    Cancelled,
    /// Last attempt rejected.
    LockedOut,
}

impl Phase {
    /// Terminal phases absorb every further event.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Confirmed | Self::Cancelled | Self::LockedOut)
    }

    /// Outcome for a terminal phase.
    pub fn outcome(self) -> Option<SessionOutcome> {
        match self {
            Self::Confirmed => Some(SessionOutcome::Confirmed),
            Self::Cancelled => Some(SessionOutcome::Cancelled),
            Self::LockedOut => Some(SessionOutcome::LockedOut),
            Self::Idle | Self::Entering | Self::Ready | Self::Verifying => None,
        }
    }

    fn for_length(len: usize) -> Self {
        match len {
            0 => Self::Idle,
            n if n >= PIN_LENGTH => Self::Ready,
            _ => Self::Entering,
        }
    }
}

/// PIN entry state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct PinEntryController {
    state: PinEntryState,
    phase: Phase,
    dispatcher: FeedbackDispatcher,
    config: SessionConfig,
    /// Transient notice. `None` if nothing to report.
    notice: Option<Notice>,
}

impl PinEntryController {
    /// Start a session on the given keypad permutation.
    pub fn new(keypad: KeypadOrder, config: SessionConfig) -> Self {
        Self::with_state(PinEntryState::new(keypad), config)
    }

    /// Start a session from existing state.
    ///
    /// Entered digits decide the starting phase.
    pub fn with_state(state: PinEntryState, config: SessionConfig) -> Self {
        let phase = Phase::for_length(state.entered_len());
        let dispatcher = FeedbackDispatcher::new(config.feedback);
        Self { state, phase, dispatcher, config, notice: None }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: PinEvent) -> Vec<PinAction> {
        if self.phase.is_terminal() {
            tracing::debug!(?event, phase = ?self.phase, "event after session end ignored");
            return vec![];
        }

        match event {
            PinEvent::Cancel => self.on_cancel(),
            PinEvent::Verified(outcome) => self.on_verified(outcome),
            PinEvent::FeedbackComplete => self.on_feedback_complete(),
            PinEvent::Digit(_) | PinEvent::Backspace | PinEvent::Confirm
                if self.input_blocked() =>
            {
                tracing::debug!(?event, phase = ?self.phase, "input ignored while busy");
                vec![]
            },
            PinEvent::Digit(digit) => self.on_digit(digit),
            PinEvent::Backspace => self.on_backspace(),
            PinEvent::Confirm => self.on_confirm(),
        }
    }

    fn on_digit(&mut self, digit: Digit) -> Vec<PinAction> {
        if let Err(e) = self.state.append_digit(digit) {
            return self.on_state_error(&e);
        }
        self.notice = None;
        self.phase = Phase::for_length(self.state.entered_len());
        vec![PinAction::PlayTone(Tone::KeyPress), PinAction::Render]
    }

    fn on_backspace(&mut self) -> Vec<PinAction> {
        if let Err(e) = self.state.remove_last_digit() {
            return self.on_state_error(&e);
        }
        self.notice = None;
        self.phase = Phase::for_length(self.state.entered_len());
        vec![PinAction::PlayTone(Tone::KeyPress), PinAction::Render]
    }

    fn on_confirm(&mut self) -> Vec<PinAction> {
        if self.phase != Phase::Ready {
            tracing::debug!(entered = self.state.entered_len(), "confirm before PIN complete");
            return vec![];
        }
        let Some(pin) = self.state.pin() else {
            return vec![];
        };

        self.notice = None;
        self.phase = Phase::Verifying;
        vec![PinAction::PlayTone(Tone::KeyPress), PinAction::Verify { pin }, PinAction::Render]
    }

    fn on_cancel(&mut self) -> Vec<PinAction> {
        let mut actions = Vec::with_capacity(3);
        if self.state.lockout_signal_active() {
            self.state.set_lockout_signal(false);
            actions.push(PinAction::StopFeedback);
        }

        self.state.reset();
        self.phase = Phase::Cancelled;
        tracing::info!(attempts_remaining = self.state.attempts_remaining(), "PIN entry cancelled");

        actions.push(PinAction::Render);
        actions.push(PinAction::Finished(SessionOutcome::Cancelled));
        actions
    }

    fn on_verified(&mut self, outcome: VerifyOutcome) -> Vec<PinAction> {
        if self.phase != Phase::Verifying {
            tracing::warn!(?outcome, phase = ?self.phase, "verifier answer with no request");
            return vec![];
        }

        match outcome {
            VerifyOutcome::Accepted => {
                self.state.reset();
                self.phase = Phase::Confirmed;
                tracing::info!("PIN accepted");
                vec![
                    PinAction::PlayTone(Tone::Confirmed),
                    PinAction::Render,
                    PinAction::Finished(SessionOutcome::Confirmed),
                ]
            },
            VerifyOutcome::Rejected => self.on_rejected(),
            VerifyOutcome::Unavailable => {
                tracing::warn!("verifier unavailable, keeping entered PIN");
                self.phase = Phase::Ready;
                self.notice = Some(Notice::VerifierUnavailable);
                vec![PinAction::Render]
            },
        }
    }

    fn on_rejected(&mut self) -> Vec<PinAction> {
        let remaining = match self.state.decrement_attempts() {
            Ok(remaining) => remaining,
            Err(e) => return self.on_state_error(&e),
        };
        self.state.reset();

        if remaining == 0 {
            self.phase = Phase::LockedOut;
            tracing::info!("PIN rejected on final attempt, locked out");
            return vec![
                PinAction::PlayTone(Tone::Rejected),
                PinAction::Render,
                PinAction::Finished(SessionOutcome::LockedOut),
            ];
        }

        self.phase = Phase::Idle;
        self.state.set_lockout_signal(true);
        tracing::info!(remaining, "PIN rejected");
        vec![PinAction::Feedback(self.dispatcher.failure_sequence()), PinAction::Render]
    }

    /// Absorbed input is dropped. A contract breach ends the session.
    fn on_state_error(&mut self, error: &PinError) -> Vec<PinAction> {
        if error.is_fatal() {
            return self.lock_out(error);
        }
        if error.is_absorbed() {
            tracing::debug!(%error, "input absorbed");
        } else {
            tracing::warn!(%error, "unexpected state error ignored");
        }
        vec![]
    }

    /// Contract breach: the counter was already zero. Stop rather than retry.
    fn lock_out(&mut self, error: &PinError) -> Vec<PinAction> {
        tracing::error!(%error, "attempt counter invariant violated");
        self.state.reset();
        self.state.set_lockout_signal(false);
        self.phase = Phase::LockedOut;
        vec![PinAction::Render, PinAction::Finished(SessionOutcome::LockedOut)]
    }

    fn on_feedback_complete(&mut self) -> Vec<PinAction> {
        if !self.state.lockout_signal_active() {
            return vec![];
        }
        self.state.set_lockout_signal(false);
        vec![PinAction::Render]
    }

    /// Whether digit, backspace and confirm are currently dropped.
    pub fn input_blocked(&self) -> bool {
        self.phase == Phase::Verifying || self.state.lockout_signal_active()
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Session outcome, once terminal.
    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.phase.outcome()
    }

    /// Whether the session has ended.
    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Session state.
    pub fn state(&self) -> &PinEntryState {
        &self.state
    }

    /// The session's keypad permutation.
    pub fn keypad_order(&self) -> &KeypadOrder {
        self.state.keypad_order()
    }

    /// Current prompt.
    pub fn prompt_kind(&self) -> PromptKind {
        PromptKind::for_attempts(self.state.attempts_remaining())
    }

    /// Everything the rendering surface needs.
    pub fn snapshot(&self) -> RenderSnapshot {
        let prompt = self.prompt_kind().prompt();
        RenderSnapshot {
            filled_dot_count: self.state.entered_len(),
            total_dot_count: PIN_LENGTH,
            prompt_title: prompt.title,
            prompt_subtitle: prompt.subtitle,
            confirm_enabled: self.phase == Phase::Ready,
            dot_alert_active: self.state.lockout_signal_active(),
            phase: self.phase,
            attempts_remaining: self.state.attempts_remaining(),
            notice: self.notice,
            amount: self.config.payment.amount.clone(),
            currency: self.config.payment.currency.clone(),
        }
    }
}
