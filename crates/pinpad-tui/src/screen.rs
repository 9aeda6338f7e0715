//! What the terminal currently shows.
//!
//! The runtime pushes snapshots and feedback commands independently: a
//! snapshot replaces the text and dot counts, while feedback commands move
//! and recolor the dot row between snapshots. [`Screen`] merges both so a
//! redraw at any moment reflects the latest of each.

use pinpad_core::{FeedbackCommand, KeypadOrder, RenderSnapshot};
use tokio::time::Instant;

use crate::Focus;

/// Terminal-side view state.
#[derive(Debug, Clone)]
pub struct Screen {
    snapshot: Option<RenderSnapshot>,
    keypad: KeypadOrder,
    focus: Focus,
    displacement: i16,
    dot_alert: bool,
    pulse_until: Option<Instant>,
}

impl Screen {
    /// Empty screen for a session on `keypad`.
    pub fn new(keypad: KeypadOrder) -> Self {
        Self {
            snapshot: None,
            keypad,
            focus: Focus::default(),
            displacement: 0,
            dot_alert: false,
            pulse_until: None,
        }
    }

    /// Replace the rendered snapshot.
    pub fn update(&mut self, snapshot: &RenderSnapshot) {
        self.snapshot = Some(snapshot.clone());
    }

    /// Apply a feedback command received at `now`.
    pub fn apply(&mut self, command: FeedbackCommand, now: Instant) {
        match command {
            FeedbackCommand::Pulse { duration } => self.pulse_until = Some(now + duration),
            FeedbackCommand::DotAlert(active) => self.dot_alert = active,
            FeedbackCommand::Displace(offset) => self.displacement = offset,
        }
    }

    /// Clear an elapsed pulse. Returns `true` if the screen changed.
    pub fn expire_pulse(&mut self, now: Instant) -> bool {
        match self.pulse_until {
            Some(until) if until <= now => {
                self.pulse_until = None;
                true
            },
            _ => false,
        }
    }

    /// Put actuators back at rest.
    pub fn reset_feedback(&mut self) {
        self.displacement = 0;
        self.dot_alert = false;
        self.pulse_until = None;
    }

    /// Latest snapshot. `None` before the first render.
    pub fn snapshot(&self) -> Option<&RenderSnapshot> {
        self.snapshot.as_ref()
    }

    /// Session keypad.
    pub fn keypad(&self) -> &KeypadOrder {
        &self.keypad
    }

    /// Focused keypad cell.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Mutable focus for key handling.
    pub fn focus_mut(&mut self) -> &mut Focus {
        &mut self.focus
    }

    /// Current horizontal offset of the dot row.
    pub fn displacement(&self) -> i16 {
        self.displacement
    }

    /// Unfilled dots use the alert color.
    pub fn dot_alert(&self) -> bool {
        self.dot_alert
    }

    /// A haptic pulse is in progress.
    pub fn is_pulsing(&self) -> bool {
        self.pulse_until.is_some()
    }
}
