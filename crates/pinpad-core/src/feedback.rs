//! Failed-attempt feedback.
//!
//! When a PIN is rejected and attempts remain, the screen buzzes once and
//! shakes the PIN dots: a short horizontal oscillation (+, -, + of equal
//! magnitude and step) that settles back at zero, with the unfilled dots
//! recolored to the alert color until it settles.
//!
//! [`FeedbackDispatcher`] holds no state and makes no decisions. It only
//! turns a [`FeedbackConfig`] into a [`FeedbackSequence`] of timed commands.
//! The controller decides when to fire it; the runtime plays it back on a
//! cancellable schedule.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Feedback timing and magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackConfig {
    /// Haptic pulse duration.
    pub pulse: Duration,
    /// Horizontal displacement of each shake step.
    pub shake_magnitude: i16,
    /// Duration of each shake step.
    pub shake_step: Duration,
    /// Number of alternating displacements before settling.
    pub shake_steps: u8,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            pulse: Duration::from_millis(100),
            shake_magnitude: 10,
            shake_step: Duration::from_millis(100),
            shake_steps: 3,
        }
    }
}

/// A single actuator or rendering command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackCommand {
    /// Haptic pulse.
    Pulse {
        /// How long the actuator vibrates.
        duration: Duration,
    },
    /// Recolor the unfilled dots (`true`) or restore the neutral color.
    DotAlert(bool),
    /// Move the dot row horizontally. Zero is the rest position.
    Displace(i16),
}

/// A command with its offset from the start of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedCommand {
    /// Offset from sequence start.
    pub at: Duration,
    /// Command to apply at that offset.
    pub command: FeedbackCommand,
}

/// Ordered, timed feedback commands.
///
/// Commands are sorted by offset. The sequence is complete once its last
/// command has been applied; by construction that command returns the
/// displacement to zero and clears the dot alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackSequence {
    steps: Vec<TimedCommand>,
}

impl FeedbackSequence {
    /// Commands in playback order.
    pub fn steps(&self) -> &[TimedCommand] {
        &self.steps
    }

    /// Offset of the last command.
    pub fn duration(&self) -> Duration {
        self.steps.last().map_or(Duration::ZERO, |step| step.at)
    }

    /// Consume into the list of commands.
    pub fn into_steps(self) -> Vec<TimedCommand> {
        self.steps
    }

    /// Number of haptic pulses in this sequence.
    pub fn pulse_count(&self) -> usize {
        self.steps.iter().filter(|s| matches!(s.command, FeedbackCommand::Pulse { .. })).count()
    }

    /// Non-zero displacements in playback order.
    pub fn displacements(&self) -> Vec<i16> {
        self.steps
            .iter()
            .filter_map(|s| match s.command {
                FeedbackCommand::Displace(offset) if offset != 0 => Some(offset),
                _ => None,
            })
            .collect()
    }
}

/// Builds the failed-attempt feedback sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedbackDispatcher {
    config: FeedbackConfig,
}

impl FeedbackDispatcher {
    /// Dispatcher using the given parameters.
    pub fn new(config: FeedbackConfig) -> Self {
        Self { config }
    }

    /// Sequence for a rejected, non-final attempt.
    ///
    /// At offset zero: one pulse, dot alert on, first displacement. Each
    /// following step flips the sign. After the last step the row returns to
    /// zero and the alert clears at the same instant.
    pub fn failure_sequence(&self) -> FeedbackSequence {
        let FeedbackConfig { pulse, shake_magnitude, shake_step, shake_steps } = self.config;
        let mut steps = Vec::with_capacity(usize::from(shake_steps) + 4);

        steps.push(TimedCommand {
            at: Duration::ZERO,
            command: FeedbackCommand::Pulse { duration: pulse },
        });
        steps.push(TimedCommand { at: Duration::ZERO, command: FeedbackCommand::DotAlert(true) });

        // i16::MIN has no positive counterpart
        let mut offset = shake_magnitude.max(-i16::MAX);
        for step in 0..u32::from(shake_steps) {
            steps.push(TimedCommand {
                at: shake_step * step,
                command: FeedbackCommand::Displace(offset),
            });
            offset = -offset;
        }

        let settle = shake_step * u32::from(shake_steps);
        steps.push(TimedCommand { at: settle, command: FeedbackCommand::Displace(0) });
        steps.push(TimedCommand { at: settle, command: FeedbackCommand::DotAlert(false) });

        FeedbackSequence { steps }
    }
}
