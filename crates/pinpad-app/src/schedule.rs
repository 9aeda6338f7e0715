//! Cancellable feedback playback.
//!
//! A [`FeedbackSchedule`] turns a [`FeedbackSequence`] into deadlines on the
//! environment clock. It never sleeps: the runtime asks how long until the
//! next step, races that wait against input, and drains whatever is due.
//! Cancelling is dropping the schedule.

use std::{collections::VecDeque, ops::Sub, time::Duration};

use pinpad_core::{FeedbackCommand, FeedbackSequence, feedback::TimedCommand};

/// Feedback sequence in playback.
#[derive(Debug, Clone)]
pub struct FeedbackSchedule<I> {
    started: I,
    pending: VecDeque<TimedCommand>,
}

impl<I> FeedbackSchedule<I>
where
    I: Copy + Sub<Output = Duration>,
{
    /// Start playing `sequence` at `now`.
    pub fn start(sequence: FeedbackSequence, now: I) -> Self {
        Self { started: now, pending: sequence.into_steps().into() }
    }

    /// Time until the next command is due. `None` once everything has played.
    pub fn time_until_next(&self, now: I) -> Option<Duration> {
        let next = self.pending.front()?;
        Some(next.at.saturating_sub(now - self.started))
    }

    /// Remove and return every command due at `now`, in order.
    pub fn take_due(&mut self, now: I) -> Vec<FeedbackCommand> {
        let elapsed = now - self.started;
        let mut due = Vec::new();
        while let Some(step) = self.pending.front() {
            if step.at > elapsed {
                break;
            }
            due.push(step.command);
            self.pending.pop_front();
        }
        due
    }

    /// All commands have been handed out.
    pub fn is_complete(&self) -> bool {
        self.pending.is_empty()
    }
}
