//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` provides the same interface as the terminal driver but for
//! deterministic testing. It implements [`Driver`] so the same
//! [`pinpad_app::Runtime`] orchestration code runs in both production and
//! simulation.
//!
//! Taps come from a script of [`ScriptedTap`]s at fixed offsets on the tokio
//! clock. Everything the runtime sends back (renders, feedback commands,
//! tones) is captured in a shared [`Recording`] that the test keeps a handle
//! to after the driver has been moved into the runtime.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use pinpad_app::Driver;
use pinpad_core::{FeedbackCommand, KeypadKey, RenderSnapshot, Tone};
use tokio::time::Instant;

use crate::invariants::{InvariantRegistry, SessionSnapshot};

/// How long the driver waits for the session to end once the script has run
/// out before giving up.
pub const SCRIPT_IDLE_TIMEOUT: Duration = Duration::from_secs(60);

/// Error type for simulation driver.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimDriverError {
    /// All scripted taps were delivered and the session is still running.
    #[error("tap script exhausted after {taps} taps with session still running")]
    ScriptExhausted {
        /// Taps delivered.
        taps: usize,
    },

    /// A rendered snapshot broke an invariant.
    #[error("invariant violated: {0}")]
    InvariantViolated(String),
}

/// A tap delivered at a fixed offset from the driver's start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptedTap {
    /// Offset from driver creation.
    pub at: Duration,
    /// Key tapped.
    pub key: KeypadKey,
}

impl ScriptedTap {
    /// Tap `key` at `at_ms` milliseconds.
    pub fn at_ms(at_ms: u64, key: KeypadKey) -> Self {
        Self { at: Duration::from_millis(at_ms), key }
    }
}

/// Everything the runtime sent to the driver.
#[derive(Debug, Clone, Default)]
pub struct Recording {
    /// Every rendered snapshot, oldest first.
    pub renders: Vec<RenderSnapshot>,
    /// Feedback commands with their offset from driver creation.
    pub feedback: Vec<(Duration, FeedbackCommand)>,
    /// Tones played.
    pub tones: Vec<Tone>,
    /// Taps delivered to the runtime.
    pub taps_delivered: usize,
    /// Whether the runtime released the driver.
    pub stopped: bool,
}

impl Recording {
    /// Most recent render.
    pub fn last_render(&self) -> Option<&RenderSnapshot> {
        self.renders.last()
    }

    /// Offsets at which a haptic pulse was requested.
    pub fn pulses(&self) -> Vec<Duration> {
        self.feedback
            .iter()
            .filter(|(_, c)| matches!(c, FeedbackCommand::Pulse { .. }))
            .map(|(at, _)| *at)
            .collect()
    }

    /// Displacements applied, with offsets.
    pub fn displacements(&self) -> Vec<(Duration, i16)> {
        self.feedback
            .iter()
            .filter_map(|(at, c)| match c {
                FeedbackCommand::Displace(offset) => Some((*at, *offset)),
                _ => None,
            })
            .collect()
    }
}

/// Simulation driver for deterministic testing.
pub struct SimDriver {
    started: Instant,
    script: VecDeque<ScriptedTap>,
    recording: Arc<Mutex<Recording>>,
    history: SessionSnapshot,
    invariants: Option<InvariantRegistry>,
}

impl SimDriver {
    /// Create a driver that will deliver `script` in order.
    ///
    /// Offsets are measured from now on the tokio clock.
    pub fn new(script: impl IntoIterator<Item = ScriptedTap>) -> Self {
        Self {
            started: Instant::now(),
            script: script.into_iter().collect(),
            recording: Arc::new(Mutex::new(Recording::default())),
            history: SessionSnapshot::empty(),
            invariants: None,
        }
    }

    /// Enable invariant checking on every render.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(registry);
        self
    }

    /// Shared handle to the recording.
    pub fn recording(&self) -> Arc<Mutex<Recording>> {
        Arc::clone(&self.recording)
    }

    /// Taps not yet delivered.
    pub fn remaining_taps(&self) -> usize {
        self.script.len()
    }

    fn record(&self) -> MutexGuard<'_, Recording> {
        self.recording.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_invariants(&self) -> Result<(), SimDriverError> {
        let Some(registry) = &self.invariants else {
            return Ok(());
        };
        registry.check_all(&self.history).map_err(|violations| {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            SimDriverError::InvariantViolated(messages.join("; "))
        })
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;

    async fn poll_key(&mut self) -> Result<Option<KeypadKey>, Self::Error> {
        let Some(tap) = self.script.front().copied() else {
            tokio::time::sleep(SCRIPT_IDLE_TIMEOUT).await;
            let taps = self.record().taps_delivered;
            return Err(SimDriverError::ScriptExhausted { taps });
        };

        tokio::time::sleep_until(self.started + tap.at).await;
        self.script.pop_front();
        self.record().taps_delivered += 1;
        tracing::trace!(key = ?tap.key, at = ?tap.at, "scripted tap");
        Ok(Some(tap.key))
    }

    fn render(&mut self, snapshot: &RenderSnapshot) -> Result<(), Self::Error> {
        self.record().renders.push(snapshot.clone());
        self.history.push(snapshot.clone());
        self.check_invariants()
    }

    fn feedback(&mut self, command: FeedbackCommand) -> Result<(), Self::Error> {
        let at = self.started.elapsed();
        self.record().feedback.push((at, command));
        Ok(())
    }

    fn play_tone(&mut self, tone: Tone) {
        self.record().tones.push(tone);
    }

    fn stop(&mut self) {
        self.record().stopped = true;
    }
}

#[cfg(test)]
mod tests {
    use pinpad_core::{KeypadOrder, PinEntryController, SessionConfig};

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn delivers_taps_at_scripted_offsets() {
        let mut driver = SimDriver::new([
            ScriptedTap::at_ms(50, KeypadKey::Digit { position: 3 }),
            ScriptedTap::at_ms(200, KeypadKey::Cancel),
        ]);

        assert_eq!(driver.poll_key().await, Ok(Some(KeypadKey::Digit { position: 3 })));
        assert_eq!(driver.started.elapsed(), Duration::from_millis(50));
        assert_eq!(driver.poll_key().await, Ok(Some(KeypadKey::Cancel)));
        assert_eq!(driver.started.elapsed(), Duration::from_millis(200));
        assert_eq!(driver.remaining_taps(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_script_times_out() {
        let mut driver = SimDriver::new(Vec::<ScriptedTap>::new());

        assert_eq!(driver.poll_key().await, Err(SimDriverError::ScriptExhausted { taps: 0 }));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_poll_keeps_tap() {
        let mut driver = SimDriver::new([ScriptedTap::at_ms(100, KeypadKey::Confirm)]);

        let raced = tokio::time::timeout(Duration::from_millis(10), driver.poll_key()).await;
        assert!(raced.is_err());
        assert_eq!(driver.remaining_taps(), 1);
        assert_eq!(driver.poll_key().await, Ok(Some(KeypadKey::Confirm)));
    }

    #[test]
    fn invariant_violation_fails_render() {
        let registry = InvariantRegistry::standard();
        let mut driver = SimDriver::new(Vec::<ScriptedTap>::new()).with_invariants(registry);
        let mut snapshot =
            PinEntryController::new(KeypadOrder::canonical(), SessionConfig::default()).snapshot();
        assert!(driver.render(&snapshot).is_ok());

        snapshot.filled_dot_count = 7;
        assert!(matches!(driver.render(&snapshot), Err(SimDriverError::InvariantViolated(_))));
        assert_eq!(driver.recording().lock().unwrap().renders.len(), 2);
    }
}
