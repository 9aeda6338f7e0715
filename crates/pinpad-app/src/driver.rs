//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the PIN entry runtime from a specific
//! rendering surface and actuator set. Each front end implements the trait,
//! while the generic [`crate::Runtime`] handles all orchestration.

use std::future::Future;

use pinpad_core::{FeedbackCommand, KeypadKey, RenderSnapshot, Tone};

/// Abstracts keypad input, rendering and actuators for the runtime.
///
/// # Implementations
///
/// - **TUI**: crossterm key events, ratatui rendering, terminal bell
/// - **Simulation**: scripted taps on a virtual clock, recorded output
///
/// # Cancellation
///
/// [`poll_key`](Driver::poll_key) races the runtime's feedback timers and
/// verifier. Implementations must be cancel-safe: dropping the future before
/// it completes must not lose a tap.
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Wait for the next keypad tap.
    ///
    /// Returns `None` if the poll window elapsed without input. Navigating
    /// away from the screen is reported as [`KeypadKey::Cancel`].
    fn poll_key(&mut self) -> impl Future<Output = Result<Option<KeypadKey>, Self::Error>> + Send;

    /// Draw the PIN screen.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, snapshot: &RenderSnapshot) -> Result<(), Self::Error>;

    /// Apply one feedback command (haptic pulse, dot color, displacement).
    ///
    /// # Errors
    ///
    /// Returns an error if the actuator or surface rejects the command.
    fn feedback(&mut self, command: FeedbackCommand) -> Result<(), Self::Error>;

    /// Play an audio cue. Fire-and-forget.
    fn play_tone(&mut self, tone: Tone);

    /// Release actuators and the rendering surface.
    fn stop(&mut self);
}
