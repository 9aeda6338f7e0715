//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering. Tones are the terminal bell.

use std::{
    io::{self, Stdout, Write, stdout},
    time::Duration,
};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use pinpad_app::Driver;
use pinpad_core::{FeedbackCommand, KeypadKey, KeypadOrder, RenderSnapshot, Tone};
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;
use tokio::time::Instant;

use crate::{KeyAction, Screen, input, ui};

/// How often the driver wakes without input to expire the pulse indicator.
const TICK: Duration = Duration::from_millis(50);

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Owns the terminal in raw mode on the alternate screen for its whole
/// lifetime; dropping it restores the terminal.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    screen: Screen,
}

impl TerminalDriver {
    /// Take over the terminal for a session on `keypad`.
    pub fn new(keypad: KeypadOrder) -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal, event_stream: EventStream::new(), screen: Screen::new(keypad) })
    }

    fn draw(&mut self) -> Result<(), TerminalError> {
        self.terminal.draw(|frame| ui::render(frame, &self.screen))?;
        Ok(())
    }

    fn on_key(&mut self, code: KeyCode) -> Result<Option<KeypadKey>, TerminalError> {
        match input::handle_key(code, self.screen.focus_mut()) {
            KeyAction::Tap(key) => Ok(Some(key)),
            KeyAction::Moved => {
                self.draw()?;
                Ok(None)
            },
            KeyAction::Ignored => Ok(None),
        }
    }

    fn on_tick(&mut self) -> Result<(), TerminalError> {
        if self.screen.expire_pulse(Instant::now()) {
            self.draw()?;
        }
        Ok(())
    }

    fn bell(count: usize) -> io::Result<()> {
        let mut out = stdout();
        for _ in 0..count {
            out.write_all(b"\x07")?;
        }
        out.flush()
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn poll_key(&mut self) -> Result<Option<KeypadKey>, Self::Error> {
        tokio::select! {
            biased;

            maybe_event = self.event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) if key_event.kind == KeyEventKind::Press => {
                        self.on_key(key_event.code)
                    },
                    Some(Ok(Event::Resize(..))) => {
                        self.draw()?;
                        Ok(None)
                    },
                    Some(Err(e)) => Err(TerminalError::Io(e)),
                    // Input closed: treat as navigating away.
                    None => Ok(Some(KeypadKey::Cancel)),
                    Some(Ok(_)) => Ok(None),
                }
            }

            () = tokio::time::sleep(TICK) => {
                self.on_tick()?;
                Ok(None)
            }
        }
    }

    fn render(&mut self, snapshot: &RenderSnapshot) -> Result<(), Self::Error> {
        self.screen.update(snapshot);
        self.draw()
    }

    fn feedback(&mut self, command: FeedbackCommand) -> Result<(), Self::Error> {
        self.screen.apply(command, Instant::now());
        self.draw()
    }

    fn play_tone(&mut self, tone: Tone) {
        let count = match tone {
            Tone::KeyPress => 1,
            Tone::Confirmed => 2,
            Tone::Rejected => 3,
        };
        if let Err(e) = Self::bell(count) {
            tracing::warn!(?tone, error = %e, "bell failed");
        }
    }

    fn stop(&mut self) {
        self.screen.reset_feedback();
        if let Err(e) = self.draw() {
            tracing::warn!(error = %e, "final redraw failed");
        }
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}
