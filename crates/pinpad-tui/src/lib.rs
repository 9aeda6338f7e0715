//! Terminal front end for the PIN entry screen
//!
//! A thin shell over [`pinpad_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`pinpad_app::Runtime`].
//!
//! This crate only handles keyboard input, drawing and the bell.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod input;
pub mod screen;
pub mod terminal;
pub mod ui;

pub use input::{Focus, KeyAction};
pub use screen::Screen;
pub use terminal::{TerminalDriver, TerminalError};
