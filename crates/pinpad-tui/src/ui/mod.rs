//! UI rendering
//!
//! Rendering functions that convert [`Screen`] state into terminal output
//! using ratatui widgets. All functions are pure (no I/O).

mod dots;
mod header;
mod keypad;
mod prompt;
mod status;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::Screen;

/// Width of the centered PIN panel.
const PANEL_WIDTH: u16 = 36;

/// Render the entire PIN screen.
pub fn render(frame: &mut Frame, screen: &Screen) {
    const HEADER_HEIGHT: u16 = 2;
    const PROMPT_HEIGHT: u16 = 2;
    const DOTS_HEIGHT: u16 = 1;
    const NOTICE_HEIGHT: u16 = 1;
    const STATUS_HEIGHT: u16 = 1;

    let Some(snapshot) = screen.snapshot() else {
        return;
    };

    let panel = centered_column(PANEL_WIDTH, frame.area());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(PROMPT_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(DOTS_HEIGHT),
            Constraint::Length(NOTICE_HEIGHT),
            Constraint::Length(keypad::HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(panel);

    let [header_area, _, prompt_area, _, dots_area, notice_area, keypad_area, status_area] =
        chunks.as_ref()
    else {
        return;
    };

    header::render(frame, snapshot, *header_area);
    prompt::render(frame, snapshot, *prompt_area, *notice_area);
    dots::render(frame, screen, snapshot, *dots_area);
    keypad::render(frame, screen, snapshot, *keypad_area);
    status::render(frame, screen, *status_area);
}

/// Full-height column of at most `width` cells, centered horizontally.
fn centered_column(width: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let x = area.x + (area.width - width) / 2;
    Rect::new(x, area.y, width, area.height)
}
