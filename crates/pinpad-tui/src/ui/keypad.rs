//! Keypad grid
//!
//! Draws the session's shuffled digit buttons and the action row. The
//! focused button is highlighted; confirm is dimmed until the PIN is
//! complete.

use pinpad_core::{
    KeypadKey, RenderSnapshot,
    keypad::{COLUMNS, LAYOUT},
};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::Screen;

const BUTTON_WIDTH: u16 = 10;
const BUTTON_HEIGHT: u16 = 3;

/// Height of the whole grid.
pub const HEIGHT: u16 = BUTTON_HEIGHT * LAYOUT.len() as u16;

/// Render the keypad.
pub fn render(frame: &mut Frame, screen: &Screen, snapshot: &RenderSnapshot, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(BUTTON_HEIGHT); LAYOUT.len()])
        .split(area);

    for (row_index, (cells, row_area)) in LAYOUT.iter().zip(rows.iter()).enumerate() {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .flex(Flex::Center)
            .constraints([Constraint::Length(BUTTON_WIDTH); COLUMNS])
            .split(*row_area);

        for (col_index, (cell, cell_area)) in cells.iter().zip(columns.iter()).enumerate() {
            let Some(key) = cell else {
                continue;
            };
            let focused = screen.focus().row() == row_index && screen.focus().col() == col_index;
            render_button(frame, screen, snapshot, *key, focused, *cell_area);
        }
    }
}

fn render_button(
    frame: &mut Frame,
    screen: &Screen,
    snapshot: &RenderSnapshot,
    key: KeypadKey,
    focused: bool,
    area: Rect,
) {
    let (label, mut style) = match key {
        KeypadKey::Digit { position } => (
            screen.keypad().digit_at(position).map(|d| d.as_char().to_string()).unwrap_or_default(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        KeypadKey::Backspace => ("Del".to_string(), Style::default()),
        KeypadKey::Cancel => ("Cancel".to_string(), Style::default().fg(Color::Red)),
        KeypadKey::Confirm if snapshot.confirm_enabled => {
            ("OK".to_string(), Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        },
        KeypadKey::Confirm => ("OK".to_string(), Style::default().fg(Color::DarkGray)),
    };
    if focused {
        style = style.add_modifier(Modifier::REVERSED);
    }

    let block =
        Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray));
    let button = Paragraph::new(label).style(style).alignment(Alignment::Center).block(block);
    frame.render_widget(button, area);
}
