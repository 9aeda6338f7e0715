//! Status bar
//!
//! Key help, plus a vibration indicator while a haptic pulse is running.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::Screen;

const HELP: &str = " 0-9/Enter tap  c OK  Esc cancel";
const PULSE: &str = " ~~~ ";

/// Render the status bar.
pub fn render(frame: &mut Frame, screen: &Screen, area: Rect) {
    let mut spans = vec![Span::styled(HELP, Style::default().fg(Color::DarkGray))];
    if screen.is_pulsing() {
        spans.push(Span::styled(
            PULSE,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
