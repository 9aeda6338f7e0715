//! Payment header
//!
//! Shows the amount being authorized above a divider.

use pinpad_core::RenderSnapshot;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the header row.
pub fn render(frame: &mut Frame, snapshot: &RenderSnapshot, area: Rect) {
    let line = Line::from(vec![
        Span::styled("Payment ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{} {}", snapshot.amount, snapshot.currency),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let paragraph = Paragraph::new(line).alignment(Alignment::Center).block(block);

    frame.render_widget(paragraph, area);
}
