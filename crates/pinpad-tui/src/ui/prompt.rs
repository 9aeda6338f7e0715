//! Prompt and notice lines.

use pinpad_core::RenderSnapshot;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Paragraph,
};

/// Render the prompt title and subtitle, and the notice below the dots.
pub fn render(frame: &mut Frame, snapshot: &RenderSnapshot, area: Rect, notice_area: Rect) {
    let mut lines =
        vec![Line::styled(snapshot.prompt_title, Style::default().add_modifier(Modifier::BOLD))];
    if let Some(subtitle) = snapshot.prompt_subtitle {
        lines.push(Line::styled(subtitle, Style::default().fg(Color::Red)));
    }
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);

    if let Some(notice) = snapshot.notice {
        let paragraph = Paragraph::new(notice.text())
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, notice_area);
    }
}
