//! PIN dots
//!
//! One dot per PIN digit: filled dots in the accent color, unfilled dots grey
//! or, while the failure alert is on, red. The whole row follows the shake
//! displacement.

use std::iter;

use pinpad_core::RenderSnapshot;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::Screen;

const FILLED: &str = "●";
const UNFILLED: &str = "○";

/// Displacement units per terminal column.
pub const DISPLACEMENT_PER_COLUMN: i32 = 5;

/// Render the dot row.
pub fn render(frame: &mut Frame, screen: &Screen, snapshot: &RenderSnapshot, area: Rect) {
    let unfilled_color = if screen.dot_alert() { Color::Red } else { Color::DarkGray };

    let filled = Span::styled(FILLED, Style::default().fg(Color::Cyan));
    let unfilled = Span::styled(UNFILLED, Style::default().fg(unfilled_color));
    let dots = iter::repeat_n(filled, snapshot.filled_dot_count)
        .chain(iter::repeat_n(unfilled, snapshot.unfilled_dot_count()));

    let mut spans = Vec::with_capacity(snapshot.total_dot_count * 2);
    for (i, dot) in dots.enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(dot);
    }

    let width = (snapshot.total_dot_count * 2).saturating_sub(1) as u16;
    let row = shifted_row(area, width.min(area.width), screen.displacement());
    frame.render_widget(Paragraph::new(Line::from(spans)), row);
}

/// Centered `width`-wide slice of `area`, moved by `displacement` and kept
/// inside `area`.
fn shifted_row(area: Rect, width: u16, displacement: i16) -> Rect {
    let left = i32::from(area.x);
    let right = left + i32::from(area.width - width);
    let centered = left + i32::from(area.width - width) / 2;
    let x = (centered + i32::from(displacement) / DISPLACEMENT_PER_COLUMN).clamp(left, right);

    Rect::new(x as u16, area.y, width, area.height.min(1))
}
