//! Keyboard handling.
//!
//! The keypad is a grid of buttons with a movable focus. Arrow keys move the
//! focus over non-empty cells, Enter or Space taps the focused button, and
//! shortcut keys tap a button directly. Number keys address digit buttons by
//! screen position, not by label: on a shuffled keypad pressing `1` taps the
//! top-left button whatever digit it shows.

use crossterm::event::KeyCode;
use pinpad_core::{
    KeypadKey,
    keypad::{COLUMNS, LAYOUT},
};

/// Result of a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// A keypad button was tapped.
    Tap(KeypadKey),
    /// Focus moved; the screen needs a redraw.
    Moved,
    /// Key has no meaning on this screen.
    Ignored,
}

/// Focused cell of the keypad grid. Starts on the top-left button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Focus {
    row: usize,
    col: usize,
}

impl Focus {
    /// Focus on the cell at `row`, `col`. `None` if the cell is empty.
    pub fn at(row: usize, col: usize) -> Option<Self> {
        let cell = *LAYOUT.get(row)?.get(col)?;
        cell.map(|_| Self { row, col })
    }

    /// Grid row.
    pub fn row(self) -> usize {
        self.row
    }

    /// Grid column.
    pub fn col(self) -> usize {
        self.col
    }

    /// Button under the focus.
    pub fn key(self) -> Option<KeypadKey> {
        LAYOUT.get(self.row).and_then(|cells| cells.get(self.col)).copied().flatten()
    }

    /// Move by one cell, skipping empty cells. Stays put at the grid edge.
    fn step(self, d_row: isize, d_col: isize) -> Self {
        let (mut row, mut col) = (self.row, self.col);
        loop {
            let (Some(next_row), Some(next_col)) =
                (row.checked_add_signed(d_row), col.checked_add_signed(d_col))
            else {
                return self;
            };
            if next_row >= LAYOUT.len() || next_col >= COLUMNS {
                return self;
            }
            (row, col) = (next_row, next_col);
            if let Some(focus) = Self::at(row, col) {
                return focus;
            }
        }
    }
}

/// Screen position of the digit button bound to a number key.
///
/// `1`-`9` cover the three full rows, `0` is the lone button below them.
fn position_for(c: char) -> Option<usize> {
    let value = c.to_digit(10)? as usize;
    Some(if value == 0 { 9 } else { value - 1 })
}

/// Translate a key press, moving `focus` for arrow keys.
pub fn handle_key(code: KeyCode, focus: &mut Focus) -> KeyAction {
    let moved = match code {
        KeyCode::Up => focus.step(-1, 0),
        KeyCode::Down => focus.step(1, 0),
        KeyCode::Left => focus.step(0, -1),
        KeyCode::Right => focus.step(0, 1),
        KeyCode::Enter | KeyCode::Char(' ') => {
            return focus.key().map_or(KeyAction::Ignored, KeyAction::Tap);
        },
        KeyCode::Backspace | KeyCode::Delete => return KeyAction::Tap(KeypadKey::Backspace),
        KeyCode::Esc => return KeyAction::Tap(KeypadKey::Cancel),
        KeyCode::Tab | KeyCode::Char('c') => return KeyAction::Tap(KeypadKey::Confirm),
        KeyCode::Char(c) => {
            return match position_for(c) {
                Some(position) => KeyAction::Tap(KeypadKey::Digit { position }),
                None => KeyAction::Ignored,
            };
        },
        _ => return KeyAction::Ignored,
    };

    if moved == *focus {
        KeyAction::Ignored
    } else {
        *focus = moved;
        KeyAction::Moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_keys_address_positions() {
        let mut focus = Focus::default();
        assert_eq!(
            handle_key(KeyCode::Char('1'), &mut focus),
            KeyAction::Tap(KeypadKey::Digit { position: 0 })
        );
        assert_eq!(
            handle_key(KeyCode::Char('0'), &mut focus),
            KeyAction::Tap(KeypadKey::Digit { position: 9 })
        );
        assert_eq!(handle_key(KeyCode::Char('x'), &mut focus), KeyAction::Ignored);
    }

    #[test]
    fn action_shortcuts() {
        let mut focus = Focus::default();
        assert_eq!(handle_key(KeyCode::Esc, &mut focus), KeyAction::Tap(KeypadKey::Cancel));
        assert_eq!(
            handle_key(KeyCode::Backspace, &mut focus),
            KeyAction::Tap(KeypadKey::Backspace)
        );
        assert_eq!(handle_key(KeyCode::Tab, &mut focus), KeyAction::Tap(KeypadKey::Confirm));
        assert_eq!(handle_key(KeyCode::Char('c'), &mut focus), KeyAction::Tap(KeypadKey::Confirm));
    }

    #[test]
    fn arrows_skip_empty_cells() {
        // Bottom-left action button; the cell above it is empty.
        let mut focus = Focus::at(4, 0).unwrap();

        assert_eq!(handle_key(KeyCode::Up, &mut focus), KeyAction::Moved);
        assert_eq!((focus.row(), focus.col()), (2, 0));
        assert_eq!(focus.key(), Some(KeypadKey::Digit { position: 6 }));
    }

    #[test]
    fn arrows_stop_at_edges() {
        let mut focus = Focus::default();
        assert_eq!(handle_key(KeyCode::Up, &mut focus), KeyAction::Ignored);
        assert_eq!(handle_key(KeyCode::Left, &mut focus), KeyAction::Ignored);
        assert_eq!(focus, Focus::default());
    }

    #[test]
    fn enter_taps_focused_button() {
        let mut focus = Focus::at(3, 1).unwrap();
        assert_eq!(
            handle_key(KeyCode::Enter, &mut focus),
            KeyAction::Tap(KeypadKey::Digit { position: 9 })
        );

        let mut focus = Focus::at(4, 2).unwrap();
        assert_eq!(handle_key(KeyCode::Char(' '), &mut focus), KeyAction::Tap(KeypadKey::Confirm));
    }

    #[test]
    fn empty_cells_cannot_be_focused() {
        assert!(Focus::at(3, 0).is_none());
        assert!(Focus::at(9, 9).is_none());
    }
}
