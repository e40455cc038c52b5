//! Multi-line message input.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_width::UnicodeWidthStr;
use crate::view::wrap_text;

/// Tallest the input box grows, in text rows.
pub const MAX_INPUT_ROWS: u16 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Submit,
    Edited,
    Moved,
    Ignored,
}

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

#[derive(Debug)]
pub struct InputBox {
    text: String,
    cursor: usize, // cursor position in chars
    width: u16,
    height: u16,
    focused: bool,
}

impl Default for InputBox {
    fn default() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            width: 0,
            height: 1,
            focused: false,
        }
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Visible height in rows, always within `1..=MAX_INPUT_ROWS`.
    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Inner width of the box, set by the renderer.
    pub fn set_width(&mut self, width: u16) {
        if self.width != width {
            self.width = width;
            self.on_change();
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
        self.on_change();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> InputAction {
        match key.code {
            KeyCode::Enter if key.modifiers.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) => {
                self.insert('\n');
                InputAction::Edited
            }
            KeyCode::Enter => InputAction::Submit,
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert(c);
                InputAction::Edited
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let byte_pos = char_to_byte_index(&self.text, self.cursor);
                    self.text.remove(byte_pos);
                    self.on_change();
                }
                InputAction::Edited
            }
            KeyCode::Delete => {
                if self.cursor < self.text.chars().count() {
                    let byte_pos = char_to_byte_index(&self.text, self.cursor);
                    self.text.remove(byte_pos);
                    self.on_change();
                }
                InputAction::Edited
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                InputAction::Moved
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.text.chars().count());
                InputAction::Moved
            }
            KeyCode::Home => {
                self.cursor = 0;
                InputAction::Moved
            }
            KeyCode::End => {
                self.cursor = self.text.chars().count();
                InputAction::Moved
            }
            _ => InputAction::Ignored,
        }
    }

    pub fn insert(&mut self, c: char) {
        let byte_pos = char_to_byte_index(&self.text, self.cursor);
        self.text.insert(byte_pos, c);
        self.cursor += 1;
        self.on_change();
    }

    /// The text as displayed: wrapped to the box width.
    pub fn visual_lines(&self) -> Vec<String> {
        wrap_text(&self.text, self.width as usize)
    }

    /// Cursor as (column, row) within the wrapped text.
    pub fn cursor_position(&self) -> (u16, u16) {
        let byte_pos = char_to_byte_index(&self.text, self.cursor);
        let before = wrap_text(&self.text[..byte_pos], self.width as usize);
        let row = before.len().saturating_sub(1);
        let col = before.last().map(|l| l.width()).unwrap_or(0);

        if self.width > 0 && col >= self.width as usize {
            (0, (row + 1) as u16)
        } else {
            (col as u16, row as u16)
        }
    }

    /// First wrapped row to draw so the cursor stays inside the box.
    pub fn scroll_offset(&self) -> u16 {
        let (_, row) = self.cursor_position();
        row.saturating_sub(self.height.saturating_sub(1))
    }

    fn on_change(&mut self) {
        let rows = self.visual_lines().len() as u16;
        let (_, cursor_row) = self.cursor_position();
        self.height = rows.max(cursor_row + 1).clamp(1, MAX_INPUT_ROWS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(input: &mut InputBox, s: &str) {
        for c in s.chars() {
            input.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_enter_submits() {
        let mut input = InputBox::new();
        type_str(&mut input, "Hello");

        assert_eq!(input.handle_key(key(KeyCode::Enter)), InputAction::Submit);
        assert_eq!(input.text(), "Hello");
    }

    #[test]
    fn test_shift_enter_inserts_newline() {
        let mut input = InputBox::new();
        type_str(&mut input, "a");

        let action = input.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT));
        assert_eq!(action, InputAction::Edited);
        type_str(&mut input, "b");
        assert_eq!(input.text(), "a\nb");
    }

    #[test]
    fn test_height_grows_and_clamps() {
        let mut input = InputBox::new();
        input.set_width(10);
        assert_eq!(input.height(), 1);

        type_str(&mut input, "0123456789abc");
        assert_eq!(input.height(), 2);

        for _ in 0..10 {
            input.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT));
        }
        assert_eq!(input.height(), MAX_INPUT_ROWS);

        input.clear();
        assert_eq!(input.height(), 1);
        assert!(input.is_empty());
    }

    #[test]
    fn test_utf8_editing() {
        let mut input = InputBox::new();
        type_str(&mut input, "こんにちは");
        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Backspace));
        assert_eq!(input.text(), "こんには");

        input.handle_key(key(KeyCode::Home));
        input.handle_key(key(KeyCode::Delete));
        assert_eq!(input.text(), "んには");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_cursor_position_wraps() {
        let mut input = InputBox::new();
        input.set_width(4);
        type_str(&mut input, "abcdef");
        assert_eq!(input.cursor_position(), (2, 1));

        input.handle_key(key(KeyCode::Home));
        assert_eq!(input.cursor_position(), (0, 0));

        // Wide characters count double
        input.clear();
        type_str(&mut input, "あい");
        assert_eq!(input.cursor_position(), (0, 1));
    }

    #[test]
    fn test_ctrl_chars_not_inserted() {
        let mut input = InputBox::new();
        let action = input.handle_key(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL));
        assert_eq!(action, InputAction::Ignored);
        assert!(input.is_empty());
    }
}
