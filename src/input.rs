use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Single-line text input. Used both for the bound prompt input and for the
/// fields of the creation form. The cursor is a byte offset that always
/// sits on a char boundary.
#[derive(Clone, Debug, Default)]
pub struct PromptInput {
    text: String,
    cursor: usize,
}

impl PromptInput {
    pub fn new(text: String) -> Self {
        let cursor = text.len();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replaces the whole content and moves the cursor to the end.
    pub fn set_text(&mut self, text: String) {
        self.cursor = text.len();
        self.text = text;
    }

    pub fn insert_char(&mut self, ch: char) {
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Removes the character before the cursor.
    pub fn backspace(&mut self) -> bool {
        let Some(prev) = self.text[..self.cursor].chars().next_back() else {
            return false;
        };
        let start = self.cursor - prev.len_utf8();
        self.text.remove(start);
        self.cursor = start;
        true
    }

    /// Removes the character under the cursor.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.text.len() {
            return false;
        }
        self.text.remove(self.cursor);
        true
    }

    pub fn move_left(&mut self) -> bool {
        let Some(prev) = self.text[..self.cursor].chars().next_back() else {
            return false;
        };
        self.cursor -= prev.len_utf8();
        true
    }

    pub fn move_right(&mut self) -> bool {
        let Some(next) = self.text[self.cursor..].chars().next() else {
            return false;
        };
        self.cursor += next.len_utf8();
        true
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Byte offset where rendering starts so the cursor stays inside a
    /// window `width` columns wide. The rightmost column is reserved for
    /// the cursor cell itself.
    pub fn window_start(&self, width: u16) -> usize {
        if width == 0 {
            return self.cursor;
        }
        let mut budget = width.saturating_sub(1) as usize;
        let mut start = self.cursor;
        for ch in self.text[..self.cursor].chars().rev() {
            let w = ch.width().unwrap_or(0);
            if budget < w {
                break;
            }
            budget -= w;
            start -= ch.len_utf8();
        }
        start
    }

    pub fn visible_text(&self, width: u16) -> &str {
        &self.text[self.window_start(width)..]
    }

    /// Display column of the cursor inside the visible window.
    pub fn visible_cursor_column(&self, width: u16) -> u16 {
        let start = self.window_start(width);
        self.text[start..self.cursor].width() as u16
    }

    /// Moves the cursor to the character cell under `column` of the visible
    /// window, for mouse clicks into the input.
    pub fn click_at(&mut self, width: u16, column: u16) {
        let start = self.window_start(width);
        let mut acc = 0u16;
        let mut cursor = start;
        for ch in self.text[start..].chars() {
            let w = ch.width().unwrap_or(0) as u16;
            if acc + w > column {
                break;
            }
            acc += w;
            cursor += ch.len_utf8();
        }
        self.cursor = cursor;
    }
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod input_tests;
