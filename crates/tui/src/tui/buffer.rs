/// Single-line editable text field for the search query and survey
/// answers. Cursor arithmetic is byte-indexed but always lands on char
/// boundaries.
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    text: String,
    cursor: usize,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn set<T: Into<String>>(&mut self, value: T) {
        self.text = value.into();
        self.cursor = self.text.len();
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        let mut buf = [0u8; 4];
        let encoded = ch.encode_utf8(&mut buf);
        self.text.insert_str(self.cursor, encoded);
        self.cursor += encoded.len();
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        if let Some((idx, _)) = self.text[..self.cursor].char_indices().next_back() {
            self.text.drain(idx..self.cursor);
            self.cursor = idx;
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor >= self.text.len() {
            return;
        }
        if let Some((idx, ch)) = self.text[self.cursor..].char_indices().next() {
            let end = self.cursor + idx + ch.len_utf8();
            self.text.drain(self.cursor..end);
        }
    }

    pub fn move_left(&mut self) {
        if let Some((idx, _)) = self.text[..self.cursor].char_indices().next_back() {
            self.cursor = idx;
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor >= self.text.len() {
            return;
        }
        if let Some((idx, ch)) = self.text[self.cursor..].char_indices().next() {
            self.cursor += idx + ch.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Cursor position in characters, for rendering.
    pub fn cursor_column(&self) -> usize {
        self.text[..self.cursor].chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_places_cursor_at_end() {
        let mut buffer = InputBuffer::new();
        buffer.set("bali");

        assert_eq!(buffer.as_str(), "bali");
        assert_eq!(buffer.cursor_column(), 4);
    }

    #[test]
    fn editing_respects_char_boundaries() {
        let mut buffer = InputBuffer::new();
        buffer.set("São");
        buffer.move_left();
        buffer.backspace();

        assert_eq!(buffer.as_str(), "So");
        assert_eq!(buffer.cursor_column(), 1);

        buffer.insert_char('ã');
        assert_eq!(buffer.as_str(), "São");
    }

    #[test]
    fn delete_removes_under_cursor() {
        let mut buffer = InputBuffer::new();
        buffer.set("beach");
        buffer.move_home();
        buffer.delete_char();

        assert_eq!(buffer.as_str(), "each");
        assert_eq!(buffer.cursor_column(), 0);
    }

    #[test]
    fn control_characters_are_ignored() {
        let mut buffer = InputBuffer::new();
        buffer.insert_char('\r');
        buffer.insert_char('\n');
        buffer.insert_char('a');

        assert_eq!(buffer.as_str(), "a");
    }
}
