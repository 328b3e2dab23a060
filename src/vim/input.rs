use zeroize::Zeroize;

/// Single-line text buffer with a character cursor.
///
/// Secret buffers (`masked`) zeroize their contents on clear and drop.
#[derive(Default, Clone)]
pub struct InputBuffer {
    chars: Vec<char>,
    cursor: usize,
    masked: bool,
    max_len: Option<usize>,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn masked() -> Self {
        Self {
            chars: Vec::new(),
            cursor: 0,
            masked: true,
            max_len: None,
        }
    }

    /// Buffer that refuses input past `max_len` characters (verification code).
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            chars: Vec::new(),
            cursor: 0,
            masked: false,
            max_len: Some(max_len),
        }
    }

    pub fn content(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn display(&self, mask_char: char) -> String {
        if self.masked {
            mask_char.to_string().repeat(self.len())
        } else {
            self.content()
        }
    }

    pub fn insert(&mut self, c: char) {
        if self.max_len.is_some_and(|max| self.chars.len() >= max) {
            return;
        }
        self.chars.insert(self.cursor, c);
        self.cursor += 1;
    }

    pub fn delete_back(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.chars.remove(self.cursor);
            true
        } else {
            false
        }
    }

    pub fn delete_forward(&mut self) -> bool {
        if self.cursor < self.chars.len() {
            self.chars.remove(self.cursor);
            true
        } else {
            false
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.chars.len() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.chars.len();
    }

    pub fn clear(&mut self) {
        self.chars.zeroize();
        self.chars.clear();
        self.cursor = 0;
    }

    pub fn set(&mut self, value: &str) {
        self.chars.zeroize();
        self.chars = value.chars().collect();
        self.cursor = self.chars.len();
    }
}

impl Drop for InputBuffer {
    fn drop(&mut self) {
        if self.masked {
            self.chars.zeroize();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_cursor_movement() {
        let mut buf = InputBuffer::new();
        for c in "jane".chars() {
            buf.insert(c);
        }
        assert_eq!(buf.content(), "jane");
        assert_eq!(buf.cursor(), 4);

        buf.move_left();
        buf.insert('y');
        assert_eq!(buf.content(), "janye");
    }

    #[test]
    fn delete_back_at_start_is_noop() {
        let mut buf = InputBuffer::new();
        assert!(!buf.delete_back());
        buf.insert('a');
        buf.move_start();
        assert!(!buf.delete_back());
        assert_eq!(buf.content(), "a");
    }

    #[test]
    fn delete_forward_removes_under_cursor() {
        let mut buf = InputBuffer::new();
        buf.set("abc");
        buf.move_start();
        assert!(buf.delete_forward());
        assert_eq!(buf.content(), "bc");
    }

    #[test]
    fn handles_multibyte_chars() {
        let mut buf = InputBuffer::new();
        buf.set("héllo");
        assert_eq!(buf.len(), 5);
        buf.move_start();
        buf.move_right();
        buf.delete_forward();
        assert_eq!(buf.content(), "hllo");
    }

    #[test]
    fn masked_display_hides_content() {
        let mut buf = InputBuffer::masked();
        buf.set("secret");
        assert_eq!(buf.display('*'), "******");
        assert_eq!(buf.content(), "secret");
    }

    #[test]
    fn max_len_caps_input() {
        let mut buf = InputBuffer::with_max_len(6);
        for c in "1234567890".chars() {
            buf.insert(c);
        }
        assert_eq!(buf.content(), "123456");
    }
}
