/// 한 줄 입력 필드 (커서는 바이트 오프셋, 항상 문자 경계)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextField {
    value: String,
    cursor: usize,
}

impl TextField {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = self.prev_char_start();
        self.value.remove(prev);
        self.cursor = prev;
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.len() {
            self.value.remove(self.cursor);
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.prev_char_start();
    }

    pub fn right(&mut self) {
        if self.cursor >= self.value.len() {
            return;
        }
        self.cursor = self.value[self.cursor..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| self.cursor + i)
            .unwrap_or(self.value.len());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    /// Ctrl+W: 커서 앞 단어 삭제
    pub fn delete_prev_word(&mut self) {
        let original = self.cursor;
        let mut pos = original;

        // 구분자 먼저 건너뛰고 단어 시작까지
        while pos > 0 && self.char_before(pos).is_some_and(is_word_delimiter) {
            pos = prev_char_start(&self.value, pos);
        }
        while pos > 0 && !self.char_before(pos).is_some_and(is_word_delimiter) {
            pos = prev_char_start(&self.value, pos);
        }

        self.value.replace_range(pos..original, "");
        self.cursor = pos;
    }

    fn char_before(&self, pos: usize) -> Option<char> {
        self.value[..pos].chars().next_back()
    }

    fn prev_char_start(&self) -> usize {
        prev_char_start(&self.value, self.cursor)
    }
}

fn prev_char_start(value: &str, cursor: usize) -> usize {
    value[..cursor]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn is_word_delimiter(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '@' | '.' | '-' | '_' | '+')
}
