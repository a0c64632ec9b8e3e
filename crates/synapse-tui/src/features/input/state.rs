//! Editor buffer, cursor, and submit history.
//!
//! The cursor is a character index into the buffer, never a byte index, so
//! multi-byte input cannot split a code point.

/// Most recent submissions kept for Up/Down recall.
const HISTORY_CAPACITY: usize = 50;

#[derive(Debug, Default)]
pub struct InputState {
    buffer: String,
    /// Cursor position in characters.
    cursor: usize,
    history: Vec<String>,
    /// Position while walking history, newest first. `None` means the user
    /// is editing a fresh draft.
    history_index: Option<usize>,
    /// In-progress text stashed when history navigation begins.
    draft: Option<String>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
        self.cursor = self.char_count();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.history_index = None;
        self.draft = None;
    }

    fn char_count(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_index)
            .map_or(self.buffer.len(), |(offset, _)| offset)
    }

    pub fn insert_char(&mut self, c: char) {
        let offset = self.byte_offset(self.cursor);
        self.buffer.insert(offset, c);
        self.cursor += 1;
        self.stop_history_navigation();
    }

    pub fn insert_str(&mut self, text: &str) {
        let offset = self.byte_offset(self.cursor);
        self.buffer.insert_str(offset, text);
        self.cursor += text.chars().count();
        self.stop_history_navigation();
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let offset = self.byte_offset(self.cursor - 1);
        self.buffer.remove(offset);
        self.cursor -= 1;
        self.stop_history_navigation();
    }

    pub fn delete(&mut self) {
        if self.cursor >= self.char_count() {
            return;
        }
        let offset = self.byte_offset(self.cursor);
        self.buffer.remove(offset);
        self.stop_history_navigation();
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_count());
    }

    pub fn move_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_to_end(&mut self) {
        self.cursor = self.char_count();
    }

    pub fn move_word_left(&mut self) {
        self.cursor = self.previous_word_boundary();
    }

    pub fn move_word_right(&mut self) {
        self.cursor = self.next_word_boundary();
    }

    /// Ctrl+U.
    pub fn delete_to_start(&mut self) {
        let offset = self.byte_offset(self.cursor);
        self.buffer.replace_range(..offset, "");
        self.cursor = 0;
        self.stop_history_navigation();
    }

    /// Ctrl+K.
    pub fn delete_to_end(&mut self) {
        let offset = self.byte_offset(self.cursor);
        self.buffer.truncate(offset);
        self.stop_history_navigation();
    }

    /// Ctrl+W.
    pub fn delete_word_left(&mut self) {
        let boundary = self.previous_word_boundary();
        let start = self.byte_offset(boundary);
        let end = self.byte_offset(self.cursor);
        self.buffer.replace_range(start..end, "");
        self.cursor = boundary;
        self.stop_history_navigation();
    }

    fn previous_word_boundary(&self) -> usize {
        let chars: Vec<char> = self.buffer.chars().collect();
        let mut index = self.cursor;
        while index > 0 && chars[index - 1].is_whitespace() {
            index -= 1;
        }
        while index > 0 && !chars[index - 1].is_whitespace() {
            index -= 1;
        }
        index
    }

    fn next_word_boundary(&self) -> usize {
        let chars: Vec<char> = self.buffer.chars().collect();
        let mut index = self.cursor;
        while index < chars.len() && !chars[index].is_whitespace() {
            index += 1;
        }
        while index < chars.len() && chars[index].is_whitespace() {
            index += 1;
        }
        index
    }

    /// Records a submission for Up/Down recall. Consecutive duplicates are
    /// collapsed.
    pub fn push_history(&mut self, entry: &str) {
        if entry.is_empty() || self.history.last().is_some_and(|last| last == entry) {
            self.history_index = None;
            self.draft = None;
            return;
        }
        self.history.push(entry.to_string());
        if self.history.len() > HISTORY_CAPACITY {
            self.history.remove(0);
        }
        self.history_index = None;
        self.draft = None;
    }

    pub fn navigate_history_up(&mut self) -> bool {
        if self.history.is_empty() {
            return false;
        }
        let next = match self.history_index {
            None => {
                self.draft = Some(self.buffer.clone());
                self.history.len() - 1
            }
            Some(0) => return true,
            Some(i) => i - 1,
        };
        self.history_index = Some(next);
        self.buffer = self.history[next].clone();
        self.cursor = self.char_count();
        true
    }

    pub fn navigate_history_down(&mut self) -> bool {
        let Some(index) = self.history_index else {
            return false;
        };
        if index + 1 < self.history.len() {
            self.history_index = Some(index + 1);
            self.buffer = self.history[index + 1].clone();
        } else {
            self.history_index = None;
            self.buffer = self.draft.take().unwrap_or_default();
        }
        self.cursor = self.char_count();
        true
    }

    fn stop_history_navigation(&mut self) {
        self.history_index = None;
        self.draft = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_backspace_track_cursor() {
        let mut input = InputState::new();
        input.insert_str("senior rust");
        assert_eq!(input.text(), "senior rust");
        assert_eq!(input.cursor(), 11);
        input.backspace();
        assert_eq!(input.text(), "senior rus");
    }

    #[test]
    fn cursor_edits_use_char_indices() {
        let mut input = InputState::new();
        input.insert_str("héllo");
        input.move_to_start();
        input.move_right();
        input.delete();
        assert_eq!(input.text(), "hllo");
    }

    #[test]
    fn delete_word_left_eats_trailing_spaces() {
        let mut input = InputState::new();
        input.insert_str("find rust engineers  ");
        input.delete_word_left();
        assert_eq!(input.text(), "find rust ");
        input.delete_word_left();
        assert_eq!(input.text(), "find ");
    }

    #[test]
    fn delete_to_start_and_end() {
        let mut input = InputState::new();
        input.insert_str("backend golang");
        input.move_to_start();
        for _ in 0..8 {
            input.move_right();
        }
        input.delete_to_end();
        assert_eq!(input.text(), "backend ");
        input.delete_to_start();
        assert_eq!(input.text(), "");
    }

    #[test]
    fn history_up_recalls_latest_and_preserves_draft() {
        let mut input = InputState::new();
        input.push_history("first query");
        input.push_history("second query");
        input.insert_str("half typ");

        assert!(input.navigate_history_up());
        assert_eq!(input.text(), "second query");
        assert!(input.navigate_history_up());
        assert_eq!(input.text(), "first query");
        // Pinned at the oldest entry.
        assert!(input.navigate_history_up());
        assert_eq!(input.text(), "first query");

        assert!(input.navigate_history_down());
        assert_eq!(input.text(), "second query");
        assert!(input.navigate_history_down());
        assert_eq!(input.text(), "half typ");
    }

    #[test]
    fn history_down_without_navigation_is_ignored() {
        let mut input = InputState::new();
        input.push_history("query");
        assert!(!input.navigate_history_down());
    }

    #[test]
    fn consecutive_duplicate_history_entries_collapse() {
        let mut input = InputState::new();
        input.push_history("same");
        input.push_history("same");
        input.push_history("other");
        assert!(input.navigate_history_up());
        assert_eq!(input.text(), "other");
        assert!(input.navigate_history_up());
        assert_eq!(input.text(), "same");
        assert!(input.navigate_history_up());
        assert_eq!(input.text(), "same");
    }

    #[test]
    fn editing_cancels_history_navigation() {
        let mut input = InputState::new();
        input.push_history("old query");
        input.navigate_history_up();
        input.insert_char('!');
        assert!(!input.navigate_history_down());
        assert_eq!(input.text(), "old query!");
    }
}
