//! Scroll position for the transcript.
//!
//! The offset is measured in lines from the bottom. Zero means the view
//! follows the latest message; anything else anchors the view in scrollback
//! so new replies do not yank the screen.

#[derive(Debug, Default)]
pub struct TranscriptState {
    offset_from_bottom: usize,
    total_lines: usize,
    viewport_height: usize,
}

impl TranscriptState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updated once per frame with current content size and geometry.
    pub fn set_geometry(&mut self, total_lines: usize, viewport_height: usize) {
        self.total_lines = total_lines;
        self.viewport_height = viewport_height;
        self.offset_from_bottom = self.offset_from_bottom.min(self.max_offset());
    }

    fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.viewport_height)
    }

    pub fn is_following(&self) -> bool {
        self.offset_from_bottom == 0
    }

    pub fn offset_from_bottom(&self) -> usize {
        self.offset_from_bottom
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.offset_from_bottom = (self.offset_from_bottom + lines).min(self.max_offset());
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.offset_from_bottom = self.offset_from_bottom.saturating_sub(lines);
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.viewport_height.saturating_sub(1).max(1));
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.viewport_height.saturating_sub(1).max(1));
    }

    pub fn scroll_to_top(&mut self) {
        self.offset_from_bottom = self.max_offset();
    }

    pub fn scroll_to_bottom(&mut self) {
        self.offset_from_bottom = 0;
    }
}
