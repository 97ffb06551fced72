//! Cursor position tracking for the InputBox.
//!
//! `CursorState` owns the cursor byte offset and scroll offset. Methods take
//! `buffer: &str` explicitly since the text is owned by `InputBox`.

use super::text_wrap::{
    BORDER_OFFSET, MAX_VISIBLE_LINES, cell_width, inner_width, wrap_line_count, wrap_options,
};
use ratatui::layout::Rect;

/// Cursor and scroll state, separated from the text buffer.
pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// Line offset for internal scrolling (0 when content fits in viewport)
    pub scroll_offset: u16,
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
        }
    }

    /// Reset cursor to start (used after Submit clears the buffer).
    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_offset = 0;
    }

    /// Wrapped line index and cell column of the cursor.
    fn line_and_column(&self, buffer: &str, width: u16) -> (u16, u16) {
        let before = &buffer[..self.pos];
        let lines = textwrap::wrap(before, wrap_options(width));
        if lines.is_empty() {
            return (0, 0);
        }

        // textwrap trims whitespace at wrap points, so measure the tail of the
        // unwrapped text after the characters of all previous segments.
        let chars_in_prev: usize = lines
            .iter()
            .take(lines.len() - 1)
            .map(|seg| seg.chars().count())
            .sum();
        let tail: String = before.chars().skip(chars_in_prev).collect();
        let tail = tail.trim_start_matches(' ');
        let tail = if lines.len() > 1 { tail } else { before };

        ((lines.len() - 1) as u16, cell_width(tail))
    }

    /// Calculate which wrapped line (0-based) the cursor is on.
    pub fn calculate_line(&self, buffer: &str, content_width: u16) -> u16 {
        let width = inner_width(content_width);
        if width == 0 {
            return 0;
        }
        self.line_and_column(buffer, width).0
    }

    /// Update scroll offset to keep cursor visible within the viewport.
    pub fn update_scroll_offset(&mut self, buffer: &str, content_width: u16) {
        let width = inner_width(content_width);
        let total_lines = wrap_line_count(buffer, width);

        if total_lines <= MAX_VISIBLE_LINES {
            self.scroll_offset = 0;
            return;
        }

        let cursor_line = self.calculate_line(buffer, content_width);

        if cursor_line < self.scroll_offset {
            self.scroll_offset = cursor_line;
        } else if cursor_line >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = cursor_line.saturating_sub(MAX_VISIBLE_LINES - 1);
        }
    }

    /// Screen position (column, row) of the cursor inside `area`.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let width = inner_width(area.width);
        if width == 0 {
            return (area.x + BORDER_OFFSET, area.y + BORDER_OFFSET);
        }

        let (line, column) = self.line_and_column(buffer, width);
        let visible_line = line.saturating_sub(self.scroll_offset);

        (
            area.x + BORDER_OFFSET + column,
            area.y + BORDER_OFFSET + visible_line,
        )
    }
}
