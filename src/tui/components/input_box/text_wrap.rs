//! Pure text wrapping utilities and dimensional constants for the InputBox.
//!
//! These are stateless helpers with no dependency on InputBox or CursorState.
//! Widths are measured in terminal cells, so Hangul syllables count as two.

use unicode_width::UnicodeWidthStr;

/// Border (2) + padding (2) consumed horizontally by the bordered block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Maximum visible content lines before internal scrolling kicks in
pub(super) const MAX_VISIBLE_LINES: u16 = 4;
/// Offset from area edge to content (border width)
pub(super) const BORDER_OFFSET: u16 = 1;

/// Build textwrap options configured for the input box inner width.
pub(super) fn wrap_options(inner_width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(inner_width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Calculate the inner content width after subtracting border/padding overhead.
/// Returns 0 if the area is too narrow.
pub(super) fn inner_width(content_width: u16) -> u16 {
    content_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Count wrapped lines for the given text. Never less than one.
pub(super) fn wrap_line_count(text: &str, width: u16) -> u16 {
    if width == 0 || text.is_empty() {
        return 1;
    }
    (textwrap::wrap(text, wrap_options(width)).len() as u16).max(1)
}

/// Display width of `text` in terminal cells.
pub(super) fn cell_width(text: &str) -> u16 {
    text.width() as u16
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

/// Flatten pasted text onto a single line; Enter submits, so the buffer
/// never holds newlines.
pub(super) fn flatten_paste(text: &str) -> String {
    text.split(['\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_line_count_empty_string() {
        assert_eq!(wrap_line_count("", 80), 1);
    }

    #[test]
    fn wrap_line_count_zero_width() {
        assert_eq!(wrap_line_count("hello", 0), 1);
    }

    #[test]
    fn wrap_line_count_wraps_long_text() {
        // 10 chars into a 5-wide column -> 2 lines
        assert_eq!(wrap_line_count("aaaaaaaaaa", 5), 2);
    }

    #[test]
    fn wrap_line_count_counts_hangul_as_wide() {
        // 4 syllables = 8 cells; at width 4 that is 2 lines
        assert_eq!(wrap_line_count("대출한도", 4), 2);
        assert_eq!(wrap_line_count("대출한도", 8), 1);
    }

    #[test]
    fn cell_width_mixed() {
        assert_eq!(cell_width("금리 3%"), 7);
    }

    #[test]
    fn prev_char_boundary_hangul() {
        // Each syllable is 3 bytes
        let s = "금리";
        assert_eq!(prev_char_boundary(s, 6), 3);
        assert_eq!(prev_char_boundary(s, 3), 0);
    }

    #[test]
    fn prev_char_boundary_multibyte() {
        let s = "café";
        assert_eq!(prev_char_boundary(s, 5), 3);
        assert_eq!(prev_char_boundary(s, 3), 2);
    }

    #[test]
    fn next_char_boundary_hangul() {
        let s = "금리";
        assert_eq!(next_char_boundary(s, 0), 3);
        assert_eq!(next_char_boundary(s, 3), 6);
    }

    #[test]
    fn next_char_boundary_ascii() {
        assert_eq!(next_char_boundary("abc", 0), 1);
        assert_eq!(next_char_boundary("abc", 2), 3);
    }

    #[test]
    fn flatten_paste_joins_lines() {
        assert_eq!(flatten_paste("대출\r\n한도\n"), "대출 한도");
        assert_eq!(flatten_paste("single"), "single");
    }
}
