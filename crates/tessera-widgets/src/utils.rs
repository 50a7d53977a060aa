//! Text utilities for TUI rendering.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string in terminal cells.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Keep the end of `text` that fits in `max_width` cells.
///
/// Used for single-line inputs where the cursor sits at the end.
pub fn fit_tail(text: &str, max_width: usize) -> &str {
    let mut width = 0;
    let mut start = text.len();

    for (idx, ch) in text.char_indices().rev() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(1);
        if width + ch_width > max_width {
            break;
        }
        width += ch_width;
        start = idx;
    }

    &text[start..]
}

/// Replace every character of `text` with `symbol`.
pub fn mask(text: &str, symbol: char) -> String {
    text.chars().map(|_| symbol).collect()
}
