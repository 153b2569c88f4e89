//! Fitting text to a cell width.

use unicode_segmentation::UnicodeSegmentation;

use super::width::{grapheme_width, visible_width};

/// Cut `text` so it occupies at most `max_width` cells. Never splits a grapheme.
pub fn truncate_to_width(text: &str, max_width: usize) -> &str {
    let mut used = 0;
    for (index, grapheme) in text.grapheme_indices(true) {
        let width = grapheme_width(grapheme);
        if used + width > max_width {
            return &text[..index];
        }
        used += width;
    }
    text
}

/// Truncate or right-pad `text` with spaces so it occupies exactly `width` cells.
///
/// A wide grapheme straddling the boundary is dropped and replaced by padding.
pub fn fit_to_width(text: &str, width: usize) -> String {
    let truncated = truncate_to_width(text, width);
    let used = visible_width(truncated);
    let mut out = String::with_capacity(truncated.len() + width.saturating_sub(used));
    out.push_str(truncated);
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(used)));
    out
}

/// Number of leading ASCII spaces.
pub fn leading_spaces(line: &str) -> usize {
    line.bytes().take_while(|byte| *byte == b' ').count()
}
