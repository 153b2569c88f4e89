use crate::core::content::{Canvas, ContentModel};
use crate::core::style::AttrPair;
use crate::core::text::utils::fit_to_width;
use crate::core::text::width::visible_width;

/// One-row pane summarising the hosted content: path, dirty marker, grammar, selection mode,
/// cursor position and how far through the file and line the cursor is.
#[derive(Debug, Default)]
pub struct StatusLine;

impl StatusLine {
    pub fn new() -> Self {
        Self
    }

    pub fn paint(&self, canvas: &mut dyn Canvas, attrs: AttrPair, content: &dyn ContentModel) {
        let line = status_text(content, canvas.cols());
        canvas.paint_text(0, 0, &line, attrs.normal);
    }
}

/// `(row, col)` percentages of the cursor through the file and through its line.
pub fn cursor_percentages(content: &dyn ContentModel) -> (usize, usize) {
    let lines = content.lines();
    if lines.is_empty() {
        return (0, 0);
    }
    let cursor = content.cursor();
    let row = if cursor.row >= lines.len() - 1 {
        100
    } else {
        cursor.row * 100 / lines.len()
    };
    let line_len = lines.get(cursor.row).map_or(0, |line| line.chars().count());
    let col = if cursor.col < line_len {
        cursor.col * 100 / line_len
    } else {
        100
    };
    (row, col)
}

/// The status text padded or truncated to exactly `width` cells.
pub fn status_text(content: &dyn ContentModel, width: usize) -> String {
    let marker = if content.is_dirty() { " * " } else { " . " };
    let left = format!("{}{}", content.relative_path(), marker);
    let cursor = content.cursor();
    let (row_pct, col_pct) = cursor_percentages(content);
    let right = format!(
        "{} | {} | {:4},{:2} | {:3}%,{:3}%",
        content.cursor_grammar_name(),
        content.selection_mode_name(),
        cursor.row + 1,
        cursor.col + 1,
        row_pct,
        col_pct,
    );
    let gap = width.saturating_sub(visible_width(&left) + visible_width(&right));
    fit_to_width(&format!("{left}{}{right}", " ".repeat(gap)), width)
}
