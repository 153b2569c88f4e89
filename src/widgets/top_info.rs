//! Context breadcrumb above the viewport.
//!
//! The pane lists the enclosing block headers of the first visible line, innermost nearest
//! the text, topped by the file path. Its height is negotiated with the root pane on every
//! refresh rather than assigned by the layout pass.

use crate::config::TopInfoMode;
use crate::core::content::{Canvas, ContentModel};
use crate::core::style::AttrPair;
use crate::core::text::utils::{fit_to_width, leading_spaces};

#[derive(Debug, Default)]
pub struct TopInfo {
    mode: TopInfoMode,
    borrowed_rows: usize,
    /// Innermost context first, file path last.
    lines: Vec<String>,
}

impl TopInfo {
    pub fn new(mode: TopInfoMode) -> Self {
        Self {
            mode,
            borrowed_rows: 0,
            lines: Vec::new(),
        }
    }

    pub fn mode(&self) -> TopInfoMode {
        self.mode
    }

    /// Rows currently taken from the viewport below.
    pub fn borrowed_rows(&self) -> usize {
        self.borrowed_rows
    }

    pub(crate) fn set_borrowed_rows(&mut self, rows: usize) {
        self.borrowed_rows = rows;
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Recollect context for `content` and return the number of rows the pane wants.
    pub fn collect(&mut self, content: &dyn ContentModel) -> usize {
        let mut lines = context_lines(content.lines(), content.scroll().row);
        lines.push(content.full_path().to_string());
        self.lines = lines;
        self.mode.rows_for(self.lines.len())
    }

    /// Paint outermost at the top. The path always shows; short panes clip innermost lines.
    pub fn paint(&self, canvas: &mut dyn Canvas, attrs: AttrPair) {
        let rows = canvas.rows();
        let cols = canvas.cols();
        let shown = self.lines.len().min(rows);
        for (row, line) in self.lines.iter().rev().take(shown).enumerate() {
            canvas.paint_text(row, 0, &fit_to_width(line, cols), attrs.normal);
        }
        let blank = " ".repeat(cols);
        for row in shown..rows {
            canvas.paint_text(row, 0, &blank, attrs.normal);
        }
    }
}

fn indentation(line: &str) -> Option<usize> {
    if line.trim().is_empty() {
        None
    } else {
        Some(leading_spaces(line))
    }
}

/// Enclosing block headers of the line at `scroll_row`, innermost first.
pub fn context_lines(lines: &[String], scroll_row: usize) -> Vec<String> {
    let Some(last) = lines.len().checked_sub(1) else {
        return Vec::new();
    };
    let scroll_row = scroll_row.min(last);
    let Some((anchor, mut threshold)) = (0..=scroll_row)
        .rev()
        .find_map(|row| indentation(&lines[row]).map(|indent| (row, indent)))
    else {
        return Vec::new();
    };

    for line in &lines[anchor + 1..] {
        match indentation(line) {
            None => continue,
            Some(indent) if indent > threshold => threshold = indent,
            Some(_) => break,
        }
    }

    let mut collected = Vec::new();
    for line in lines[..=scroll_row].iter().rev() {
        if threshold == 0 {
            break;
        }
        if let Some(indent) = indentation(line).filter(|indent| *indent < threshold) {
            threshold = indent;
            collected.push(line.clone());
        }
    }
    collected
}
