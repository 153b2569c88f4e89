use crate::core::content::{Canvas, ContentModel};
use crate::core::style::{Attr, AttrPair};

const BLANK_GUTTER: &str = "       ";

/// Left gutter: a right-justified line number per visible row, the cursor row highlighted.
#[derive(Debug, Default)]
pub struct LineNumbers;

impl LineNumbers {
    pub fn new() -> Self {
        Self
    }

    pub fn paint(&self, canvas: &mut dyn Canvas, attrs: AttrPair, content: &dyn ContentModel) {
        let rows = canvas.rows();
        let scroll_row = content.scroll().row;
        let limit = rows.min(content.lines().len().saturating_sub(scroll_row));
        for row in 0..limit {
            let label = format!(" {:5}  ", scroll_row + row + 1);
            canvas.paint_text(row, 0, &label, attrs.normal);
        }
        for row in limit..rows {
            canvas.paint_text(row, 0, BLANK_GUTTER, Attr::DEFAULT);
        }
        let cursor_row = content.cursor().row;
        if let Some(row) = cursor_row.checked_sub(scroll_row).filter(|row| *row < limit) {
            canvas.paint_text(row, 1, &format!("{:5}", cursor_row + 1), attrs.selected);
        }
    }
}
