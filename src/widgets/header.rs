use crate::core::content::{Canvas, ContentModel};
use crate::core::style::AttrPair;
use crate::core::text::utils::fit_to_width;

/// One-row pane showing the full path of the hosted content.
///
/// Repaints only when the path changes.
#[derive(Debug, Default)]
pub struct HeaderLine {
    rendered: Option<String>,
}

impl HeaderLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the cached path so the next paint redraws.
    pub fn invalidate(&mut self) {
        self.rendered = None;
    }

    /// Returns whether anything was painted.
    pub fn paint(&mut self, canvas: &mut dyn Canvas, attrs: AttrPair, content: &dyn ContentModel) -> bool {
        let path = content.full_path();
        if self.rendered.as_deref() == Some(path) {
            return false;
        }
        self.rendered = Some(path.to_string());
        canvas.clear(attrs.normal);
        canvas.paint_text(0, 0, &fit_to_width(path, canvas.cols()), attrs.normal);
        true
    }
}
