use tracing::trace;

use crate::core::content::Canvas;
use crate::core::style::AttrPair;
use crate::core::text::utils::fit_to_width;
use crate::logging::LogBuffer;

/// Overlay listing the most recent diagnostic lines, oldest at the top.
#[derive(Debug)]
pub struct LogWindow {
    buffer: LogBuffer,
    refreshes: usize,
}

impl LogWindow {
    pub fn new(buffer: LogBuffer) -> Self {
        Self {
            buffer,
            refreshes: 0,
        }
    }

    pub fn refreshes(&self) -> usize {
        self.refreshes
    }

    pub fn paint(&mut self, canvas: &mut dyn Canvas, attrs: AttrPair) {
        self.refreshes += 1;
        trace!(refreshes = self.refreshes, "log window refresh");
        canvas.clear(attrs.normal);
        let cols = canvas.cols();
        for (row, line) in self.buffer.tail(canvas.rows()).iter().enumerate() {
            canvas.paint_text(row, 0, &fit_to_width(line, cols), attrs.normal);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LogWindow;
    use crate::core::style::AttrPair;
    use crate::logging::LogBuffer;
    use crate::widgets::test_canvas::GridCanvas;

    #[test]
    fn shows_newest_lines_that_fit() {
        let buffer = LogBuffer::new();
        for line in ["one", "two", "three"] {
            buffer.push(line);
        }
        let mut window = LogWindow::new(buffer.clone());
        let mut canvas = GridCanvas::new(2, 5);
        window.paint(&mut canvas, AttrPair::default());
        assert_eq!(canvas.row(0), "two  ");
        assert_eq!(canvas.row(1), "three");

        buffer.push("four");
        window.paint(&mut canvas, AttrPair::default());
        assert_eq!(canvas.row(0), "three");
        assert_eq!(window.refreshes(), 2);
    }
}
