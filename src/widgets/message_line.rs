use std::rc::Rc;

use crate::core::content::{Canvas, ContentModel, Message};
use crate::core::style::AttrPair;
use crate::core::text::utils::fit_to_width;

/// One-row pane for the content model's current message.
///
/// Messages are compared by identity: a fresh `Rc` with equal text still repaints.
#[derive(Debug, Default)]
pub struct MessageLine {
    rendered: Option<Rc<Message>>,
    stale: bool,
}

impl MessageLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalidate(&mut self) {
        self.rendered = None;
        self.stale = true;
    }

    /// Returns whether anything was painted.
    pub fn paint(&mut self, canvas: &mut dyn Canvas, attrs: AttrPair, content: &dyn ContentModel) -> bool {
        let message = content.message();
        let unchanged = !self.stale
            && match (&self.rendered, &message) {
                (Some(prev), Some(next)) => Rc::ptr_eq(prev, next),
                (None, None) => true,
                _ => false,
            };
        if unchanged {
            return false;
        }
        match &message {
            Some(message) => {
                canvas.paint_text(0, 0, &fit_to_width(&message.text, canvas.cols()), message.attr)
            }
            None => canvas.clear(attrs.normal),
        }
        self.rendered = message;
        self.stale = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::MessageLine;
    use crate::core::content::Message;
    use crate::core::style::{Attr, AttrPair};
    use crate::memory::MemoryBuffer;
    use crate::widgets::test_canvas::GridCanvas;

    #[test]
    fn compares_messages_by_identity() {
        let mut line = MessageLine::new();
        let mut canvas = GridCanvas::new(1, 8);
        let mut content = MemoryBuffer::new(Vec::new());
        let attrs = AttrPair::default();

        assert!(!line.paint(&mut canvas, attrs, &content));

        let saved = Message::new("saved", Attr::indexed(3, 87));
        content.set_message(Some(saved.clone()));
        assert!(line.paint(&mut canvas, attrs, &content));
        assert_eq!(canvas.row(0), "saved   ");
        assert_eq!(canvas.attr(0, 0), Attr::indexed(3, 87));
        assert!(!line.paint(&mut canvas, attrs, &content));

        content.set_message(Some(Message::new("saved", Attr::indexed(3, 87))));
        assert!(line.paint(&mut canvas, attrs, &content));
    }

    #[test]
    fn clearing_the_message_blanks_the_row() {
        let mut line = MessageLine::new();
        let mut canvas = GridCanvas::new(1, 4);
        let mut content = MemoryBuffer::new(Vec::new());
        let attrs = AttrPair::new(Attr::indexed(1, 2), Attr::DEFAULT);

        content.set_message(Some(Message::new("hey", Attr::DEFAULT)));
        line.paint(&mut canvas, attrs, &content);
        content.set_message(None);
        assert!(line.paint(&mut canvas, attrs, &content));
        assert_eq!(canvas.row(0), "    ");
        assert_eq!(canvas.attr(0, 3), Attr::indexed(1, 2));
    }

    #[test]
    fn invalidate_forces_a_repaint() {
        let mut line = MessageLine::new();
        let mut canvas = GridCanvas::new(1, 4);
        let content = MemoryBuffer::new(Vec::new());
        line.invalidate();
        assert!(line.paint(&mut canvas, AttrPair::default(), &content));
        assert!(!line.paint(&mut canvas, AttrPair::default(), &content));
    }
}
