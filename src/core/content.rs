//! Content-model contract.
//!
//! The text model (line storage, cursor, selection, undo, search) lives outside this crate.
//! Panes read its cursor/scroll state, forward pointer events to it verbatim, and let it paint
//! itself through a [`Canvas`].

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::geometry::Position;
use crate::core::input_event::PointerEvent;
use crate::core::style::{Attr, AttrPair};

/// Paint target handed to content models and pane painters.
///
/// Writes outside the canvas are clipped silently.
pub trait Canvas {
    fn rows(&self) -> usize;
    fn cols(&self) -> usize;

    /// Write as many leading graphemes of `text` as fit, starting at `(row, col)`.
    fn paint_text(&mut self, row: usize, col: usize, text: &str, attr: Attr);

    /// Recolour `count` cells without changing their characters.
    fn paint_attr(&mut self, row: usize, col: usize, count: usize, attr: Attr);

    /// Fill the whole canvas with blanks in `attr`.
    fn clear(&mut self, attr: Attr);
}

/// A status message. Panes compare messages by identity (`Rc::ptr_eq`), not by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub attr: Attr,
}

impl Message {
    pub fn new(text: impl Into<String>, attr: Attr) -> Rc<Self> {
        Rc::new(Self {
            text: text.into(),
            attr,
        })
    }
}

/// Selection mode used when placing the cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionMode {
    #[default]
    None,
    All,
    Block,
    Character,
    Line,
    Word,
}

impl SelectionMode {
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::All => "All",
            Self::Block => "Block",
            Self::Character => "Char",
            Self::Line => "Line",
            Self::Word => "Word",
        }
    }
}

pub trait ContentModel {
    fn lines(&self) -> &[String];
    fn cursor(&self) -> Position;
    fn scroll(&self) -> Position;

    fn full_path(&self) -> &str;
    fn relative_path(&self) -> &str;
    fn is_dirty(&self) -> bool;

    /// Current message for the message line, if any.
    fn message(&self) -> Option<Rc<Message>>;

    fn cursor_grammar_name(&self) -> &str;
    fn selection_mode_name(&self) -> &str;

    /// Place the cursor at `(row, col)` and select `length` characters in `mode`.
    fn select_text(&mut self, row: usize, col: usize, length: usize, mode: SelectionMode);

    /// Recompute the scroll offset after the viewport changed size.
    fn update_scroll_position(&mut self);

    /// Column at which the model draws its line-length guide.
    fn set_line_limit_indicator(&mut self, _col: usize) {}

    /// Pointer input with node-relative coordinates.
    fn pointer(&mut self, event: PointerEvent);

    /// Paint the visible portion of the model into `canvas`.
    fn draw(&self, canvas: &mut dyn Canvas, attrs: AttrPair);
}

/// Non-owning handle panes keep to a content model owned by the root configuration.
pub type SharedContent = Rc<RefCell<dyn ContentModel>>;
