//! Mode-controller contract and the request queue controllers use to steer panes.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::rc::Rc;

use crate::core::content::SharedContent;
use crate::core::input_event::InputEvent;

/// Which controller a pane is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerKind {
    Main,
    Find,
    Goto,
    Open,
    Quit,
    SaveAs,
    Palette,
}

/// Interprets input for one focusable pane.
pub trait Controller {
    fn on_focus(&mut self) {}
    fn on_unfocus(&mut self) {}
    fn bind_content(&mut self, _content: SharedContent) {}
    fn handle_event(&mut self, _event: &InputEvent) {}
}

/// Named panes owned by the root pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaneSlot {
    Main,
    Header,
    TopInfo,
    LineNumbers,
    RightColumn,
    Status,
    Message,
    Find,
    Goto,
    Open,
    Quit,
    SaveAs,
    Palette,
    Log,
}

/// Requests a controller may queue for the root pane to apply after the current event.
#[derive(Clone)]
pub enum PaneRequest {
    Show(PaneSlot),
    Hide(PaneSlot),
    /// Move focus from the currently focused pane to the slot.
    Focus(PaneSlot),
    /// Load a file through the buffer manager and make it the main content.
    Open(PathBuf),
    /// Replace the main content with an already loaded model.
    SetContent(SharedContent),
}

impl std::fmt::Debug for PaneRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Show(slot) => f.debug_tuple("Show").field(slot).finish(),
            Self::Hide(slot) => f.debug_tuple("Hide").field(slot).finish(),
            Self::Focus(slot) => f.debug_tuple("Focus").field(slot).finish(),
            Self::Open(path) => f.debug_tuple("Open").field(path).finish(),
            Self::SetContent(_) => f.write_str("SetContent(..)"),
        }
    }
}

/// Shared FIFO of [`PaneRequest`]s. Cloning shares the queue.
#[derive(Clone, Default)]
pub struct RequestQueue {
    inner: Rc<RefCell<VecDeque<PaneRequest>>>,
}

impl RequestQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, request: PaneRequest) {
        self.inner.borrow_mut().push_back(request);
    }

    pub fn pop(&self) -> Option<PaneRequest> {
        self.inner.borrow_mut().pop_front()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

/// Instantiates controllers for the panes the root pane builds.
pub trait ControllerFactory {
    fn create(
        &mut self,
        kind: ControllerKind,
        content: SharedContent,
        requests: RequestQueue,
    ) -> Box<dyn Controller>;
}
