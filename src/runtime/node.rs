//! Pane-tree nodes and the arena that owns them.

use crate::core::content::SharedContent;
use crate::core::controller::Controller;
use crate::core::geometry::Rect;
use crate::core::style::AttrPair;
use crate::error::{PaneError, Result};
use crate::render::surface::Surface;
use crate::widgets::{
    HeaderLine, LabeledLine, LineNumbers, LogWindow, MessageLine, PaletteWindow, StatusLine,
    TopInfo,
};

/// Stable handle for a node owned by a single [`PaneTree`](crate::runtime::tree::PaneTree).
///
/// Semantics:
/// - IDs are unique within a tree.
/// - IDs are never reused; nodes live as long as the tree.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeId(usize);

impl NodeId {
    pub fn raw(self) -> usize {
        self.0
    }

    fn index(self) -> usize {
        self.0
    }
}

/// The closed set of pane kinds. Each variant decides how the node paints itself.
pub enum Pane {
    /// Flushes its surface and its children; paints nothing itself.
    Plain,
    /// Fixed text painted at the origin on every refresh.
    Label(String),
    /// A focusable view onto a content model.
    Viewport,
    Header(HeaderLine),
    LineNumbers(LineNumbers),
    Status(StatusLine),
    Message(MessageLine),
    TopInfo(TopInfo),
    Log(LogWindow),
    Palette(PaletteWindow),
    Prompt(LabeledLine),
}

impl Pane {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Label(_) => "label",
            Self::Viewport => "viewport",
            Self::Header(_) => "header",
            Self::LineNumbers(_) => "line-numbers",
            Self::Status(_) => "status",
            Self::Message(_) => "message",
            Self::TopInfo(_) => "top-info",
            Self::Log(_) => "log",
            Self::Palette(_) => "palette",
            Self::Prompt(_) => "prompt",
        }
    }
}

/// Focus-related state carried only by focusable nodes.
#[derive(Default)]
pub struct FocusSlot {
    pub(crate) focused: bool,
    pub(crate) content: Option<SharedContent>,
    pub(crate) controller: Option<Box<dyn Controller>>,
}

pub struct Node {
    pub(crate) rect: Rect,
    pub(crate) attrs: AttrPair,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) surface: Surface,
    /// Node whose content model this pane reports on.
    pub(crate) host: Option<NodeId>,
    pub(crate) focus: Option<FocusSlot>,
    pub(crate) pane: Pane,
}

impl Node {
    fn new(pane: Pane, attrs: AttrPair, focus: Option<FocusSlot>) -> Self {
        let rect = Rect::new(0, 0, 1, 1);
        Self {
            rect,
            attrs,
            parent: None,
            children: Vec::new(),
            surface: Surface::new(rect),
            host: None,
            focus,
            pane,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn attrs(&self) -> AttrPair {
        self.attrs
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child z-order, in registration order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn pane(&self) -> &Pane {
        &self.pane
    }

    pub fn is_focusable(&self) -> bool {
        self.focus.is_some()
    }

    pub fn is_focused(&self) -> bool {
        self.focus.as_ref().is_some_and(|slot| slot.focused)
    }

    pub fn content(&self) -> Option<SharedContent> {
        self.focus.as_ref().and_then(|slot| slot.content.clone())
    }
}

#[derive(Default)]
pub(crate) struct NodeRegistry {
    entries: Vec<Node>,
}

impl NodeRegistry {
    pub(crate) fn register(
        &mut self,
        pane: Pane,
        attrs: AttrPair,
        focus: Option<FocusSlot>,
    ) -> NodeId {
        let id = NodeId(self.entries.len());
        self.entries.push(Node::new(pane, attrs, focus));
        id
    }

    pub(crate) fn get(&self, id: NodeId) -> Result<&Node> {
        self.entries
            .get(id.index())
            .ok_or(PaneError::UnknownNode { node: id })
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.entries
            .get_mut(id.index())
            .ok_or(PaneError::UnknownNode { node: id })
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{NodeRegistry, Pane};
    use crate::core::style::AttrPair;
    use crate::error::PaneError;

    #[test]
    fn ids_are_sequential_and_resolvable() {
        let mut registry = NodeRegistry::default();
        let first = registry.register(Pane::Plain, AttrPair::default(), None);
        let second = registry.register(Pane::Viewport, AttrPair::default(), None);
        assert_eq!(first.raw(), 0);
        assert_eq!(second.raw(), 1);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(second).map(|node| node.pane().name()).ok(), Some("viewport"));
    }

    #[test]
    fn foreign_ids_are_reported() {
        let mut registry = NodeRegistry::default();
        let id = registry.register(Pane::Plain, AttrPair::default(), None);
        let empty = NodeRegistry::default();
        assert_eq!(empty.get(id).err(), Some(PaneError::UnknownNode { node: id }));
    }
}
