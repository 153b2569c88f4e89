//! The retained pane tree.
//!
//! Every node lives in one arena and is addressed by [`NodeId`]. A node's `children` list is its
//! z-order: `show` and `focus` move a node to the end. Refresh walks children back to front;
//! hit-testing walks them front to back. The two orders are intentionally not unified.

use tracing::{debug, info};

use crate::core::content::{Canvas, ContentModel, SharedContent};
use crate::core::controller::Controller;
use crate::core::geometry::{offset, Rect};
use crate::core::input_event::{InputEvent, PointerEvent};
use crate::core::style::AttrPair;
use crate::error::{PaneError, Result};
use crate::render::screen::Screen;
use crate::render::surface::Surface;
use crate::runtime::focus::FocusState;
use crate::runtime::node::{FocusSlot, Node, NodeId, NodeRegistry, Pane};

pub struct PaneTree {
    registry: NodeRegistry,
    screen: Screen,
    focus: FocusState,
    paint_order: Vec<NodeId>,
}

impl PaneTree {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            registry: NodeRegistry::default(),
            screen: Screen::new(rows, cols),
            focus: FocusState::new(),
            paint_order: Vec::new(),
        }
    }

    /// Register a node that cannot take focus. It starts detached.
    pub fn add_node(&mut self, pane: Pane, attrs: AttrPair) -> NodeId {
        self.registry.register(pane, attrs, None)
    }

    pub fn add_focusable(
        &mut self,
        pane: Pane,
        attrs: AttrPair,
        controller: Option<Box<dyn Controller>>,
    ) -> NodeId {
        let slot = FocusSlot {
            controller,
            ..FocusSlot::default()
        };
        self.registry.register(pane, attrs, Some(slot))
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.len() == 0
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.registry.get(id).ok()
    }

    pub fn rect(&self, id: NodeId) -> Option<Rect> {
        self.node(id).map(Node::rect)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(Node::children).unwrap_or_default()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(Node::parent)
    }

    /// Whether the node is currently a member of its parent's z-order.
    pub fn is_shown(&self, id: NodeId) -> bool {
        self.parent(id)
            .is_some_and(|parent| self.children(parent).contains(&id))
    }

    pub fn is_focused(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(Node::is_focused)
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focus.focused()
    }

    pub fn content(&self, id: NodeId) -> Option<SharedContent> {
        self.node(id).and_then(Node::content)
    }

    pub fn pane(&self, id: NodeId) -> Option<&Pane> {
        self.node(id).map(Node::pane)
    }

    pub(crate) fn pane_mut(&mut self, id: NodeId) -> Option<&mut Pane> {
        self.registry.get_mut(id).ok().map(|node| &mut node.pane)
    }

    pub fn surface(&self, id: NodeId) -> Option<&Surface> {
        self.node(id).map(Node::surface)
    }

    pub(crate) fn surface_mut(&mut self, id: NodeId) -> Option<&mut Surface> {
        self.registry.get_mut(id).ok().map(|node| &mut node.surface)
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    /// Nodes visited by refresh since the last [`begin_frame`](Self::begin_frame).
    pub fn last_paint_order(&self) -> &[NodeId] {
        &self.paint_order
    }

    pub fn begin_frame(&mut self) {
        self.paint_order.clear();
        self.screen.begin_frame();
    }

    /// Make `id` report on the content attached to `host`.
    pub fn set_host(&mut self, id: NodeId, host: NodeId) {
        if let Ok(node) = self.registry.get_mut(id) {
            node.host = Some(host);
        }
    }

    pub fn move_to(&mut self, id: NodeId, top: usize, left: usize) {
        let Ok(node) = self.registry.get_mut(id) else {
            return log_unknown(id);
        };
        if node.rect.top == top && node.rect.left == left {
            return;
        }
        node.rect.top = top;
        node.rect.left = left;
        if let Err(err) = node.surface.move_to(top, left) {
            debug!(node = id.raw(), error = %err, "surface move failed");
        }
    }

    pub fn resize_to(&mut self, id: NodeId, rows: usize, cols: usize) {
        let Ok(node) = self.registry.get_mut(id) else {
            return log_unknown(id);
        };
        if node.rect.rows == rows && node.rect.cols == cols {
            return;
        }
        node.rect.rows = rows;
        node.rect.cols = cols;
        resize_surface(id, node);
    }

    /// Grow or shrink by a delta. A result with no rows or no columns is rejected.
    pub fn resize_by(&mut self, id: NodeId, d_rows: isize, d_cols: isize) -> Result<()> {
        let node = self.registry.get_mut(id)?;
        let rows = offset(node.rect.rows, d_rows).filter(|rows| *rows > 0);
        let cols = offset(node.rect.cols, d_cols).filter(|cols| *cols > 0);
        let (Some(rows), Some(cols)) = (rows, cols) else {
            return Err(PaneError::NonPositiveGeometry {
                rows: signed(node.rect.rows).saturating_add(d_rows),
                cols: signed(node.rect.cols).saturating_add(d_cols),
            });
        };
        node.rect.rows = rows;
        node.rect.cols = cols;
        resize_surface(id, node);
        Ok(())
    }

    /// Move the top edge down by `d_rows` (up when negative), keeping the bottom edge fixed.
    pub fn resize_top_by(&mut self, id: NodeId, d_rows: isize) -> Result<()> {
        let node = self.registry.get_mut(id)?;
        let rows = d_rows
            .checked_neg()
            .and_then(|shrink| offset(node.rect.rows, shrink))
            .filter(|rows| *rows > 0);
        let top = offset(node.rect.top, d_rows);
        let (Some(rows), Some(top)) = (rows, top) else {
            return Err(PaneError::NonPositiveGeometry {
                rows: signed(node.rect.rows).saturating_sub(d_rows),
                cols: signed(node.rect.cols),
            });
        };
        node.rect.top = top;
        node.rect.rows = rows;
        if let Err(err) = node.surface.move_to(top, node.rect.left) {
            debug!(node = id.raw(), error = %err, "surface move failed");
        }
        resize_surface(id, node);
        Ok(())
    }

    /// Move then resize. Prompt lines split the rectangle between their label and field.
    pub fn reshape(&mut self, id: NodeId, rows: usize, cols: usize, top: usize, left: usize) {
        let target = Rect::new(top, left, rows, cols);
        let split = match self.pane(id) {
            Some(Pane::Prompt(line)) => Some((line.label_node(), line.split(target))),
            _ => None,
        };
        let target = match split {
            Some((label, (label_rect, field))) => {
                self.place(label, label_rect);
                field
            }
            None => target,
        };
        self.place(id, target);
    }

    fn place(&mut self, id: NodeId, rect: Rect) {
        self.move_to(id, rect.top, rect.left);
        self.resize_to(id, rect.rows, rect.cols);
    }

    /// Detach from the current parent and insert into `parent`'s z-order at `index`.
    pub fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>, index: usize) {
        if self.registry.get(id).is_err() {
            return log_unknown(id);
        }
        if let Some(parent) = parent {
            if self.registry.get(parent).is_err() {
                return log_unknown(parent);
            }
            if self.is_ancestor_or_self(id, parent) {
                debug!(node = id.raw(), parent = parent.raw(), "set_parent would form a cycle");
                return;
            }
        }
        self.detach(id);
        if let Ok(node) = self.registry.get_mut(id) {
            node.parent = parent;
        }
        if let Some(parent) = parent.and_then(|parent| self.registry.get_mut(parent).ok()) {
            let index = index.min(parent.children.len());
            parent.children.insert(index, id);
        }
    }

    /// Register as the most recently shown sibling.
    pub fn show(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            debug!(node = id.raw(), "show on a node without a parent");
            return;
        };
        self.detach(id);
        if let Ok(parent) = self.registry.get_mut(parent) {
            parent.children.push(id);
        }
    }

    pub fn hide(&mut self, id: NodeId) {
        if !self.detach(id) {
            debug!(error = %PaneError::NotAChild { node: id }, "hide ignored");
        }
    }

    fn detach(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.parent(id) else {
            return false;
        };
        let Ok(parent) = self.registry.get_mut(parent) else {
            return false;
        };
        match parent.children.iter().position(|child| *child == id) {
            Some(index) => {
                parent.children.remove(index);
                true
            }
            None => false,
        }
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, mut id: NodeId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.parent(id) {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }

    /// Hit-test: children in registration order first, then the node itself.
    pub fn contains(&self, id: NodeId, row: usize, col: usize) -> Option<NodeId> {
        let node = self.node(id)?;
        node.children
            .iter()
            .find_map(|child| self.contains(*child, row, col))
            .or_else(|| node.rect.contains(row, col).then_some(id))
    }

    /// Give `id` the focus. A different holder is unfocused first, so at most one node is
    /// focused at a time.
    pub fn focus(&mut self, id: NodeId) {
        match self.registry.get(id) {
            Err(_) => return log_unknown(id),
            Ok(node) if !node.is_focusable() => {
                debug!(node = id.raw(), pane = node.pane.name(), "focus on a static pane");
                return;
            }
            Ok(_) => {}
        }
        if let Some(previous) = self.focus.focused().filter(|holder| *holder != id) {
            self.unfocus(previous);
        }
        let Ok(node) = self.registry.get_mut(id) else {
            return log_unknown(id);
        };
        let Some(slot) = node.focus.as_mut() else {
            return;
        };
        slot.focused = true;
        node.surface.set_cursor_enabled(true);
        let label = prompt_label(&node.pane);
        let pane = node.pane.name();
        self.show(id);
        if let Some(label) = label {
            self.show(label);
        }
        if let Some(slot) = self.focus_slot_mut(id) {
            if let Some(controller) = slot.controller.as_mut() {
                controller.on_focus();
            }
        }
        self.focus.set_focus(id);
        info!(node = id.raw(), pane, "focus");
    }

    pub fn unfocus(&mut self, id: NodeId) {
        let Ok(node) = self.registry.get(id) else {
            return log_unknown(id);
        };
        if !node.is_focusable() {
            return;
        }
        let pane = node.pane.name();
        if let Some(label) = prompt_label(&node.pane) {
            self.blank(id);
            self.hide(id);
            self.blank(label);
            self.hide(label);
        }
        if let Ok(node) = self.registry.get_mut(id) {
            node.surface.set_cursor_enabled(false);
            if let Some(slot) = node.focus.as_mut() {
                slot.focused = false;
                if let Some(controller) = slot.controller.as_mut() {
                    controller.on_unfocus();
                }
            }
        }
        self.focus.release(id);
        info!(node = id.raw(), pane, "unfocus");
    }

    fn focus_slot_mut(&mut self, id: NodeId) -> Option<&mut FocusSlot> {
        self.registry.get_mut(id).ok()?.focus.as_mut()
    }

    /// Attach a content model and hand it to the node's controller.
    pub fn set_content(&mut self, id: NodeId, content: SharedContent) {
        let Some(slot) = self.focus_slot_mut(id) else {
            debug!(node = id.raw(), "content attached to a static pane");
            return;
        };
        slot.content = Some(content.clone());
        if let Some(controller) = slot.controller.as_mut() {
            controller.bind_content(content);
        }
    }

    /// Forward a pointer event to the node's content in node-relative coordinates.
    pub fn pointer(&mut self, id: NodeId, event: PointerEvent) {
        let Some(node) = self.node(id) else {
            return log_unknown(id);
        };
        let Some(content) = node.content() else {
            debug!(node = id.raw(), pane = node.pane.name(), "pointer event ignored");
            return;
        };
        let local = event.relative_to(node.rect.top, node.rect.left);
        content.borrow_mut().pointer(local);
    }

    /// Forward an input event to the node's controller.
    pub fn handle_event(&mut self, id: NodeId, event: &InputEvent) {
        match self
            .focus_slot_mut(id)
            .and_then(|slot| slot.controller.as_mut())
        {
            Some(controller) => controller.handle_event(event),
            None => debug!(node = id.raw(), "event dropped: no controller"),
        }
    }

    /// Clear the node's surface to its normal attribute and commit it.
    pub fn blank(&mut self, id: NodeId) {
        let Self {
            registry, screen, ..
        } = self;
        if let Ok(node) = registry.get_mut(id) {
            let normal = node.attrs.normal;
            node.surface.clear(normal);
            node.surface.flush(screen);
        }
    }

    /// Commit the node's surface as it stands.
    pub fn flush(&mut self, id: NodeId) {
        let Self {
            registry, screen, ..
        } = self;
        if let Ok(node) = registry.get_mut(id) {
            node.surface.flush(screen);
        }
    }

    /// Repaint the node, then its children from last-registered to first.
    pub fn refresh(&mut self, id: NodeId) {
        self.paint_order.push(id);
        let hosted = self
            .node(id)
            .and_then(|node| node.host)
            .and_then(|host| self.content(host));
        let Self {
            registry, screen, ..
        } = self;
        let Ok(node) = registry.get_mut(id) else {
            return log_unknown(id);
        };
        let attrs = node.attrs;
        let surface = &mut node.surface;
        let descend = match &mut node.pane {
            Pane::Plain => {
                surface.flush(screen);
                true
            }
            Pane::Label(text) => {
                surface.paint_text(0, 0, text, attrs.normal);
                surface.flush(screen);
                true
            }
            Pane::Viewport | Pane::Prompt(_) => {
                refresh_focusable(surface, node.focus.as_ref(), attrs, screen);
                true
            }
            Pane::Palette(palette) => {
                palette.paint(surface);
                surface.flush(screen);
                false
            }
            Pane::Log(log) => {
                log.paint(surface, attrs);
                surface.flush(screen);
                true
            }
            Pane::TopInfo(top_info) => {
                top_info.paint(surface, attrs);
                surface.flush(screen);
                false
            }
            Pane::Header(header) => {
                let painted = hosted
                    .as_ref()
                    .is_some_and(|content| header.paint(surface, attrs, &*content.borrow()));
                if painted {
                    surface.flush(screen);
                }
                false
            }
            Pane::Message(message) => {
                let painted = hosted
                    .as_ref()
                    .is_some_and(|content| message.paint(surface, attrs, &*content.borrow()));
                if painted {
                    surface.flush(screen);
                }
                false
            }
            Pane::Status(status) => {
                if let Some(content) = &hosted {
                    status.paint(surface, attrs, &*content.borrow());
                }
                surface.flush(screen);
                false
            }
            Pane::LineNumbers(gutter) => {
                if let Some(content) = &hosted {
                    gutter.paint(surface, attrs, &*content.borrow());
                }
                surface.flush(screen);
                false
            }
        };
        if descend {
            let children = node.children.clone();
            for child in children.into_iter().rev() {
                self.refresh(child);
            }
        }
    }
}

fn refresh_focusable(
    surface: &mut Surface,
    slot: Option<&FocusSlot>,
    attrs: AttrPair,
    screen: &mut Screen,
) {
    if let Some(slot) = slot {
        if let Some(content) = &slot.content {
            let content = content.borrow();
            content.draw(surface, attrs);
            if slot.focused {
                place_cursor(surface, &*content);
            }
        }
    }
    surface.flush(screen);
}

fn place_cursor(surface: &mut Surface, content: &dyn ContentModel) {
    let cursor = content.cursor();
    let scroll = content.scroll();
    let local = cursor
        .row
        .checked_sub(scroll.row)
        .zip(cursor.col.checked_sub(scroll.col));
    let placed = match local {
        Some((row, col)) => surface.set_cursor(row, col),
        None => {
            surface.clear_cursor();
            Ok(())
        }
    };
    if let Err(err) = placed {
        debug!(error = %err, "cursor outside the viewport");
    }
}

fn prompt_label(pane: &Pane) -> Option<NodeId> {
    match pane {
        Pane::Prompt(line) => Some(line.label_node()),
        _ => None,
    }
}

fn resize_surface(id: NodeId, node: &mut Node) {
    if let Err(err) = node.surface.resize(node.rect.rows, node.rect.cols) {
        debug!(node = id.raw(), error = %err, "surface resize failed");
    }
}

fn signed(value: usize) -> isize {
    isize::try_from(value).unwrap_or(isize::MAX)
}

fn log_unknown(id: NodeId) {
    debug!(error = %PaneError::UnknownNode { node: id }, "operation ignored");
}
