//! Tracks which node holds the keyboard focus.

use crate::runtime::node::NodeId;

#[derive(Debug, Default)]
pub struct FocusState {
    focused: Option<NodeId>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `target` as the focus holder and returns the node that lost focus, if any.
    pub fn set_focus(&mut self, target: NodeId) -> Option<NodeId> {
        match self.focused.replace(target) {
            Some(prev) if prev != target => Some(prev),
            _ => None,
        }
    }

    /// Forgets `target` if it is the focus holder.
    pub fn release(&mut self, target: NodeId) -> bool {
        if self.focused == Some(target) {
            self.focused = None;
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.focused = None;
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }
}
