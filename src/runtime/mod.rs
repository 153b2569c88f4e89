//! Pane tree runtime: the node arena, focus tracking, and the root pane.

pub mod focus;
pub mod node;
pub mod root;
pub mod tree;

pub use focus::FocusState;
pub use node::{Node, NodeId, Pane};
pub use root::RootPane;
pub use tree::PaneTree;
