//! Error types for pane operations.
//!
//! Nothing here is fatal to an editing session: tree operations log these at debug level and
//! carry on with the previous geometry or an imperfect frame.

use thiserror::Error;

use crate::runtime::node::NodeId;

/// Failures of the terminal-surface primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("surface origin ({top}, {left}) lies outside the screen")]
    OffScreen { top: usize, left: usize },
    #[error("cursor ({row}, {col}) lies outside the surface")]
    CursorOutOfBounds { row: usize, col: usize },
    #[error("surface size {rows}x{cols} exceeds the addressable terminal")]
    Oversized { rows: usize, cols: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaneError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error("relative resize would leave {rows} rows by {cols} cols")]
    NonPositiveGeometry { rows: isize, cols: isize },
    #[error("node {node:?} is not a child of its parent")]
    NotAChild { node: NodeId },
    #[error("node {node:?} is not registered in this tree")]
    UnknownNode { node: NodeId },
}

pub type Result<T, E = PaneError> = std::result::Result<T, E>;
