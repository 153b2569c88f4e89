//! Window-composition core for a terminal multi-pane text editor.
//!
//! Invariant: single output gate: only `core::output::OutputGate::flush(..)` writes to the
//! terminal.
//!
//! # Public API Overview
//! - Build a [`RootPane`] from a [`PaneConfig`], the external [`Services`], and a
//!   [`ContentSource`]; feed it [`InputEvent`]s and call [`RootPane::render`] once per frame.
//! - Compose arbitrary trees of panes with [`PaneTree`] when the fixed editor layout is not
//!   wanted.
//! - Implement [`ContentModel`], [`Controller`], [`BufferManager`] and [`HistoryStore`] to plug
//!   in a text model and mode controllers; [`memory`] has in-memory versions.

pub mod config;
pub mod error;
pub mod logging;
pub mod memory;

pub mod core;
pub mod render;
pub mod runtime;
pub mod widgets;

/// Configuration.
pub use crate::config::{LaunchOptions, PaneConfig, Theme, TopInfoMode};
/// Errors.
pub use crate::error::{PaneError, Result, SurfaceError};
/// Diagnostics sink.
pub use crate::logging::{LogBuffer, LogBufferLayer};

/// External collaborator contracts.
pub use crate::core::content::{Canvas, ContentModel, Message, SelectionMode, SharedContent};
pub use crate::core::controller::{
    Controller, ControllerFactory, ControllerKind, PaneRequest, PaneSlot, RequestQueue,
};
pub use crate::core::services::{BufferManager, ContentSource, HistoryStore, Services};

/// Geometry, style and input types.
pub use crate::core::geometry::{Position, Rect};
pub use crate::core::input_event::{InputEvent, Modifiers, PointerEvent, PointerKind};
pub use crate::core::style::{Attr, AttrPair, Color};

/// Terminal output.
pub use crate::core::output::{OutputGate, TerminalCmd};
pub use crate::core::terminal::Terminal;
pub use crate::render::{Cell, Screen, Surface, SurfaceStats};

/// Pane tree runtime.
pub use crate::runtime::{Node, NodeId, Pane, PaneTree, RootPane};
pub use crate::widgets::PromptKind;

/// Width helpers.
pub use crate::core::text::utils::{fit_to_width, truncate_to_width};
pub use crate::core::text::width::visible_width;
