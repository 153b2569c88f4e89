#![allow(unused_imports)]

use pane_tui::memory::{
    ControllerCall, ControllerLog, MemoryBuffer, MemoryBuffers, MemoryHistory,
    RecordingController, RecordingControllers,
};
use pane_tui::{
    fit_to_width, truncate_to_width, visible_width, Attr, AttrPair, BufferManager, Canvas, Cell,
    Color, ContentModel, ContentSource, Controller, ControllerFactory, ControllerKind,
    HistoryStore, InputEvent, LaunchOptions, LogBuffer, LogBufferLayer, Message, Modifiers, Node,
    NodeId, OutputGate, Pane, PaneConfig, PaneError, PaneRequest, PaneSlot, PaneTree,
    PointerEvent, PointerKind, Position, PromptKind, Rect, RequestQueue, Result, RootPane, Screen,
    SelectionMode, Services, SharedContent, Surface, SurfaceError, SurfaceStats, Terminal,
    TerminalCmd, Theme, TopInfoMode,
};

#[test]
fn public_api_exports_compile() {}
