//! In-memory collaborators: a line-vector content model, a buffer manager over a file map,
//! a history map, and controllers that record what the pane tree tells them.
//!
//! These are enough to drive a [`RootPane`](crate::runtime::root::RootPane) without a real
//! editor behind it, and are what the integration tests build on.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::debug;

use crate::core::content::{Canvas, ContentModel, Message, SelectionMode, SharedContent};
use crate::core::controller::{
    Controller, ControllerFactory, ControllerKind, PaneRequest, RequestQueue,
};
use crate::core::geometry::Position;
use crate::core::input_event::{InputEvent, PointerEvent};
use crate::core::services::{BufferManager, HistoryStore};
use crate::core::style::AttrPair;
use crate::core::text::utils::fit_to_width;

#[derive(Debug, Default)]
pub struct MemoryBuffer {
    lines: Vec<String>,
    cursor: Position,
    scroll: Position,
    full_path: String,
    relative_path: String,
    dirty: bool,
    message: Option<Rc<Message>>,
    grammar: String,
    selection: SelectionMode,
    line_limit: Option<usize>,
    pointer_events: Vec<PointerEvent>,
    scroll_updates: usize,
}

impl MemoryBuffer {
    pub fn new(lines: Vec<String>) -> Self {
        Self {
            lines,
            grammar: "text".to_string(),
            ..Self::default()
        }
    }

    pub fn from_text(text: &str) -> Self {
        Self::new(text.lines().map(str::to_string).collect())
    }

    pub fn with_path(mut self, full_path: impl Into<String>, relative_path: impl Into<String>) -> Self {
        self.full_path = full_path.into();
        self.relative_path = relative_path.into();
        self
    }

    pub fn with_grammar(mut self, grammar: impl Into<String>) -> Self {
        self.grammar = grammar.into();
        self
    }

    pub fn shared(self) -> SharedContent {
        Rc::new(RefCell::new(self))
    }

    pub fn set_cursor(&mut self, row: usize, col: usize) {
        self.cursor = Position::new(row, col);
    }

    pub fn set_scroll(&mut self, row: usize, col: usize) {
        self.scroll = Position::new(row, col);
    }

    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }

    pub fn set_message(&mut self, message: Option<Rc<Message>>) {
        self.message = message;
    }

    pub fn set_lines(&mut self, lines: Vec<String>) {
        self.lines = lines;
    }

    pub fn line_limit_indicator(&self) -> Option<usize> {
        self.line_limit
    }

    pub fn pointer_events(&self) -> &[PointerEvent] {
        &self.pointer_events
    }

    pub fn scroll_updates(&self) -> usize {
        self.scroll_updates
    }

    pub fn selection_mode(&self) -> SelectionMode {
        self.selection
    }
}

impl ContentModel for MemoryBuffer {
    fn lines(&self) -> &[String] {
        &self.lines
    }

    fn cursor(&self) -> Position {
        self.cursor
    }

    fn scroll(&self) -> Position {
        self.scroll
    }

    fn full_path(&self) -> &str {
        &self.full_path
    }

    fn relative_path(&self) -> &str {
        &self.relative_path
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn message(&self) -> Option<Rc<Message>> {
        self.message.clone()
    }

    fn cursor_grammar_name(&self) -> &str {
        &self.grammar
    }

    fn selection_mode_name(&self) -> &str {
        self.selection.name()
    }

    fn select_text(&mut self, row: usize, col: usize, _length: usize, mode: SelectionMode) {
        let row = row.min(self.lines.len().saturating_sub(1));
        let line_len = self.lines.get(row).map_or(0, |line| line.chars().count());
        self.cursor = Position::new(row, col.min(line_len));
        self.selection = mode;
    }

    fn update_scroll_position(&mut self) {
        self.scroll_updates += 1;
        if self.cursor.row < self.scroll.row {
            self.scroll.row = self.cursor.row;
        }
    }

    fn set_line_limit_indicator(&mut self, col: usize) {
        self.line_limit = Some(col);
    }

    fn pointer(&mut self, event: PointerEvent) {
        self.pointer_events.push(event);
    }

    fn draw(&self, canvas: &mut dyn Canvas, attrs: AttrPair) {
        let cols = canvas.cols();
        for row in 0..canvas.rows() {
            let visible: String = self
                .lines
                .get(self.scroll.row + row)
                .map(|line| line.chars().skip(self.scroll.col).collect())
                .unwrap_or_default();
            canvas.paint_text(row, 0, &fit_to_width(&visible, cols), attrs.normal);
            let marker = self
                .line_limit
                .and_then(|limit| limit.checked_sub(self.scroll.col))
                .filter(|col| *col < cols);
            if let (Some(col), true) = (marker, self.scroll.row + row < self.lines.len()) {
                canvas.paint_attr(row, col, 1, attrs.selected);
            }
        }
    }
}

/// A buffer manager backed by a map of file contents.
#[derive(Debug, Default)]
pub struct MemoryBuffers {
    files: HashMap<PathBuf, String>,
}

impl MemoryBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.files.insert(path.into(), text.into());
        self
    }
}

impl BufferManager for MemoryBuffers {
    fn load(&mut self, path: &Path) -> SharedContent {
        let text = self.files.get(path).map(String::as_str).unwrap_or_default();
        let relative = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        MemoryBuffer::from_text(text)
            .with_path(path.to_string_lossy(), relative)
            .shared()
    }

    fn read_stream(&mut self, reader: &mut dyn Read) -> SharedContent {
        let mut text = String::new();
        if let Err(err) = reader.read_to_string(&mut text) {
            debug!(error = %err, "stream read stopped early");
        }
        MemoryBuffer::from_text(&text)
            .with_path("<stdin>", "<stdin>")
            .shared()
    }

    fn create_empty(&mut self) -> SharedContent {
        MemoryBuffer::new(Vec::new()).shared()
    }
}

#[derive(Debug, Default)]
pub struct MemoryHistory {
    positions: HashMap<String, Position>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(mut self, path: impl Into<String>, row: usize, col: usize) -> Self {
        self.positions.insert(path.into(), Position::new(row, col));
        self
    }
}

impl HistoryStore for MemoryHistory {
    fn cursor_position(&self, path: &str) -> Option<Position> {
        self.positions.get(path).copied()
    }
}

/// One notification received by a [`RecordingController`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerCall {
    Focus,
    Unfocus,
    Bind { full_path: String },
    Event(InputEvent),
}

pub type ControllerLog = Rc<RefCell<Vec<(ControllerKind, ControllerCall)>>>;

/// Records every call and answers bound keys with queued pane requests.
pub struct RecordingController {
    kind: ControllerKind,
    log: ControllerLog,
    requests: RequestQueue,
    bindings: Rc<HashMap<(ControllerKind, String), PaneRequest>>,
}

impl RecordingController {
    fn record(&self, call: ControllerCall) {
        self.log.borrow_mut().push((self.kind, call));
    }
}

impl Controller for RecordingController {
    fn on_focus(&mut self) {
        self.record(ControllerCall::Focus);
    }

    fn on_unfocus(&mut self) {
        self.record(ControllerCall::Unfocus);
    }

    fn bind_content(&mut self, content: SharedContent) {
        let full_path = content.borrow().full_path().to_string();
        self.record(ControllerCall::Bind { full_path });
    }

    fn handle_event(&mut self, event: &InputEvent) {
        self.record(ControllerCall::Event(event.clone()));
        if let InputEvent::Key { key_id } = event {
            if let Some(request) = self.bindings.get(&(self.kind, key_id.clone())) {
                self.requests.push(request.clone());
            }
        }
    }
}

#[derive(Default)]
pub struct RecordingControllers {
    log: ControllerLog,
    bindings: HashMap<(ControllerKind, String), PaneRequest>,
}

impl RecordingControllers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make controllers of `kind` answer `key_id` by queueing `request`.
    pub fn bind(mut self, kind: ControllerKind, key_id: impl Into<String>, request: PaneRequest) -> Self {
        self.bindings.insert((kind, key_id.into()), request);
        self
    }

    pub fn log(&self) -> ControllerLog {
        Rc::clone(&self.log)
    }
}

impl ControllerFactory for RecordingControllers {
    fn create(
        &mut self,
        kind: ControllerKind,
        _content: SharedContent,
        requests: RequestQueue,
    ) -> Box<dyn Controller> {
        Box::new(RecordingController {
            kind,
            log: Rc::clone(&self.log),
            requests,
            bindings: Rc::new(self.bindings.clone()),
        })
    }
}
