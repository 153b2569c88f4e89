//! The root pane: the main text viewport plus the fixed set of panes arranged around it.

use tracing::{debug, info};

use crate::config::{PaneConfig, TopInfoMode};
use crate::core::content::{Canvas, SelectionMode, SharedContent};
use crate::core::controller::{ControllerKind, PaneRequest, PaneSlot, RequestQueue};
use crate::core::geometry::Rect;
use crate::core::input_event::InputEvent;
use crate::core::output::OutputGate;
use crate::core::services::{ContentSource, Services};
use crate::core::style::AttrPair;
use crate::core::terminal::Terminal;
use crate::core::text::width::visible_width;
use crate::error::Result;
use crate::render::screen::Screen;
use crate::runtime::node::{NodeId, Pane};
use crate::runtime::tree::PaneTree;
use crate::widgets::palette::{PALETTE_COLS, PALETTE_LEFT, PALETTE_ROWS, PALETTE_TOP};
use crate::widgets::{
    HeaderLine, LabeledLine, LineNumbers, LogWindow, MessageLine, PaletteWindow, PromptKind,
    StatusLine, TopInfo,
};

#[derive(Debug, Clone, Copy)]
struct Slots {
    main: NodeId,
    header: NodeId,
    top_info: NodeId,
    find: NodeId,
    goto: NodeId,
    open: NodeId,
    quit: NodeId,
    save_as: NodeId,
    status: NodeId,
    line_numbers: NodeId,
    right_column: NodeId,
    message: NodeId,
    palette: NodeId,
    log: NodeId,
}

pub struct RootPane {
    tree: PaneTree,
    config: PaneConfig,
    services: Services,
    requests: RequestQueue,
    slots: Slots,
}

impl RootPane {
    /// Build every pane once, attach the initial content, and hide what the config turns off.
    ///
    /// Panes are registered at the front of the main viewport's z-order in construction
    /// order, so the last one built ends up first.
    pub fn new(config: PaneConfig, mut services: Services, source: ContentSource) -> Self {
        let requests = RequestQueue::new();
        let theme = config.theme;
        let mut tree = PaneTree::new(0, 0);

        let content = source.open(services.buffers.as_mut());
        let controller =
            services
                .controllers
                .create(ControllerKind::Main, content.clone(), requests.clone());
        let main = tree.add_focusable(Pane::Viewport, theme.main, Some(controller));

        let attach = |tree: &mut PaneTree, id: NodeId, shown: bool| {
            tree.set_host(id, main);
            tree.set_parent(id, Some(main), 0);
            if !shown {
                tree.hide(id);
            }
        };

        let header = tree.add_node(Pane::Header(HeaderLine::new()), theme.header);
        attach(&mut tree, header, config.show_header);

        let mut prompt = |tree: &mut PaneTree, kind: PromptKind| {
            let id = build_prompt(tree, &mut services, &requests, kind, theme.prompt);
            attach(tree, id, false);
            id
        };
        let find = prompt(&mut tree, PromptKind::Find);
        let goto = prompt(&mut tree, PromptKind::Goto);
        let open = prompt(&mut tree, PromptKind::Open);
        let quit = prompt(&mut tree, PromptKind::Quit);
        let save_as = prompt(&mut tree, PromptKind::SaveAs);

        let top_info = tree.add_node(
            Pane::TopInfo(TopInfo::new(config.top_info_mode)),
            theme.top_info,
        );
        attach(&mut tree, top_info, config.show_top_info);

        let status = tree.add_node(Pane::Status(StatusLine::new()), theme.status);
        attach(&mut tree, status, config.show_footer);

        let line_numbers = tree.add_node(Pane::LineNumbers(LineNumbers::new()), theme.line_numbers);
        attach(&mut tree, line_numbers, config.show_line_numbers);

        let right_column = tree.add_node(Pane::Plain, theme.right_column);
        attach(&mut tree, right_column, config.show_right_column);

        let message = tree.add_node(Pane::Message(MessageLine::new()), theme.message);
        attach(&mut tree, message, config.show_message_line);

        let palette_controller = services.controllers.create(
            ControllerKind::Palette,
            content.clone(),
            requests.clone(),
        );
        let palette = tree.add_focusable(
            Pane::Palette(PaletteWindow::new()),
            theme.main,
            Some(palette_controller),
        );
        tree.reshape(palette, PALETTE_ROWS, PALETTE_COLS, PALETTE_TOP, PALETTE_LEFT);
        attach(&mut tree, palette, false);

        let log = tree.add_node(Pane::Log(LogWindow::new(services.log.clone())), theme.log);
        attach(&mut tree, log, false);

        let slots = Slots {
            main,
            header,
            top_info,
            find,
            goto,
            open,
            quit,
            save_as,
            status,
            line_numbers,
            right_column,
            message,
            palette,
            log,
        };
        let mut root = Self {
            tree,
            config,
            services,
            requests,
            slots,
        };
        root.set_content(content);
        root.focus();
        root
    }

    pub fn tree(&self) -> &PaneTree {
        &self.tree
    }

    pub fn screen(&self) -> &Screen {
        self.tree.screen()
    }

    pub fn config(&self) -> &PaneConfig {
        &self.config
    }

    /// Queue controllers push to; drained after every event.
    pub fn requests(&self) -> RequestQueue {
        self.requests.clone()
    }

    pub fn node(&self, slot: PaneSlot) -> NodeId {
        let slots = &self.slots;
        match slot {
            PaneSlot::Main => slots.main,
            PaneSlot::Header => slots.header,
            PaneSlot::TopInfo => slots.top_info,
            PaneSlot::LineNumbers => slots.line_numbers,
            PaneSlot::RightColumn => slots.right_column,
            PaneSlot::Status => slots.status,
            PaneSlot::Message => slots.message,
            PaneSlot::Find => slots.find,
            PaneSlot::Goto => slots.goto,
            PaneSlot::Open => slots.open,
            PaneSlot::Quit => slots.quit,
            PaneSlot::SaveAs => slots.save_as,
            PaneSlot::Palette => slots.palette,
            PaneSlot::Log => slots.log,
        }
    }

    pub fn prompt(&self, kind: PromptKind) -> NodeId {
        match kind {
            PromptKind::Find => self.slots.find,
            PromptKind::Goto => self.slots.goto,
            PromptKind::Open => self.slots.open,
            PromptKind::Quit => self.slots.quit,
            PromptKind::SaveAs => self.slots.save_as,
        }
    }

    pub fn content(&self) -> Option<SharedContent> {
        self.tree.content(self.slots.main)
    }

    /// Rows the breadcrumb currently takes from the viewport.
    pub fn top_info_rows(&self) -> usize {
        match self.tree.pane(self.slots.top_info) {
            Some(Pane::TopInfo(top_info)) => top_info.borrowed_rows(),
            _ => 0,
        }
    }

    /// Attach a content model to the main viewport and its controller.
    pub fn set_content(&mut self, content: SharedContent) {
        info!(path = content.borrow().full_path(), "set content");
        content
            .borrow_mut()
            .set_line_limit_indicator(self.config.line_limit_indicator);
        self.tree.set_content(self.slots.main, content);
    }

    /// Resize the terminal image and lay the tree out over all of it.
    pub fn resize_terminal(&mut self, rows: usize, cols: usize) {
        self.tree.screen_mut().resize(rows, cols);
        for pane in [self.slots.header, self.slots.message] {
            match self.tree.pane_mut(pane) {
                Some(Pane::Header(header)) => header.invalidate(),
                Some(Pane::Message(message)) => message.invalidate(),
                _ => {}
            }
        }
        self.reshape(rows, cols, 0, 0);
    }

    /// Partition the rectangle among the visible panes and give the rest to the viewport.
    pub fn reshape(&mut self, rows: usize, cols: usize, top: usize, left: usize) {
        debug!(rows, cols, top, left, "reshape");
        let slots = self.slots;
        let config = &self.config;
        let tree = &mut self.tree;
        let gutter = config.line_numbers_width;
        let bottom = config.bottom_rows;
        let (mut rows, mut cols, mut top, mut left) = (rows, cols, top, left);

        if config.show_header {
            tree.reshape(slots.header, 1, cols, top, left);
            rows = rows.saturating_sub(1);
            top += 1;
        }
        if config.show_top_info {
            tree.reshape(slots.top_info, 0, cols.saturating_sub(gutter), top, left + gutter);
            if let Some(Pane::TopInfo(top_info)) = tree.pane_mut(slots.top_info) {
                top_info.set_borrowed_rows(0);
            }
        }
        let last_row = top + rows.saturating_sub(1);
        for prompt in [slots.open, slots.quit, slots.save_as] {
            tree.reshape(prompt, 1, cols, last_row, left);
        }
        let bottom_top = top + rows.saturating_sub(bottom);
        if config.show_message_line {
            tree.reshape(slots.message, bottom, cols, bottom_top, left);
        }
        if config.use_interactive_find {
            tree.reshape(slots.find, bottom, cols, bottom_top, left);
        }
        tree.reshape(slots.goto, bottom, cols, bottom_top, left);
        if config.show_footer {
            let status_top = top + rows.saturating_sub(bottom + 1);
            tree.reshape(slots.status, 1, cols, status_top, left);
            rows = rows.saturating_sub(bottom + 1);
        }
        if config.show_line_numbers {
            tree.reshape(slots.line_numbers, rows, gutter, top, left);
            cols = cols.saturating_sub(gutter);
            left += gutter;
        }
        if config.show_right_column {
            let margin_left = (left + cols).saturating_sub(1);
            tree.reshape(slots.right_column, rows, 1, top, margin_left);
            cols = cols.saturating_sub(1);
        }
        tree.reshape(slots.main, rows, cols, top, left);
        tree.reshape(slots.log, rows, cols, top, left);

        self.restore_cursor();
    }

    fn restore_cursor(&mut self) {
        let Some(content) = self.content() else {
            return;
        };
        let mut content = content.borrow_mut();
        let saved = self
            .services
            .history
            .cursor_position(content.full_path())
            .unwrap_or_default();
        let lines = content.lines();
        let (row, col) = match lines.len().checked_sub(1) {
            None => (0, 0),
            Some(last) => {
                let row = saved.row.min(last);
                (row, saved.col.min(lines[row].chars().count()))
            }
        };
        content.select_text(row, col, 0, SelectionMode::None);
    }

    /// Move the viewport's top edge, and the gutter and margin beside it, by `delta` rows.
    pub fn resize_top_by(&mut self, delta: isize) -> Result<()> {
        self.tree.resize_top_by(self.slots.main, delta)?;
        self.tree.resize_top_by(self.slots.log, delta).ok();
        for side in [self.slots.line_numbers, self.slots.right_column] {
            if let Err(err) = self.tree.resize_top_by(side, delta) {
                debug!(node = side.raw(), error = %err, "side pane did not follow");
            }
        }
        if let Some(content) = self.content() {
            content.borrow_mut().update_scroll_position();
        }
        Ok(())
    }

    /// Let the breadcrumb claim the rows it needs from the top of the viewport.
    fn negotiate_top_info(&mut self) {
        if !self.config.show_top_info || self.config.top_info_mode == TopInfoMode::Disabled {
            return;
        }
        let Some(content) = self.content() else {
            return;
        };
        let (wanted, borrowed) = match self.tree.pane_mut(self.slots.top_info) {
            Some(Pane::TopInfo(top_info)) => {
                (top_info.collect(&*content.borrow()), top_info.borrowed_rows())
            }
            _ => return,
        };
        if wanted == borrowed {
            return;
        }
        let delta = signed(wanted) - signed(borrowed);
        if let Err(err) = self.resize_top_by(delta) {
            debug!(wanted, borrowed, error = %err, "breadcrumb keeps its rows");
            return;
        }
        let cols = self.tree.rect(self.slots.top_info).map_or(0, |rect| rect.cols);
        self.tree.resize_to(self.slots.top_info, wanted, cols);
        if let Some(Pane::TopInfo(top_info)) = self.tree.pane_mut(self.slots.top_info) {
            top_info.set_borrowed_rows(wanted);
        }
    }

    /// Repaint the whole tree for one frame.
    pub fn refresh(&mut self) {
        self.tree.begin_frame();
        self.negotiate_top_info();
        self.tree.refresh(self.slots.main);
        self.draw_right_edge();
        self.tree.flush(self.slots.main);
    }

    /// Mark rows whose text runs past the viewport's right edge.
    fn draw_right_edge(&mut self) {
        if !self.config.show_right_column {
            return;
        }
        let Some(content) = self.content() else {
            return;
        };
        let Some(viewport) = self.tree.rect(self.slots.main) else {
            return;
        };
        let margin = self.attrs(self.slots.right_column);
        let beyond = self.attrs(self.slots.line_numbers).normal;
        let content = content.borrow();
        let scroll = content.scroll();
        let visible = content.lines().get(scroll.row..).unwrap_or_default();
        let limit = viewport.rows.min(visible.len());
        let Some(surface) = self.tree.surface_mut(self.slots.right_column) else {
            return;
        };
        for (row, line) in visible[..limit].iter().enumerate() {
            let overflows = visible_width(line).saturating_sub(scroll.col) > viewport.cols;
            let attr = if overflows { margin.selected } else { margin.normal };
            surface.paint_text(row, 0, " ", attr);
        }
        for row in limit..viewport.rows {
            surface.paint_text(row, 0, " ", beyond);
        }
        self.tree.flush(self.slots.right_column);
    }

    fn attrs(&self, id: NodeId) -> AttrPair {
        self.tree.node(id).map(|node| node.attrs()).unwrap_or_default()
    }

    /// Paint a frame and write the changes to `terminal`.
    pub fn render<T: Terminal + ?Sized>(&mut self, terminal: &mut T) -> std::io::Result<()> {
        self.refresh();
        let mut gate = OutputGate::new();
        self.tree.screen_mut().present(&mut gate);
        gate.flush(terminal)
    }

    pub fn focus(&mut self) {
        self.focus_node(self.slots.main);
    }

    pub fn unfocus(&mut self) {
        self.unfocus_node(self.slots.main);
    }

    fn focus_node(&mut self, id: NodeId) {
        if id == self.slots.main && self.config.show_message_line {
            self.tree.show(self.slots.message);
        }
        self.tree.focus(id);
    }

    fn unfocus_node(&mut self, id: NodeId) {
        if id == self.slots.main {
            let status = self.slots.status;
            if self.tree.is_shown(status) {
                let normal = self.attrs(status).normal;
                if let Some(surface) = self.tree.surface_mut(status) {
                    surface.paint_text(0, 0, ".", normal);
                }
                self.tree.flush(status);
            }
            self.tree.hide(self.slots.message);
        }
        self.tree.unfocus(id);
    }

    /// Move focus from whichever node holds it to `id`.
    pub fn change_focus_to(&mut self, id: NodeId) {
        if let Some(current) = self.tree.focused() {
            if current == id {
                return;
            }
            self.unfocus_node(current);
        }
        self.focus_node(id);
    }

    pub fn show_prompt(&mut self, kind: PromptKind) {
        self.change_focus_to(self.prompt(kind));
    }

    pub fn show_palette(&mut self) {
        self.change_focus_to(self.slots.palette);
    }

    pub fn show_log_window(&mut self, shown: bool) {
        if shown {
            self.tree.show(self.slots.log);
        } else {
            self.tree.hide(self.slots.log);
        }
    }

    /// Route one input event, then apply whatever the controllers asked for.
    pub fn handle_event(&mut self, event: InputEvent) {
        match &event {
            InputEvent::Resize { columns, rows } => {
                self.resize_terminal(usize::from(*rows), usize::from(*columns));
            }
            InputEvent::Pointer(pointer) if pointer.kind.is_wheel() => {
                if let Some(focused) = self.tree.focused() {
                    self.tree.pointer(focused, *pointer);
                }
            }
            InputEvent::Pointer(pointer) => {
                match self.tree.contains(self.slots.main, pointer.row, pointer.col) {
                    Some(hit) => self.tree.pointer(hit, *pointer),
                    None => debug!(row = pointer.row, col = pointer.col, "pointer missed"),
                }
            }
            InputEvent::Key { .. } | InputEvent::Text { .. } | InputEvent::Paste { .. } => {
                match self.tree.focused() {
                    Some(focused) => self.tree.handle_event(focused, &event),
                    None => debug!("input dropped: nothing focused"),
                }
            }
        }
        self.apply_requests();
    }

    fn apply_requests(&mut self) {
        while let Some(request) = self.requests.pop() {
            debug!(?request, "pane request");
            match request {
                PaneRequest::Show(slot) => self.tree.show(self.node(slot)),
                PaneRequest::Hide(slot) => self.tree.hide(self.node(slot)),
                PaneRequest::Focus(slot) => self.change_focus_to(self.node(slot)),
                PaneRequest::Open(path) => {
                    let content = self.services.buffers.load(&path);
                    self.set_content(content);
                }
                PaneRequest::SetContent(content) => self.set_content(content),
            }
        }
    }

    /// The region the viewport currently covers.
    pub fn viewport(&self) -> Rect {
        self.tree.rect(self.slots.main).unwrap_or_default()
    }
}

fn build_prompt(
    tree: &mut PaneTree,
    services: &mut Services,
    requests: &RequestQueue,
    kind: PromptKind,
    attrs: AttrPair,
) -> NodeId {
    let field = services.buffers.create_empty();
    let controller = services
        .controllers
        .create(kind.controller_kind(), field.clone(), requests.clone());
    let listing = (kind == PromptKind::Open).then(|| services.buffers.create_empty());
    let label = tree.add_node(Pane::Label(kind.label().to_string()), attrs);
    let prompt = tree.add_focusable(
        Pane::Prompt(LabeledLine::new(kind, label, listing)),
        attrs,
        Some(controller),
    );
    tree.set_parent(label, Some(prompt), 0);
    tree.set_content(prompt, field);
    prompt
}

fn signed(value: usize) -> isize {
    isize::try_from(value).unwrap_or(isize::MAX)
}
