
use pretty_assertions::assert_eq;

use harness::{build, build_with_file, full_config, shared_buffer, HarnessTerminal};
use pane_tui::memory::{MemoryBuffer, MemoryBuffers, MemoryHistory, RecordingControllers};
use pane_tui::{
    ContentSource, LaunchOptions, PaneConfig, PaneSlot, Position, Rect, RootPane, TopInfoMode,
};

const ROWS: usize = 24;
const COLS: usize = 80;

fn visible_rects(root: &RootPane) -> Vec<(PaneSlot, Rect)> {
    let tree = root.tree();
    let main = root.node(PaneSlot::Main);
    let mut rects = vec![(PaneSlot::Main, root.viewport())];
    for slot in [
        PaneSlot::Header,
        PaneSlot::TopInfo,
        PaneSlot::LineNumbers,
        PaneSlot::RightColumn,
        PaneSlot::Status,
        PaneSlot::Message,
    ] {
        let id = root.node(slot);
        if tree.children(main).contains(&id) {
            rects.push((slot, tree.rect(id).unwrap_or_default()));
        }
    }
    rects
}

fn assert_no_overlap(rects: &[(PaneSlot, Rect)]) {
    for (index, (slot, rect)) in rects.iter().enumerate() {
        for (other_slot, other) in &rects[index + 1..] {
            assert!(
                !rect.intersects(other),
                "{slot:?} {rect:?} overlaps {other_slot:?} {other:?}"
            );
        }
    }
}

#[test]
fn reshape_gives_viewport_what_the_side_panes_leave() {
    let mut fixture = build_with_file(full_config(), "a.txt", "alpha\nbeta\n");
    fixture.root.resize_terminal(ROWS, COLS);

    assert_eq!(fixture.root.viewport(), Rect::new(1, 7, ROWS - 3, COLS - 8));
    let tree = fixture.root.tree();
    assert_eq!(tree.rect(fixture.root.node(PaneSlot::Header)), Some(Rect::new(0, 0, 1, COLS)));
    assert_eq!(tree.rect(fixture.root.node(PaneSlot::Status)), Some(Rect::new(22, 0, 1, COLS)));
    assert_eq!(tree.rect(fixture.root.node(PaneSlot::Message)), Some(Rect::new(23, 0, 1, COLS)));
    assert_eq!(tree.rect(fixture.root.node(PaneSlot::LineNumbers)), Some(Rect::new(1, 0, 21, 7)));
    assert_eq!(tree.rect(fixture.root.node(PaneSlot::RightColumn)), Some(Rect::new(1, 79, 21, 1)));
    assert_eq!(tree.rect(fixture.root.node(PaneSlot::TopInfo)), Some(Rect::new(1, 7, 0, 73)));

    let rects = visible_rects(&fixture.root);
    assert_no_overlap(&rects);
    let covered: usize = rects.iter().map(|(_, rect)| rect.area()).sum();
    assert_eq!(covered, ROWS * COLS);
}

#[test]
fn breadcrumb_rows_come_out_of_the_viewport() {
    let mut fixture = build_with_file(full_config(), "a.txt", "alpha\nbeta\n");
    fixture.root.resize_terminal(ROWS, COLS);
    fixture.root.refresh();

    let k = fixture.root.top_info_rows();
    assert_eq!(k, 1);
    assert_eq!(fixture.root.viewport(), Rect::new(1 + k, 7, ROWS - 1 - k - 2, COLS - 8));
    let tree = fixture.root.tree();
    assert_eq!(tree.rect(fixture.root.node(PaneSlot::TopInfo)), Some(Rect::new(1, 7, k, 73)));
    assert_eq!(
        tree.rect(fixture.root.node(PaneSlot::LineNumbers)),
        Some(Rect::new(1 + k, 0, 21 - k, 7))
    );

    let rects = visible_rects(&fixture.root);
    assert_no_overlap(&rects);
    let covered: usize = rects.iter().map(|(_, rect)| rect.area()).sum();
    assert_eq!(covered, ROWS * COLS - 7 * k);

    // A second pass needs no further negotiation.
    fixture.root.refresh();
    assert_eq!(fixture.root.top_info_rows(), k);
    assert_eq!(fixture.root.viewport().rows, ROWS - 1 - k - 2);
}

#[test]
fn reshape_returns_borrowed_breadcrumb_rows() {
    let mut fixture = build_with_file(PaneConfig::default(), "a.txt", "alpha\n");
    fixture.root.resize_terminal(ROWS, COLS);
    fixture.root.refresh();
    assert_eq!(fixture.root.top_info_rows(), 2);
    assert_eq!(fixture.root.viewport().top, 2);

    fixture.root.resize_terminal(ROWS, COLS);
    assert_eq!(fixture.root.top_info_rows(), 0);
    assert_eq!(fixture.root.viewport(), Rect::new(0, 7, ROWS - 2, COLS - 8));
}

#[test]
fn breadcrumb_shows_enclosing_header_under_the_path() {
    let history = MemoryHistory::new().with_position("/work/f.py", 2, 0);
    let mut fixture = build(
        full_config(),
        MemoryBuffers::new().with_file("/work/f.py", "def f():\n  x = 1\n  y = 2\n\n"),
        history,
        RecordingControllers::new(),
        ContentSource::Path("/work/f.py".into()),
    );
    let buffer = shared_buffer(
        MemoryBuffer::from_text("def f():\n  x = 1\n  y = 2\n\n").with_path("/work/f.py", "f.py"),
    );
    buffer.borrow_mut().set_scroll(2, 0);
    fixture.root.set_content(buffer.clone());
    fixture.root.resize_terminal(ROWS, COLS);
    fixture.root.refresh();

    assert_eq!(fixture.root.top_info_rows(), 2);
    let screen = fixture.root.screen();
    let breadcrumb = |row: usize| screen.row_text(row).chars().skip(7).collect::<String>();
    assert_eq!(breadcrumb(1).trim_end(), "/work/f.py");
    assert_eq!(breadcrumb(2).trim_end(), "def f():");
    assert_eq!(screen.row_text(0).trim_end(), "/work/f.py");
    assert_eq!(fixture.root.viewport().top, 3);
}

#[test]
fn short_breadcrumb_keeps_the_path_on_top() {
    let text = "a:\n  b:\n    c\n";
    let mut fixture = build(
        PaneConfig::default(),
        MemoryBuffers::new().with_file("/work/n.py", text),
        MemoryHistory::new().with_position("/work/n.py", 2, 0),
        RecordingControllers::new(),
        ContentSource::Path("/work/n.py".into()),
    );
    let buffer = shared_buffer(MemoryBuffer::from_text(text).with_path("/work/n.py", "n.py"));
    buffer.borrow_mut().set_scroll(2, 0);
    fixture.root.set_content(buffer.clone());
    fixture.root.resize_terminal(ROWS, COLS);
    fixture.root.refresh();

    assert_eq!(fixture.root.config().top_info_mode, TopInfoMode::Fixed(2));
    assert_eq!(fixture.root.top_info_rows(), 2);
    let screen = fixture.root.screen();
    let breadcrumb = |row: usize| screen.row_text(row).chars().skip(7).collect::<String>();
    assert_eq!(breadcrumb(0).trim_end(), "/work/n.py");
    assert_eq!(breadcrumb(1).trim_end(), "a:");
    assert_eq!(fixture.root.viewport().top, 2);
}

#[test]
fn right_edge_marks_overflowing_rows() {
    let long = "x".repeat(100);
    let mut fixture = build_with_file(PaneConfig::default(), "w.txt", &format!("short\n{long}\n"));
    fixture.root.resize_terminal(ROWS, COLS);
    fixture.root.refresh();

    let theme = fixture.root.config().theme;
    let top = fixture.root.viewport().top;
    let screen = fixture.root.screen();
    let margin = |row: usize| screen.cell(row, COLS - 1).map(|cell| cell.attr);
    assert_eq!(margin(top), Some(theme.right_column.normal));
    assert_eq!(margin(top + 1), Some(theme.right_column.selected));
    assert_eq!(margin(top + 2), Some(theme.line_numbers.normal));
}

#[test]
fn status_and_gutter_describe_the_content() {
    let mut fixture = build_with_file(full_config(), "notes.txt", "one\ntwo\nthree\n");
    fixture.root.resize_terminal(ROWS, COLS);
    fixture.root.refresh();

    let screen = fixture.root.screen();
    let status = screen.row_text(22);
    assert!(status.starts_with("notes.txt . "), "{status:?}");
    assert!(status.ends_with("text | None |    1, 1 |   0%,  0%"), "{status:?}");

    let top = fixture.root.viewport().top;
    let gutter: String = screen.row_text(top + 1).chars().take(7).collect();
    assert_eq!(gutter, "     2 ");
    let past_end: String = screen.row_text(top + 3).chars().take(7).collect();
    assert_eq!(past_end, "       ");
}

#[test]
fn history_cursor_is_clamped_into_the_content() {
    let history = MemoryHistory::new().with_position("/work/c.txt", 50, 40);
    let mut fixture = build(
        PaneConfig::default(),
        MemoryBuffers::new().with_file("/work/c.txt", "a\nbb\nccc"),
        history,
        RecordingControllers::new(),
        ContentSource::Path("/work/c.txt".into()),
    );
    fixture.root.resize_terminal(ROWS, COLS);
    let cursor = fixture.root.content().map(|content| content.borrow().cursor());
    assert_eq!(cursor, Some(Position::new(2, 3)));
}

#[test]
fn initial_content_prefers_file_then_stream_then_empty() {
    let launch = LaunchOptions {
        files: vec!["/work/first".into(), "/work/second".into()],
        read_stdin: true,
    };
    let source = ContentSource::from_launch(&launch, || Box::new(std::io::Cursor::new("x")));
    let fixture = build(
        PaneConfig::default(),
        MemoryBuffers::new().with_file("/work/first", "1\n"),
        MemoryHistory::new(),
        RecordingControllers::new(),
        source,
    );
    let path = fixture.root.content().map(|c| c.borrow().full_path().to_string());
    assert_eq!(path.as_deref(), Some("/work/first"));

    let launch = LaunchOptions {
        files: Vec::new(),
        read_stdin: true,
    };
    let source = ContentSource::from_launch(&launch, || Box::new(std::io::Cursor::new("x\ny\n")));
    let fixture = build(
        PaneConfig::default(),
        MemoryBuffers::new(),
        MemoryHistory::new(),
        RecordingControllers::new(),
        source,
    );
    let lines = fixture.root.content().map(|c| c.borrow().lines().len());
    assert_eq!(lines, Some(2));

    let source = ContentSource::from_launch(&LaunchOptions::default(), || {
        panic!("stdin must not be read")
    });
    let fixture = build(
        PaneConfig::default(),
        MemoryBuffers::new(),
        MemoryHistory::new(),
        RecordingControllers::new(),
        source,
    );
    let empty = fixture.root.content().map(|c| c.borrow().lines().is_empty());
    assert_eq!(empty, Some(true));
}

#[test]
fn disabled_breadcrumb_never_borrows_rows() {
    let config = PaneConfig {
        top_info_mode: TopInfoMode::Disabled,
        ..PaneConfig::default()
    };
    let mut fixture = build_with_file(config, "a.txt", "  indented\n");
    fixture.root.resize_terminal(ROWS, COLS);
    fixture.root.refresh();
    assert_eq!(fixture.root.top_info_rows(), 0);
    assert_eq!(fixture.root.viewport(), Rect::new(0, 7, ROWS - 2, COLS - 8));
}

#[test]
fn steady_state_frames_write_nothing() {
    let mut fixture = build_with_file(PaneConfig::default(), "a.txt", "alpha\nbeta\n");
    let mut terminal = HarnessTerminal::new(COLS as u16, ROWS as u16);
    fixture.root.resize_terminal(ROWS, COLS);

    fixture.root.render(&mut terminal).expect("first frame");
    let first = terminal.take_writes();
    assert!(first.contains("\x1b[2J"));
    assert!(first.contains("alpha"));
    assert!(first.ends_with("\x1b[?25h"));

    fixture.root.render(&mut terminal).expect("second frame");
    assert_eq!(terminal.take_writes(), "");
}
