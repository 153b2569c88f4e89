//! Layout configuration, read from the environment.

use std::env;
use std::path::PathBuf;

use crate::core::style::{Attr, AttrPair, Color};

/// How many rows the context breadcrumb reserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopInfoMode {
    /// Pane computes nothing and reserves no rows.
    Disabled,
    /// Always reserve exactly this many rows.
    Fixed(usize),
    /// Reserve one row per collected context line, up to `max`.
    Fit { max: usize },
}

impl TopInfoMode {
    /// Rows to reserve for `collected` context lines.
    pub fn rows_for(self, collected: usize) -> usize {
        match self {
            Self::Disabled => 0,
            Self::Fixed(rows) => rows,
            Self::Fit { max } => collected.min(max),
        }
    }

    fn from_rows(rows: usize) -> Self {
        if rows == 0 {
            Self::Disabled
        } else {
            Self::Fixed(rows)
        }
    }
}

impl Default for TopInfoMode {
    fn default() -> Self {
        Self::Fixed(2)
    }
}

/// Attribute pairs for each pane family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub main: AttrPair,
    pub header: AttrPair,
    pub top_info: AttrPair,
    pub status: AttrPair,
    pub line_numbers: AttrPair,
    pub right_column: AttrPair,
    pub message: AttrPair,
    pub prompt: AttrPair,
    pub log: AttrPair,
}

impl Default for Theme {
    fn default() -> Self {
        let bar = AttrPair::new(Attr::indexed(0, 168), Attr::indexed(0, 47));
        Self {
            main: AttrPair::new(Attr::DEFAULT, Attr::indexed(0, 146)),
            header: bar,
            top_info: bar,
            status: bar,
            line_numbers: AttrPair::new(Attr::indexed(211, 235), Attr::indexed(146, 235)),
            right_column: AttrPair::new(Attr::indexed(0, 18), Attr::indexed(0, 105)),
            message: AttrPair::new(
                Attr::new(Color::Indexed(3), Color::Default),
                Attr::indexed(0, 87),
            ),
            prompt: AttrPair::new(Attr::DEFAULT, Attr::indexed(0, 87)),
            log: AttrPair::new(Attr::DEFAULT, Attr::indexed(0, 87)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneConfig {
    pub show_header: bool,
    pub show_top_info: bool,
    pub show_line_numbers: bool,
    pub show_right_column: bool,
    pub show_footer: bool,
    pub show_message_line: bool,
    pub use_interactive_find: bool,
    pub top_info_mode: TopInfoMode,
    pub line_numbers_width: usize,
    /// Rows below the status line (message/prompt row).
    pub bottom_rows: usize,
    pub line_limit_indicator: usize,
    pub theme: Theme,
    pub log_filter: String,
}

impl Default for PaneConfig {
    fn default() -> Self {
        Self {
            show_header: false,
            show_top_info: true,
            show_line_numbers: true,
            show_right_column: true,
            show_footer: true,
            show_message_line: true,
            use_interactive_find: true,
            top_info_mode: TopInfoMode::default(),
            line_numbers_width: 7,
            bottom_rows: 1,
            line_limit_indicator: 80,
            theme: Theme::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl PaneConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            show_header: env_flag("PANE_SHOW_HEADER").unwrap_or(defaults.show_header),
            show_top_info: env_flag("PANE_SHOW_TOP_INFO").unwrap_or(defaults.show_top_info),
            show_line_numbers: env_flag("PANE_SHOW_LINE_NUMBERS")
                .unwrap_or(defaults.show_line_numbers),
            show_right_column: env_flag("PANE_SHOW_RIGHT_COLUMN")
                .unwrap_or(defaults.show_right_column),
            show_footer: env_flag("PANE_SHOW_FOOTER").unwrap_or(defaults.show_footer),
            show_message_line: env_flag("PANE_SHOW_MESSAGE_LINE")
                .unwrap_or(defaults.show_message_line),
            top_info_mode: env_usize("PANE_TOP_INFO_ROWS")
                .map(TopInfoMode::from_rows)
                .unwrap_or(defaults.top_info_mode),
            log_filter: env_string_opt("PANE_LOG").unwrap_or(defaults.log_filter),
            ..defaults
        }
    }
}

/// Command-line inputs that pick the initial content model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchOptions {
    pub files: Vec<PathBuf>,
    pub read_stdin: bool,
}

fn env_flag(key: &str) -> Option<bool> {
    match env::var(key).ok()?.as_str() {
        "1" => Some(true),
        "0" => Some(false),
        _ => None,
    }
}

fn env_usize(key: &str) -> Option<usize> {
    env::var(key).ok()?.trim().parse().ok()
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}
