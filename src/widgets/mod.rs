//! Leaf panes and the labeled prompt-line family.
//!
//! Widgets paint through [`Canvas`](crate::core::content::Canvas) and read the content model;
//! they never touch the screen directly.

pub mod header;
pub mod labeled_line;
pub mod line_numbers;
pub mod log_window;
pub mod message_line;
pub mod palette;
pub mod status_line;
pub mod top_info;

pub use header::HeaderLine;
pub use labeled_line::{LabeledLine, PromptKind};
pub use line_numbers::LineNumbers;
pub use log_window::LogWindow;
pub use message_line::MessageLine;
pub use palette::PaletteWindow;
pub use status_line::StatusLine;
pub use top_info::TopInfo;
