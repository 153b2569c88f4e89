//! Text helpers (grapheme widths, truncation, padding).
//!
//! These helpers are pure (string in/string out) and live under `core` so panes can depend on
//! them without importing anything from the render layer.

pub mod utils;
pub mod width;
