//! Terminal image: the shared screen and the per-pane surfaces that paint into it.

pub mod screen;
pub mod surface;

pub use screen::{Cell, Screen};
pub use surface::{Surface, SurfaceStats};
