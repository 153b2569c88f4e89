//! Colour attributes for painted cells.

use std::fmt::Write as _;

/// Terminal colour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Color {
    /// Whatever the terminal uses by default.
    #[default]
    Default,
    /// xterm 256-colour palette index.
    Indexed(u8),
}

/// A foreground/background pair. Panes treat these as opaque handles chosen by their owner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Attr {
    pub fg: Color,
    pub bg: Color,
}

impl Attr {
    pub const DEFAULT: Attr = Attr {
        fg: Color::Default,
        bg: Color::Default,
    };

    pub const fn new(fg: Color, bg: Color) -> Self {
        Self { fg, bg }
    }

    pub const fn indexed(fg: u8, bg: u8) -> Self {
        Self {
            fg: Color::Indexed(fg),
            bg: Color::Indexed(bg),
        }
    }

    /// SGR sequence selecting this attribute from a reset state.
    pub fn sgr(&self) -> String {
        let mut out = String::from("\x1b[0");
        match self.fg {
            Color::Default => {}
            Color::Indexed(index) => {
                let _ = write!(out, ";38;5;{index}");
            }
        }
        match self.bg {
            Color::Default => {}
            Color::Indexed(index) => {
                let _ = write!(out, ";48;5;{index}");
            }
        }
        out.push('m');
        out
    }
}

/// The `normal`/`selected` attribute pair every node carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AttrPair {
    pub normal: Attr,
    pub selected: Attr,
}

impl AttrPair {
    pub const fn new(normal: Attr, selected: Attr) -> Self {
        Self { normal, selected }
    }
}
