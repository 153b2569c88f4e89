//! Structured input events delivered to the pane tree.

use bitflags::bitflags;

bitflags! {
    /// Modifier keys held during a pointer event.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b001;
        const CTRL = 0b010;
        const ALT = 0b100;
    }
}

impl Modifiers {
    pub fn shift(self) -> bool {
        self.contains(Self::SHIFT)
    }

    pub fn ctrl(self) -> bool {
        self.contains(Self::CTRL)
    }

    pub fn alt(self) -> bool {
        self.contains(Self::ALT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Click,
    DoubleClick,
    TripleClick,
    Release,
    Moved,
    WheelUp,
    WheelDown,
}

impl PointerKind {
    /// Wheel events carry no meaningful position and go to the focused pane.
    pub fn is_wheel(self) -> bool {
        matches!(self, Self::WheelUp | Self::WheelDown)
    }
}

/// A pointer event. `row`/`col` are absolute screen cells when produced by the backend and
/// node-relative once forwarded to a content model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub row: usize,
    pub col: usize,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, row: usize, col: usize, modifiers: Modifiers) -> Self {
        Self {
            kind,
            row,
            col,
            modifiers,
        }
    }

    pub(crate) fn relative_to(self, top: usize, left: usize) -> Self {
        Self {
            row: self.row.saturating_sub(top),
            col: self.col.saturating_sub(left),
            ..self
        }
    }
}

/// Input event delivered by the terminal backend.
///
/// Notes:
/// - `key_id` is a normalized identifier (for example `"ctrl+s"`) produced by the backend.
/// - Text and paste events carry decoded text so controllers don't parse escape sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key { key_id: String },
    Text { text: String },
    Paste { text: String },
    Pointer(PointerEvent),
    Resize { columns: u16, rows: u16 },
}
