//! Typed terminal output commands and a single output gate.
//!
//! Invariant: all terminal writes must flow through `OutputGate::flush(..)`.

use crate::core::style::Attr;
use crate::core::terminal::Terminal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalCmd {
    /// Printable text at the current cursor position.
    Text(String),
    /// Absolute cursor move, zero-based.
    MoveTo { row: usize, col: usize },
    /// Select the colour attribute for following text.
    SetAttr(Attr),

    /// Cursor visibility.
    HideCursor,
    ShowCursor,

    /// Reset attributes and clear the whole display.
    ClearScreen,
}

impl TerminalCmd {
    pub fn text(data: impl Into<String>) -> Self {
        Self::Text(data.into())
    }
}

#[derive(Debug, Default)]
pub struct OutputGate {
    cmds: Vec<TerminalCmd>,
}

impl OutputGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: TerminalCmd) {
        self.cmds.push(cmd);
    }

    pub fn extend<I>(&mut self, cmds: I)
    where
        I: IntoIterator<Item = TerminalCmd>,
    {
        self.cmds.extend(cmds);
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn commands(&self) -> &[TerminalCmd] {
        &self.cmds
    }

    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    /// Flush buffered commands to the terminal.
    ///
    /// This is the single write gate: `Terminal::write(..)` must not be called
    /// from anywhere else.
    pub fn flush<T: Terminal + ?Sized>(&mut self, term: &mut T) -> std::io::Result<()> {
        if self.cmds.is_empty() {
            return Ok(());
        }
        let mut out = String::new();
        for cmd in self.cmds.drain(..) {
            match cmd {
                TerminalCmd::Text(data) => out.push_str(&data),
                TerminalCmd::MoveTo { row, col } => {
                    out.push_str(&format!("\x1b[{};{}H", row + 1, col + 1));
                }
                TerminalCmd::SetAttr(attr) => out.push_str(&attr.sgr()),
                TerminalCmd::HideCursor => out.push_str("\x1b[?25l"),
                TerminalCmd::ShowCursor => out.push_str("\x1b[?25h"),
                TerminalCmd::ClearScreen => out.push_str("\x1b[0m\x1b[2J"),
            }
        }
        term.write(&out);
        term.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::{OutputGate, TerminalCmd};
    use crate::core::style::Attr;
    use crate::core::terminal::Terminal;

    #[derive(Default)]
    struct Sink {
        writes: Vec<String>,
    }

    impl Terminal for Sink {
        fn write(&mut self, data: &str) {
            self.writes.push(data.to_string());
        }

        fn columns(&self) -> u16 {
            80
        }

        fn rows(&self) -> u16 {
            24
        }
    }

    #[test]
    fn flush_encodes_commands_in_order_as_one_write() {
        let mut gate = OutputGate::new();
        gate.push(TerminalCmd::HideCursor);
        gate.push(TerminalCmd::MoveTo { row: 0, col: 4 });
        gate.push(TerminalCmd::SetAttr(Attr::DEFAULT));
        gate.push(TerminalCmd::text("hi"));
        let mut sink = Sink::default();
        gate.flush(&mut sink).expect("flush");

        assert_eq!(sink.writes, vec!["\x1b[?25l\x1b[1;5H\x1b[0mhi".to_string()]);
        assert!(gate.is_empty());
    }

    #[test]
    fn empty_gate_writes_nothing() {
        let mut gate = OutputGate::new();
        let mut sink = Sink::default();
        gate.flush(&mut sink).expect("flush");
        assert!(sink.writes.is_empty());
    }
}
