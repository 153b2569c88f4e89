//! The shared character-cell screen and its diff presenter.
//!
//! Surfaces copy their cells here on flush; [`Screen::present`] turns the difference against
//! the last presented image into terminal commands.

use compact_str::CompactString;

use crate::core::geometry::Position;
use crate::core::output::{OutputGate, TerminalCmd};
use crate::core::style::Attr;

/// One terminal cell holding a whole grapheme cluster. A wide grapheme occupies a
/// `width == 2` lead cell followed by a `width == 0` tail cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub symbol: CompactString,
    pub attr: Attr,
    pub width: u8,
}

impl Cell {
    pub const BLANK: Cell = Cell::blank(Attr::DEFAULT);

    pub const fn blank(attr: Attr) -> Self {
        Self {
            symbol: CompactString::const_new(" "),
            attr,
            width: 1,
        }
    }

    pub fn is_tail(&self) -> bool {
        self.width == 0
    }
}

/// Break up wide-grapheme halves that lost their partner after an overwrite or clip.
pub(crate) fn repair_row(row: &mut [Cell]) {
    for col in 0..row.len() {
        match row[col].width {
            2 if row.get(col + 1).map_or(true, |next| !next.is_tail()) => {
                row[col] = Cell::blank(row[col].attr);
            }
            0 if col == 0 || row[col - 1].width != 2 => {
                row[col] = Cell::blank(row[col].attr);
            }
            _ => {}
        }
    }
}

#[derive(Debug)]
pub struct Screen {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    previous: Vec<Cell>,
    cursor: Option<Position>,
    previous_cursor: Option<Position>,
    force_full_redraw_next: bool,
}

impl Screen {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::BLANK; rows * cols],
            previous: vec![Cell::BLANK; rows * cols],
            cursor: None,
            previous_cursor: None,
            force_full_redraw_next: true,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Resize the screen. Contents are blanked and the next present repaints everything.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        if rows == self.rows && cols == self.cols {
            return;
        }
        self.rows = rows;
        self.cols = cols;
        self.cells = vec![Cell::BLANK; rows * cols];
        self.previous = vec![Cell::BLANK; rows * cols];
        self.cursor = None;
        self.force_full_redraw_next = true;
    }

    pub fn request_full_redraw_next(&mut self) {
        self.force_full_redraw_next = true;
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col)
    }

    /// Characters of one row, wide-grapheme tails omitted.
    pub fn row_text(&self, row: usize) -> String {
        if row >= self.rows {
            return String::new();
        }
        self.cells[row * self.cols..(row + 1) * self.cols]
            .iter()
            .filter(|cell| !cell.is_tail())
            .map(|cell| cell.symbol.as_str())
            .collect()
    }

    /// Hardware cursor requested for this frame, if a focused surface placed one.
    pub fn cursor(&self) -> Option<Position> {
        self.cursor
    }

    pub(crate) fn begin_frame(&mut self) {
        self.cursor = None;
    }

    pub(crate) fn set_cursor(&mut self, position: Position) {
        if position.row < self.rows && position.col < self.cols {
            self.cursor = Some(position);
        }
    }

    /// Copy `cells` (a `width`-wide block) with its top-left at `(top, left)`, clipped.
    pub(crate) fn blit(&mut self, top: usize, left: usize, width: usize, cells: &[Cell]) {
        if width == 0 || left >= self.cols {
            return;
        }
        let visible = width.min(self.cols - left);
        for (offset, source) in cells.chunks(width).enumerate() {
            let row = top + offset;
            if row >= self.rows {
                break;
            }
            let start = row * self.cols;
            let target = &mut self.cells[start + left..start + left + visible];
            target.clone_from_slice(&source[..visible]);
            repair_row(&mut self.cells[start..start + self.cols]);
        }
    }

    /// Queue the commands that bring the terminal from the last presented image to this one.
    pub fn present(&mut self, gate: &mut OutputGate) {
        let full = std::mem::take(&mut self.force_full_redraw_next);
        let mut cmds = Vec::new();
        if full {
            cmds.push(TerminalCmd::ClearScreen);
            self.previous.fill(Cell::BLANK);
        }

        let mut current_attr = None;
        for row in 0..self.rows {
            let start = row * self.cols;
            let mut col = 0;
            while col < self.cols {
                if self.cells[start + col] == self.previous[start + col] {
                    col += 1;
                    continue;
                }
                // A changed tail is redrawn through its lead.
                if self.cells[start + col].is_tail() && col > 0 {
                    col -= 1;
                }
                cmds.push(TerminalCmd::MoveTo { row, col });
                let mut run = String::new();
                let mut first = true;
                while col < self.cols {
                    let cell = &self.cells[start + col];
                    if !first && !cell.is_tail() && *cell == self.previous[start + col] {
                        break;
                    }
                    first = false;
                    col += 1;
                    if cell.is_tail() {
                        continue;
                    }
                    if current_attr != Some(cell.attr) {
                        if !run.is_empty() {
                            cmds.push(TerminalCmd::Text(std::mem::take(&mut run)));
                        }
                        cmds.push(TerminalCmd::SetAttr(cell.attr));
                        current_attr = Some(cell.attr);
                    }
                    run.push_str(&cell.symbol);
                }
                if !run.is_empty() {
                    cmds.push(TerminalCmd::Text(run));
                }
            }
        }

        let cursor_changed = self.cursor != self.previous_cursor;
        if cmds.is_empty() && !cursor_changed {
            return;
        }

        gate.push(TerminalCmd::HideCursor);
        gate.extend(cmds);
        if current_attr.is_some() {
            gate.push(TerminalCmd::SetAttr(Attr::DEFAULT));
        }
        if let Some(cursor) = self.cursor {
            gate.push(TerminalCmd::MoveTo {
                row: cursor.row,
                col: cursor.col,
            });
            gate.push(TerminalCmd::ShowCursor);
        }
        self.previous.clone_from_slice(&self.cells);
        self.previous_cursor = self.cursor;
    }
}

#[cfg(test)]
mod tests {
    use compact_str::CompactString;

    use super::{repair_row, Cell, Screen};

use crate::core::geometry::Position;
    use crate::core::output::{OutputGate, TerminalCmd};
    use crate::core::style::Attr;

    fn text_cells(text: &str, attr: Attr) -> Vec<Cell> {
        text.chars()
            .map(|symbol| Cell {
                symbol: CompactString::from(symbol.to_string()),
                attr,
                width: 1,
            })
            .collect()
    }

    #[test]
    fn blit_clips_to_screen() {
        let mut screen = Screen::new(2, 4);
        screen.blit(1, 2, 3, &text_cells("abcdef", Attr::DEFAULT));
        assert_eq!(screen.row_text(0), "    ");
        assert_eq!(screen.row_text(1), "  ab");
    }

    #[test]
    fn first_present_clears_then_paints() {
        let mut screen = Screen::new(1, 3);
        screen.blit(0, 0, 2, &text_cells("hi", Attr::DEFAULT));
        let mut gate = OutputGate::new();
        screen.present(&mut gate);
        let cmds = gate.commands();
        assert_eq!(cmds[0], TerminalCmd::HideCursor);
        assert_eq!(cmds[1], TerminalCmd::ClearScreen);
        assert!(cmds.contains(&TerminalCmd::Text("hi".to_string())));
    }

    #[test]
    fn unchanged_present_emits_nothing() {
        let mut screen = Screen::new(1, 3);
        let mut gate = OutputGate::new();
        screen.present(&mut gate);
        gate.clear();
        screen.present(&mut gate);
        assert!(gate.is_empty());
    }

    #[test]
    fn present_emits_only_changed_runs() {
        let mut screen = Screen::new(1, 6);
        let mut gate = OutputGate::new();
        screen.present(&mut gate);
        gate.clear();

        screen.blit(0, 3, 2, &text_cells("xy", Attr::DEFAULT));
        screen.present(&mut gate);
        let cmds = gate.commands();
        assert!(cmds.contains(&TerminalCmd::MoveTo { row: 0, col: 3 }));
        assert!(cmds.contains(&TerminalCmd::Text("xy".to_string())));
        assert!(!cmds.contains(&TerminalCmd::ClearScreen));
    }

    #[test]
    fn cursor_is_shown_when_requested() {
        let mut screen = Screen::new(3, 3);
        let mut gate = OutputGate::new();
        screen.begin_frame();
        screen.set_cursor(Position::new(1, 2));
        screen.present(&mut gate);
        let cmds = gate.commands();
        let tail = &cmds[cmds.len() - 2..];
        assert_eq!(
            tail,
            &[TerminalCmd::MoveTo { row: 1, col: 2 }, TerminalCmd::ShowCursor]
        );
    }

    #[test]
    fn cursor_outside_screen_is_ignored() {
        let mut screen = Screen::new(2, 2);
        screen.set_cursor(Position::new(5, 0));
        assert_eq!(screen.cursor(), None);
    }

    #[test]
    fn repair_blanks_orphaned_wide_halves() {
        let lead = Cell {
            symbol: CompactString::const_new("界"),
            attr: Attr::DEFAULT,
            width: 2,
        };
        let tail = Cell {
            width: 0,
            ..Cell::BLANK
        };
        let mut row = vec![tail, lead.clone(), Cell::BLANK, lead];
        repair_row(&mut row);
        assert!(row.iter().all(|cell| *cell == Cell::BLANK));
    }
}
