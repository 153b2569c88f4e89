//! One terminal sub-region: primitive paint, attribute-only repaint, blank-fill, and flush.
//!
//! A surface knows nothing about the pane tree. Out-of-range writes are clipped silently;
//! move/resize failures are reported so the caller can log them, and leave the surface as it
//! was.

use compact_str::CompactString;
use unicode_segmentation::UnicodeSegmentation;

use crate::core::content::Canvas;
use crate::core::geometry::{Position, Rect};
use crate::core::style::Attr;
use crate::core::text::width::grapheme_width;
use crate::error::SurfaceError;
use crate::render::screen::{repair_row, Cell, Screen};

/// Largest coordinate a terminal can address.
const MAX_EXTENT: usize = u16::MAX as usize;

/// Call counters for the geometry primitives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurfaceStats {
    pub moves: usize,
    pub resizes: usize,
    pub flushes: usize,
}

#[derive(Debug)]
pub struct Surface {
    rect: Rect,
    cells: Vec<Cell>,
    cursor: Option<Position>,
    cursor_enabled: bool,
    stats: SurfaceStats,
}

impl Surface {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            cells: vec![Cell::BLANK; rect.area()],
            cursor: None,
            cursor_enabled: false,
            stats: SurfaceStats::default(),
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn stats(&self) -> SurfaceStats {
        self.stats
    }

    pub fn move_to(&mut self, top: usize, left: usize) -> Result<(), SurfaceError> {
        self.stats.moves += 1;
        if top > MAX_EXTENT || left > MAX_EXTENT {
            return Err(SurfaceError::OffScreen { top, left });
        }
        self.rect.top = top;
        self.rect.left = left;
        Ok(())
    }

    /// Resize the backing region, keeping the overlapping top-left content.
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<(), SurfaceError> {
        self.stats.resizes += 1;
        if rows > MAX_EXTENT || cols > MAX_EXTENT {
            return Err(SurfaceError::Oversized { rows, cols });
        }
        let mut cells = vec![Cell::BLANK; rows * cols];
        let keep_rows = rows.min(self.rect.rows);
        let keep_cols = cols.min(self.rect.cols);
        for row in 0..keep_rows {
            let from = row * self.rect.cols;
            let to = row * cols;
            cells[to..to + keep_cols].clone_from_slice(&self.cells[from..from + keep_cols]);
            repair_row(&mut cells[to..to + cols]);
        }
        self.cells = cells;
        self.rect.rows = rows;
        self.rect.cols = cols;
        if let Some(cursor) = self.cursor {
            if cursor.row >= rows || cursor.col >= cols {
                self.cursor = None;
            }
        }
        Ok(())
    }

    pub fn cursor_enabled(&self) -> bool {
        self.cursor_enabled
    }

    /// Whether flushing this surface places the hardware cursor.
    pub fn set_cursor_enabled(&mut self, enabled: bool) {
        self.cursor_enabled = enabled;
    }

    pub fn cursor(&self) -> Option<Position> {
        self.cursor
    }

    /// Place the cursor, relative to the surface origin. An out-of-bounds position clears it.
    pub fn set_cursor(&mut self, row: usize, col: usize) -> Result<(), SurfaceError> {
        if row >= self.rect.rows || col >= self.rect.cols {
            self.cursor = None;
            return Err(SurfaceError::CursorOutOfBounds { row, col });
        }
        self.cursor = Some(Position::new(row, col));
        Ok(())
    }

    pub fn clear_cursor(&mut self) {
        self.cursor = None;
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        if row >= self.rect.rows || col >= self.rect.cols {
            return None;
        }
        self.cells.get(row * self.rect.cols + col)
    }

    /// Characters of one row, wide-grapheme tails omitted.
    pub fn row_text(&self, row: usize) -> String {
        if row >= self.rect.rows {
            return String::new();
        }
        self.row_cells(row)
            .iter()
            .filter(|cell| !cell.is_tail())
            .map(|cell| cell.symbol.as_str())
            .collect()
    }

    /// Commit this surface's cells to the shared screen.
    pub fn flush(&mut self, screen: &mut Screen) {
        self.stats.flushes += 1;
        screen.blit(self.rect.top, self.rect.left, self.rect.cols, &self.cells);
        if self.cursor_enabled {
            if let Some(cursor) = self.cursor {
                screen.set_cursor(Position::new(
                    self.rect.top + cursor.row,
                    self.rect.left + cursor.col,
                ));
            }
        }
    }

    fn row_cells(&self, row: usize) -> &[Cell] {
        let start = row * self.rect.cols;
        &self.cells[start..start + self.rect.cols]
    }

    fn row_cells_mut(&mut self, row: usize) -> &mut [Cell] {
        let start = row * self.rect.cols;
        let cols = self.rect.cols;
        &mut self.cells[start..start + cols]
    }
}

impl Canvas for Surface {
    fn rows(&self) -> usize {
        self.rect.rows
    }

    fn cols(&self) -> usize {
        self.rect.cols
    }

    fn paint_text(&mut self, row: usize, col: usize, text: &str, attr: Attr) {
        if row >= self.rect.rows || col >= self.rect.cols {
            return;
        }
        let cols = self.rect.cols;
        let cells = self.row_cells_mut(row);
        let mut at = col;
        for grapheme in text.graphemes(true) {
            let width = grapheme_width(grapheme);
            if width == 0 {
                continue;
            }
            if at + width > cols {
                break;
            }
            let symbol = if grapheme.starts_with('\t') {
                CompactString::const_new(" ")
            } else {
                CompactString::from(grapheme)
            };
            cells[at] = Cell {
                symbol,
                attr,
                width: width as u8,
            };
            if width == 2 {
                cells[at + 1] = Cell {
                    width: 0,
                    ..Cell::blank(attr)
                };
            }
            at += width;
        }
        repair_row(cells);
    }

    fn paint_attr(&mut self, row: usize, col: usize, count: usize, attr: Attr) {
        if row >= self.rect.rows || col >= self.rect.cols {
            return;
        }
        let cells = self.row_cells_mut(row);
        let mut start = col;
        // Recolouring half of a wide grapheme recolours both halves.
        if cells[start].is_tail() && start > 0 {
            start -= 1;
        }
        let mut end = col.saturating_add(count).min(cells.len());
        if end < cells.len() && cells[end].is_tail() {
            end += 1;
        }
        for cell in &mut cells[start..end] {
            cell.attr = attr;
        }
    }

    fn clear(&mut self, attr: Attr) {
        self.cells.fill(Cell::blank(attr));
    }
}
