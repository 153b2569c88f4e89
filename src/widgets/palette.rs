use crate::core::content::Canvas;
use crate::core::style::{Attr, Color};

pub const PALETTE_ROWS: usize = 16;
pub const PALETTE_COLS: usize = 80;
pub const PALETTE_TOP: usize = 8;
pub const PALETTE_LEFT: usize = 8;

const CELL_WIDTH: usize = 5;

/// A 16×16 grid showing every indexed colour as its own background.
#[derive(Debug, Default)]
pub struct PaletteWindow;

impl PaletteWindow {
    pub fn new() -> Self {
        Self
    }

    pub fn paint(&self, canvas: &mut dyn Canvas) {
        for col in 0..16 {
            for row in 0..16 {
                let index = col + row * 16;
                let attr = Attr::new(Color::Default, Color::Indexed(index as u8));
                canvas.paint_text(row, col * CELL_WIDTH, &format!(" {index:3} "), attr);
            }
        }
    }
}
