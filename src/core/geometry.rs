//! Cell-grid geometry.

/// A cell position, zero-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A rectangle of terminal cells. Zero-area rectangles are legal and contain nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub top: usize,
    pub left: usize,
    pub rows: usize,
    pub cols: usize,
}

impl Rect {
    pub const fn new(top: usize, left: usize, rows: usize, cols: usize) -> Self {
        Self {
            top,
            left,
            rows,
            cols,
        }
    }

    pub fn bottom(&self) -> usize {
        self.top.saturating_add(self.rows)
    }

    pub fn right(&self) -> usize {
        self.left.saturating_add(self.cols)
    }

    pub fn area(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.top <= row && row < self.bottom() && self.left <= col && col < self.right()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.top < other.bottom()
            && other.top < self.bottom()
            && self.left < other.right()
            && other.left < self.right()
    }
}

/// Apply a signed delta to an unsigned extent; `None` when the result would be negative.
pub(crate) fn offset(value: usize, delta: isize) -> Option<usize> {
    if delta >= 0 {
        value.checked_add(delta.unsigned_abs())
    } else {
        value.checked_sub(delta.unsigned_abs())
    }
}

#[cfg(test)]
mod tests {
    use super::{offset, Rect};

    #[test]
    fn contains_is_half_open() {
        let rect = Rect::new(2, 3, 4, 5);
        assert!(rect.contains(2, 3));
        assert!(rect.contains(5, 7));
        assert!(!rect.contains(6, 3));
        assert!(!rect.contains(2, 8));
        assert!(!rect.contains(1, 3));
    }

    #[test]
    fn zero_area_contains_nothing() {
        let rect = Rect::new(0, 0, 0, 10);
        assert!(rect.is_empty());
        assert!(!rect.contains(0, 0));
        assert!(!rect.intersects(&Rect::new(0, 0, 5, 5)));
    }

    #[test]
    fn adjacent_rects_do_not_intersect() {
        let upper = Rect::new(0, 0, 1, 10);
        let lower = Rect::new(1, 0, 1, 10);
        assert!(!upper.intersects(&lower));
        assert!(upper.intersects(&Rect::new(0, 9, 3, 3)));
    }

    #[test]
    fn offset_rejects_negative_results() {
        assert_eq!(offset(3, -3), Some(0));
        assert_eq!(offset(3, -4), None);
        assert_eq!(offset(3, 2), Some(5));
    }
}
