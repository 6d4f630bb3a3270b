//! Grid geometry for gallery cards.

use ratatui::layout::Rect;

/// Preferred card width in columns, borders included.
pub const CARD_WIDTH: u16 = 28;
/// Card height in rows, borders included.
pub const CARD_HEIGHT: u16 = 12;

/// Row-major grid of fixed-size cards with vertical scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    area: Rect,
    columns: usize,
    visible_rows: usize,
}

impl GridLayout {
    /// Fits as many columns as the area allows, at least one.
    #[must_use]
    pub fn new(area: Rect) -> Self {
        let columns = usize::from((area.width / CARD_WIDTH).max(1));
        let visible_rows = usize::from((area.height / CARD_HEIGHT).max(1));
        Self {
            area,
            columns,
            visible_rows,
        }
    }

    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    #[must_use]
    pub const fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    /// First row to draw so the row of `selected` stays on screen.
    #[must_use]
    pub fn first_row(&self, selected: usize) -> usize {
        let row = selected / self.columns;
        (row + 1).saturating_sub(self.visible_rows)
    }

    /// Rects of the visible cards as `(index, rect)` pairs, for `count` cards.
    #[must_use]
    pub fn cells(&self, count: usize, selected: usize) -> Vec<(usize, Rect)> {
        let first = self.first_row(selected) * self.columns;
        let last = (first + self.visible_rows * self.columns).min(count);
        let width = self.area.width / u16::try_from(self.columns).unwrap_or(1);
        let height = CARD_HEIGHT.min(self.area.height);

        (first..last)
            .map(|index| {
                let offset = index - first;
                let col = u16::try_from(offset % self.columns).unwrap_or(0);
                let row = u16::try_from(offset / self.columns).unwrap_or(0);
                let rect = Rect::new(
                    self.area.x + col * width,
                    self.area.y + row * CARD_HEIGHT,
                    width,
                    height,
                );
                (index, rect)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_fit_width() {
        assert_eq!(GridLayout::new(Rect::new(0, 0, 120, 40)).columns(), 4);
        assert_eq!(GridLayout::new(Rect::new(0, 0, 10, 40)).columns(), 1);
    }

    #[test]
    fn test_cells_cover_first_rows() {
        let grid = GridLayout::new(Rect::new(0, 0, 84, 24));
        let cells = grid.cells(9, 0);

        assert_eq!(grid.columns(), 3);
        assert_eq!(grid.visible_rows(), 2);
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[4], (4, Rect::new(28, 12, 28, 12)));
    }

    #[test]
    fn test_scrolls_to_selection() {
        let grid = GridLayout::new(Rect::new(0, 0, 84, 24));

        assert_eq!(grid.first_row(5), 0);
        assert_eq!(grid.first_row(8), 1);

        let cells = grid.cells(9, 8);
        assert_eq!(cells.first().map(|(i, _)| *i), Some(3));
        assert_eq!(cells.last().map(|(i, _)| *i), Some(8));
        assert_eq!(cells[0].1.y, 0);
    }
}
