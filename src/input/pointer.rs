use ratatui::layout::Rect;

use crate::constants::{CELL_COLUMNS, CELL_ROWS};
use crate::game::Point;

/// Maps terminal cells under the board to maze pixels.
///
/// Every maze cell is drawn on `CELL_COLUMNS` x `CELL_ROWS` terminal cells. A terminal cell maps
/// to the pixel at its centre.
#[derive(Clone, Copy, Debug)]
pub struct BoardGeometry {
    pub area: Rect,
    pub cell_size: f64,
}

impl BoardGeometry {
    pub fn new(area: Rect, cell_size: f64) -> Self {
        Self { area, cell_size }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.area.x
            && column < self.area.x + self.area.width
            && row >= self.area.y
            && row < self.area.y + self.area.height
    }

    /// Pixel under a terminal cell, or None when the cell is outside the board.
    pub fn to_point(&self, column: u16, row: u16) -> Option<Point> {
        if !self.contains(column, row) {
            return None;
        }
        let x = (column - self.area.x) as f64 + 0.5;
        let y = (row - self.area.y) as f64 + 0.5;
        Some(Point::new(
            x * self.cell_size / CELL_COLUMNS as f64,
            y * self.cell_size / CELL_ROWS as f64,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_terminal_cells_to_pixel_centres() {
        let geometry = BoardGeometry::new(Rect::new(10, 5, 20, 10), 60.0);
        assert_eq!(geometry.to_point(10, 5), Some(Point::new(7.5, 15.0)));
        assert_eq!(geometry.to_point(13, 6), Some(Point::new(52.5, 45.0)));
        assert_eq!(geometry.to_point(29, 14), Some(Point::new(292.5, 285.0)));
    }

    #[test]
    fn outside_the_board_is_none() {
        let geometry = BoardGeometry::new(Rect::new(10, 5, 20, 10), 60.0);
        assert_eq!(geometry.to_point(9, 5), None);
        assert_eq!(geometry.to_point(30, 5), None);
        assert_eq!(geometry.to_point(10, 4), None);
        assert_eq!(geometry.to_point(10, 15), None);
    }
}
