#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cell {
    Open,
    Wall,
}

/// Grid coordinate of a maze cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Pixel coordinate of the cell's centre.
    #[cfg(test)]
    pub fn center(&self, cell_size: f64) -> Point {
        Point::new(
            (self.col as f64 + 0.5) * cell_size,
            (self.row as f64 + 0.5) * cell_size,
        )
    }
}

/// Pointer position in board pixels. Not snapped to the grid.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Build a board from rows of cells. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        debug_assert!(rows.iter().all(|r| r.len() == width));
        Self {
            rows: height,
            cols: width,
            cells: rows.into_iter().flatten().collect(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, pos: CellPos) -> Option<Cell> {
        if pos.row < self.rows && pos.col < self.cols {
            Some(self.cells[pos.row * self.cols + pos.col])
        } else {
            None
        }
    }

    pub fn is_open(&self, pos: CellPos) -> bool {
        self.get(pos) == Some(Cell::Open)
    }

    /// Cell that contains a pixel point, or None when the point is off the board.
    pub fn cell_at(&self, point: Point, cell_size: f64) -> Option<CellPos> {
        let col = (point.x / cell_size).floor();
        let row = (point.y / cell_size).floor();
        if !(col >= 0.0 && row >= 0.0) {
            return None;
        }
        let pos = CellPos::new(row as usize, col as usize);
        if pos.row < self.rows && pos.col < self.cols {
            Some(pos)
        } else {
            None
        }
    }

    /// Whether a pixel point lies inside an open cell.
    pub fn is_open_at(&self, point: Point, cell_size: f64) -> bool {
        self.cell_at(point, cell_size)
            .map_or(false, |pos| self.is_open(pos))
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols.max(1))
    }
}
