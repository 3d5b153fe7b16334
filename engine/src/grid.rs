//! Fixed-size grid for tile-based games.
//!
//! Cells are addressed by row and column and stored row-major. The grid also
//! knows its cell size in screen pixels, so it can map a pointer position to
//! the cell under it and a cell back to its on-screen square.

use glam::Vec2;

/// A cell address (row, column). Signed so that positions left of or above
/// the grid stay representable and simply fail the bounds check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellCoord {
    pub row: i32,
    pub col: i32,
}

impl CellCoord {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for CellCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Grid storing one value per cell.
#[derive(Clone, Debug)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cell_size: f32,
    cells: Vec<T>, // Row-major: [row * cols + col]
}

impl<T: Clone> Grid<T> {
    /// Create a grid with `rows` x `cols` cells, all set to `default`.
    pub fn new(rows: usize, cols: usize, cell_size: f32, default: T) -> Self {
        Self {
            rows,
            cols,
            cell_size,
            cells: vec![default; rows * cols],
        }
    }

    /// Create the grid that tiles a `width` x `height` pixel area.
    ///
    /// Partial cells at the right and bottom edges are dropped.
    pub fn covering(width: u32, height: u32, cell_size: u32, default: T) -> Self {
        let cell = cell_size.max(1);
        Self::new(
            (height / cell) as usize,
            (width / cell) as usize,
            cell as f32,
            default,
        )
    }
}

impl<T> Grid<T> {
    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Edge length of one cell in pixels.
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Cell under a pixel position. The result may be out of bounds.
    pub fn cell_at(&self, position: Vec2) -> CellCoord {
        CellCoord {
            row: (position.y / self.cell_size).floor() as i32,
            col: (position.x / self.cell_size).floor() as i32,
        }
    }

    /// Top-left corner of a cell in pixels.
    pub fn cell_origin(&self, coord: CellCoord) -> Vec2 {
        Vec2::new(
            coord.col as f32 * self.cell_size,
            coord.row as f32 * self.cell_size,
        )
    }

    /// Check if a coordinate lies inside the grid.
    pub fn contains(&self, coord: CellCoord) -> bool {
        coord.row >= 0
            && (coord.row as usize) < self.rows
            && coord.col >= 0
            && (coord.col as usize) < self.cols
    }

    fn index(&self, coord: CellCoord) -> Option<usize> {
        self.contains(coord)
            .then(|| coord.row as usize * self.cols + coord.col as usize)
    }

    /// Get the cell at the given coordinate, `None` if out of bounds.
    pub fn get(&self, coord: CellCoord) -> Option<&T> {
        self.index(coord).and_then(|index| self.cells.get(index))
    }

    /// Get mutable access to a cell, `None` if out of bounds.
    pub fn get_mut(&mut self, coord: CellCoord) -> Option<&mut T> {
        self.index(coord).and_then(|index| self.cells.get_mut(index))
    }

    /// Overwrite a cell. Returns `false` if the coordinate is out of bounds.
    pub fn set(&mut self, coord: CellCoord, value: T) -> bool {
        match self.get_mut(coord) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// All coordinates, row by row.
    pub fn iter_coords(&self) -> impl Iterator<Item = CellCoord> {
        let cols = self.cols as i32;
        (0..self.rows as i32).flat_map(move |row| (0..cols).map(move |col| CellCoord::new(row, col)))
    }

    /// All cells with their coordinates, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, &T)> {
        self.iter_coords().zip(self.cells.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covering_800x600_at_40px_is_15_rows_by_20_cols() {
        let grid = Grid::covering(800, 600, 40, 0u8);
        assert_eq!(grid.rows(), 15);
        assert_eq!(grid.cols(), 20);
        assert_eq!(grid.cell_size(), 40.0);
    }

    #[test]
    fn cell_at_uses_integer_division() {
        let grid = Grid::covering(800, 600, 40, ());
        assert_eq!(grid.cell_at(Vec2::new(0.0, 0.0)), CellCoord::new(0, 0));
        assert_eq!(grid.cell_at(Vec2::new(39.9, 39.9)), CellCoord::new(0, 0));
        assert_eq!(grid.cell_at(Vec2::new(85.0, 41.0)), CellCoord::new(1, 2));
        assert_eq!(grid.cell_at(Vec2::new(799.0, 599.0)), CellCoord::new(14, 19));
    }

    #[test]
    fn positions_outside_the_grid_are_out_of_bounds() {
        let grid = Grid::covering(800, 600, 40, ());
        assert!(!grid.contains(grid.cell_at(Vec2::new(-1.0, 10.0))));
        assert!(!grid.contains(grid.cell_at(Vec2::new(800.0, 10.0))));
        assert!(!grid.contains(grid.cell_at(Vec2::new(10.0, 600.0))));
        assert!(grid.get(CellCoord::new(15, 0)).is_none());
    }

    #[test]
    fn set_and_get_round_trip_by_row_and_column() {
        let mut grid = Grid::new(3, 4, 10.0, None);
        assert!(grid.set(CellCoord::new(2, 3), Some('x')));
        assert!(!grid.set(CellCoord::new(3, 0), Some('y')));

        assert_eq!(grid.get(CellCoord::new(2, 3)), Some(&Some('x')));
        assert_eq!(grid.get(CellCoord::new(3, 2)), None);
        assert_eq!(grid.iter().filter(|(_, cell)| cell.is_some()).count(), 1);
    }

    #[test]
    fn iteration_is_row_major() {
        let grid = Grid::new(2, 3, 1.0, 0);
        let coords: Vec<_> = grid.iter_coords().collect();
        assert_eq!(coords.len(), 6);
        assert_eq!(coords[0], CellCoord::new(0, 0));
        assert_eq!(coords[2], CellCoord::new(0, 2));
        assert_eq!(coords[3], CellCoord::new(1, 0));
    }

    #[test]
    fn cell_origin_is_top_left_corner() {
        let grid = Grid::covering(800, 600, 40, ());
        assert_eq!(grid.cell_origin(CellCoord::new(1, 2)), Vec2::new(80.0, 40.0));
    }
}
