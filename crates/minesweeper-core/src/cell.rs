use serde::{Deserialize, Serialize};
use std::fmt;

/// A board coordinate (row, column). Rows grow downward, columns to
/// the right, both zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The 8-connected neighborhood of this cell, clipped to a
    /// `height` x `width` board and excluding the cell itself.
    pub fn neighbors(self, height: usize, width: usize) -> impl Iterator<Item = Cell> {
        let (row, col) = (self.row as isize, self.col as isize);
        (-1isize..=1)
            .flat_map(move |dr| (-1isize..=1).map(move |dc| (row + dr, col + dc)))
            .filter(move |&(r, c)| {
                (r, c) != (row, col)
                    && r >= 0
                    && c >= 0
                    && (r as usize) < height
                    && (c as usize) < width
            })
            .map(|(r, c)| Cell::new(r as usize, c as usize))
    }

    /// All cells of a `height` x `width` board in row-major order.
    pub fn all(height: usize, width: usize) -> impl Iterator<Item = Cell> {
        (0..height).flat_map(move |row| (0..width).map(move |col| Cell::new(row, col)))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_cell_has_eight_neighbors() {
        let neighbors: Vec<Cell> = Cell::new(4, 4).neighbors(8, 8).collect();
        assert_eq!(neighbors.len(), 8);
        assert!(!neighbors.contains(&Cell::new(4, 4)));
    }

    #[test]
    fn corner_and_edge_clipping() {
        assert_eq!(Cell::new(0, 0).neighbors(8, 8).count(), 3);
        assert_eq!(Cell::new(7, 7).neighbors(8, 8).count(), 3);
        assert_eq!(Cell::new(0, 4).neighbors(8, 8).count(), 5);
        assert_eq!(Cell::new(3, 0).neighbors(8, 8).count(), 5);
    }

    #[test]
    fn neighbors_on_degenerate_board() {
        // 1x1 board: no neighbors at all
        assert_eq!(Cell::new(0, 0).neighbors(1, 1).count(), 0);
        // 1x3 board: middle cell touches only left and right
        let neighbors: Vec<Cell> = Cell::new(0, 1).neighbors(1, 3).collect();
        assert_eq!(neighbors, vec![Cell::new(0, 0), Cell::new(0, 2)]);
    }

    #[test]
    fn all_covers_board_in_row_major_order() {
        let cells: Vec<Cell> = Cell::all(2, 3).collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[5], Cell::new(1, 2));
        let mut sorted = cells.clone();
        sorted.sort();
        assert_eq!(cells, sorted);
    }
}
