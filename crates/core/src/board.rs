//! Board module - manages the peg grid
//!
//! The board is a 7x7 grid where each cell is a hole (empty or holding a peg) or
//! lies outside the board shape.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (row, col) where both range 0..6, row 0 at the top.

use crate::layout::Layout;
use crate::types::{Cell, Position, BOARD_CELLS, BOARD_SIZE};

/// The game board - 7x7 cells using flat array storage
///
/// Boards are plain values: a jump produces a new board rather than mutating
/// the one it was validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (row * SIZE + col)
    cells: [Cell; BOARD_CELLS],
}

impl Board {
    /// Create a board with no holes at all
    pub fn new() -> Self {
        Self {
            cells: [Cell::Invalid; BOARD_CELLS],
        }
    }

    /// Deal a fresh board from a layout template
    ///
    /// This is the only place layout codes are decoded into [`Cell`]s.
    pub fn from_layout(layout: &Layout) -> Self {
        let mut board = Self::new();
        for (r, row) in layout.grid().iter().enumerate() {
            for (c, &code) in row.iter().enumerate() {
                // Codes are checked in `Layout::new`.
                board.cells[r * BOARD_SIZE as usize + c] =
                    Cell::from_code(code).unwrap_or(Cell::Invalid);
            }
        }
        board
    }

    /// Build a board from a row-major cell grid
    pub fn from_cells(grid: [[Cell; BOARD_SIZE as usize]; BOARD_SIZE as usize]) -> Self {
        let mut board = Self::new();
        for (r, row) in grid.iter().enumerate() {
            board.cells[r * BOARD_SIZE as usize..(r + 1) * BOARD_SIZE as usize]
                .copy_from_slice(row);
        }
        board
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(pos: Position) -> Option<usize> {
        if !pos.in_bounds() {
            return None;
        }
        Some((pos.row as usize) * (BOARD_SIZE as usize) + (pos.col as usize))
    }

    /// Get cell at a position
    /// Returns None if out of bounds
    pub fn get(&self, pos: Position) -> Option<Cell> {
        Self::index(pos).map(|idx| self.cells[idx])
    }

    /// Set cell at a position
    /// Returns false if out of bounds
    pub(crate) fn set(&mut self, pos: Position, cell: Cell) -> bool {
        match Self::index(pos) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position holds a peg
    pub fn is_occupied(&self, pos: Position) -> bool {
        matches!(self.get(pos), Some(Cell::Occupied))
    }

    /// Check if position is an empty hole
    pub fn is_empty(&self, pos: Position) -> bool {
        matches!(self.get(pos), Some(Cell::Empty))
    }

    /// Check if position is a hole (empty or occupied)
    pub fn is_hole(&self, pos: Position) -> bool {
        self.get(pos).is_some_and(|cell| cell.is_hole())
    }

    /// Number of pegs on the board
    pub fn count_occupied(&self) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::Occupied).count()
    }

    /// Number of holes (the board shape), fixed for the lifetime of the board
    pub fn count_holes(&self) -> usize {
        self.cells.iter().filter(|c| c.is_hole()).count()
    }

    /// Iterate all cells in row-major order with their positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells.iter().enumerate().map(|(i, &cell)| {
            let n = BOARD_SIZE as usize;
            (Position::new((i / n) as i8, (i % n) as i8), cell)
        })
    }

    /// Positions of all pegs, row-major
    pub fn pegs(&self) -> impl Iterator<Item = Position> + '_ {
        self.iter()
            .filter(|&(_, cell)| cell == Cell::Occupied)
            .map(|(pos, _)| pos)
    }

    /// Copy the board out as a row-major grid
    pub fn to_rows(&self) -> [[Cell; BOARD_SIZE as usize]; BOARD_SIZE as usize] {
        let n = BOARD_SIZE as usize;
        let mut rows = [[Cell::Invalid; BOARD_SIZE as usize]; BOARD_SIZE as usize];
        for (r, row) in rows.iter_mut().enumerate() {
            row.copy_from_slice(&self.cells[r * n..(r + 1) * n]);
        }
        rows
    }

    /// True when both boards have holes in exactly the same places
    pub fn same_shape(&self, other: &Board) -> bool {
        self.cells
            .iter()
            .zip(other.cells.iter())
            .all(|(a, b)| a.is_hole() == b.is_hole())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
