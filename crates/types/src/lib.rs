//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine logic, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! Every Brainvita board is a square grid:
//!
//! - **Size**: 7x7 cells (indexed 0-6 on both axes)
//! - **Coordinates**: `(row, col)`, row 0 at the top, col 0 at the left
//!
//! Which of those cells are real holes is decided by the layout the board was
//! dealt from; the rest are [`Cell::Invalid`] for the lifetime of the board.
//!
//! # Layout Codes
//!
//! Layout templates are stored as small signed integers:
//!
//! | Code | Constant | Cell |
//! |------|----------|------|
//! | -1 | `CODE_INVALID` | [`Cell::Invalid`] |
//! | 0 | `CODE_EMPTY` | [`Cell::Empty`] |
//! | 1 | `CODE_OCCUPIED` | [`Cell::Occupied`] |
//!
//! # Examples
//!
//! ```
//! use brainvita_types::{Cell, Direction, Jump, Position, BOARD_SIZE};
//!
//! // Decode a layout code
//! assert_eq!(Cell::from_code(1), Some(Cell::Occupied));
//!
//! // Build a jump two holes to the right
//! let from = Position::new(3, 1);
//! let jump = Jump::new(from, from.offset(Direction::Right, 2));
//! assert_eq!(jump.to, Position::new(3, 3));
//! assert_eq!(jump.mid(), Position::new(3, 2));
//!
//! // Board dimensions
//! assert_eq!(BOARD_SIZE, 7);
//! ```

use std::fmt;

/// Board edge length in cells (7 rows x 7 columns)
pub const BOARD_SIZE: u8 = 7;

/// Total number of cells on the board (holes and non-holes)
pub const BOARD_CELLS: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// Upper bound on legal jumps for any board: four directions per cell.
pub const MAX_MOVES: usize = BOARD_CELLS * 4;

/// Layout code for a cell that is not part of the board shape
pub const CODE_INVALID: i8 = -1;

/// Layout code for an empty hole
pub const CODE_EMPTY: i8 = 0;

/// Layout code for a hole holding a peg
pub const CODE_OCCUPIED: i8 = 1;

/// A cell on the game board
///
/// - **Invalid**: no hole, structurally outside the board shape
/// - **Empty**: a hole without a peg
/// - **Occupied**: a hole holding a peg
///
/// Only `Empty <-> Occupied` transitions happen during play, and only via a jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Invalid,
    Empty,
    Occupied,
}

impl Cell {
    /// Decode a layout code
    ///
    /// # Examples
    ///
    /// ```
    /// use brainvita_types::Cell;
    ///
    /// assert_eq!(Cell::from_code(-1), Some(Cell::Invalid));
    /// assert_eq!(Cell::from_code(0), Some(Cell::Empty));
    /// assert_eq!(Cell::from_code(1), Some(Cell::Occupied));
    /// assert_eq!(Cell::from_code(2), None);
    /// ```
    pub fn from_code(code: i8) -> Option<Self> {
        match code {
            CODE_INVALID => Some(Cell::Invalid),
            CODE_EMPTY => Some(Cell::Empty),
            CODE_OCCUPIED => Some(Cell::Occupied),
            _ => None,
        }
    }

    /// Encode back to the layout code
    pub fn code(&self) -> i8 {
        match self {
            Cell::Invalid => CODE_INVALID,
            Cell::Empty => CODE_EMPTY,
            Cell::Occupied => CODE_OCCUPIED,
        }
    }

    /// True for `Empty` and `Occupied`
    pub fn is_hole(&self) -> bool {
        !matches!(self, Cell::Invalid)
    }
}

/// A board coordinate
///
/// Signed so that probes past the edge can be represented and then rejected by
/// bounds checks instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Check if the position lies within `[0, BOARD_SIZE)` on both axes
    ///
    /// # Examples
    ///
    /// ```
    /// use brainvita_types::Position;
    ///
    /// assert!(Position::new(0, 6).in_bounds());
    /// assert!(!Position::new(-1, 0).in_bounds());
    /// assert!(!Position::new(0, 7).in_bounds());
    /// ```
    pub fn in_bounds(&self) -> bool {
        let n = BOARD_SIZE as i8;
        self.row >= 0 && self.row < n && self.col >= 0 && self.col < n
    }

    /// Step `distance` cells in `dir`; the result may be out of bounds
    pub fn offset(&self, dir: Direction, distance: i8) -> Self {
        let (dr, dc) = dir.delta();
        Self {
            row: self.row.saturating_add(dr.saturating_mul(distance)),
            col: self.col.saturating_add(dc.saturating_mul(distance)),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Orthogonal jump directions
///
/// `Direction::ALL` fixes the probe order used by move enumeration:
/// Up, Down, Left, Right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Probe order for move enumeration
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit `(row, col)` step
    pub fn delta(&self) -> (i8, i8) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// A jump request: move the peg at `from` to `to`
///
/// Constructing a `Jump` says nothing about legality; that is decided against
/// a concrete board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Jump {
    pub from: Position,
    pub to: Position,
}

impl Jump {
    pub const fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }

    /// The jumped-over cell
    ///
    /// Only meaningful when `from` and `to` are two cells apart on one axis.
    pub fn mid(&self) -> Position {
        // the average of two i8 values always fits in i8
        Position {
            row: ((self.from.row as i16 + self.to.row as i16) / 2) as i8,
            col: ((self.from.col as i16 + self.to.col as i16) / 2) as i8,
        }
    }
}

impl fmt::Display for Jump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Game status
///
/// - **Idle**: no board is being evaluated (before the first deal, or after a stop)
/// - **Playing**: at least one legal jump exists
/// - **Won**: exactly one peg remains
/// - **Lost**: more than one peg remains and no jump is possible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    #[default]
    Idle,
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    /// `Won` and `Lost` end the game until the next deal
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Idle => "idle",
            GameStatus::Playing => "playing",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Player commands produced by input mapping
///
/// These drive the front end; the engine itself only ever sees jumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move the cursor one row up
    CursorUp,
    /// Move the cursor one row down
    CursorDown,
    /// Move the cursor one column left
    CursorLeft,
    /// Move the cursor one column right
    CursorRight,
    /// Pick up the peg under the cursor, or drop the selected peg there
    Select,
    /// Clear the current selection
    Cancel,
    /// Deal the current layout again
    Restart,
    /// Switch to the next layout in the catalog
    NextLayout,
    /// Switch to the previous layout in the catalog
    PrevLayout,
    /// Toggle destination highlighting
    ToggleHints,
}
