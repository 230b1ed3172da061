//! Layout templates - named board shapes with their starting gap
//!
//! A layout is static configuration: a 7x7 grid of codes (-1 no hole,
//! 0 empty hole, 1 peg). The codes never leave this module and
//! [`Board::from_layout`](crate::Board::from_layout); the rest of the engine
//! works on [`Cell`](crate::types::Cell).
//!
//! Malformed grids are rejected by [`Layout::new`] so a bad template fails at
//! catalog load, never during play.

use serde::{Deserialize, Serialize};

use crate::types::{Cell, BOARD_SIZE, CODE_EMPTY};

/// Row-major grid of layout codes
pub type LayoutGrid = [[i8; BOARD_SIZE as usize]; BOARD_SIZE as usize];

/// Errors raised while building a layout from raw data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("layout '{name}' has {rows} rows, expected {expected}", expected = BOARD_SIZE)]
    WrongRowCount { name: String, rows: usize },

    #[error("layout '{name}' row {row} has {len} cells, expected {expected}", expected = BOARD_SIZE)]
    RaggedRow { name: String, row: usize, len: usize },

    #[error("layout '{name}' has unknown code {code} at ({row}, {col})")]
    UnknownCode {
        name: String,
        row: usize,
        col: usize,
        code: i8,
    },

    #[error("layout '{name}' has no empty hole to start from")]
    NoGap { name: String },

    #[error("layout name must not be empty")]
    EmptyName,

    #[error("duplicate layout name '{0}'")]
    DuplicateName(String),
}

/// A validated, immutable board template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    name: String,
    description: String,
    grid: LayoutGrid,
}

impl Layout {
    /// Validate raw rows into a layout.
    ///
    /// Rows must be exactly `BOARD_SIZE` long, there must be `BOARD_SIZE` of
    /// them, every code must be -1, 0 or 1, and at least one hole must start
    /// empty.
    pub fn new<R: AsRef<[i8]>>(
        name: impl Into<String>,
        description: impl Into<String>,
        rows: &[R],
    ) -> Result<Self, LayoutError> {
        let name: String = name.into();
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(LayoutError::EmptyName);
        }

        let n = BOARD_SIZE as usize;
        if rows.len() != n {
            return Err(LayoutError::WrongRowCount {
                name,
                rows: rows.len(),
            });
        }

        let mut grid = [[CODE_EMPTY; BOARD_SIZE as usize]; BOARD_SIZE as usize];
        let mut has_gap = false;
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n {
                return Err(LayoutError::RaggedRow {
                    name,
                    row: r,
                    len: row.len(),
                });
            }
            for (c, &code) in row.iter().enumerate() {
                match Cell::from_code(code) {
                    Some(Cell::Empty) => has_gap = true,
                    Some(_) => {}
                    None => {
                        return Err(LayoutError::UnknownCode {
                            name,
                            row: r,
                            col: c,
                            code,
                        })
                    }
                }
                grid[r][c] = code;
            }
        }

        if !has_gap {
            return Err(LayoutError::NoGap { name });
        }

        Ok(Self {
            name,
            description: description.into(),
            grid,
        })
    }

    /// Built-in template data; checked by the catalog tests instead of at runtime.
    pub(crate) fn from_static(name: &str, description: &str, grid: LayoutGrid) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            grid,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn grid(&self) -> &LayoutGrid {
        &self.grid
    }

    /// Number of holes in the shape
    pub fn hole_count(&self) -> usize {
        self.grid
            .iter()
            .flatten()
            .filter(|&&code| Cell::from_code(code).is_some_and(|c| c.is_hole()))
            .count()
    }

    /// Number of pegs in the initial deal
    pub fn peg_count(&self) -> usize {
        self.grid
            .iter()
            .flatten()
            .filter(|&&code| Cell::from_code(code) == Some(Cell::Occupied))
            .count()
    }

    /// Serializable record form of this layout
    pub fn to_data(&self) -> LayoutData {
        LayoutData {
            name: self.name.clone(),
            description: self.description.clone(),
            board: self.grid.iter().map(|row| row.to_vec()).collect(),
        }
    }
}

/// External layout record: `{ name, description, board }`.
///
/// This is the shape layouts take in config files; turn it into a [`Layout`]
/// with `Layout::try_from`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutData {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub board: Vec<Vec<i8>>,
}

impl TryFrom<LayoutData> for Layout {
    type Error = LayoutError;

    fn try_from(data: LayoutData) -> Result<Self, Self::Error> {
        Layout::new(data.name, data.description, &data.board)
    }
}

impl TryFrom<&LayoutData> for Layout {
    type Error = LayoutError;

    fn try_from(data: &LayoutData) -> Result<Self, Self::Error> {
        Layout::new(data.name.clone(), data.description.clone(), &data.board)
    }
}
