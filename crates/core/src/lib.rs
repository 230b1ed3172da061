//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and layout data.
//! It has **zero dependencies** on UI, terminal, or I/O, making it:
//!
//! - **Deterministic**: The same board always yields the same moves, in the same order
//! - **Testable**: Comprehensive unit tests for all game rules
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//! - **Stateless**: No globals; every board and game value is owned by the caller
//!
//! # Module Structure
//!
//! - [`board`]: 7x7 peg grid built from a layout
//! - [`layout`]: validated board templates and their record format
//! - [`catalog`]: the built-in layouts and name lookup
//! - [`rules`]: jump validation, enumeration, execution and classification
//! - [`game`]: the Idle / Playing / Won / Lost state machine
//! - [`snapshot`]: plain copy of a game for renderers
//!
//! # Game Rules
//!
//! - **Jump**: a peg jumps over an orthogonally adjacent peg into the empty hole
//!   directly beyond it; the jumped peg is removed
//! - **No diagonals, no wraparound**: only (±2, 0) and (0, ±2) displacements
//! - **Won**: exactly one peg left
//! - **Lost**: more than one peg left and no jump possible
//!
//! # Example
//!
//! ```
//! use brainvita_core::{Catalog, Game};
//! use brainvita_types::{GameStatus, Position};
//!
//! let catalog = Catalog::builtin().unwrap();
//! let mut game = Game::new();
//! game.start(catalog.get("Classic Cross").unwrap());
//!
//! // Jump the peg at (3, 1) over (3, 2) into the centre
//! let status = game.jump(Position::new(3, 1), Position::new(3, 3)).unwrap();
//! assert_eq!(status, GameStatus::Playing);
//! assert_eq!(game.pegs_left(), 31);
//! ```

pub mod board;
pub mod catalog;
pub mod game;
pub mod layout;
pub mod rules;
pub mod snapshot;

pub use brainvita_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use catalog::{classic_cross, Catalog, DEFAULT_LAYOUT};
pub use game::Game;
pub use layout::{Layout, LayoutData, LayoutError, LayoutGrid};
pub use rules::{
    apply_jump, classify, has_legal_move, is_legal_jump, legal_moves, legal_moves_from,
    DestinationList, JumpError, MoveList,
};
pub use snapshot::{CellGrid, GameSnapshot};
