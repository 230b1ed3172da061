//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal play.
//! It intentionally avoids ratatui widgets/layout and instead renders into a
//! simple framebuffer that can be flushed to a terminal backend.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Draw the board from a [`GameSnapshot`](crate::core::GameSnapshot), never from live engine state
//! - Allow precise control over aspect ratio (3 chars wide per hole)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use brainvita_core as core;
pub use brainvita_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, ViewState, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
