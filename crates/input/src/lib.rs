//! Terminal input module.
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::Command`]s for the front end.

pub mod map;

pub use brainvita_types as types;

pub use map::{handle_key_event, should_quit};
