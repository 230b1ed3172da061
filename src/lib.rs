//! Brainvita peg solitaire (workspace facade crate).
//!
//! The rules engine, key map and renderer live in dedicated crates under
//! `crates/`; this package re-exports them as `brainvita::{core,input,term,types}`
//! and adds the front-end pieces the binary is built from.

pub use brainvita_core as core;
pub use brainvita_input as input;
pub use brainvita_term as term;
pub use brainvita_types as types;

pub mod app;
pub mod cli;
pub mod config;
pub mod logging;
