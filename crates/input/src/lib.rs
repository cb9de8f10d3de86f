//! Terminal input.
//!
//! Maps `crossterm` key events into [`crate::types::GameCommand`] and provides
//! a DAS/ARR handler for held keys, including terminals that never report
//! key releases.

pub mod handler;
pub mod map;

pub use mr_tet_types as types;

pub use handler::InputHandler;
pub use map::{is_soft_drop_key, map_key, should_quit};
