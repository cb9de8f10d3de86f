//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the game rules, state management and simulation.
//! It has no dependencies on terminal, input or file I/O: the host feeds
//! commands and elapsed time, and reads back snapshots and outcomes.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision checks and line clearing
//! - [`pieces`]: tetromino shapes, spawn positions and SRS wall kicks
//! - [`rng`]: 7-bag piece generation over an injectable random source
//! - [`scoring`]: line clear points, levels and gravity speed
//! - [`config`]: lock delay, soft drop factor and lock reset policy
//! - [`game_state`]: session lifecycle and the fixed-step update
//! - [`snapshot`]: read-only copy of a frame for renderers
//!
//! # Example
//!
//! ```
//! use mr_tet_core::{GameState, StepOutcome};
//! use mr_tet_types::{GameCommand, SessionState};
//!
//! let mut game = GameState::new(12345);
//! assert_eq!(game.state(), SessionState::Idle);
//!
//! game.apply_command(GameCommand::Start);
//! game.apply_command(GameCommand::MoveRight);
//! game.apply_command(GameCommand::RotateCw);
//!
//! let outcome = game.apply_command(GameCommand::HardDrop);
//! assert!(matches!(outcome, StepOutcome::Locked { .. }));
//! assert!(game.score() > 0); // hard drop awards 2 points per row
//! ```
//!
//! # Timing
//!
//! Call [`GameState::update`] every frame with the elapsed milliseconds
//! (the runner uses a fixed 16ms step). Gravity follows the level's speed
//! table entry, soft drop divides it by 20, and a grounded piece locks after
//! 500ms unless it moves, rotates or can fall again.

pub mod board;
pub mod config;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use mr_tet_types as types;

pub use board::Board;
pub use config::{EngineConfig, LockResetPolicy};
pub use game_state::{GameOverRecord, GameState, StepOutcome, Tetromino};
pub use pieces::{get_shape, shape_matrix, spawn_position, try_rotate};
pub use rng::{PieceBag, RandomSource, SimpleRng};
pub use snapshot::{ActiveSnapshot, GameSnapshot, TimersSnapshot};
