//! Terminal game renderer.
//!
//! A small, game-oriented rendering layer: views draw into a plain
//! framebuffer, and the renderer flushes it to the terminal through
//! `crossterm`, rewriting only the cells that changed.
//!
//! Board cells are two columns wide to compensate for terminal glyph
//! aspect ratio.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use mr_tet_core as core;
pub use mr_tet_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{piece_color, AnchorY, GameView, Hud, Viewport, TITLE};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
