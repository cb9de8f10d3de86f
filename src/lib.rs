//! MR. TET (workspace facade crate).
//!
//! Re-exports the member crates as `mr_tet::{types, core, input, term, scores}`
//! so the binary, tests and benches share one import path.

pub use mr_tet_core as core;
pub use mr_tet_input as input;
pub use mr_tet_scores as scores;
pub use mr_tet_term as term;
pub use mr_tet_types as types;
