//! Scoring module - line clear points, leveling and gravity speed
//!
//! - Line clears award `LINE_SCORES[rows] * level`.
//! - Hard drops award 2 points per row descended.
//! - Level is `lines / 10 + 1`, so play starts at level 1.
//! - Gravity comes from `SPEED_TABLE[level - 1]`, clamped to the last entry.

use crate::types::{HARD_DROP_POINTS_PER_ROW, LINES_PER_LEVEL, LINE_SCORES, SPEED_TABLE};

/// Points for clearing `rows` rows at `level`.
///
/// More than four rows (only possible on a hand-built grid) scores as four.
pub fn line_clear_score(rows: usize, level: u32) -> u32 {
    let base = LINE_SCORES[rows.min(LINE_SCORES.len() - 1)];
    base.saturating_mul(level)
}

/// Points for a hard drop of `rows` rows.
pub fn hard_drop_score(rows: u32) -> u32 {
    rows.saturating_mul(HARD_DROP_POINTS_PER_ROW)
}

/// Level for a total number of cleared lines (starts at 1).
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Gravity interval for a level (in milliseconds).
pub fn drop_interval_ms(level: u32) -> u32 {
    let idx = (level.max(1) - 1) as usize;
    SPEED_TABLE[idx.min(SPEED_TABLE.len() - 1)]
}

/// Soft drop interval: base divided by the factor, never below 1ms.
///
/// Timers run in whole milliseconds, so the quotient rounds down (70 / 20
/// gives 3, not 3.5) and sub-millisecond intervals become 1.
pub fn soft_drop_interval_ms(base_interval: u32, factor: u32) -> u32 {
    (base_interval / factor.max(1)).max(1)
}
