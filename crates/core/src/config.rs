//! Engine tuning knobs.
//!
//! Defaults reproduce the standard ruleset. With the `serde` feature the
//! config can be read from JSON; missing fields fall back to defaults.

use crate::types::{LOCK_DELAY_MS, SOFT_DROP_FACTOR};

/// How often moving or rotating a grounded piece may restart the lock delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum LockResetPolicy {
    /// Every successful shift or rotation restarts the timer. Allows indefinite stalling.
    #[default]
    Unlimited,
    /// At most `max_resets` restarts per piece.
    Limited { max_resets: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    pub lock_delay_ms: u32,
    pub soft_drop_factor: u32,
    pub lock_reset: LockResetPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lock_delay_ms: LOCK_DELAY_MS,
            soft_drop_factor: SOFT_DROP_FACTOR,
            lock_reset: LockResetPolicy::Unlimited,
        }
    }
}
