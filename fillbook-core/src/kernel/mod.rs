//! Simulation kernels.
//!
//! Two implementations of the same fill constitution:
//! - [`reference`] — per-bar, per-intent scan. O(bars × intents). The
//!   semantic ground truth, used by the parity suite and debugging only.
//! - [`cursor`] — monotonic cursor plus bounded active book. The
//!   production path, O(bars + intents + active-book scan work).
//!
//! Both are pure functions of (bars, intents, ttl); neither owns state
//! across calls.

pub(crate) mod book;
pub(crate) mod cursor;
pub(crate) mod reference;

use crate::domain::{Fill, Side};
use crate::error::SimError;

/// Kernel-private position scalar. Derived entirely from the fill
/// sequence; reset every run; never exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Position {
    Flat,
    Long,
    Short,
}

impl Position {
    pub(crate) fn after_entry(side: Side) -> Self {
        match side {
            Side::Buy => Position::Long,
            Side::Sell => Position::Short,
        }
    }

    /// Side an exit intent must have to close this position.
    pub(crate) fn closing_side(self) -> Option<Side> {
        match self {
            Position::Flat => None,
            Position::Long => Some(Side::Sell),
            Position::Short => Some(Side::Buy),
        }
    }
}

/// Append to the preallocated fill buffer, surfacing exhaustion as an
/// explicit error instead of growing or truncating.
pub(crate) fn push_fill(fills: &mut Vec<Fill>, capacity: usize, fill: Fill) -> Result<(), SimError> {
    if fills.len() >= capacity {
        return Err(SimError::FillBufferExhausted { capacity });
    }
    fills.push(fill);
    Ok(())
}
