//! Unified simulation entry point — the only surface callers use.
//!
//! Sorts the intent collection once at this boundary, dispatches to the
//! selected kernel, and derives metrics through the shared formula. Which
//! kernel ran is invisible in the result; selection exists for the parity
//! suite and debugging and must never change results, only speed.

use crate::domain::{BarArrays, Fill, OrderIntent};
use crate::error::SimError;
use crate::kernel::{cursor, reference};
use crate::metrics::{metrics_from_fills, CostModel, SimMetrics};
use serde::{Deserialize, Serialize};

/// Which kernel executes the bar loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KernelSelect {
    /// Cursor + active-book kernel.
    #[default]
    Production,
    /// Per-bar full-scan oracle. Tests and debugging only.
    Reference,
}

/// Explicit per-call configuration. No environment variables, no globals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub kernel: KernelSelect,
    /// Bars an intent stays eligible after activation. 0 = good-till-
    /// cancelled, 1 = next-bar-only.
    pub ttl_bars: u32,
    pub cost: CostModel,
    /// Fill buffer capacity override. Defaults to a conservative bound
    /// derived from bar and intent counts.
    pub max_fills: Option<usize>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            kernel: KernelSelect::Production,
            ttl_bars: 1,
            cost: CostModel::default(),
            max_fills: None,
        }
    }
}

/// Fills plus derived metrics for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimReport {
    pub fills: Vec<Fill>,
    pub metrics: SimMetrics,
}

/// Conservative fill buffer bound: at most one entry and one exit per bar,
/// and at most one fill per intent.
pub fn default_fill_capacity(bar_count: usize, intent_count: usize) -> usize {
    (2 * bar_count).min(intent_count).max(1)
}

/// Run one simulation over `bars` with the given intent collection.
///
/// Intents need not arrive sorted; a working copy is sorted by
/// `(activate_bar, order_id)` here, and the production kernel re-verifies
/// that invariant independently before running.
pub fn run_simulation(
    bars: &BarArrays,
    intents: &[OrderIntent],
    config: &SimConfig,
) -> Result<SimReport, SimError> {
    let mut sorted: Vec<OrderIntent> = intents.to_vec();
    sorted.sort_by_key(OrderIntent::sort_key);

    let max_fills = config
        .max_fills
        .unwrap_or_else(|| default_fill_capacity(bars.len(), sorted.len()));

    let fills = match config.kernel {
        KernelSelect::Production => cursor::run(bars, &sorted, config.ttl_bars, max_fills)?,
        KernelSelect::Reference => reference::run(bars, &sorted, config.ttl_bars, max_fills)?,
    };

    let metrics = metrics_from_fills(&fills, &config.cost);
    Ok(SimReport { fills, metrics })
}
