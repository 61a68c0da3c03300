//! Parallel TTL sweeps.
//!
//! A simulation is a pure function of (bars, intents, config), so
//! independent configurations can run in parallel with no shared mutable
//! state. This runs one simulation per TTL value in the grid.

use crate::domain::{BarArrays, OrderIntent};
use crate::error::SimError;
use crate::sim::{run_simulation, SimConfig, SimReport};
use rayon::prelude::*;

/// One grid point's outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct TtlSweepResult {
    pub ttl_bars: u32,
    pub report: SimReport,
}

/// Run the simulation once per TTL value, in parallel. Results come back
/// in grid order; the first error aborts the sweep.
pub fn ttl_sweep(
    bars: &BarArrays,
    intents: &[OrderIntent],
    base: &SimConfig,
    ttl_grid: &[u32],
) -> Result<Vec<TtlSweepResult>, SimError> {
    ttl_grid
        .par_iter()
        .map(|&ttl_bars| {
            let config = SimConfig {
                ttl_bars,
                ..base.clone()
            };
            run_simulation(bars, intents, &config).map(|report| TtlSweepResult {
                ttl_bars,
                report,
            })
        })
        .collect()
}
