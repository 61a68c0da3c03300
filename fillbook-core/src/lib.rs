//! FillBook Core — order-matching simulation kernel.
//!
//! Given OHLC bar arrays and a stream of stop/limit order intents, the
//! kernel deterministically computes the fills a single-position trader
//! would receive under the frozen fill constitution: next-bar activation,
//! gap-open precedence, stop-before-limit priority, entry-before-exit
//! staging, and `(kind, order_id)` tie-breaking.
//!
//! - [`domain`] — bars, intents, fills, packed order IDs (pure data)
//! - [`constitution`] — the versioned fill-rule policy both kernels share
//! - [`sim`] — the unified entry point callers use
//! - [`metrics`] — trade count, net profit, drawdown from fills
//! - [`fingerprint`] — BLAKE3 hash of a fill sequence for parity checks
//! - [`sweep`] — parallel runs across a TTL grid
//!
//! Every simulation call is a pure function of its inputs and owns no
//! state across calls, so calls may run concurrently.

pub mod constitution;
pub mod domain;
pub mod error;
pub mod fingerprint;
mod kernel;
pub mod metrics;
pub mod sim;
pub mod sweep;

pub use domain::{BarArrays, Fill, OrderIntent, OrderKind, Role, Side};
pub use error::SimError;
pub use metrics::{CostModel, SimMetrics};
pub use sim::{run_simulation, KernelSelect, SimConfig, SimReport};
