//! Bar arrays — the market data the kernel iterates over.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Column-oriented OHLC series, one entry per bar.
///
/// All four columns have identical length and contain only finite values;
/// both invariants are enforced at construction. The arrays are read-only
/// for the lifetime of a simulation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarArrays {
    open: Vec<f64>,
    high: Vec<f64>,
    low: Vec<f64>,
    close: Vec<f64>,
}

/// A single bar viewed by value. Cheap to copy inside the bar loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarView {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BarDataError {
    #[error("column lengths differ: open={open}, high={high}, low={low}, close={close}")]
    LengthMismatch {
        open: usize,
        high: usize,
        low: usize,
        close: usize,
    },
    #[error("non-finite value in {column} at bar {index}")]
    NonFinite { column: &'static str, index: usize },
}

impl BarArrays {
    /// Build bar arrays, validating equal lengths and finite values.
    pub fn new(
        open: Vec<f64>,
        high: Vec<f64>,
        low: Vec<f64>,
        close: Vec<f64>,
    ) -> Result<Self, BarDataError> {
        if open.len() != high.len() || open.len() != low.len() || open.len() != close.len() {
            return Err(BarDataError::LengthMismatch {
                open: open.len(),
                high: high.len(),
                low: low.len(),
                close: close.len(),
            });
        }
        for (column, values) in [
            ("open", &open),
            ("high", &high),
            ("low", &low),
            ("close", &close),
        ] {
            if let Some(index) = values.iter().position(|v| !v.is_finite()) {
                return Err(BarDataError::NonFinite { column, index });
            }
        }
        Ok(Self {
            open,
            high,
            low,
            close,
        })
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// The bar at index `t`. Panics if `t` is out of range, same as slice
    /// indexing; the kernel only calls this inside `0..len()`.
    pub fn bar(&self, t: usize) -> BarView {
        BarView {
            open: self.open[t],
            high: self.high[t],
            low: self.low[t],
            close: self.close[t],
        }
    }

    pub fn open(&self) -> &[f64] {
        &self.open
    }

    pub fn high(&self) -> &[f64] {
        &self.high
    }

    pub fn low(&self) -> &[f64] {
        &self.low
    }

    pub fn close(&self) -> &[f64] {
        &self.close
    }
}
