//! Metrics from fills — pure functions, fill sequence in, scalars out.
//!
//! This is the single formula both kernels report through, so externally
//! observed metrics can never diverge between them.

use crate::domain::{Fill, Role, Side};
use serde::{Deserialize, Serialize};

/// Fixed per-side friction applied to both legs of every round trip.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostModel {
    pub commission: f64,
    pub slippage: f64,
}

impl CostModel {
    pub fn per_side(&self) -> f64 {
        self.commission + self.slippage
    }
}

/// Derived statistics for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimMetrics {
    /// Completed round trips. Unmatched entries left open at the end of
    /// the run do not count.
    pub trades: usize,
    pub net_profit: f64,
    /// `min(equity − running_peak)` over the equity curve, in currency
    /// units. Zero or negative.
    pub max_drawdown: f64,
    /// Cumulative equity after each completed trade, starting from zero.
    pub equity_curve: Vec<f64>,
    pub trade_pnls: Vec<f64>,
}

/// Pair entry(buy) fills with exit(sell) fills in chronological order and
/// derive trade count, net profit, and drawdown.
pub fn metrics_from_fills(fills: &[Fill], cost: &CostModel) -> SimMetrics {
    let per_side = cost.per_side();
    let mut open_entry: Option<&Fill> = None;
    let mut trade_pnls = Vec::new();

    for fill in fills {
        match (fill.role, fill.side) {
            (Role::Entry, Side::Buy) => open_entry = Some(fill),
            (Role::Exit, Side::Sell) => {
                if let Some(entry) = open_entry.take() {
                    let buy_cost = entry.price + per_side;
                    let sell_proceeds = fill.price - per_side;
                    trade_pnls.push((sell_proceeds - buy_cost) * f64::from(entry.qty));
                }
            }
            // Short-side pairs are out of scope for now.
            _ => {}
        }
    }

    let mut equity_curve = Vec::with_capacity(trade_pnls.len());
    let mut equity = 0.0;
    let mut peak = 0.0_f64;
    let mut max_drawdown = 0.0_f64;
    for &pnl in &trade_pnls {
        equity += pnl;
        equity_curve.push(equity);
        if equity > peak {
            peak = equity;
        }
        let drawdown = equity - peak;
        if drawdown < max_drawdown {
            max_drawdown = drawdown;
        }
    }

    SimMetrics {
        trades: trade_pnls.len(),
        net_profit: equity,
        max_drawdown,
        equity_curve,
        trade_pnls,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderKind;

    fn fill(bar_index: usize, role: Role, side: Side, price: f64, qty: u32) -> Fill {
        Fill {
            bar_index,
            role,
            kind: OrderKind::Stop,
            side,
            price,
            qty,
            order_id: bar_index as u64 + 1,
        }
    }

    #[test]
    fn round_trip_pnl_without_costs() {
        let fills = [
            fill(0, Role::Entry, Side::Buy, 100.0, 10),
            fill(3, Role::Exit, Side::Sell, 104.0, 10),
        ];
        let m = metrics_from_fills(&fills, &CostModel::default());
        assert_eq!(m.trades, 1);
        assert!((m.net_profit - 40.0).abs() < 1e-10);
        assert_eq!(m.max_drawdown, 0.0);
        assert_eq!(m.equity_curve, vec![40.0]);
    }

    #[test]
    fn per_side_cost_hits_both_legs() {
        let fills = [
            fill(0, Role::Entry, Side::Buy, 100.0, 10),
            fill(3, Role::Exit, Side::Sell, 104.0, 10),
        ];
        let cost = CostModel {
            commission: 0.05,
            slippage: 0.10,
        };
        // buy at 100.15, sell at 103.85 → 3.70 per unit
        let m = metrics_from_fills(&fills, &cost);
        assert!((m.net_profit - 37.0).abs() < 1e-10);
    }

    #[test]
    fn unmatched_entry_does_not_count_as_trade() {
        let fills = [
            fill(0, Role::Entry, Side::Buy, 100.0, 10),
            fill(3, Role::Exit, Side::Sell, 104.0, 10),
            fill(5, Role::Entry, Side::Buy, 101.0, 10), // still open at run end
        ];
        let m = metrics_from_fills(&fills, &CostModel::default());
        assert_eq!(m.trades, 1);
        assert!((m.net_profit - 40.0).abs() < 1e-10);
    }

    #[test]
    fn drawdown_tracks_running_peak() {
        let fills = [
            fill(0, Role::Entry, Side::Buy, 100.0, 1),
            fill(1, Role::Exit, Side::Sell, 110.0, 1), // +10, peak 10
            fill(2, Role::Entry, Side::Buy, 100.0, 1),
            fill(3, Role::Exit, Side::Sell, 94.0, 1), // -6, equity 4
            fill(4, Role::Entry, Side::Buy, 100.0, 1),
            fill(5, Role::Exit, Side::Sell, 93.0, 1), // -7, equity -3
        ];
        let m = metrics_from_fills(&fills, &CostModel::default());
        assert_eq!(m.trades, 3);
        assert!((m.net_profit - (-3.0)).abs() < 1e-10);
        assert!((m.max_drawdown - (-13.0)).abs() < 1e-10);
    }

    #[test]
    fn losing_first_trade_is_an_immediate_drawdown() {
        let fills = [
            fill(0, Role::Entry, Side::Buy, 100.0, 1),
            fill(1, Role::Exit, Side::Sell, 95.0, 1),
        ];
        let m = metrics_from_fills(&fills, &CostModel::default());
        assert!((m.max_drawdown - (-5.0)).abs() < 1e-10);
    }

    #[test]
    fn empty_fill_sequence() {
        let m = metrics_from_fills(&[], &CostModel::default());
        assert_eq!(m.trades, 0);
        assert_eq!(m.net_profit, 0.0);
        assert_eq!(m.max_drawdown, 0.0);
        assert!(m.equity_curve.is_empty());
    }
}
