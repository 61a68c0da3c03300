//! The fill constitution — frozen, versioned execution policy.
//!
//! Every rule here is shared verbatim by the reference kernel and the
//! cursor kernel; neither may deviate from it, and no rule may be
//! parameterized except the TTL window. The rules:
//!
//! 1. **Activation** — an intent created by observing bar `T`'s close is
//!    eligible starting at bar `T+1`, never earlier.
//! 2. **Stop fill** at price `S` — buy: `open >= S` fills at open (gap),
//!    else `high >= S` fills at `S`; sell mirrored against low.
//! 3. **Limit fill** at price `L` — buy: `open <= L` fills at open, else
//!    `low <= L` fills at `L`; sell mirrored against high.
//! 4. **Kind priority** — stops rank ahead of limits (risk-first).
//! 5. **Stage ordering** — the entry stage runs and applies before the
//!    exit stage within one bar.
//! 6. **Tie-break** — among fillable candidates of one stage, lowest
//!    `(kind_rank, order_id)` wins.
//! 7. **Single position** — at most one entry fill and one exit fill per
//!    bar; exits must close the open position's side.
//! 8. **TTL** — an intent expires after bar `activate_bar + ttl_bars - 1`;
//!    `ttl_bars == 0` means good-till-cancelled.

use crate::domain::{BarView, OrderKind, Side};

/// Bumped only when a fill rule changes meaning.
pub const CONSTITUTION_VERSION: u32 = 1;

/// Bars between creation and first eligibility.
pub const ACTIVATION_OFFSET: i64 = 1;

/// `ttl_bars` value meaning "never expires".
pub const TTL_GTC: u32 = 0;

/// Stop-before-limit ranking used by every tie-break.
pub const fn kind_rank(kind: OrderKind) -> u8 {
    match kind {
        OrderKind::Stop => 0,
        OrderKind::Limit => 1,
    }
}

/// Evaluate the fill rule for one intent against one bar.
///
/// Returns the execution price, or `None` if the bar never touches the
/// trigger. The gap branch (open already through the trigger) always takes
/// precedence over the nominal order price.
pub fn fill_price(kind: OrderKind, side: Side, price: f64, bar: BarView) -> Option<f64> {
    match (kind, side) {
        (OrderKind::Stop, Side::Buy) => {
            if bar.open >= price {
                Some(bar.open)
            } else if bar.high >= price {
                Some(price)
            } else {
                None
            }
        }
        (OrderKind::Stop, Side::Sell) => {
            if bar.open <= price {
                Some(bar.open)
            } else if bar.low <= price {
                Some(price)
            } else {
                None
            }
        }
        (OrderKind::Limit, Side::Buy) => {
            if bar.open <= price {
                Some(bar.open)
            } else if bar.low <= price {
                Some(price)
            } else {
                None
            }
        }
        (OrderKind::Limit, Side::Sell) => {
            if bar.open >= price {
                Some(bar.open)
            } else if bar.high >= price {
                Some(price)
            } else {
                None
            }
        }
    }
}

/// Last bar (inclusive) at which an intent is eligible, or `None` for GTC.
pub fn expire_bar(activate_bar: i64, ttl_bars: u32) -> Option<i64> {
    if ttl_bars == TTL_GTC {
        None
    } else {
        Some(activate_bar + i64::from(ttl_bars) - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(open: f64, high: f64, low: f64) -> BarView {
        BarView {
            open,
            high,
            low,
            close: open,
        }
    }

    // ── Stop rule ──

    #[test]
    fn buy_stop_intrabar_fills_at_trigger() {
        // open below trigger, high reaches it
        assert_eq!(
            fill_price(OrderKind::Stop, Side::Buy, 101.0, bar(100.0, 105.0, 95.0)),
            Some(101.0)
        );
    }

    #[test]
    fn buy_stop_gap_fills_at_open() {
        assert_eq!(
            fill_price(OrderKind::Stop, Side::Buy, 101.0, bar(103.0, 105.0, 95.0)),
            Some(103.0)
        );
    }

    #[test]
    fn buy_stop_untouched_does_not_fill() {
        assert_eq!(
            fill_price(OrderKind::Stop, Side::Buy, 106.0, bar(100.0, 105.0, 95.0)),
            None
        );
    }

    #[test]
    fn sell_stop_intrabar_fills_at_trigger() {
        assert_eq!(
            fill_price(OrderKind::Stop, Side::Sell, 97.0, bar(100.0, 105.0, 95.0)),
            Some(97.0)
        );
    }

    #[test]
    fn sell_stop_gap_fills_at_open() {
        assert_eq!(
            fill_price(OrderKind::Stop, Side::Sell, 97.0, bar(96.0, 99.0, 94.0)),
            Some(96.0)
        );
    }

    #[test]
    fn sell_stop_untouched_does_not_fill() {
        assert_eq!(
            fill_price(OrderKind::Stop, Side::Sell, 90.0, bar(100.0, 105.0, 95.0)),
            None
        );
    }

    // ── Limit rule ──

    #[test]
    fn buy_limit_intrabar_fills_at_limit() {
        assert_eq!(
            fill_price(OrderKind::Limit, Side::Buy, 97.0, bar(100.0, 105.0, 95.0)),
            Some(97.0)
        );
    }

    #[test]
    fn buy_limit_gap_fills_at_open() {
        // open already at or below the limit
        assert_eq!(
            fill_price(OrderKind::Limit, Side::Buy, 101.0, bar(100.0, 105.0, 95.0)),
            Some(100.0)
        );
    }

    #[test]
    fn buy_limit_untouched_does_not_fill() {
        assert_eq!(
            fill_price(OrderKind::Limit, Side::Buy, 90.0, bar(100.0, 105.0, 95.0)),
            None
        );
    }

    #[test]
    fn sell_limit_intrabar_fills_at_limit() {
        assert_eq!(
            fill_price(OrderKind::Limit, Side::Sell, 103.0, bar(100.0, 105.0, 95.0)),
            Some(103.0)
        );
    }

    #[test]
    fn sell_limit_gap_fills_at_open() {
        assert_eq!(
            fill_price(OrderKind::Limit, Side::Sell, 99.0, bar(100.0, 105.0, 95.0)),
            Some(100.0)
        );
    }

    #[test]
    fn sell_limit_untouched_does_not_fill() {
        assert_eq!(
            fill_price(OrderKind::Limit, Side::Sell, 110.0, bar(100.0, 105.0, 95.0)),
            None
        );
    }

    #[test]
    fn exact_touch_fills_at_nominal_price() {
        // open == trigger takes the gap branch, so the price is still open
        assert_eq!(
            fill_price(OrderKind::Stop, Side::Buy, 100.0, bar(100.0, 105.0, 95.0)),
            Some(100.0)
        );
        // high exactly equal to the trigger is a touch
        assert_eq!(
            fill_price(OrderKind::Stop, Side::Buy, 105.0, bar(100.0, 105.0, 95.0)),
            Some(105.0)
        );
    }

    // ── Ranking and TTL ──

    #[test]
    fn stops_rank_before_limits() {
        assert!(kind_rank(OrderKind::Stop) < kind_rank(OrderKind::Limit));
    }

    #[test]
    fn ttl_window_boundaries() {
        assert_eq!(expire_bar(10, TTL_GTC), None);
        assert_eq!(expire_bar(10, 1), Some(10)); // next-bar-only
        assert_eq!(expire_bar(10, 3), Some(12));
    }
}
