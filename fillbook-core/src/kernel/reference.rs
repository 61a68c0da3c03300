//! Reference kernel — the deliberately simple correctness oracle.
//!
//! Scans every intent on every bar, O(bars × intents). Any change to fill
//! semantics lands here first and the cursor kernel is validated against it
//! by the parity suite. Never used as a runtime fallback.

use crate::constitution;
use crate::domain::{BarArrays, Fill, OrderIntent, Role, Side};
use crate::error::SimError;
use crate::kernel::{push_fill, Position};

pub(crate) fn run(
    bars: &BarArrays,
    intents: &[OrderIntent],
    ttl_bars: u32,
    max_fills: usize,
) -> Result<Vec<Fill>, SimError> {
    let mut fills = Vec::with_capacity(max_fills);
    let mut consumed = vec![false; intents.len()];
    let mut position = Position::Flat;

    for t in 0..bars.len() {
        let bar_no = t as i64;

        // Entry stage runs and applies before the exit stage.
        if position == Position::Flat {
            if let Some((index, price)) =
                first_fillable(bars, intents, &consumed, bar_no, ttl_bars, Role::Entry, None)
            {
                let it = &intents[index];
                push_fill(
                    &mut fills,
                    max_fills,
                    Fill {
                        bar_index: t,
                        role: it.role,
                        kind: it.kind,
                        side: it.side,
                        price,
                        qty: it.qty,
                        order_id: it.order_id,
                    },
                )?;
                consumed[index] = true;
                position = Position::after_entry(it.side);
            }
        }

        if let Some(close_side) = position.closing_side() {
            if let Some((index, price)) = first_fillable(
                bars,
                intents,
                &consumed,
                bar_no,
                ttl_bars,
                Role::Exit,
                Some(close_side),
            ) {
                let it = &intents[index];
                push_fill(
                    &mut fills,
                    max_fills,
                    Fill {
                        bar_index: t,
                        role: it.role,
                        kind: it.kind,
                        side: it.side,
                        price,
                        qty: it.qty,
                        order_id: it.order_id,
                    },
                )?;
                consumed[index] = true;
                position = Position::Flat;
            }
        }
    }

    Ok(fills)
}

/// Collect this bar's candidates for one stage, order them by
/// `(kind_rank, order_id)`, and return the first that actually fills.
#[allow(clippy::too_many_arguments)]
fn first_fillable(
    bars: &BarArrays,
    intents: &[OrderIntent],
    consumed: &[bool],
    bar_no: i64,
    ttl_bars: u32,
    role: Role,
    close_side: Option<Side>,
) -> Option<(usize, f64)> {
    let mut candidates: Vec<usize> = intents
        .iter()
        .enumerate()
        .filter(|(index, it)| {
            !consumed[*index]
                && it.role == role
                && close_side.map_or(true, |side| it.side == side)
                && eligible_at(it, bar_no, ttl_bars)
        })
        .map(|(index, _)| index)
        .collect();
    candidates.sort_by_key(|&index| {
        (
            constitution::kind_rank(intents[index].kind),
            intents[index].order_id,
        )
    });

    let bar = bars.bar(bar_no as usize);
    candidates.into_iter().find_map(|index| {
        let it = &intents[index];
        constitution::fill_price(it.kind, it.side, it.price, bar).map(|price| (index, price))
    })
}

/// Activation reached and TTL window not yet exceeded.
fn eligible_at(intent: &OrderIntent, bar_no: i64, ttl_bars: u32) -> bool {
    let activate = intent.activate_bar();
    activate <= bar_no
        && constitution::expire_bar(activate, ttl_bars).map_or(true, |last| bar_no <= last)
}
