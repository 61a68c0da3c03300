//! Cursor + active-book kernel — the production path.
//!
//! Consumes intents pre-sorted by `(activate_bar, order_id)` through a
//! monotonic cursor, keeps the currently eligible subset in a bounded
//! swap-remove book, and runs the per-bar selection passes against that
//! subset only. Each intent enters and leaves the book at most once, so
//! total work is O(bars + intents + active-book scans) — the full intent
//! list is never rescanned per bar.
//!
//! The sort happens once at the boundary; here it is verified, never
//! repaired.

use crate::constitution;
use crate::domain::{BarArrays, BarView, Fill, OrderIntent, Role, Side};
use crate::error::SimError;
use crate::kernel::book::{ActiveBook, BookEntry};
use crate::kernel::{push_fill, Position};

pub(crate) fn run(
    bars: &BarArrays,
    intents: &[OrderIntent],
    ttl_bars: u32,
    max_fills: usize,
) -> Result<Vec<Fill>, SimError> {
    verify_sorted(intents)?;

    let mut fills = Vec::with_capacity(max_fills);
    let mut book = ActiveBook::with_capacity(intents.len());
    let mut cursor = 0usize;
    let mut position = Position::Flat;

    for t in 0..bars.len() {
        let bar_no = t as i64;
        let bar = bars.bar(t);

        // Inject: move everything newly eligible into the active book.
        // `<=` also picks up intents created before the first bar.
        while cursor < intents.len() && intents[cursor].activate_bar() <= bar_no {
            let it = &intents[cursor];
            book.insert(BookEntry {
                order_id: it.order_id,
                role: it.role,
                kind: it.kind,
                side: it.side,
                price: it.price,
                qty: it.qty,
                expire_bar: constitution::expire_bar(it.activate_bar(), ttl_bars),
            });
            cursor += 1;
        }

        // Expire: TTL windows that ended before this bar.
        book.expire(bar_no);

        // Entry pass, only while flat.
        if position == Position::Flat {
            if let Some((index, price)) = best_fillable(&book, bar, Role::Entry, None) {
                let entry = book.remove(index);
                push_fill(
                    &mut fills,
                    max_fills,
                    Fill {
                        bar_index: t,
                        role: entry.role,
                        kind: entry.kind,
                        side: entry.side,
                        price,
                        qty: entry.qty,
                        order_id: entry.order_id,
                    },
                )?;
                position = Position::after_entry(entry.side);
            }
        }

        // Exit pass, only while positioned, restricted to the closing side.
        if let Some(close_side) = position.closing_side() {
            if let Some((index, price)) = best_fillable(&book, bar, Role::Exit, Some(close_side)) {
                let entry = book.remove(index);
                push_fill(
                    &mut fills,
                    max_fills,
                    Fill {
                        bar_index: t,
                        role: entry.role,
                        kind: entry.kind,
                        side: entry.side,
                        price,
                        qty: entry.qty,
                        order_id: entry.order_id,
                    },
                )?;
                position = Position::Flat;
            }
        }
    }

    Ok(fills)
}

/// Check the `(activate_bar, order_id)` ascending precondition, reporting
/// the first offending index. Equal keys are duplicates and also rejected.
fn verify_sorted(intents: &[OrderIntent]) -> Result<(), SimError> {
    for index in 1..intents.len() {
        if intents[index].sort_key() <= intents[index - 1].sort_key() {
            return Err(SimError::UnsortedIntents { index });
        }
    }
    Ok(())
}

/// Scan the active book for the stage's winning candidate: lowest
/// `(kind_rank, order_id)` among entries that actually fill on this bar.
fn best_fillable(
    book: &ActiveBook,
    bar: BarView,
    role: Role,
    close_side: Option<Side>,
) -> Option<(usize, f64)> {
    let mut best: Option<((u8, u64), usize, f64)> = None;
    for (index, entry) in book.entries().iter().enumerate() {
        if entry.role != role {
            continue;
        }
        if close_side.is_some_and(|side| entry.side != side) {
            continue;
        }
        let Some(price) = constitution::fill_price(entry.kind, entry.side, entry.price, bar)
        else {
            continue;
        };
        let key = (constitution::kind_rank(entry.kind), entry.order_id);
        if best.map_or(true, |(best_key, _, _)| key < best_key) {
            best = Some((key, index, price));
        }
    }
    best.map(|(_, index, price)| (index, price))
}
