//! Deterministic order-ID packing.
//!
//! An order ID is a pure function of the intent's attributes, so
//! array-oriented and object-oriented callers agree on IDs no matter the
//! order in which they generate intents. All tie-breaking and sort-order
//! invariants are defined in terms of these IDs, so the packing must be
//! stable and reversible.
//!
//! Layout (low to high bit):
//! ```text
//! [0]      side code
//! [1]      kind code
//! [2]      role code
//! [3..23]  param_index        (20 bits)
//! [23..63] activate_bar       (40 bits, created_bar + 1, never negative)
//! ```
//!
//! Putting the activation bar in the most significant bits means numeric ID
//! order agrees with `(activate_bar, param_index, role, kind, side)` order.

use super::intent::{OrderKind, Role, Side};
use thiserror::Error;

pub const PARAM_INDEX_BITS: u32 = 20;
pub const ACTIVATE_BAR_BITS: u32 = 40;

const PARAM_INDEX_SHIFT: u32 = 3;
const ACTIVATE_BAR_SHIFT: u32 = PARAM_INDEX_SHIFT + PARAM_INDEX_BITS;

pub const MAX_PARAM_INDEX: u32 = (1 << PARAM_INDEX_BITS) - 1;
pub const MAX_CREATED_BAR: i64 = (1 << ACTIVATE_BAR_BITS) - 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("param_index {0} exceeds {PARAM_INDEX_BITS}-bit field (max {MAX_PARAM_INDEX})")]
    ParamIndexOverflow(u32),
    #[error("created_bar {0} outside [-1, {MAX_CREATED_BAR}]")]
    CreatedBarOutOfRange(i64),
}

/// The attribute tuple recovered from a packed ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnpackedId {
    pub created_bar: i64,
    pub param_index: u32,
    pub role: Role,
    pub kind: OrderKind,
    pub side: Side,
}

/// Pack intent attributes into a stable 64-bit order ID.
///
/// Identical tuples always produce identical IDs; field overflow is an
/// error, never wraparound.
pub fn pack_order_id(
    created_bar: i64,
    param_index: u32,
    role: Role,
    kind: OrderKind,
    side: Side,
) -> Result<u64, IdError> {
    if param_index > MAX_PARAM_INDEX {
        return Err(IdError::ParamIndexOverflow(param_index));
    }
    if !(-1..=MAX_CREATED_BAR).contains(&created_bar) {
        return Err(IdError::CreatedBarOutOfRange(created_bar));
    }
    let activate = (created_bar + 1) as u64;
    Ok((activate << ACTIVATE_BAR_SHIFT)
        | (u64::from(param_index) << PARAM_INDEX_SHIFT)
        | (u64::from(role.code()) << 2)
        | (u64::from(kind.code()) << 1)
        | u64::from(side.code()))
}

/// Invert [`pack_order_id`]. Every field is one or a bounded number of bits,
/// so unpacking cannot fail.
pub fn unpack_order_id(id: u64) -> UnpackedId {
    let side = if id & 1 == 0 { Side::Buy } else { Side::Sell };
    let kind = if (id >> 1) & 1 == 0 {
        OrderKind::Stop
    } else {
        OrderKind::Limit
    };
    let role = if (id >> 2) & 1 == 0 {
        Role::Entry
    } else {
        Role::Exit
    };
    let param_index = ((id >> PARAM_INDEX_SHIFT) & u64::from(MAX_PARAM_INDEX)) as u32;
    let activate = id >> ACTIVATE_BAR_SHIFT;
    UnpackedId {
        created_bar: activate as i64 - 1,
        param_index,
        role,
        kind,
        side,
    }
}
