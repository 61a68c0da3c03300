//! Fill records — one executed order at one bar.

use super::intent::{OrderKind, Role, Side};
use serde::{Deserialize, Serialize};

/// Immutable record of a single execution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub bar_index: usize,
    pub role: Role,
    pub kind: OrderKind,
    pub side: Side,
    pub price: f64,
    pub qty: u32,
    pub order_id: u64,
}
