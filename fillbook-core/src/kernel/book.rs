//! Fixed-capacity active book with swap-remove eviction.
//!
//! The working set of currently eligible intents. Capacity is preallocated
//! to the intent count (each intent enters at most once), so the hot loop
//! never reallocates; removal overwrites with the last element instead of
//! shifting.

use crate::domain::{OrderKind, Role, Side};

/// Compact copy of one active intent plus its expiry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BookEntry {
    pub order_id: u64,
    pub role: Role,
    pub kind: OrderKind,
    pub side: Side,
    pub price: f64,
    pub qty: u32,
    /// Last eligible bar (inclusive); `None` for good-till-cancelled.
    pub expire_bar: Option<i64>,
}

#[derive(Debug)]
pub(crate) struct ActiveBook {
    entries: Vec<BookEntry>,
}

impl ActiveBook {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, entry: BookEntry) {
        debug_assert!(
            self.entries.len() < self.entries.capacity() || self.entries.capacity() == 0,
            "active book sized to intent count can never overflow"
        );
        self.entries.push(entry);
    }

    /// Drop every entry whose validity window ended before `bar`.
    pub fn expire(&mut self, bar: i64) {
        let mut i = 0;
        while i < self.entries.len() {
            match self.entries[i].expire_bar {
                Some(last) if last < bar => {
                    self.entries.swap_remove(i);
                }
                _ => i += 1,
            }
        }
    }

    pub fn remove(&mut self, index: usize) -> BookEntry {
        self.entries.swap_remove(index)
    }

    pub fn entries(&self) -> &[BookEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
