//! Order intents and their closed role/kind/side vocabularies.

use crate::error::SimError;
use serde::{Deserialize, Serialize};

/// Whether an intent opens a position or closes one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Role {
    Entry = 0,
    Exit = 1,
}

/// Trigger style of the intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum OrderKind {
    Stop = 0,
    Limit = 1,
}

/// Direction of the intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Side {
    Buy = 0,
    Sell = 1,
}

impl Role {
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Decode a role byte. Out-of-range codes are corruption, never a default.
    pub fn from_code(code: u8) -> Result<Self, SimError> {
        match code {
            0 => Ok(Role::Entry),
            1 => Ok(Role::Exit),
            value => Err(SimError::InvalidCode {
                field: "role",
                value,
            }),
        }
    }
}

impl OrderKind {
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Result<Self, SimError> {
        match code {
            0 => Ok(OrderKind::Stop),
            1 => Ok(OrderKind::Limit),
            value => Err(SimError::InvalidCode {
                field: "kind",
                value,
            }),
        }
    }
}

impl Side {
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Result<Self, SimError> {
        match code {
            0 => Ok(Side::Buy),
            1 => Ok(Side::Sell),
            value => Err(SimError::InvalidCode {
                field: "side",
                value,
            }),
        }
    }
}

/// A stop or limit order submitted by observing the close of `created_bar`.
///
/// Immutable once created. `order_id` is globally unique and, together with
/// `activate_bar()`, defines the total order used for all tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderIntent {
    pub order_id: u64,
    /// Bar whose close was observed when creating this intent. May be −1
    /// for intents eligible from the first bar.
    pub created_bar: i64,
    pub role: Role,
    pub kind: OrderKind,
    pub side: Side,
    pub price: f64,
    pub qty: u32,
}

impl OrderIntent {
    /// First bar at which this intent is eligible to fill.
    pub fn activate_bar(&self) -> i64 {
        self.created_bar + crate::constitution::ACTIVATION_OFFSET
    }

    /// Key used for the sorted-intents precondition and all tie-breaking.
    pub fn sort_key(&self) -> (i64, u64) {
        (self.activate_bar(), self.order_id)
    }
}
