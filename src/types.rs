//! Primitive type aliases and the two-sided `Side` discriminant.
//!
//! Integer widths follow the source this crate's matching semantics were
//! ported from: ids and timestamps are unsigned 64-bit, price and quantity
//! are signed 64-bit tick counts.

use serde::{Deserialize, Serialize};

/// Unique identifier of a live order.
pub type OrderId = u64;

/// Unique identifier of a historical event in a replay feed.
pub type EventId = u64;

/// Signed tick count. Negative prices are representable but meaningless;
/// the book does not defend against them (see `EngineError::InvalidQuantity`
/// for the one validation the core does perform).
pub type Price = i64;

/// Signed order quantity, always handled as a positive count in practice.
pub type Quantity = i64;

/// Monotonic tick, interpreted as nanoseconds by convention only; the core
/// does not interpret the unit.
pub type Timestamp = u64;

/// The two sides of the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Buy / bid side.
    Buy,
    /// Sell / ask side.
    Sell,
}

impl Side {
    /// The opposite side, used when a matching engine needs to address the
    /// book side an aggressor crosses into.
    #[must_use]
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}
