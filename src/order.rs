//! The resting/in-flight order record and its arena handle.

use crate::types::{OrderId, Price, Quantity, Side, Timestamp};

/// A stable index into an [`crate::pool::OrderPool`]'s backing storage.
///
/// Handles stand in for the raw intrusive pointers a native port of this
/// engine would use: the arena never moves or frees its backing storage, so
/// a handle remains valid for the arena's lifetime even while the slot it
/// names is logically deallocated and reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderHandle(pub(crate) u32);

/// A resting or in-flight limit order.
///
/// `prev`/`next` link the order into its price level's FIFO queue; both are
/// `None` when the order is not currently linked into any level (freshly
/// allocated, or unlinked pending release).
#[derive(Debug, Clone, Copy)]
pub struct Order {
    /// Unique id among currently-live orders.
    pub id: OrderId,
    /// Buy or sell.
    pub side: Side,
    /// Limit price in ticks.
    pub price: Price,
    /// Quantity at order entry; never mutated after allocation.
    pub original_qty: Quantity,
    /// Quantity left to fill; decremented by matching.
    pub remaining_qty: Quantity,
    /// Arrival tick, used to break ties within a price level.
    pub timestamp: Timestamp,
    /// Previous order in the level's FIFO queue (closer to `head`).
    pub prev: Option<OrderHandle>,
    /// Next order in the level's FIFO queue (closer to `tail`).
    pub next: Option<OrderHandle>,
}

impl Order {
    pub(crate) fn new(
        id: OrderId,
        side: Side,
        price: Price,
        qty: Quantity,
        timestamp: Timestamp,
    ) -> Self {
        Order {
            id,
            side,
            price,
            original_qty: qty,
            remaining_qty: qty,
            timestamp,
            prev: None,
            next: None,
        }
    }
}
