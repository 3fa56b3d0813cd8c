//! Historical replay records consumed by [`crate::harness::ReplayHarness`].

use crate::types::{EventId, OrderId, Price, Quantity, Side, Timestamp};
use serde::{Deserialize, Serialize};

/// The three event kinds a replay feed can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    /// A new limit order.
    Limit,
    /// Cancellation of an existing order.
    Cancel,
    /// Re-pricing/re-sizing of an existing order.
    Modify,
}

/// One record from a historical event source, in the order it must be
/// applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalEvent {
    /// Unique identifier of this event within the feed.
    pub event_id: EventId,
    /// Which kind of event this is.
    pub event_type: EventType,
    /// The order this event addresses.
    pub order_id: OrderId,
    /// Side of the order. Ignored by `Cancel` (the book already knows it).
    pub side: Side,
    /// Limit price; ignored by `Cancel`.
    pub price: Price,
    /// Quantity; ignored by `Cancel`.
    pub qty: Quantity,
    /// Event arrival tick.
    pub timestamp: Timestamp,
}
