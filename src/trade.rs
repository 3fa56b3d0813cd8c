//! Trade records emitted by the matching engine.

use crate::types::{OrderId, Price, Quantity, Timestamp};
use serde::{Deserialize, Serialize};

/// One fill between a resting (maker) order and an incoming (taker) order.
///
/// `price` is always the resting order's price — the aggressor receives
/// price improvement, never the reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeEvent {
    /// The maker order's id.
    pub resting_order_id: OrderId,
    /// The taker order's id.
    pub incoming_order_id: OrderId,
    /// Execution price, taken from the resting order.
    pub price: Price,
    /// Quantity executed in this fill.
    pub quantity: Quantity,
    /// The incoming order's timestamp.
    pub timestamp: Timestamp,
}
