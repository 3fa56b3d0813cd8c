//! Error types for the order pool, order book, and matching engine.

use crate::types::{OrderId, Quantity};
use thiserror::Error;

/// Errors that can occur within the core engine.
///
/// `NotFound` outcomes for cancel/modify are not represented here: per the
/// replay model, a missing order id on cancel or modify is a non-fatal
/// absent result, not an error (see [`crate::book::ModifyOutcome`] and
/// [`crate::book::OrderBook::cancel`]).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// The order pool's free list is empty; no slot is available.
    #[error("order pool exhausted: capacity {capacity} already allocated")]
    PoolExhausted {
        /// The pool's fixed capacity.
        capacity: usize,
    },

    /// A `Limit` event carried a non-positive quantity.
    #[error("invalid quantity {quantity}: quantity must be positive")]
    InvalidQuantity {
        /// The offending quantity.
        quantity: Quantity,
    },

    /// An insert was attempted with an id already present in the id index.
    #[error("duplicate order id {order_id}: already resting in the book")]
    DuplicateOrderId {
        /// The id that was already present.
        order_id: OrderId,
    },
}

/// Convenience alias for fallible core operations.
pub type Result<T> = std::result::Result<T, EngineError>;
