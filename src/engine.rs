//! The matching engine: owns a book and exposes the sole crossing entry point.

use crate::book::OrderBook;
use crate::error::EngineError;
use crate::order::OrderHandle;
use crate::trade::TradeEvent;
use crate::types::{OrderId, Price, Quantity, Side, Timestamp};

impl OrderBook {
    /// Allocates a fresh order and immediately crosses it against the
    /// opposite side, per [`crate::matching::match_order`]'s contract.
    ///
    /// This is the book-level primitive behind [`MatchingEngine::submit`]
    /// and is also what [`OrderBook::modify`] drives for its aggressive
    /// re-submission.
    ///
    /// # Errors
    /// [`EngineError::InvalidQuantity`] if `qty <= 0`.
    /// [`EngineError::DuplicateOrderId`] if `id` is already resting.
    /// [`EngineError::PoolExhausted`] if no pool slot is available.
    pub fn submit_aggressive(
        &mut self,
        id: OrderId,
        side: Side,
        price: Price,
        qty: Quantity,
        timestamp: Timestamp,
    ) -> Result<Vec<TradeEvent>, EngineError> {
        if qty <= 0 {
            return Err(EngineError::InvalidQuantity { quantity: qty });
        }
        if self.id_index.contains_key(&id) {
            return Err(EngineError::DuplicateOrderId { order_id: id });
        }
        let handle: OrderHandle = self.pool.allocate(id, side, price, qty, timestamp)?;
        Ok(crate::matching::match_order(self, handle))
    }
}

/// Owns a single [`OrderBook`] and exposes price/time-priority matching as
/// its one public operation.
#[derive(Debug)]
pub struct MatchingEngine {
    book: OrderBook,
}

impl MatchingEngine {
    /// An engine backed by a fresh book with the given pool capacity.
    #[must_use]
    pub fn new(pool_capacity: usize) -> Self {
        MatchingEngine {
            book: OrderBook::new(pool_capacity),
        }
    }

    /// Read-only access to the underlying book, for analytics and queries.
    #[must_use]
    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    /// Mutable access to the underlying book, for cancel/modify and seeding.
    pub fn book_mut(&mut self) -> &mut OrderBook {
        &mut self.book
    }

    /// Submits a new aggressive limit order and returns the trades it
    /// produces. The incoming order arrives with `remaining_qty ==
    /// original_qty`; any unfilled residual is posted to the book.
    ///
    /// # Errors
    /// See [`OrderBook::submit_aggressive`].
    pub fn submit(
        &mut self,
        id: OrderId,
        side: Side,
        price: Price,
        qty: Quantity,
        timestamp: Timestamp,
    ) -> Result<Vec<TradeEvent>, EngineError> {
        self.book.submit_aggressive(id, side, price, qty, timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_against_empty_book_posts_residual() {
        let mut engine = MatchingEngine::new(8);
        let trades = engine.submit(1, Side::Buy, 100, 10, 1).unwrap();
        assert!(trades.is_empty());
        assert_eq!(engine.book().best_bid().unwrap().total_volume, 10);
    }

    #[test]
    fn submit_rejects_non_positive_quantity() {
        let mut engine = MatchingEngine::new(8);
        let err = engine.submit(1, Side::Buy, 100, 0, 1).unwrap_err();
        assert!(matches!(err, EngineError::InvalidQuantity { quantity: 0 }));
    }
}
