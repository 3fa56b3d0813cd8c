//! The two-sided, price-indexed order book.

use crate::error::EngineError;
use crate::level::PriceLevel;
use crate::order::{Order, OrderHandle};
use crate::pool::OrderPool;
use crate::trade::TradeEvent;
use crate::types::{OrderId, Price, Quantity, Side, Timestamp};
use std::collections::{BTreeMap, HashMap};
use tracing::trace;

/// Outcome of [`OrderBook::modify`].
#[derive(Debug, Clone)]
pub enum ModifyOutcome {
    /// The order existed and was re-submitted; any resulting trades are
    /// included in arrival order.
    Applied {
        /// Trades produced by the modified order's aggressive re-submission.
        trades: Vec<TradeEvent>,
    },
    /// `order_id` was not resting in the book.
    NotFound,
}

/// Two price-indexed ordered maps of [`PriceLevel`], an id index, and the
/// [`OrderPool`] that owns all order storage.
///
/// `bids` and `asks` are both keyed ascending by [`Price`]; "best" is the
/// map's last entry for bids (highest price) and first entry for asks
/// (lowest price). Both maps give O(log L) random insert/erase, satisfying
/// the sort discipline this book requires without needing a concurrent
/// skip list — the engine is single-threaded by design.
#[derive(Debug)]
pub struct OrderBook {
    pub(crate) bids: BTreeMap<Price, PriceLevel>,
    pub(crate) asks: BTreeMap<Price, PriceLevel>,
    pub(crate) id_index: HashMap<OrderId, OrderHandle>,
    pub(crate) pool: OrderPool,
}

impl OrderBook {
    /// An empty book backed by a pool of the given capacity.
    #[must_use]
    pub fn new(pool_capacity: usize) -> Self {
        OrderBook {
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            id_index: HashMap::new(),
            pool: OrderPool::new(pool_capacity),
        }
    }

    /// Number of orders currently resting in the book (equivalently, the
    /// pool's active slot count, per the pool-accounting invariant).
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.pool.active_count()
    }

    /// The best (highest-price) bid level, if any side has resting buys.
    #[must_use]
    pub fn best_bid(&self) -> Option<&PriceLevel> {
        self.bids.values().next_back()
    }

    /// The best (lowest-price) ask level, if any side has resting sells.
    #[must_use]
    pub fn best_ask(&self) -> Option<&PriceLevel> {
        self.asks.values().next()
    }

    /// `true` when the book is crossed (best bid at or above best ask).
    /// A correctly operating matching engine never leaves the book in this
    /// state; this is exposed for invariant checks in tests.
    #[must_use]
    pub fn is_crossed(&self) -> bool {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => bid.price >= ask.price,
            _ => false,
        }
    }

    /// Sum of `total_volume` across every live level on both sides.
    #[must_use]
    pub fn total_volume(&self) -> Quantity {
        self.bids.values().map(|l| l.total_volume).sum::<Quantity>()
            + self.asks.values().map(|l| l.total_volume).sum::<Quantity>()
    }

    /// Read-only access to an order currently resting in the book.
    #[must_use]
    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.id_index.get(&id).map(|h| self.pool.get(*h))
    }

    /// Resolves a handle obtained from another order's `prev`/`next` field.
    #[must_use]
    pub fn resolve(&self, handle: OrderHandle) -> &Order {
        self.pool.get(handle)
    }

    /// Levels on `side`, in ascending price order regardless of which side
    /// is "best" at the high or low end.
    pub fn levels(&self, side: Side) -> impl Iterator<Item = &PriceLevel> {
        match side {
            Side::Buy => self.bids.values(),
            Side::Sell => self.asks.values(),
        }
    }

    /// Inserts a new resting order without any matching. Used both for
    /// seeding a book directly and, by the matching engine, to post an
    /// aggressor's unfilled residual.
    ///
    /// # Errors
    /// [`EngineError::InvalidQuantity`] if `qty <= 0`.
    /// [`EngineError::DuplicateOrderId`] if `id` is already resting.
    /// [`EngineError::PoolExhausted`] if no pool slot is available.
    pub fn insert_resting(
        &mut self,
        id: OrderId,
        side: Side,
        price: Price,
        qty: Quantity,
        timestamp: Timestamp,
    ) -> Result<OrderHandle, EngineError> {
        if qty <= 0 {
            return Err(EngineError::InvalidQuantity { quantity: qty });
        }
        if self.id_index.contains_key(&id) {
            return Err(EngineError::DuplicateOrderId { order_id: id });
        }
        let handle = self.pool.allocate(id, side, price, qty, timestamp)?;
        self.link_resting(handle);
        Ok(handle)
    }

    /// Links an already-allocated, unlinked handle into its own side's book
    /// and registers it in the id index. The matching engine calls this for
    /// residual posting after a handle has been allocated but never linked.
    pub(crate) fn link_resting(&mut self, handle: OrderHandle) {
        let order = self.pool.get(handle);
        let (side, price, id) = (order.side, order.price, order.id);
        let map = match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        let level = map.entry(price).or_insert_with(|| PriceLevel::new(price));
        level.push_back(&mut self.pool, handle);
        self.id_index.insert(id, handle);
        trace!(order_id = id, %side, price, "order resting in book");
    }

    /// Splices `handle` out of whichever level it is linked into, erasing
    /// the level if it becomes empty. Does not touch the id index or pool.
    pub(crate) fn unlink(&mut self, handle: OrderHandle) {
        let order = self.pool.get(handle);
        let (side, price) = (order.side, order.price);
        let map = match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        if let Some(level) = map.get_mut(&price) {
            level.unlink(&mut self.pool, handle);
            if level.is_empty() {
                map.remove(&price);
            }
        }
    }

    /// Unlinks and releases a resting order.
    ///
    /// Returns `false` if `id` is not resting (already filled, cancelled,
    /// or never existed) — calling this twice for the same id is
    /// idempotent: the second call is a no-op that returns `false`.
    pub fn cancel(&mut self, id: OrderId) -> bool {
        let Some(handle) = self.id_index.remove(&id) else {
            return false;
        };
        self.unlink(handle);
        self.pool.deallocate(handle);
        trace!(order_id = id, "order cancelled");
        true
    }

    /// Re-prices and/or re-sizes a resting order, then re-submits it as an
    /// aggressive order against the opposite side.
    ///
    /// This loses time priority even when the price is unchanged — the
    /// order is spliced out of its old FIFO position and, if a residual
    /// remains after matching, appended fresh to the tail of whatever level
    /// it lands in. A priority-preserving in-place quantity decrease is not
    /// implemented; see the module-level design notes.
    pub fn modify(&mut self, id: OrderId, new_price: Price, new_qty: Quantity) -> ModifyOutcome {
        let Some(handle) = self.id_index.remove(&id) else {
            return ModifyOutcome::NotFound;
        };
        self.unlink(handle);
        {
            let order = self.pool.get_mut(handle);
            order.price = new_price;
            order.original_qty = new_qty;
            order.remaining_qty = new_qty;
        }
        trace!(order_id = id, new_price, new_qty, "order modified, re-submitting");
        let trades = crate::matching::match_order(self, handle);
        ModifyOutcome::Applied { trades }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_cancel_returns_to_empty() {
        let mut book = OrderBook::new(8);
        book.insert_resting(1, Side::Buy, 100, 10, 1).unwrap();
        assert_eq!(book.active_count(), 1);
        assert!(book.cancel(1));
        assert_eq!(book.active_count(), 0);
        assert!(book.best_bid().is_none());
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut book = OrderBook::new(8);
        book.insert_resting(1, Side::Buy, 100, 10, 1).unwrap();
        assert!(book.cancel(1));
        assert!(!book.cancel(1));
    }

    #[test]
    fn cancel_middle_of_fifo_queue_relinks() {
        let mut book = OrderBook::new(8);
        book.insert_resting(1, Side::Buy, 100, 10, 1).unwrap();
        book.insert_resting(2, Side::Buy, 100, 20, 2).unwrap();
        book.insert_resting(3, Side::Buy, 100, 30, 3).unwrap();

        assert!(book.cancel(2));

        let level = book.best_bid().unwrap();
        assert_eq!(level.total_volume, 40);
        assert_eq!(level.head, Some(*book.id_index.get(&1).unwrap()));
        assert_eq!(level.tail, Some(*book.id_index.get(&3).unwrap()));
        let order1 = book.order(1).unwrap();
        let order3 = book.order(3).unwrap();
        assert_eq!(book.resolve(order1.next.unwrap()).id, 3);
        assert_eq!(book.resolve(order3.prev.unwrap()).id, 1);
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let mut book = OrderBook::new(8);
        book.insert_resting(1, Side::Buy, 100, 10, 1).unwrap();
        let err = book.insert_resting(1, Side::Buy, 100, 5, 2).unwrap_err();
        assert!(matches!(err, EngineError::DuplicateOrderId { order_id: 1 }));
    }

    #[test]
    fn non_positive_quantity_is_rejected() {
        let mut book = OrderBook::new(8);
        let err = book.insert_resting(1, Side::Buy, 100, 0, 1).unwrap_err();
        assert!(matches!(err, EngineError::InvalidQuantity { quantity: 0 }));
    }

    #[test]
    fn modify_missing_order_reports_not_found() {
        let mut book = OrderBook::new(8);
        assert!(matches!(book.modify(1, 100, 10), ModifyOutcome::NotFound));
    }
}
