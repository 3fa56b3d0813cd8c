//! A single price level: aggregate volume plus a FIFO queue of orders.
//!
//! The queue is intrusive — orders link to their neighbours via
//! [`OrderHandle`] fields stored on the order itself inside the
//! [`OrderPool`] arena — so splicing an order in or out never allocates.

use crate::order::OrderHandle;
use crate::pool::OrderPool;
use crate::types::{Price, Quantity};

/// Aggregate state for one price on one side of the book.
#[derive(Debug, Clone, Copy)]
pub struct PriceLevel {
    /// The price this level aggregates.
    pub price: Price,
    /// Sum of `remaining_qty` over every order currently linked here.
    pub total_volume: Quantity,
    /// Oldest order in the queue (matched first).
    pub head: Option<OrderHandle>,
    /// Newest order in the queue (matched last).
    pub tail: Option<OrderHandle>,
}

impl PriceLevel {
    /// A freshly created, empty level at `price`.
    #[must_use]
    pub fn new(price: Price) -> Self {
        PriceLevel {
            price,
            total_volume: 0,
            head: None,
            tail: None,
        }
    }

    /// `true` once the last order has left the level.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        debug_assert_eq!(self.head.is_none(), self.tail.is_none());
        self.head.is_none()
    }

    /// Appends `handle` to the tail of the queue and adds its quantity to
    /// `total_volume`. The order must already be initialized in `pool` with
    /// `prev`/`next` irrelevant — both are overwritten here.
    pub fn push_back(&mut self, pool: &mut OrderPool, handle: OrderHandle) {
        let qty = pool.get(handle).remaining_qty;
        pool.get_mut(handle).next = None;
        match self.tail {
            Some(tail) => {
                pool.get_mut(handle).prev = Some(tail);
                pool.get_mut(tail).next = Some(handle);
            }
            None => {
                pool.get_mut(handle).prev = None;
                self.head = Some(handle);
            }
        }
        self.tail = Some(handle);
        self.total_volume += qty;
    }

    /// Splices `handle` out of the queue wherever it currently sits,
    /// decrements `total_volume` by its current `remaining_qty`, and clears
    /// its `prev`/`next` pointers. Does not touch the order's other fields
    /// and does not release it to the pool.
    pub fn unlink(&mut self, pool: &mut OrderPool, handle: OrderHandle) {
        let (prev, next) = {
            let order = pool.get(handle);
            (order.prev, order.next)
        };
        match prev {
            Some(p) => pool.get_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => pool.get_mut(n).prev = prev,
            None => self.tail = prev,
        }
        self.total_volume -= pool.get(handle).remaining_qty;
        let order = pool.get_mut(handle);
        order.prev = None;
        order.next = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;

    fn order(pool: &mut OrderPool, id: u64, qty: i64, ts: u64) -> OrderHandle {
        pool.allocate(id, Side::Buy, 100, qty, ts).unwrap()
    }

    #[test]
    fn fifo_order_is_preserved() {
        let mut pool = OrderPool::new(8);
        let mut level = PriceLevel::new(100);
        let a = order(&mut pool, 1, 10, 1);
        let b = order(&mut pool, 2, 20, 2);
        let c = order(&mut pool, 3, 30, 3);
        level.push_back(&mut pool, a);
        level.push_back(&mut pool, b);
        level.push_back(&mut pool, c);

        assert_eq!(level.head, Some(a));
        assert_eq!(level.tail, Some(c));
        assert_eq!(level.total_volume, 60);
        assert_eq!(pool.get(a).next, Some(b));
        assert_eq!(pool.get(b).prev, Some(a));
        assert_eq!(pool.get(b).next, Some(c));
        assert_eq!(pool.get(c).prev, Some(b));
    }

    #[test]
    fn unlink_middle_relinks_neighbours() {
        let mut pool = OrderPool::new(8);
        let mut level = PriceLevel::new(100);
        let a = order(&mut pool, 1, 10, 1);
        let b = order(&mut pool, 2, 20, 2);
        let c = order(&mut pool, 3, 30, 3);
        level.push_back(&mut pool, a);
        level.push_back(&mut pool, b);
        level.push_back(&mut pool, c);

        level.unlink(&mut pool, b);

        assert_eq!(level.total_volume, 40);
        assert_eq!(level.head, Some(a));
        assert_eq!(level.tail, Some(c));
        assert_eq!(pool.get(a).next, Some(c));
        assert_eq!(pool.get(c).prev, Some(a));
        assert_eq!(pool.get(b).prev, None);
        assert_eq!(pool.get(b).next, None);
    }

    #[test]
    fn unlink_last_order_empties_level() {
        let mut pool = OrderPool::new(8);
        let mut level = PriceLevel::new(100);
        let a = order(&mut pool, 1, 10, 1);
        level.push_back(&mut pool, a);
        level.unlink(&mut pool, a);
        assert!(level.is_empty());
        assert_eq!(level.total_volume, 0);
    }
}
