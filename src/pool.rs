//! Fixed-capacity arena for [`Order`] records with O(1) acquire/release.
//!
//! Fills and cancels dominate the replay workload, so the pool avoids heap
//! traffic on the hot path: storage is a single `Vec<Order>` allocated once
//! at construction, and free slots are tracked with a LIFO free list of
//! handles.

use crate::error::EngineError;
use crate::order::{Order, OrderHandle};
use crate::types::{OrderId, Price, Quantity, Side, Timestamp};
use tracing::trace;

/// Arena of pre-allocated order slots.
#[derive(Debug)]
pub struct OrderPool {
    storage: Vec<Order>,
    free_list: Vec<OrderHandle>,
    alloc_count: u64,
    dealloc_count: u64,
}

impl OrderPool {
    /// Allocates `capacity` slots and builds the free list.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let placeholder = Order::new(0, Side::Buy, 0, 0, 0);
        let storage = vec![placeholder; capacity];
        let free_list = (0..capacity as u32).rev().map(OrderHandle).collect();
        OrderPool {
            storage,
            free_list,
            alloc_count: 0,
            dealloc_count: 0,
        }
    }

    /// The pool's fixed capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Allocations minus deallocations; the number of slots currently in use.
    #[must_use]
    pub fn active_count(&self) -> usize {
        (self.alloc_count - self.dealloc_count) as usize
    }

    /// Acquires a slot and initializes it with the given fields.
    ///
    /// # Errors
    /// Returns [`EngineError::PoolExhausted`] if the free list is empty.
    pub fn allocate(
        &mut self,
        id: OrderId,
        side: Side,
        price: Price,
        qty: Quantity,
        timestamp: Timestamp,
    ) -> Result<OrderHandle, EngineError> {
        let handle = self.free_list.pop().ok_or(EngineError::PoolExhausted {
            capacity: self.storage.len(),
        })?;
        self.storage[handle.0 as usize] = Order::new(id, side, price, qty, timestamp);
        self.alloc_count += 1;
        trace!(order_id = id, active = self.active_count(), "order allocated");
        Ok(handle)
    }

    /// Returns a slot to the free list.
    ///
    /// Calling this twice for the same handle without an intervening
    /// `allocate` is a caller bug (double-free); the book and matching
    /// engine are responsible for calling this exactly once per allocation.
    pub fn deallocate(&mut self, handle: OrderHandle) {
        self.dealloc_count += 1;
        trace!(active = self.active_count(), "order deallocated");
        self.free_list.push(handle);
    }

    /// Immutable access to an order's current fields.
    #[must_use]
    pub fn get(&self, handle: OrderHandle) -> &Order {
        &self.storage[handle.0 as usize]
    }

    /// Mutable access to an order's current fields.
    pub fn get_mut(&mut self, handle: OrderHandle) -> &mut Order {
        &mut self.storage[handle.0 as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_fills_all_fields() {
        let mut pool = OrderPool::new(4);
        let h = pool.allocate(1, Side::Buy, 100, 10, 7).unwrap();
        let order = pool.get(h);
        assert_eq!(order.id, 1);
        assert_eq!(order.side, Side::Buy);
        assert_eq!(order.price, 100);
        assert_eq!(order.original_qty, 10);
        assert_eq!(order.remaining_qty, 10);
        assert_eq!(order.timestamp, 7);
        assert_eq!(pool.active_count(), 1);
    }

    #[test]
    fn exhaustion_surfaces_error() {
        let mut pool = OrderPool::new(1);
        pool.allocate(1, Side::Buy, 100, 10, 1).unwrap();
        let err = pool.allocate(2, Side::Buy, 100, 10, 2).unwrap_err();
        assert!(matches!(err, EngineError::PoolExhausted { capacity: 1 }));
    }

    #[test]
    fn deallocate_then_reallocate_reuses_slot() {
        let mut pool = OrderPool::new(1);
        let h1 = pool.allocate(1, Side::Buy, 100, 10, 1).unwrap();
        pool.deallocate(h1);
        assert_eq!(pool.active_count(), 0);
        let h2 = pool.allocate(2, Side::Sell, 200, 5, 2).unwrap();
        assert_eq!(pool.active_count(), 1);
        assert_eq!(pool.get(h2).id, 2);
    }
}
