//! Per-event book analytics captured by the replay harness.

use crate::book::OrderBook;
use crate::types::{Price, Quantity, Timestamp};
use serde::{Deserialize, Serialize};

/// A point-in-time summary of the book, captured after every replayed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    /// The triggering event's timestamp.
    pub timestamp: Timestamp,
    /// Integer-truncated mean of best bid and best ask; `0` if either side
    /// is empty.
    pub mid_price: Price,
    /// Sum of `total_volume` across every live level on both sides.
    pub total_volume: Quantity,
}

impl AnalyticsSnapshot {
    /// Computes a snapshot from the book's current state.
    #[must_use]
    pub fn capture(book: &OrderBook, timestamp: Timestamp) -> Self {
        let mid_price = match (book.best_bid(), book.best_ask()) {
            (Some(bid), Some(ask)) => (bid.price + ask.price) / 2,
            _ => 0,
        };
        AnalyticsSnapshot {
            timestamp,
            mid_price,
            total_volume: book.total_volume(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;

    #[test]
    fn mid_price_is_zero_when_one_side_empty() {
        let mut book = OrderBook::new(8);
        book.insert_resting(1, Side::Buy, 100, 10, 1).unwrap();
        let snap = AnalyticsSnapshot::capture(&book, 5);
        assert_eq!(snap.mid_price, 0);
        assert_eq!(snap.total_volume, 10);
    }

    #[test]
    fn mid_price_truncates() {
        let mut book = OrderBook::new(8);
        book.insert_resting(1, Side::Buy, 100, 10, 1).unwrap();
        book.insert_resting(2, Side::Sell, 103, 5, 2).unwrap();
        let snap = AnalyticsSnapshot::capture(&book, 5);
        assert_eq!(snap.mid_price, 101);
        assert_eq!(snap.total_volume, 15);
    }
}
