//! Price/time-priority crossing of an aggressive order against the book.

use crate::book::OrderBook;
use crate::level::PriceLevel;
use crate::order::OrderHandle;
use crate::trade::TradeEvent;
use crate::types::{Price, Side};
use std::collections::BTreeMap;
use tracing::trace;

/// Crosses the order at `handle` against the opposite side of `book`,
/// walking best-price-first and draining each level's FIFO queue in
/// arrival order. Partial fills never reorder a queue. Any unfilled
/// residual is posted to `handle`'s own side; a full fill releases the
/// handle back to the pool.
///
/// `handle` must be allocated in `book`'s pool but not yet linked into any
/// level or registered in the id index — callers (`OrderBook::insert_resting`'s
/// aggressive counterpart, and `OrderBook::modify`'s re-submission) are
/// responsible for that precondition.
pub(crate) fn match_order(book: &mut OrderBook, handle: OrderHandle) -> Vec<TradeEvent> {
    let incoming_side = book.pool.get(handle).side;
    let incoming_price = book.pool.get(handle).price;
    let incoming_id = book.pool.get(handle).id;
    let incoming_ts = book.pool.get(handle).timestamp;
    let opposite_side = incoming_side.opposite();

    let mut trades = Vec::new();

    loop {
        if book.pool.get(handle).remaining_qty == 0 {
            break;
        }

        let map: &mut BTreeMap<Price, PriceLevel> = match opposite_side {
            Side::Buy => &mut book.bids,
            Side::Sell => &mut book.asks,
        };
        let best_price = match opposite_side {
            Side::Buy => map.keys().next_back().copied(),
            Side::Sell => map.keys().next().copied(),
        };
        let Some(price) = best_price else {
            break;
        };
        let crosses = match incoming_side {
            Side::Buy => incoming_price >= price,
            Side::Sell => incoming_price <= price,
        };
        if !crosses {
            break;
        }

        let level = map.get_mut(&price).expect("best price must name a live level");
        let mut current = level.head;
        while let Some(resting_handle) = current {
            if book.pool.get(handle).remaining_qty == 0 {
                break;
            }
            // Capture the next pointer before any possible unlink below.
            let next = book.pool.get(resting_handle).next;

            let executed = book
                .pool
                .get(handle)
                .remaining_qty
                .min(book.pool.get(resting_handle).remaining_qty);

            book.pool.get_mut(handle).remaining_qty -= executed;
            book.pool.get_mut(resting_handle).remaining_qty -= executed;
            level.total_volume -= executed;

            trades.push(TradeEvent {
                resting_order_id: book.pool.get(resting_handle).id,
                incoming_order_id: incoming_id,
                price,
                quantity: executed,
                timestamp: incoming_ts,
            });

            if book.pool.get(resting_handle).remaining_qty == 0 {
                let resting_id = book.pool.get(resting_handle).id;
                level.unlink(&mut book.pool, resting_handle);
                book.id_index.remove(&resting_id);
                book.pool.deallocate(resting_handle);
            }

            current = next;
        }

        let level_emptied = level.is_empty();
        if level_emptied {
            map.remove(&price);
        }
    }

    let remaining = book.pool.get(handle).remaining_qty;
    if remaining > 0 {
        book.link_resting(handle);
    } else {
        book.pool.deallocate(handle);
    }

    trace!(
        incoming_order_id = incoming_id,
        trade_count = trades.len(),
        remaining,
        "match complete"
    );
    trades
}
