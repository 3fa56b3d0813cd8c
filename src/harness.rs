//! Deterministic replay of a historical event stream against an engine.

use crate::analytics::AnalyticsSnapshot;
use crate::book::ModifyOutcome;
use crate::engine::MatchingEngine;
use crate::event::{EventType, HistoricalEvent};
use crate::trade::TradeEvent;
use tracing::warn;

/// A per-trade observer invoked synchronously from the matching return path,
/// in trade-emission order. Must not mutate the engine it observes.
pub type StrategyCallback = Box<dyn FnMut(&TradeEvent)>;

enum Engine<'a> {
    Owned(MatchingEngine),
    Borrowed(&'a mut MatchingEngine),
}

impl Engine<'_> {
    fn get(&self) -> &MatchingEngine {
        match self {
            Engine::Owned(e) => e,
            Engine::Borrowed(e) => e,
        }
    }

    fn get_mut(&mut self) -> &mut MatchingEngine {
        match self {
            Engine::Owned(e) => e,
            Engine::Borrowed(e) => e,
        }
    }
}

/// Applies a historical event stream to an engine, recording every trade and
/// an analytics snapshot after every event.
///
/// Owns the engine when constructed with [`ReplayHarness::new`]; borrows a
/// caller-supplied one when constructed with [`ReplayHarness::with_engine`].
pub struct ReplayHarness<'a> {
    engine: Engine<'a>,
    trade_log: Vec<TradeEvent>,
    analytics_log: Vec<AnalyticsSnapshot>,
    strategy_callback: Option<StrategyCallback>,
}

impl ReplayHarness<'static> {
    /// A harness that owns a freshly constructed engine.
    #[must_use]
    pub fn new(pool_capacity: usize) -> Self {
        ReplayHarness {
            engine: Engine::Owned(MatchingEngine::new(pool_capacity)),
            trade_log: Vec::new(),
            analytics_log: Vec::new(),
            strategy_callback: None,
        }
    }
}

impl<'a> ReplayHarness<'a> {
    /// A harness that drives a caller-owned engine.
    pub fn with_engine(engine: &'a mut MatchingEngine) -> Self {
        ReplayHarness {
            engine: Engine::Borrowed(engine),
            trade_log: Vec::new(),
            analytics_log: Vec::new(),
            strategy_callback: None,
        }
    }

    /// Registers a per-trade observer called synchronously as trades are
    /// produced. Replaces any previously registered callback.
    pub fn set_strategy_callback(&mut self, callback: impl FnMut(&TradeEvent) + 'static) {
        self.strategy_callback = Some(Box::new(callback));
    }

    /// Read-only access to the engine this harness is driving.
    #[must_use]
    pub fn engine(&self) -> &MatchingEngine {
        self.engine.get()
    }

    /// All trades produced so far, in emission order.
    #[must_use]
    pub fn trades(&self) -> &[TradeEvent] {
        &self.trade_log
    }

    /// One analytics snapshot per event applied so far, in event order.
    #[must_use]
    pub fn analytics(&self) -> &[AnalyticsSnapshot] {
        &self.analytics_log
    }

    /// Applies each event in order, capturing a snapshot after every one
    /// regardless of whether the event produced trades, was skipped, or
    /// found nothing to act on.
    pub fn feed_events(&mut self, events: &[HistoricalEvent]) {
        for event in events {
            self.apply(event);
            self.capture_snapshot(event.timestamp);
        }
    }

    fn apply(&mut self, event: &HistoricalEvent) {
        match event.event_type {
            EventType::Limit => {
                let result = self.engine.get_mut().submit(
                    event.order_id,
                    event.side,
                    event.price,
                    event.qty,
                    event.timestamp,
                );
                match result {
                    Ok(trades) => self.dispatch(trades),
                    Err(err) => {
                        warn!(event_id = event.event_id, %err, "limit event rejected, skipping");
                    }
                }
            }
            EventType::Cancel => {
                self.engine.get_mut().book_mut().cancel(event.order_id);
            }
            EventType::Modify => {
                let outcome =
                    self.engine
                        .get_mut()
                        .book_mut()
                        .modify(event.order_id, event.price, event.qty);
                if let ModifyOutcome::Applied { trades } = outcome {
                    self.dispatch(trades);
                }
            }
        }
    }

    fn dispatch(&mut self, trades: Vec<TradeEvent>) {
        for trade in &trades {
            if let Some(callback) = &mut self.strategy_callback {
                callback(trade);
            }
        }
        self.trade_log.extend(trades);
    }

    /// Computes and appends an analytics snapshot for the book's current
    /// state. `feed_events` calls this automatically after every event;
    /// exposed for callers driving events one at a time.
    pub fn capture_snapshot(&mut self, timestamp: crate::types::Timestamp) {
        let snapshot = AnalyticsSnapshot::capture(self.engine.get().book(), timestamp);
        self.analytics_log.push(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;

    fn limit(event_id: u64, order_id: u64, side: Side, price: i64, qty: i64, ts: u64) -> HistoricalEvent {
        HistoricalEvent {
            event_id,
            event_type: EventType::Limit,
            order_id,
            side,
            price,
            qty,
            timestamp: ts,
        }
    }

    #[test]
    fn one_snapshot_per_event() {
        let mut harness = ReplayHarness::new(16);
        let events = vec![
            limit(1, 1, Side::Buy, 100, 10, 1),
            limit(2, 2, Side::Sell, 101, 5, 2),
            limit(3, 3, Side::Buy, 102, 7, 3),
        ];
        harness.feed_events(&events);
        assert_eq!(harness.analytics().len(), events.len());
        for (snap, event) in harness.analytics().iter().zip(&events) {
            assert_eq!(snap.timestamp, event.timestamp);
        }
    }

    #[test]
    fn mid_price_zero_when_one_sided() {
        let mut harness = ReplayHarness::new(16);
        harness.feed_events(&[limit(1, 1, Side::Buy, 100, 10, 1)]);
        assert_eq!(harness.analytics()[0].mid_price, 0);
    }

    #[test]
    fn strategy_callback_sees_every_trade() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let mut harness = ReplayHarness::new(16);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = Rc::clone(&seen);
        harness.set_strategy_callback(move |trade| seen_clone.borrow_mut().push(*trade));

        harness.feed_events(&[
            limit(1, 1, Side::Sell, 100, 10, 1),
            limit(2, 2, Side::Buy, 100, 10, 2),
        ]);

        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(harness.trades().len(), 1);
    }

    #[test]
    fn invalid_quantity_is_skipped_but_still_snapshotted() {
        let mut harness = ReplayHarness::new(16);
        harness.feed_events(&[limit(1, 1, Side::Buy, 100, 0, 1)]);
        assert_eq!(harness.analytics().len(), 1);
        assert!(harness.trades().is_empty());
        assert!(harness.engine().book().order(1).is_none());
    }

    #[test]
    fn borrowed_engine_can_be_inspected_after_the_harness_is_dropped() {
        let mut engine = MatchingEngine::new(16);
        {
            let mut harness = ReplayHarness::with_engine(&mut engine);
            harness.feed_events(&[limit(1, 1, Side::Buy, 100, 10, 1)]);
        }
        assert_eq!(engine.book().best_bid().unwrap().total_volume, 10);
    }
}
