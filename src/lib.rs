//! A single-instrument limit order book matching engine with a deterministic
//! replay harness for historical event streams.
//!
//! # Components
//!
//! - [`pool::OrderPool`] — fixed-capacity arena for order records.
//! - [`book::OrderBook`] — two price-sorted maps of FIFO price levels plus
//!   an order-id index.
//! - [`engine::MatchingEngine`] — price/time-priority crossing of an
//!   incoming limit order against the opposite side.
//! - [`harness::ReplayHarness`] — deterministic application of an event
//!   stream with per-event analytics and an optional per-trade callback.
//!
//! The engine is single-threaded and non-persistent: there is no recovery
//! log, and for a given event sequence and initial state the trade log and
//! analytics log are bit-identical across runs.
//!
//! # Example
//!
//! ```
//! use lob_core::{EventType, HistoricalEvent, ReplayHarness, Side};
//!
//! let mut harness = ReplayHarness::new(1024);
//! let events = [
//!     HistoricalEvent { event_id: 1, event_type: EventType::Limit, order_id: 1, side: Side::Buy, price: 100, qty: 10, timestamp: 1 },
//!     HistoricalEvent { event_id: 2, event_type: EventType::Limit, order_id: 2, side: Side::Sell, price: 100, qty: 10, timestamp: 2 },
//! ];
//! harness.feed_events(&events);
//! assert_eq!(harness.trades().len(), 1);
//! assert_eq!(harness.analytics().len(), 2);
//! ```

pub mod analytics;
pub mod book;
pub mod engine;
pub mod error;
pub mod event;
pub mod harness;
pub mod level;
pub mod matching;
pub mod order;
pub mod pool;
pub mod prelude;
pub mod trade;
pub mod types;

pub use analytics::AnalyticsSnapshot;
pub use book::{ModifyOutcome, OrderBook};
pub use engine::MatchingEngine;
pub use error::{EngineError, Result};
pub use event::{EventType, HistoricalEvent};
pub use harness::ReplayHarness;
pub use order::{Order, OrderHandle};
pub use pool::OrderPool;
pub use trade::TradeEvent;
pub use types::{EventId, OrderId, Price, Quantity, Side, Timestamp};
