//! Convenience re-export of the crate's common types.
//!
//! ```
//! use lob_core::prelude::*;
//! let _engine = MatchingEngine::new(64);
//! ```

pub use crate::analytics::AnalyticsSnapshot;
pub use crate::book::{ModifyOutcome, OrderBook};
pub use crate::engine::MatchingEngine;
pub use crate::error::{EngineError, Result};
pub use crate::event::{EventType, HistoricalEvent};
pub use crate::harness::ReplayHarness;
pub use crate::trade::TradeEvent;
pub use crate::types::{EventId, OrderId, Price, Quantity, Side, Timestamp};
