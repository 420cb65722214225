//! Matching engine
//!
//! Single-instrument continuous double-auction matching engine: accepts
//! new and cancel order requests from registered clients, maintains a live
//! order book, matches contra-side interest under strict price-then-time
//! priority, and delivers a deterministic, ordered stream of lifecycle
//! events back to each originating client.
//!
//! **Key invariants:**
//! - Quantity conservation: `original = outstanding + executed + cancelled`
//!   for every order at all times after acknowledgement
//! - Price-time priority strictly enforced; resting market orders match
//!   before any priced level
//! - Exactly one event per quantity mutation, delivered in generation
//!   order, after the mutation has committed

pub mod book;
pub mod client;
pub mod engine;
pub mod events;
pub mod matching;
pub mod order;

pub use client::OrderEventHandler;
pub use engine::{BookDepth, LevelDepth, MatchingEngine, OrderDepth};
pub use events::OrderEvent;
pub use order::Order;
