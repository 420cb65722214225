//! Order book infrastructure
//!
//! Two limit ladders (bids highest-first, asks lowest-first) plus the two
//! permanent market-order queues. Market orders rest in their queue only
//! because no contra interest existed when they arrived; they carry the
//! `Price::ZERO` sentinel and are matched before any priced level.

pub mod ask_book;
pub mod bid_book;
pub mod price_level;

pub use ask_book::AskBook;
pub use bid_book::BidBook;
pub use price_level::{OrderKey, PriceLevel};

use serde::{Deserialize, Serialize};
use types::numeric::Price;
use types::order::Side;

/// The full book for one instrument.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBook {
    bids: BidBook,
    asks: AskBook,
    market_bids: PriceLevel,
    market_asks: PriceLevel,
}

impl OrderBook {
    pub fn new() -> Self {
        Self {
            bids: BidBook::new(),
            asks: AskBook::new(),
            market_bids: PriceLevel::new(Price::ZERO),
            market_asks: PriceLevel::new(Price::ZERO),
        }
    }

    pub fn bids(&self) -> &BidBook {
        &self.bids
    }

    pub fn bids_mut(&mut self) -> &mut BidBook {
        &mut self.bids
    }

    pub fn asks(&self) -> &AskBook {
        &self.asks
    }

    pub fn asks_mut(&mut self) -> &mut AskBook {
        &mut self.asks
    }

    /// Permanent market queue for `side`. Never removed, may be empty.
    pub fn market_queue(&self, side: Side) -> &PriceLevel {
        match side {
            Side::Buy => &self.market_bids,
            Side::Sell => &self.market_asks,
        }
    }

    pub fn market_queue_mut(&mut self, side: Side) -> &mut PriceLevel {
        match side {
            Side::Buy => &mut self.market_bids,
            Side::Sell => &mut self.market_asks,
        }
    }

    /// Resting place for an order: the market queue for unpriced orders,
    /// otherwise the limit level at its price (created if absent).
    pub fn find_or_create_resting_level(&mut self, side: Side, price: Price) -> &mut PriceLevel {
        if price.is_zero() {
            self.market_queue_mut(side)
        } else {
            match side {
                Side::Buy => self.bids.find_or_create_level(price),
                Side::Sell => self.asks.find_or_create_level(price),
            }
        }
    }

    /// Level where an order with `side`/`price` would rest, if present.
    pub fn resting_level_mut(&mut self, side: Side, price: Price) -> Option<&mut PriceLevel> {
        if price.is_zero() {
            Some(self.market_queue_mut(side))
        } else {
            match side {
                Side::Buy => self.bids.level_mut(price),
                Side::Sell => self.asks.level_mut(price),
            }
        }
    }

    /// Drop an emptied limit level. The market queues persist.
    pub fn remove_level_if_empty(&mut self, side: Side, price: Price) {
        if price.is_zero() {
            return;
        }
        match side {
            Side::Buy => self.bids.remove_level_if_empty(price),
            Side::Sell => self.asks.remove_level_if_empty(price),
        }
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}
