//! Ask (sell-side) limit ladder
//!
//! Sell levels keyed by price; best ask is the lowest price, which is the
//! front of the `BTreeMap`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use types::numeric::Price;

use super::price_level::PriceLevel;

/// Ask (sell) side of the limit book.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AskBook {
    levels: BTreeMap<Price, PriceLevel>,
}

impl AskBook {
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Level at `price`, created empty if absent.
    pub fn find_or_create_level(&mut self, price: Price) -> &mut PriceLevel {
        self.levels
            .entry(price)
            .or_insert_with(|| PriceLevel::new(price))
    }

    pub fn level_mut(&mut self, price: Price) -> Option<&mut PriceLevel> {
        self.levels.get_mut(&price)
    }

    /// Best (lowest) ask price.
    pub fn best_price(&self) -> Option<Price> {
        self.levels.keys().next().copied()
    }

    /// Best (lowest) ask level.
    pub fn best_level_mut(&mut self) -> Option<(Price, &mut PriceLevel)> {
        self.levels
            .iter_mut()
            .next()
            .map(|(price, level)| (*price, level))
    }

    /// Drop the level at `price` if it has drained.
    pub fn remove_level_if_empty(&mut self, price: Price) {
        if let Some(level) = self.levels.get(&price) {
            if level.is_empty() {
                self.levels.remove(&price);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Levels best-first (lowest price first).
    pub fn iter_best_first(&self) -> impl Iterator<Item = (&Price, &PriceLevel)> {
        self.levels.iter()
    }
}
