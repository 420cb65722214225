//! Bid (buy-side) limit ladder
//!
//! Buy levels keyed by price; best bid is the highest price. `BTreeMap`
//! iterates ascending, so best-first access uses the back of the map.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use types::numeric::Price;

use super::price_level::PriceLevel;

/// Bid (buy) side of the limit book.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BidBook {
    levels: BTreeMap<Price, PriceLevel>,
}

impl BidBook {
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

    /// Best (highest) bid price.
    pub fn best_price(&self) -> Option<Price> {
        self.levels.keys().next_back().copied()
    }

    /// Best (highest) bid level.
    pub fn best_level_mut(&mut self) -> Option<(Price, &mut PriceLevel)> {
        self.levels
            .iter_mut()
            .next_back()
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

    /// Levels best-first (highest price first).
    pub fn iter_best_first(&self) -> impl Iterator<Item = (&Price, &PriceLevel)> {
        self.levels.iter().rev()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::price_level::OrderKey;
    use types::ids::{ClientId, OrderId};

    fn key(order: u64) -> OrderKey {
        OrderKey::new(ClientId::new(1), OrderId::new(order))
    }

    #[test]
    fn test_best_is_highest() {
        let mut book = BidBook::new();
        book.find_or_create_level(Price::from_u64(10)).insert(key(1));
        book.find_or_create_level(Price::from_u64(12)).insert(key(2));
        book.find_or_create_level(Price::from_u64(11)).insert(key(3));

        assert_eq!(book.best_price(), Some(Price::from_u64(12)));

        let (px, level) = book.best_level_mut().unwrap();
        assert_eq!(px, Price::from_u64(12));
        assert_eq!(level.front(), Some(key(2)));
    }

    #[test]
    fn test_find_or_create_reuses_level() {
        let mut book = BidBook::new();
        book.find_or_create_level(Price::from_u64(10)).insert(key(1));
        book.find_or_create_level(Price::from_u64(10)).insert(key(2));

        assert_eq!(book.level_count(), 1);
        assert_eq!(
            book.level_mut(Price::from_u64(10)).unwrap().order_count(),
            2
        );
    }

    #[test]
    fn test_empty_level_is_dropped() {
        let mut book = BidBook::new();
        book.find_or_create_level(Price::from_u64(10)).insert(key(1));

        book.level_mut(Price::from_u64(10))
            .unwrap()
            .remove(ClientId::new(1), OrderId::new(1));
        book.remove_level_if_empty(Price::from_u64(10));

        assert!(book.is_empty());
    }

    #[test]
    fn test_iter_best_first_descending() {
        let mut book = BidBook::new();
        for px in [10u64, 12, 11] {
            book.find_or_create_level(Price::from_u64(px)).insert(key(px));
        }

        let prices: Vec<Price> = book.iter_best_first().map(|(px, _)| *px).collect();
        assert_eq!(
            prices,
            vec![Price::from_u64(12), Price::from_u64(11), Price::from_u64(10)]
        );
    }
}
