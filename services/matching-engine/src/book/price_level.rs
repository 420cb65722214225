//! Price level with FIFO queue
//!
//! A price level holds every order resting at one price, in arrival order,
//! to enforce time priority. Levels store order *handles* (client id plus
//! order id) resolved through the per-client registries; the quantities
//! themselves live in exactly one place, the registry-owned `Order`.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use types::ids::{ClientId, OrderId};
use types::numeric::Price;

/// Handle to a registry-owned order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderKey {
    pub client_id: ClientId,
    pub order_id: OrderId,
}

impl OrderKey {
    pub fn new(client_id: ClientId, order_id: OrderId) -> Self {
        Self {
            client_id,
            order_id,
        }
    }
}

/// Orders resting at one price, oldest first.
///
/// The two permanent market queues are `PriceLevel`s at `Price::ZERO`; they
/// may legitimately be empty. Limit levels are removed from the book as
/// soon as they drain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceLevel {
    price: Price,
    orders: VecDeque<OrderKey>,
}

impl PriceLevel {
    pub fn new(price: Price) -> Self {
        Self {
            price,
            orders: VecDeque::new(),
        }
    }

    pub fn price(&self) -> Price {
        self.price
    }

    /// Append at the tail: last in time priority.
    pub fn insert(&mut self, key: OrderKey) {
        self.orders.push_back(key);
    }

    /// Remove an order wherever it sits in the queue.
    ///
    /// Linear scan. Levels are shallow in practice, and removal is off the
    /// matching hot path. Returns the removed handle, or `None` if the
    /// order is not resident.
    pub fn remove(&mut self, client_id: ClientId, order_id: OrderId) -> Option<OrderKey> {
        let position = self
            .orders
            .iter()
            .position(|key| key.client_id == client_id && key.order_id == order_id)?;
        self.orders.remove(position)
    }

    /// Oldest resting order, the next to match.
    pub fn front(&self) -> Option<OrderKey> {
        self.orders.front().copied()
    }

    pub fn pop_front(&mut self) -> Option<OrderKey> {
        self.orders.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Resident handles, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &OrderKey> {
        self.orders.iter()
    }
}
