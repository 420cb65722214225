//! Matching engine core
//!
//! Sole mutator of book and order state. Orders are owned by their client's
//! registry (an arena keyed by order id); the book holds only `OrderKey`
//! handles, resolved here. Every submit/cancel call runs to completion
//! before its events are delivered, so handlers always observe committed
//! state and a failing handler cannot corrupt the engine.

use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::debug;
use types::errors::EngineError;
use types::ids::{ClientId, ExecutionId, OrderId};
use types::numeric::{Price, Quantity};
use types::order::{OrderState, Side};

use crate::book::{OrderBook, OrderKey, PriceLevel};
use crate::client::OrderEventHandler;
use crate::events::OrderEvent;
use crate::matching::{crossing, MatchExecutor};
use crate::order::Order;

/// Per-client registration state: the optional event handler, the order-id
/// counter, and the arena owning every order the client ever submitted.
struct ClientInfo {
    handler: Option<Box<dyn OrderEventHandler>>,
    last_order_id: OrderId,
    orders: HashMap<OrderId, Order>,
}

impl ClientInfo {
    fn new(handler: Option<Box<dyn OrderEventHandler>>) -> Self {
        Self {
            handler,
            last_order_id: OrderId::new(0),
            orders: HashMap::new(),
        }
    }
}

/// Single-instrument matching engine.
///
/// Single-writer: submission and cancellation take `&mut self` and run to
/// completion atomically with respect to each other. Callers with multiple
/// producer threads serialize access externally.
pub struct MatchingEngine {
    clients: HashMap<ClientId, ClientInfo>,
    book: OrderBook,
    executor: MatchExecutor,
}

impl MatchingEngine {
    pub fn new() -> Self {
        Self {
            clients: HashMap::new(),
            book: OrderBook::new(),
            executor: MatchExecutor::default(),
        }
    }

    /// Engine whose first execution id is `starting_id`, for deployments
    /// where several engine instances must share one id space.
    pub fn with_starting_execution_id(starting_id: ExecutionId) -> Self {
        Self {
            clients: HashMap::new(),
            book: OrderBook::new(),
            executor: MatchExecutor::new(starting_id),
        }
    }

    /// Register a client. Returns false if the id is already registered.
    /// `None` means the client receives no event delivery.
    pub fn register_client(
        &mut self,
        client_id: ClientId,
        handler: Option<Box<dyn OrderEventHandler>>,
    ) -> bool {
        match self.clients.entry(client_id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(ClientInfo::new(handler));
                true
            }
        }
    }

    /// Submit a new order.
    ///
    /// Validates, acknowledges, crosses against the contra side, and rests
    /// (or expires) any residual, then delivers every generated event to
    /// the involved clients in generation order. A validation failure
    /// mutates nothing and emits nothing. Returns the assigned order id.
    pub fn submit_order(
        &mut self,
        client_id: ClientId,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Result<OrderId, EngineError> {
        let info = self
            .clients
            .get_mut(&client_id)
            .ok_or(EngineError::UnknownClient { client_id })?;

        if price.is_negative() {
            return Err(EngineError::InvalidPrice {
                price: price.to_string(),
            });
        }
        if quantity.is_zero() {
            return Err(EngineError::InvalidQuantity {
                quantity: quantity.to_string(),
            });
        }

        let order_id = info.last_order_id.next();
        info.last_order_id = order_id;

        let taker_key = OrderKey::new(client_id, order_id);
        let mut order = Order::new(client_id, side, price, quantity);
        let mut pending: Vec<(OrderKey, OrderEvent)> = Vec::new();

        // Always-accept: NEW then NEW_ACK back to back. Rejection here is
        // reserved for admission checks that do not exist today.
        let event = order.record_new(order_id);
        pending.push((taker_key, event));
        let event = order.record_new_ack(price, quantity);
        pending.push((taker_key, event));

        Self::cross_incoming(
            &mut self.book,
            &mut self.clients,
            &mut self.executor,
            &mut order,
            &mut pending,
        )?;

        if !order.outstanding().is_zero() {
            if order.is_market() {
                // No contra liquidity left for an unpriced order: it never
                // rests, the residual expires.
                let residual = order.outstanding();
                let event = order.record_expiry(residual);
                pending.push((taker_key, event));
            } else {
                self.book
                    .find_or_create_resting_level(side, price)
                    .insert(taker_key);
            }
        }

        debug!(
            client = %client_id,
            order = %order_id,
            side = %side,
            %price,
            %quantity,
            state = %order.state(),
            events = pending.len(),
            "order submitted"
        );

        // The registry owns the order from here on; the book (if the order
        // rested) holds only the handle.
        self.clients
            .get_mut(&client_id)
            .unwrap()
            .orders
            .insert(order_id, order);

        self.dispatch(pending);
        Ok(order_id)
    }

    /// Cancel a resting order.
    ///
    /// Fails without mutating anything if the client or order is unknown
    /// or the order has no outstanding quantity. On success emits CANCEL
    /// then CANCEL_ACK and removes the order from its level or queue.
    pub fn cancel_order(
        &mut self,
        client_id: ClientId,
        order_id: OrderId,
    ) -> Result<(), EngineError> {
        let Self { clients, book, .. } = self;

        let info = clients
            .get_mut(&client_id)
            .ok_or(EngineError::UnknownClient { client_id })?;
        let order = info
            .orders
            .get_mut(&order_id)
            .ok_or(EngineError::UnknownOrder {
                client_id,
                order_id,
            })?;

        if order.outstanding().is_zero() {
            return Err(EngineError::AlreadyTerminal { order_id });
        }

        let side = order.side();
        let price = order.price();
        let key = OrderKey::new(client_id, order_id);

        // The order claims to be resting; verify before mutating anything.
        // A miss here is an internal invariant breach, not a caller error.
        let Some(level) = book.resting_level_mut(side, price) else {
            debug_assert!(false, "no level at {} for resting order {}", price, order_id);
            return Err(EngineError::BookInconsistency {
                detail: format!("no {} level at {} for order {}", side, price, order_id),
            });
        };
        if !level.iter().any(|resident| *resident == key) {
            debug_assert!(false, "order {} missing from its level", order_id);
            return Err(EngineError::BookInconsistency {
                detail: format!("order {} not resident at {} {}", order_id, side, price),
            });
        }

        let mut pending: Vec<(OrderKey, OrderEvent)> = Vec::new();
        let event = order.record_cancel();
        pending.push((key, event));
        let outstanding = order.outstanding();
        let event = order.record_cancel_ack(outstanding);
        pending.push((key, event));

        level.remove(client_id, order_id);
        book.remove_level_if_empty(side, price);

        debug!(
            client = %client_id,
            order = %order_id,
            cancelled = %outstanding,
            "order cancelled"
        );

        self.dispatch(pending);
        Ok(())
    }

    /// Snapshot a single order.
    pub fn order(&self, client_id: ClientId, order_id: OrderId) -> Option<&Order> {
        self.clients
            .get(&client_id)
            .and_then(|info| info.orders.get(&order_id))
    }

    /// Read-only depth dump of the whole book, market queues included,
    /// with aggregate volume and per-order detail. Diagnostics only.
    pub fn depth(&self) -> BookDepth {
        BookDepth {
            market_asks: self.level_depth(self.book.market_queue(Side::Sell)),
            asks: self
                .book
                .asks()
                .iter_best_first()
                .map(|(_, level)| self.level_depth(level))
                .collect(),
            market_bids: self.level_depth(self.book.market_queue(Side::Buy)),
            bids: self
                .book
                .bids()
                .iter_best_first()
                .map(|(_, level)| self.level_depth(level))
                .collect(),
        }
    }

    /// Cross `taker` against the contra side of the book.
    ///
    /// Phase A drains the contra market queue unconditionally: resting
    /// market orders match before any priced level, at whatever price they
    /// recorded. Phase B walks the contra limit ladder best-first and
    /// stops at the first level the taker's limit no longer crosses.
    ///
    /// Associated fn over split fields so the book, the registries, and
    /// the executor can be borrowed independently.
    fn cross_incoming(
        book: &mut OrderBook,
        clients: &mut HashMap<ClientId, ClientInfo>,
        executor: &mut MatchExecutor,
        taker: &mut Order,
        pending: &mut Vec<(OrderKey, OrderEvent)>,
    ) -> Result<(), EngineError> {
        let contra = taker.side().opposite();
        let taker_key = OrderKey::new(taker.client_id(), taker.id());

        // Phase A: contra market queue, no price test.
        let queue = book.market_queue_mut(contra);
        while !taker.outstanding().is_zero() {
            let Some(maker_key) = queue.front() else {
                break;
            };
            let maker = Self::resolve_resting(clients, maker_key)?;
            let (maker_event, taker_event) = executor.cross(taker, maker);
            let maker_done = maker.outstanding().is_zero();
            pending.push((maker_key, maker_event));
            pending.push((taker_key, taker_event));
            if maker_done {
                queue.pop_front();
            }
        }

        // Phase B: contra limit levels in best-price order.
        while !taker.outstanding().is_zero() {
            let (level_price, drained) = {
                let best = match contra {
                    Side::Buy => book.bids_mut().best_level_mut(),
                    Side::Sell => book.asks_mut().best_level_mut(),
                };
                let Some((level_price, level)) = best else {
                    break;
                };
                if !crossing::crosses(taker.side(), taker.price(), level_price) {
                    break;
                }

                while !taker.outstanding().is_zero() {
                    let Some(maker_key) = level.front() else {
                        break;
                    };
                    let maker = Self::resolve_resting(clients, maker_key)?;
                    let (maker_event, taker_event) = executor.cross(taker, maker);
                    let maker_done = maker.outstanding().is_zero();
                    pending.push((maker_key, maker_event));
                    pending.push((taker_key, taker_event));
                    if maker_done {
                        level.pop_front();
                    }
                }

                (level_price, level.is_empty())
            };

            if drained {
                book.remove_level_if_empty(contra, level_price);
            } else {
                // Taker exhausted against a still-populated level.
                break;
            }
        }

        Ok(())
    }

    /// Resolve a book handle through the owning client's registry.
    fn resolve_resting<'a>(
        clients: &'a mut HashMap<ClientId, ClientInfo>,
        key: OrderKey,
    ) -> Result<&'a mut Order, EngineError> {
        match clients
            .get_mut(&key.client_id)
            .and_then(|info| info.orders.get_mut(&key.order_id))
        {
            Some(order) => Ok(order),
            None => {
                debug_assert!(false, "book handle {:?} missing from registry", key);
                Err(EngineError::BookInconsistency {
                    detail: format!(
                        "resting order {} of client {} not in registry",
                        key.order_id, key.client_id
                    ),
                })
            }
        }
    }

    /// Deliver events in generation order, each to its owning client's
    /// handler. All mutations are already committed at this point.
    fn dispatch(&mut self, pending: Vec<(OrderKey, OrderEvent)>) {
        for (key, event) in pending {
            let Some(info) = self.clients.get_mut(&key.client_id) else {
                continue;
            };
            let Some(handler) = info.handler.as_deref_mut() else {
                continue;
            };
            let Some(order) = info.orders.get(&key.order_id) else {
                continue;
            };

            match event {
                OrderEvent::New { .. } => handler.on_new(order),
                OrderEvent::NewAck {
                    price, outstanding, ..
                } => handler.on_new_ack(order, price, outstanding),
                OrderEvent::NewReject { .. } => handler.on_new_reject(order),
                OrderEvent::Cancel { outstanding } => handler.on_cancel(order, outstanding),
                OrderEvent::CancelAck { cancelled } => handler.on_cancel_ack(order, cancelled),
                OrderEvent::CancelReject => handler.on_cancel_reject(order),
                OrderEvent::Execution {
                    execution_id,
                    price,
                    quantity,
                } => handler.on_execution(order, execution_id, price, quantity),
                OrderEvent::Expiry { quantity } => handler.on_expiry(order, quantity),
            }
        }
    }

    fn level_depth(&self, level: &PriceLevel) -> LevelDepth {
        let mut volume = Quantity::ZERO;
        let mut orders = Vec::with_capacity(level.order_count());

        for key in level.iter() {
            if let Some(order) = self.order(key.client_id, key.order_id) {
                volume = volume + order.outstanding();
                orders.push(OrderDepth {
                    client_id: key.client_id,
                    order_id: key.order_id,
                    state: order.state(),
                    outstanding: order.outstanding(),
                    executed: order.executed(),
                    cancelled: order.cancelled(),
                });
            }
        }

        LevelDepth {
            price: level.price(),
            volume,
            orders,
        }
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-order detail in a depth dump.
#[derive(Debug, Clone, Serialize)]
pub struct OrderDepth {
    pub client_id: ClientId,
    pub order_id: OrderId,
    pub state: OrderState,
    pub outstanding: Quantity,
    pub executed: Quantity,
    pub cancelled: Quantity,
}

/// One price level in a depth dump: aggregate volume plus residents in
/// time priority.
#[derive(Debug, Clone, Serialize)]
pub struct LevelDepth {
    pub price: Price,
    pub volume: Quantity,
    pub orders: Vec<OrderDepth>,
}

/// Read-only book dump. Limit levels are best-first per side; the two
/// permanent market queues are reported separately and may be empty.
#[derive(Debug, Clone, Serialize)]
pub struct BookDepth {
    pub market_asks: LevelDepth,
    pub asks: Vec<LevelDepth>,
    pub market_bids: LevelDepth,
    pub bids: Vec<LevelDepth>,
}
