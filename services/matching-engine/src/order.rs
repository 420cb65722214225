//! Order lifecycle state machine
//!
//! An `Order` owns the append-only history of its lifecycle events and the
//! quantity buckets derived from them. State transitions are only legal in
//! lifecycle order; the `record_*` operations assert their preconditions
//! and panic on contract violations; those are programming errors in the
//! engine, never caller input errors.

use serde::{Deserialize, Serialize};
use types::ids::{ClientId, ExecutionId, OrderId};
use types::numeric::{Price, Quantity};
use types::order::{OrderState, Side};

use crate::events::OrderEvent;

/// A single order: identity, quantity buckets, and its event history.
///
/// Owned by its client's registry for its whole lifetime; the book only
/// ever holds a handle. After acknowledgement the buckets conserve:
/// `quantity == outstanding + executed + cancelled`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    client_id: ClientId,
    /// Meaningful once the NEW event is recorded.
    order_id: OrderId,
    side: Side,
    /// `Price::ZERO` marks an unpriced (market) order.
    price: Price,
    quantity: Quantity,
    outstanding: Quantity,
    executed: Quantity,
    cancelled: Quantity,
    state: OrderState,
    events: Vec<OrderEvent>,
}

impl Order {
    /// Create an order as submitted, before anything is recorded.
    pub fn new(client_id: ClientId, side: Side, price: Price, quantity: Quantity) -> Self {
        Self {
            client_id,
            order_id: OrderId::new(0),
            side,
            price,
            quantity,
            outstanding: Quantity::ZERO,
            executed: Quantity::ZERO,
            cancelled: Quantity::ZERO,
            state: OrderState::None,
            events: Vec::new(),
        }
    }

    pub fn client_id(&self) -> ClientId {
        self.client_id
    }

    pub fn id(&self) -> OrderId {
        self.order_id
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn outstanding(&self) -> Quantity {
        self.outstanding
    }

    pub fn executed(&self) -> Quantity {
        self.executed
    }

    pub fn cancelled(&self) -> Quantity {
        self.cancelled
    }

    pub fn state(&self) -> OrderState {
        self.state
    }

    /// Full event history, oldest first.
    pub fn events(&self) -> &[OrderEvent] {
        &self.events
    }

    /// An unpriced order: rests in the market queue, expires if unfilled.
    pub fn is_market(&self) -> bool {
        self.price.is_zero()
    }

    /// Check quantity conservation: `original = outstanding + executed +
    /// cancelled`. Holds at all times after acknowledgement.
    pub fn check_invariant(&self) -> bool {
        self.quantity == self.outstanding + self.executed + self.cancelled
    }

    /// Record acceptance and assign the engine order id.
    ///
    /// # Panics
    /// Panics if anything was recorded before.
    pub fn record_new(&mut self, assigned_id: OrderId) -> OrderEvent {
        assert!(
            self.events.is_empty() && self.state == OrderState::None,
            "NEW must be the first event"
        );

        self.order_id = assigned_id;
        self.state = OrderState::New;
        self.push(OrderEvent::New {
            order_id: assigned_id,
            side: self.side,
            price: self.price,
            quantity: self.quantity,
        })
    }

    /// Acknowledge the order and set its live outstanding quantity.
    ///
    /// # Panics
    /// Panics unless the order is in state NEW.
    pub fn record_new_ack(&mut self, price: Price, outstanding: Quantity) -> OrderEvent {
        assert!(self.state == OrderState::New, "NEW_ACK requires state NEW");

        self.state = OrderState::Active;
        self.outstanding = outstanding;
        self.push(OrderEvent::NewAck {
            order_id: self.order_id,
            price,
            outstanding,
        })
    }

    /// Refuse admission. Reserved: no engine path produces this today.
    ///
    /// # Panics
    /// Panics unless the order is in state NEW.
    pub fn record_new_reject(&mut self) -> OrderEvent {
        assert!(self.state == OrderState::New, "NEW_REJECT requires state NEW");

        self.state = OrderState::Rejected;
        self.push(OrderEvent::NewReject {
            order_id: self.order_id,
        })
    }

    /// Record receipt of a cancel request. Informational; no quantity
    /// change.
    ///
    /// # Panics
    /// Panics unless the order is ACTIVE.
    pub fn record_cancel(&mut self) -> OrderEvent {
        assert!(self.state == OrderState::Active, "CANCEL requires state ACTIVE");

        self.push(OrderEvent::Cancel {
            outstanding: self.outstanding,
        })
    }

    /// Record a cancel refusal. Informational; no quantity change.
    pub fn record_cancel_reject(&mut self) -> OrderEvent {
        self.push(OrderEvent::CancelReject)
    }

    /// Move quantity from the outstanding to the cancelled bucket.
    ///
    /// Caller guarantees `qty_cancelled <= outstanding`.
    pub fn record_cancel_ack(&mut self, qty_cancelled: Quantity) -> OrderEvent {
        assert!(
            qty_cancelled <= self.outstanding,
            "cancel exceeds outstanding quantity"
        );

        self.outstanding = self
            .outstanding
            .checked_sub(qty_cancelled)
            .unwrap_or(Quantity::ZERO);
        self.cancelled = self.cancelled + qty_cancelled;
        self.state = OrderState::Cancelled;
        self.push(OrderEvent::CancelAck {
            cancelled: qty_cancelled,
        })
    }

    /// Record one fill. Partial fills keep the order ACTIVE; when the
    /// outstanding quantity reaches zero the order completes, unless a
    /// cancel already made the state terminal.
    ///
    /// Caller guarantees `qty_exec <= outstanding`.
    pub fn record_execution(
        &mut self,
        execution_id: ExecutionId,
        px_exec: Price,
        qty_exec: Quantity,
    ) -> OrderEvent {
        assert!(
            qty_exec <= self.outstanding,
            "execution exceeds outstanding quantity"
        );

        self.outstanding = self
            .outstanding
            .checked_sub(qty_exec)
            .unwrap_or(Quantity::ZERO);
        self.executed = self.executed + qty_exec;
        if self.outstanding.is_zero() && self.state != OrderState::Cancelled {
            self.state = OrderState::Completed;
        }
        self.push(OrderEvent::Execution {
            execution_id,
            price: px_exec,
            quantity: qty_exec,
        })
    }

    /// Remove unpriced residual quantity that found no contra liquidity.
    ///
    /// Caller guarantees `quantity <= outstanding`.
    pub fn record_expiry(&mut self, quantity: Quantity) -> OrderEvent {
        assert!(
            quantity <= self.outstanding,
            "expiry exceeds outstanding quantity"
        );

        self.outstanding = self
            .outstanding
            .checked_sub(quantity)
            .unwrap_or(Quantity::ZERO);
        self.cancelled = self.cancelled + quantity;
        self.state = OrderState::Expired;
        self.push(OrderEvent::Expiry { quantity })
    }

    fn push(&mut self, event: OrderEvent) -> OrderEvent {
        self.events.push(event.clone());
        event
    }
}
