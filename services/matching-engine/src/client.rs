//! Client callback contract
//!
//! Each registered client may supply a handler; the engine invokes exactly
//! one method per event produced for that client's orders, synchronously,
//! in generation order, after the corresponding mutation has committed.
//! Registering without a handler is legal; such a client's events are
//! silently dropped.

use types::ids::ExecutionId;
use types::numeric::{Price, Quantity};

use crate::order::Order;

/// Per-event-kind callback interface.
///
/// Every method receives the mutated order's current snapshot plus the
/// event's own payload. Default bodies are no-ops so implementors only
/// write the hooks they care about. The engine commits all mutations
/// before invoking any handler, so a panicking handler cannot corrupt
/// engine state.
pub trait OrderEventHandler {
    fn on_new(&mut self, _order: &Order) {}

    fn on_new_reject(&mut self, _order: &Order) {}

    fn on_new_ack(&mut self, _order: &Order, _price: Price, _outstanding: Quantity) {}

    fn on_cancel(&mut self, _order: &Order, _outstanding: Quantity) {}

    fn on_cancel_reject(&mut self, _order: &Order) {}

    fn on_cancel_ack(&mut self, _order: &Order, _cancelled: Quantity) {}

    fn on_execution(
        &mut self,
        _order: &Order,
        _execution_id: ExecutionId,
        _price: Price,
        _quantity: Quantity,
    ) {
    }

    fn on_expiry(&mut self, _order: &Order, _quantity: Quantity) {}
}
