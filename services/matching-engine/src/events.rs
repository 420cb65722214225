//! Lifecycle event model
//!
//! One immutable record per order state transition. Events are append-only:
//! once recorded on an order they are never mutated, and together they form
//! the audit trail from which the order's state and quantity buckets are
//! derivable.

use serde::{Deserialize, Serialize};
use types::ids::{ExecutionId, OrderId};
use types::numeric::{Price, Quantity};
use types::order::Side;

/// A single order lifecycle event.
///
/// Closed set: every transition the engine can perform has exactly one
/// variant here, each carrying only its own payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type")]
pub enum OrderEvent {
    /// Order accepted into the engine, id assigned
    New {
        order_id: OrderId,
        side: Side,
        price: Price,
        quantity: Quantity,
    },

    /// Order acknowledged; outstanding quantity goes live
    NewAck {
        order_id: OrderId,
        price: Price,
        outstanding: Quantity,
    },

    /// Admission refused. Reserved extension point: the engine always
    /// accepts today, but the event exists so a future admission check can
    /// refuse without a new wire shape.
    NewReject { order_id: OrderId },

    /// Cancel request received; carries the outstanding quantity at
    /// request time, no quantity change yet
    Cancel { outstanding: Quantity },

    /// Cancel applied; `cancelled` moved out of the outstanding bucket
    CancelAck { cancelled: Quantity },

    /// Cancel refused
    CancelReject,

    /// One fill, at the maker's price. The same execution id appears on
    /// both sides of the cross.
    Execution {
        execution_id: ExecutionId,
        price: Price,
        quantity: Quantity,
    },

    /// Unpriced residual removed after crossing found no contra liquidity
    Expiry { quantity: Quantity },
}

impl OrderEvent {
    /// Event kind as a string label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            OrderEvent::New { .. } => "NEW",
            OrderEvent::NewAck { .. } => "NEW_ACK",
            OrderEvent::NewReject { .. } => "NEW_REJECT",
            OrderEvent::Cancel { .. } => "CANCEL",
            OrderEvent::CancelAck { .. } => "CANCEL_ACK",
            OrderEvent::CancelReject => "CANCEL_REJECT",
            OrderEvent::Execution { .. } => "EXECUTION",
            OrderEvent::Expiry { .. } => "EXPIRY",
        }
    }
}
