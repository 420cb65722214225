//! Error taxonomy for the matching engine
//!
//! Submit and cancel report failures synchronously as values; a failed call
//! mutates nothing and emits no events. `BookInconsistency` is the one
//! variant that signals an internal invariant breach rather than bad input.

use crate::ids::{ClientId, OrderId};
use thiserror::Error;

/// Engine operation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("unknown client: {client_id}")]
    UnknownClient { client_id: ClientId },

    #[error("invalid side: {input}")]
    InvalidSide { input: String },

    #[error("invalid price: {price}")]
    InvalidPrice { price: String },

    #[error("invalid quantity: {quantity}")]
    InvalidQuantity { quantity: String },

    #[error("unknown order {order_id} for client {client_id}")]
    UnknownOrder {
        client_id: ClientId,
        order_id: OrderId,
    },

    #[error("order {order_id} has no outstanding quantity")]
    AlreadyTerminal { order_id: OrderId },

    /// A resting order could not be located where the book says it should
    /// be. Internal defect: the engine leaves the book as found and reports
    /// it rather than guessing.
    #[error("order book inconsistency: {detail}")]
    BookInconsistency { detail: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_client_display() {
        let err = EngineError::UnknownClient {
            client_id: ClientId::new(9),
        };
        assert_eq!(err.to_string(), "unknown client: 9");
    }

    #[test]
    fn test_unknown_order_display() {
        let err = EngineError::UnknownOrder {
            client_id: ClientId::new(1),
            order_id: OrderId::new(42),
        };
        assert!(err.to_string().contains("42"));
        assert!(err.to_string().contains("client 1"));
    }

    #[test]
    fn test_already_terminal_display() {
        let err = EngineError::AlreadyTerminal {
            order_id: OrderId::new(3),
        };
        assert_eq!(err.to_string(), "order 3 has no outstanding quantity");
    }
}
