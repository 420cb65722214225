//! Order vocabulary
//!
//! Side and lifecycle state enums shared by the engine and its drivers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    Buy,
    /// Sell order (ask)
    Sell,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order lifecycle state.
///
/// Legal transitions: `None → New → Rejected | Active → Cancelled |
/// Completed | Expired`. The engine enforces the ordering; an out-of-order
/// transition is a programming error, not an input error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderState {
    /// Created, nothing recorded yet
    None,
    /// NEW recorded, order id assigned
    New,
    /// Admission refused (terminal; reserved, no path produces it today)
    Rejected,
    /// Acknowledged, outstanding quantity live
    Active,
    /// Outstanding quantity moved to the cancelled bucket (terminal)
    Cancelled,
    /// Outstanding quantity reached zero through executions (terminal)
    Completed,
    /// Unpriced residual removed without crossing (terminal)
    Expired,
}

impl OrderState {
    /// Check if state is terminal (no further transitions possible)
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderState::Rejected
                | OrderState::Cancelled
                | OrderState::Completed
                | OrderState::Expired
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderState::None => "NONE",
            OrderState::New => "NEW",
            OrderState::Rejected => "REJECTED",
            OrderState::Active => "ACTIVE",
            OrderState::Cancelled => "CANCELLED",
            OrderState::Completed => "COMPLETED",
            OrderState::Expired => "EXPIRED",
        }
    }
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
