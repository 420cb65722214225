//! Pairwise cross execution
//!
//! `MatchExecutor` owns the engine-wide execution-id counter and performs
//! the single cross step: fill `min(taker, maker)` at the maker's price,
//! mint one id, record one execution event on each side. The counter is
//! instance state, not a global; engines that must share an id space get a
//! non-default starting id injected at construction.

use types::ids::ExecutionId;

use crate::events::OrderEvent;
use crate::order::Order;

/// Execution-id source plus the pairwise cross step.
pub struct MatchExecutor {
    next_execution_id: ExecutionId,
}

impl MatchExecutor {
    /// `starting_id` is the first id this executor will mint.
    pub fn new(starting_id: ExecutionId) -> Self {
        Self {
            next_execution_id: starting_id,
        }
    }

    /// Mint the next execution id (monotonically increasing).
    fn next_execution_id(&mut self) -> ExecutionId {
        let id = self.next_execution_id;
        self.next_execution_id = id.next();
        id
    }

    /// Cross `taker` against `maker` for `min` of their outstanding
    /// quantities, at the maker's price.
    ///
    /// Records an execution on both orders and returns the two events,
    /// maker-side first, the order they are delivered in.
    pub fn cross(&mut self, taker: &mut Order, maker: &mut Order) -> (OrderEvent, OrderEvent) {
        let qty_exec = std::cmp::min(taker.outstanding(), maker.outstanding());
        let px_exec = maker.price();
        let execution_id = self.next_execution_id();

        let maker_event = maker.record_execution(execution_id, px_exec, qty_exec);
        let taker_event = taker.record_execution(execution_id, px_exec, qty_exec);

        (maker_event, taker_event)
    }
}

impl Default for MatchExecutor {
    fn default() -> Self {
        Self::new(ExecutionId::new(1))
    }
}
