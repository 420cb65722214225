//! End-to-end lifecycle tests
//!
//! Exercises the full submit/cross/cancel flow through the public API with
//! a recording handler, asserting the exact event sequences each client
//! observes.

use std::cell::RefCell;
use std::rc::Rc;

use matching_engine::{MatchingEngine, Order, OrderEvent, OrderEventHandler};
use types::errors::EngineError;
use types::ids::{ClientId, ExecutionId, OrderId};
use types::numeric::{Price, Quantity};
use types::order::{OrderState, Side};

/// Appends one line per delivered event to a shared log.
struct RecordingHandler {
    log: Rc<RefCell<Vec<String>>>,
}

impl OrderEventHandler for RecordingHandler {
    fn on_new(&mut self, order: &Order) {
        self.log.borrow_mut().push(format!(
            "NEW order={} side={} px={} qty={}",
            order.id(),
            order.side(),
            order.price(),
            order.quantity()
        ));
    }

    fn on_new_ack(&mut self, order: &Order, price: Price, outstanding: Quantity) {
        self.log.borrow_mut().push(format!(
            "NEW_ACK order={} px={} out={}",
            order.id(),
            price,
            outstanding
        ));
    }

    fn on_cancel(&mut self, order: &Order, outstanding: Quantity) {
        self.log
            .borrow_mut()
            .push(format!("CANCEL order={} out={}", order.id(), outstanding));
    }

    fn on_cancel_ack(&mut self, order: &Order, cancelled: Quantity) {
        self.log.borrow_mut().push(format!(
            "CANCEL_ACK order={} cancelled={} state={}",
            order.id(),
            cancelled,
            order.state()
        ));
    }

    fn on_execution(
        &mut self,
        order: &Order,
        execution_id: ExecutionId,
        price: Price,
        quantity: Quantity,
    ) {
        self.log.borrow_mut().push(format!(
            "EXEC order={} exec={} px={} qty={} out={} state={}",
            order.id(),
            execution_id,
            price,
            quantity,
            order.outstanding(),
            order.state()
        ));
    }

    fn on_expiry(&mut self, order: &Order, quantity: Quantity) {
        self.log.borrow_mut().push(format!(
            "EXPIRY order={} qty={} state={}",
            order.id(),
            quantity,
            order.state()
        ));
    }
}

/// Engine with `n` recording clients; returns each client's log.
fn setup(n: u32) -> (MatchingEngine, Vec<Rc<RefCell<Vec<String>>>>) {
    let mut engine = MatchingEngine::new();
    let mut logs = Vec::new();
    for id in 0..n {
        let log = Rc::new(RefCell::new(Vec::new()));
        logs.push(Rc::clone(&log));
        assert!(engine.register_client(
            ClientId::new(id),
            Some(Box::new(RecordingHandler { log }))
        ));
    }
    (engine, logs)
}

fn log_of(logs: &[Rc<RefCell<Vec<String>>>], client: usize) -> Vec<String> {
    logs[client].borrow().clone()
}

#[test]
fn full_lifecycle_scenarios() {
    let (mut engine, logs) = setup(3);
    let client_a = ClientId::new(0);
    let client_b = ClientId::new(1);
    let client_c = ClientId::new(2);

    // Scenario 1: A submits BUY limit 10.00 qty 100 into an empty book.
    let order_a = engine
        .submit_order(
            client_a,
            Side::Buy,
            Price::from_str("10.00").unwrap(),
            Quantity::from_u64(100),
        )
        .unwrap();

    assert_eq!(
        log_of(&logs, 0),
        vec![
            "NEW order=1 side=BUY px=10.00 qty=100".to_string(),
            "NEW_ACK order=1 px=10.00 out=100".to_string(),
        ]
    );
    let depth = engine.depth();
    assert_eq!(depth.bids.len(), 1);
    assert_eq!(depth.bids[0].volume, Quantity::from_u64(100));

    // Scenario 2: B submits SELL limit 10.00 qty 60, crossing A fully.
    let order_b = engine
        .submit_order(
            client_b,
            Side::Sell,
            Price::from_str("10.00").unwrap(),
            Quantity::from_u64(60),
        )
        .unwrap();

    assert_eq!(
        log_of(&logs, 1),
        vec![
            "NEW order=1 side=SELL px=10.00 qty=60".to_string(),
            "NEW_ACK order=1 px=10.00 out=60".to_string(),
            "EXEC order=1 exec=1 px=10.00 qty=60 out=0 state=COMPLETED".to_string(),
        ]
    );
    // A saw exactly one additional event: the maker-side execution.
    assert_eq!(
        log_of(&logs, 0)[2],
        "EXEC order=1 exec=1 px=10.00 qty=60 out=40 state=ACTIVE"
    );

    let a = engine.order(client_a, order_a).unwrap();
    assert_eq!(a.state(), OrderState::Active);
    assert_eq!(a.outstanding(), Quantity::from_u64(40));
    let b = engine.order(client_b, order_b).unwrap();
    assert_eq!(b.state(), OrderState::Completed);

    // Scenario 3: C submits a BUY market order with no resting asks.
    let order_c = engine
        .submit_order(client_c, Side::Buy, Price::ZERO, Quantity::from_u64(40))
        .unwrap();

    assert_eq!(
        log_of(&logs, 2),
        vec![
            "NEW order=1 side=BUY px=0 qty=40".to_string(),
            "NEW_ACK order=1 px=0 out=40".to_string(),
            "EXPIRY order=1 qty=40 state=EXPIRED".to_string(),
        ]
    );
    let c = engine.order(client_c, order_c).unwrap();
    assert_eq!(c.state(), OrderState::Expired);
    assert!(c.check_invariant());

    // Scenario 4: A cancels the remaining 40.
    engine.cancel_order(client_a, order_a).unwrap();

    let a_log = log_of(&logs, 0);
    assert_eq!(a_log[3], "CANCEL order=1 out=40");
    assert_eq!(a_log[4], "CANCEL_ACK order=1 cancelled=40 state=CANCELLED");
    assert!(engine.depth().bids.is_empty());

    let a = engine.order(client_a, order_a).unwrap();
    assert_eq!(a.state(), OrderState::Cancelled);
    assert!(a.check_invariant());

    // Scenario 5: cancelling B's completed order fails, emits nothing.
    let before = log_of(&logs, 1).len();
    let result = engine.cancel_order(client_b, order_b);
    assert_eq!(
        result,
        Err(EngineError::AlreadyTerminal { order_id: order_b })
    );
    assert_eq!(log_of(&logs, 1).len(), before);
}

#[test]
fn time_priority_within_a_level() {
    let (mut engine, _logs) = setup(3);

    // Two sells rest at the same price, client 0 first.
    let first = engine
        .submit_order(
            ClientId::new(0),
            Side::Sell,
            Price::from_u64(10),
            Quantity::from_u64(30),
        )
        .unwrap();
    let second = engine
        .submit_order(
            ClientId::new(1),
            Side::Sell,
            Price::from_u64(10),
            Quantity::from_u64(30),
        )
        .unwrap();

    // A buy for 30 takes only the first-resting order.
    engine
        .submit_order(
            ClientId::new(2),
            Side::Buy,
            Price::from_u64(10),
            Quantity::from_u64(30),
        )
        .unwrap();

    assert_eq!(
        engine.order(ClientId::new(0), first).unwrap().state(),
        OrderState::Completed
    );
    assert_eq!(
        engine.order(ClientId::new(1), second).unwrap().state(),
        OrderState::Active
    );
}

#[test]
fn better_priced_level_exhausted_first() {
    let (mut engine, _logs) = setup(2);

    let cheap = engine
        .submit_order(
            ClientId::new(0),
            Side::Sell,
            Price::from_u64(10),
            Quantity::from_u64(60),
        )
        .unwrap();
    let dear = engine
        .submit_order(
            ClientId::new(0),
            Side::Sell,
            Price::from_u64(11),
            Quantity::from_u64(50),
        )
        .unwrap();

    // Buy 100 at 11 sweeps the 10s first, then partially fills the 11s.
    engine
        .submit_order(
            ClientId::new(1),
            Side::Buy,
            Price::from_u64(11),
            Quantity::from_u64(100),
        )
        .unwrap();

    let cheap_order = engine.order(ClientId::new(0), cheap).unwrap();
    let dear_order = engine.order(ClientId::new(0), dear).unwrap();
    assert_eq!(cheap_order.state(), OrderState::Completed);
    assert_eq!(dear_order.outstanding(), Quantity::from_u64(10));

    // Each maker executed at its own price.
    let exec_price = |order: &Order| {
        order
            .events()
            .iter()
            .find_map(|event| match event {
                OrderEvent::Execution { price, .. } => Some(*price),
                _ => None,
            })
            .unwrap()
    };
    assert_eq!(exec_price(cheap_order), Price::from_u64(10));
    assert_eq!(exec_price(dear_order), Price::from_u64(11));
}

#[test]
fn taker_stops_at_its_limit() {
    let (mut engine, _logs) = setup(2);

    engine
        .submit_order(
            ClientId::new(0),
            Side::Sell,
            Price::from_u64(10),
            Quantity::from_u64(60),
        )
        .unwrap();
    let dear = engine
        .submit_order(
            ClientId::new(0),
            Side::Sell,
            Price::from_u64(11),
            Quantity::from_u64(50),
        )
        .unwrap();

    // Buy 100 at 10.50: fills the 10s, cannot enter the 11 level, rests.
    let taker = engine
        .submit_order(
            ClientId::new(1),
            Side::Buy,
            Price::from_str("10.50").unwrap(),
            Quantity::from_u64(100),
        )
        .unwrap();

    let taker_order = engine.order(ClientId::new(1), taker).unwrap();
    assert_eq!(taker_order.state(), OrderState::Active);
    assert_eq!(taker_order.outstanding(), Quantity::from_u64(40));
    assert_eq!(taker_order.executed(), Quantity::from_u64(60));

    let dear_order = engine.order(ClientId::new(0), dear).unwrap();
    assert!(dear_order.executed().is_zero());

    let depth = engine.depth();
    assert_eq!(depth.bids.len(), 1);
    assert_eq!(depth.bids[0].price, Price::from_str("10.50").unwrap());
    assert_eq!(depth.asks.len(), 1);
    assert_eq!(depth.asks[0].price, Price::from_u64(11));
}

#[test]
fn market_taker_sweeps_every_level() {
    let (mut engine, _logs) = setup(2);

    for px in [10u64, 11, 12] {
        engine
            .submit_order(
                ClientId::new(0),
                Side::Sell,
                Price::from_u64(px),
                Quantity::from_u64(10),
            )
            .unwrap();
    }

    // Market buy for 25: crosses 10, 11, and part of 12 with no price stop.
    let taker = engine
        .submit_order(ClientId::new(1), Side::Buy, Price::ZERO, Quantity::from_u64(25))
        .unwrap();

    let taker_order = engine.order(ClientId::new(1), taker).unwrap();
    assert_eq!(taker_order.state(), OrderState::Completed);
    assert_eq!(taker_order.executed(), Quantity::from_u64(25));

    let depth = engine.depth();
    assert_eq!(depth.asks.len(), 1);
    assert_eq!(depth.asks[0].price, Price::from_u64(12));
    assert_eq!(depth.asks[0].volume, Quantity::from_u64(5));
}

#[test]
fn market_residual_expires_after_sweeping() {
    let (mut engine, _logs) = setup(2);

    engine
        .submit_order(
            ClientId::new(0),
            Side::Buy,
            Price::from_u64(10),
            Quantity::from_u64(10),
        )
        .unwrap();

    // Market sell for 25: fills 10, the residual 15 expires.
    let taker = engine
        .submit_order(
            ClientId::new(1),
            Side::Sell,
            Price::ZERO,
            Quantity::from_u64(25),
        )
        .unwrap();

    let taker_order = engine.order(ClientId::new(1), taker).unwrap();
    assert_eq!(taker_order.state(), OrderState::Expired);
    assert_eq!(taker_order.executed(), Quantity::from_u64(10));
    assert_eq!(taker_order.cancelled(), Quantity::from_u64(15));
    assert!(taker_order.check_invariant());
    assert!(engine.depth().market_asks.orders.is_empty());
}

#[test]
fn cancelled_level_does_not_reappear() {
    let (mut engine, _logs) = setup(1);
    let client = ClientId::new(0);

    let first = engine
        .submit_order(client, Side::Buy, Price::from_u64(10), Quantity::from_u64(100))
        .unwrap();
    engine.cancel_order(client, first).unwrap();
    assert!(engine.depth().bids.is_empty());

    // A fresh order at the same price builds a fresh level with only its
    // own volume, with no stale residue.
    engine
        .submit_order(client, Side::Buy, Price::from_u64(10), Quantity::from_u64(5))
        .unwrap();

    let depth = engine.depth();
    assert_eq!(depth.bids.len(), 1);
    assert_eq!(depth.bids[0].volume, Quantity::from_u64(5));
    assert_eq!(depth.bids[0].orders.len(), 1);
}

#[test]
fn events_without_handler_are_dropped() {
    let mut engine = MatchingEngine::new();
    assert!(engine.register_client(ClientId::new(0), None));

    // Just verifies the silent path completes normally.
    let id = engine
        .submit_order(
            ClientId::new(0),
            Side::Buy,
            Price::from_u64(10),
            Quantity::from_u64(1),
        )
        .unwrap();
    assert_eq!(id, OrderId::new(1));
    engine.cancel_order(ClientId::new(0), id).unwrap();
}
