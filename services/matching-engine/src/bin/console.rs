//! Interactive console driver
//!
//! Drives one engine instance from stdin: pick a client, submit and cancel
//! orders, dump the book. Every client registers a printing handler, so
//! each lifecycle event appears on stdout as it is delivered.

use std::io::{self, BufRead, Write};

use matching_engine::{MatchingEngine, Order, OrderEventHandler};
use types::errors::EngineError;
use types::ids::{ClientId, ExecutionId, OrderId};
use types::numeric::{Price, Quantity};
use types::order::Side;

/// Prints one line per delivered event, prefixed with the owning client.
struct ConsoleHandler {
    client_id: ClientId,
}

impl ConsoleHandler {
    fn new(client_id: ClientId) -> Self {
        Self { client_id }
    }
}

impl OrderEventHandler for ConsoleHandler {
    fn on_new(&mut self, order: &Order) {
        println!(
            "onNew        client {} order {} {} {} px {} qty {}",
            self.client_id,
            order.id(),
            order.state(),
            order.side(),
            order.price(),
            order.quantity()
        );
    }

    fn on_new_reject(&mut self, order: &Order) {
        println!(
            "onNewReject  client {} order {} px {} qty {}",
            self.client_id,
            order.id(),
            order.price(),
            order.quantity()
        );
    }

    fn on_new_ack(&mut self, order: &Order, price: Price, outstanding: Quantity) {
        println!(
            "onNewAck     client {} order {} {} {} px {} out {} exe {} can {}",
            self.client_id,
            order.id(),
            order.state(),
            order.side(),
            price,
            outstanding,
            order.executed(),
            order.cancelled()
        );
    }

    fn on_cancel(&mut self, order: &Order, outstanding: Quantity) {
        println!(
            "onCancel     client {} order {} {} out {}",
            self.client_id,
            order.id(),
            order.state(),
            outstanding
        );
    }

    fn on_cancel_reject(&mut self, order: &Order) {
        println!(
            "onCancelRej  client {} order {} {}",
            self.client_id,
            order.id(),
            order.state()
        );
    }

    fn on_cancel_ack(&mut self, order: &Order, cancelled: Quantity) {
        println!(
            "onCancelAck  client {} order {} {} cancelled {} out {} exe {} can {}",
            self.client_id,
            order.id(),
            order.state(),
            cancelled,
            order.outstanding(),
            order.executed(),
            order.cancelled()
        );
    }

    fn on_execution(
        &mut self,
        order: &Order,
        execution_id: ExecutionId,
        price: Price,
        quantity: Quantity,
    ) {
        println!(
            "onExecution  client {} order {} {} exec {} px {} qty {} out {} exe {} can {}",
            self.client_id,
            order.id(),
            order.state(),
            execution_id,
            price,
            quantity,
            order.outstanding(),
            order.executed(),
            order.cancelled()
        );
    }

    fn on_expiry(&mut self, order: &Order, quantity: Quantity) {
        println!(
            "onExpiry     client {} order {} {} expired {} out {} exe {} can {}",
            self.client_id,
            order.id(),
            order.state(),
            quantity,
            order.outstanding(),
            order.executed(),
            order.cancelled()
        );
    }
}

const CLIENT_COUNT: u32 = 3;

fn main() {
    tracing_subscriber::fmt::init();

    let mut engine = MatchingEngine::new();
    for id in 0..CLIENT_COUNT {
        let client_id = ClientId::new(id);
        engine.register_client(client_id, Some(Box::new(ConsoleHandler::new(client_id))));
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut current = ClientId::new(0);

    loop {
        println!();
        println!("1. Select client ({})", current);
        println!("2. Dump order book");
        println!("3. Create order");
        println!("4. Cancel order");
        println!("5. Quit");

        let Some(command) = prompt(&mut lines, "Select command: ") else {
            break;
        };

        match command.as_str() {
            "1" => {
                let Some(input) = prompt(&mut lines, &format!("Select client (0..{}): ", CLIENT_COUNT - 1))
                else {
                    break;
                };
                match input.parse::<u32>() {
                    Ok(id) if id < CLIENT_COUNT => {
                        current = ClientId::new(id);
                        println!("Client set to {}", current);
                    }
                    _ => println!("Unknown client {}", input),
                }
            }
            "2" => dump_book(&engine),
            "3" => {
                if let Err(err) = create_order(&mut engine, current, &mut lines) {
                    println!("Failed to submit new order: {}", err);
                }
            }
            "4" => {
                let Some(input) = prompt(&mut lines, "Enter order id: ") else {
                    break;
                };
                let Ok(id) = input.parse::<u64>() else {
                    println!("Not an order id: {}", input);
                    continue;
                };
                match engine.cancel_order(current, OrderId::new(id)) {
                    Ok(()) => println!("Cancel submitted for order {}", id),
                    Err(err) => println!("Failed to cancel order: {}", err),
                }
            }
            "5" => {
                println!("Quit...");
                break;
            }
            other => println!("Unknown command {}", other),
        }
    }
}

/// Read side, price, and quantity, then submit. Validation failures at the
/// parse boundary reuse the engine's error taxonomy.
fn create_order(
    engine: &mut MatchingEngine,
    client_id: ClientId,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<(), EngineError> {
    let input = prompt(lines, "Side (B/S): ").unwrap_or_default();
    let side = match input.trim().to_ascii_uppercase().as_str() {
        "B" => Side::Buy,
        "S" => Side::Sell,
        other => {
            return Err(EngineError::InvalidSide {
                input: other.to_string(),
            })
        }
    };

    let input = prompt(lines, "Price (0 for market order): ").unwrap_or_default();
    let price = Price::from_str(input.trim()).map_err(|_| EngineError::InvalidPrice {
        price: input.trim().to_string(),
    })?;

    let input = prompt(lines, "Qty: ").unwrap_or_default();
    let quantity = Quantity::from_str(input.trim()).map_err(|_| EngineError::InvalidQuantity {
        quantity: input.trim().to_string(),
    })?;

    let order_id = engine.submit_order(client_id, side, price, quantity)?;
    println!("Submitted new order {}", order_id);
    Ok(())
}

/// Ladder-style dump: asks from worst to best down to the market queue,
/// then the bid side from the market queue to the worst bid.
fn dump_book(engine: &MatchingEngine) {
    let depth = engine.depth();

    for level in depth.asks.iter().rev() {
        print_level("ASK", level);
    }
    print_level("ASK", &depth.market_asks);
    print_level("BID", &depth.market_bids);
    for level in &depth.bids {
        print_level("BID", level);
    }
}

fn print_level(side: &str, level: &matching_engine::LevelDepth) {
    print!("{}({}) | {} |", side, level.price, level.volume);
    for entry in &level.orders {
        print!(
            " [{}:{} {} out {} exe {} can {}]",
            entry.client_id,
            entry.order_id,
            entry.state,
            entry.outstanding,
            entry.executed,
            entry.cancelled
        );
    }
    println!();
}

fn prompt(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    message: &str,
) -> Option<String> {
    print!("{}", message);
    let _ = io::stdout().flush();
    match lines.next() {
        Some(Ok(line)) => Some(line.trim().to_string()),
        _ => None,
    }
}
