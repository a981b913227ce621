//! Dynamic Cargo
//!
//! Handlers that each expect a different payload type, threaded through a
//! single machine using the opaque `Cargo` type.
//!
//! Key concepts:
//! - Cargo changes shape from state to state
//! - A handler handed the wrong shape reports a typed error
//! - Observers watch transitions without touching them
//!
//! Run with: cargo run --example dynamic_cargo

use fsmdrive::core::{Cargo, HandlerError, Transition};
use fsmdrive::engine::{Machine, RunOptions};
use fsmdrive::MachineBuilder;

#[derive(Debug)]
struct Order {
    sku: String,
    quantity: u32,
}

fn build_machine() -> Machine {
    MachineBuilder::new()
        .start("parse")
        .state_fn("parse", |cargo: Cargo| {
            let line = cargo.downcast::<String>()?;
            let (sku, quantity) = line
                .split_once(':')
                .ok_or_else(|| HandlerError::Failed(format!("malformed line '{line}'")))?;
            let quantity = quantity
                .trim()
                .parse()
                .map_err(|e| HandlerError::Failed(format!("bad quantity: {e}")))?;
            let order = Order {
                sku: sku.trim().to_string(),
                quantity,
            };
            Ok(Transition::to("price", Cargo::new(order)))
        })
        .state_fn("price", |cargo: Cargo| {
            let order = cargo.downcast::<Order>()?;
            let cents = u64::from(order.quantity) * 250;
            println!("  priced {} x{} at {} cents", order.sku, order.quantity, cents);
            Ok(Transition::to("done", Cargo::new(cents)))
        })
        .end_state("done")
        .build()
        .expect("start state is set")
}

fn main() {
    println!("=== Dynamic Cargo Example ===\n");

    let machine = build_machine();
    let mut observer = |step: usize, from: &str, to: &str, cargo: &Cargo| {
        println!("  step {step}: {from} -> {to} carrying {}", cargo.type_name());
    };

    println!("Well-formed input:");
    match machine.run_with(
        Cargo::new(String::from("widget: 4")),
        &RunOptions::default(),
        &mut observer,
    ) {
        Ok(report) => println!(
            "  finished in '{}' with {:?} cents\n",
            report.final_state,
            report.cargo.downcast::<u64>().ok()
        ),
        Err(e) => println!("  failed: {e}\n"),
    }

    println!("Wrong cargo type:");
    match machine.run(Cargo::new(42_i32)) {
        Ok(report) => println!("  unexpectedly finished in '{}'", report.final_state),
        Err(e) => println!("  failed: {e}"),
    }

    println!("\n=== Example Complete ===");
}
