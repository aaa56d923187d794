//! Replay harness: drive the engine from a text command feed
//!
//! Reads one comma-separated command per line (`id,BUY,10,99.0`,
//! `id,CANCEL`, `id,MODIFY,7`), submits each in order, then prints the
//! fill log and the final book.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use clap::Parser;
use matching_engine::Engine;
use types::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "replay", about = "Replay a command feed through the matching engine")]
struct Args {
    /// Command feed file; reads stdin when omitted
    input: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut engine = Engine::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if let Err(err) = engine.submit_line(&line) {
            // A failed command aborts only itself; keep replaying.
            tracing::error!(lineno = lineno + 1, %err, "command rejected");
        }
    }

    println!("fills:");
    for fill in engine.fills() {
        println!("  {fill}");
    }
    print_side(&engine, "buys", Side::Buy);
    print_side(&engine, "sells", Side::Sell);

    Ok(())
}

fn print_side(engine: &Engine, label: &str, side: Side) {
    println!("{label}:");
    for order in engine.orders_on(side) {
        println!(
            "  {} {}@{}",
            order.order_id,
            order.total_quantity(),
            order.price
        );
    }
}
