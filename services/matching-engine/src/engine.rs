//! Matching engine core
//!
//! Owns the book, the append-only fill log, and the monotonic arrival
//! counter. The sole entry point for the external command source:
//! strictly single-threaded, one command at a time, each command's
//! effects complete fully before the next is considered.

use tracing::debug;
use types::prelude::*;

use crate::book::Book;
use crate::command::Command;
use crate::matching::sweep;

/// Single-instrument matching engine
#[derive(Debug, Default)]
pub struct Engine {
    book: Book,
    /// Append-only fill log for the lifetime of the engine
    fills: Vec<Fill>,
    /// Arrival sequence; every command consumes one number
    arrival: u64,
}

/// Result of submitting a command
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitResult {
    /// New order processed; carries the order as inserted, with any
    /// matched quantity already deducted
    Accepted { order: Order },
    /// Cancel processed (a no-op when the id was unknown)
    Canceled,
    /// Modify processed; carries the order's post-modify state
    Modified { order: Order },
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit one typed command
    ///
    /// Runs to completion before returning; on error (unknown Modify
    /// target) the book is left exactly as it was, prior fills intact.
    pub fn submit(&mut self, command: Command) -> Result<SubmitResult, EngineError> {
        let arrival = self.next_arrival();
        match command {
            Command::New {
                order_id,
                side,
                quantity,
                price,
            } => {
                let mut order = Order::new(order_id, side, quantity, price, arrival);
                let fills = sweep(&mut self.book, &mut order);
                self.fills.extend(fills);

                // Fully filled orders are inserted too; compaction prunes
                // them right away.
                self.book.insert(order.clone());
                self.book.compact();
                Ok(SubmitResult::Accepted { order })
            }
            Command::Cancel { order_id } => {
                if self.book.remove(&order_id).is_some() {
                    debug!(%order_id, "canceled");
                }
                self.book.compact();
                Ok(SubmitResult::Canceled)
            }
            Command::Modify {
                order_id,
                new_quantity,
            } => {
                let order = self
                    .book
                    .find_mut(&order_id)
                    .ok_or_else(|| EngineError::unknown_order(order_id.as_str()))?;
                order.resize(new_quantity, arrival);
                let snapshot = order.clone();
                self.book.compact();
                debug!(%order_id, %new_quantity, "modified");
                Ok(SubmitResult::Modified { order: snapshot })
            }
        }
    }

    /// Parse and submit one raw command line
    pub fn submit_line(&mut self, raw: &str) -> Result<SubmitResult, EngineError> {
        self.submit(raw.parse()?)
    }

    /// All fills executed so far, in execution order
    pub fn fills(&self) -> &[Fill] {
        &self.fills
    }

    /// Resting orders on one side, ascending by limit price
    pub fn orders_on(&self, side: Side) -> Vec<&Order> {
        self.book.orders_on(side)
    }

    /// Resting buy orders, ascending by limit price
    pub fn buys(&self) -> Vec<&Order> {
        self.orders_on(Side::Buy)
    }

    /// Resting sell orders, ascending by limit price
    pub fn sells(&self) -> Vec<&Order> {
        self.orders_on(Side::Sell)
    }

    fn next_arrival(&mut self) -> u64 {
        self.arrival += 1;
        self.arrival
    }
}
