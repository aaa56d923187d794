//! Typed order commands and their text encoding
//!
//! The engine core accepts already-typed commands; the comma-separated
//! text form (`id,BUY,10,99.0`, `id,CANCEL`, `id,MODIFY,7`) is a boundary
//! concern handled here via `FromStr`. Malformed lines are rejected with
//! `InvalidCommand` before they reach the core.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use types::prelude::*;

/// A single order command
///
/// Closed set: no further command kinds are anticipated, and exhaustive
/// matching catches missing-case regressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum Command {
    /// Submit a new limit order
    New {
        order_id: OrderId,
        side: Side,
        quantity: Quantity,
        price: Price,
    },
    /// Remove a resting order outright, whatever its remaining quantity
    Cancel { order_id: OrderId },
    /// Set a resting order's total outstanding quantity
    Modify {
        order_id: OrderId,
        new_quantity: Quantity,
    },
}

fn parse_side(s: &str) -> Result<Side, EngineError> {
    match s {
        "BUY" => Ok(Side::Buy),
        "SELL" => Ok(Side::Sell),
        other => Err(EngineError::invalid_command(format!(
            "unknown side: {other}"
        ))),
    }
}

fn parse_quantity(s: &str) -> Result<Quantity, EngineError> {
    s.parse()
        .map_err(|_| EngineError::invalid_command(format!("bad quantity: {s}")))
}

fn parse_price(s: &str) -> Result<Price, EngineError> {
    s.parse()
        .map_err(|_| EngineError::invalid_command(format!("bad price: {s}")))
}

impl FromStr for Command {
    type Err = EngineError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = raw.trim().split(',').collect();
        match fields.as_slice() {
            [order_id, "CANCEL"] => Ok(Command::Cancel {
                order_id: OrderId::new(*order_id),
            }),
            [order_id, "MODIFY", quantity] => Ok(Command::Modify {
                order_id: OrderId::new(*order_id),
                new_quantity: parse_quantity(quantity)?,
            }),
            [order_id, side, quantity, price] => Ok(Command::New {
                order_id: OrderId::new(*order_id),
                side: parse_side(side)?,
                quantity: parse_quantity(quantity)?,
                price: parse_price(price)?,
            }),
            _ => Err(EngineError::invalid_command(format!(
                "unrecognized shape: {raw:?}"
            ))),
        }
    }
}
