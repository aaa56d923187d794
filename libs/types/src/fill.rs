//! Executed trade records
//!
//! A fill is an immutable record of one match between a resting order and
//! the incoming aggressor. The execution price is always the resting
//! order's limit price; the aggressor receives the resting side's price,
//! never its own.

use crate::ids::{FillId, OrderId};
use crate::numeric::{Price, Quantity};
use crate::order::Side;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Record of an executed trade
///
/// References orders by identifier without owning them; orders
/// independently accumulate their own fill history for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub fill_id: FillId,
    /// The book-side order that was matched against
    pub resting_order_id: OrderId,
    /// The aggressor being processed when the fill executed
    pub incoming_order_id: OrderId,
    /// Side of the aggressor
    pub incoming_side: Side,
    /// Matched amount, always positive
    pub quantity: Quantity,
    /// The resting order's limit price
    pub price: Price,
}

impl Fill {
    pub fn new(
        resting_order_id: OrderId,
        incoming_order_id: OrderId,
        incoming_side: Side,
        quantity: Quantity,
        price: Price,
    ) -> Self {
        Self {
            fill_id: FillId::new(),
            resting_order_id,
            incoming_order_id,
            incoming_side,
            quantity,
            price,
        }
    }

    /// The buying order's identifier
    pub fn buyer(&self) -> &OrderId {
        match self.incoming_side {
            Side::Buy => &self.incoming_order_id,
            Side::Sell => &self.resting_order_id,
        }
    }

    /// The selling order's identifier
    pub fn seller(&self) -> &OrderId {
        match self.incoming_side {
            Side::Buy => &self.resting_order_id,
            Side::Sell => &self.incoming_order_id,
        }
    }
}

impl fmt::Display for Fill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "F<{} bought {} {}@{}>",
            self.buyer(),
            self.seller(),
            self.quantity,
            self.price
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(incoming_side: Side) -> Fill {
        Fill::new(
            OrderId::new("rest"),
            OrderId::new("aggr"),
            incoming_side,
            Quantity::new(5),
            "99.5".parse().unwrap(),
        )
    }

    #[test]
    fn test_buyer_seller_for_incoming_buy() {
        let f = fill(Side::Buy);
        assert_eq!(f.buyer().as_str(), "aggr");
        assert_eq!(f.seller().as_str(), "rest");
    }

    #[test]
    fn test_buyer_seller_for_incoming_sell() {
        let f = fill(Side::Sell);
        assert_eq!(f.buyer().as_str(), "rest");
        assert_eq!(f.seller().as_str(), "aggr");
    }

    #[test]
    fn test_fill_display() {
        let f = fill(Side::Buy);
        assert_eq!(f.to_string(), "F<aggr bought rest 5@99.5>");
    }

    #[test]
    fn test_fill_serialization() {
        let f = fill(Side::Sell);
        let json = serde_json::to_string(&f).unwrap();
        let deserialized: Fill = serde_json::from_str(&json).unwrap();
        assert_eq!(f, deserialized);
    }
}
