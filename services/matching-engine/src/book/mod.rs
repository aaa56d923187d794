//! Order book
//!
//! Two independent keyed collections of resting orders, one per side.
//! Priority is not encoded in the storage: the matching sweep computes
//! price-time ordering over flattened needs at match time, and display
//! enumeration sorts by price on demand.

mod side;

pub use side::BookSide;

use types::prelude::*;

/// The resting book for one instrument
#[derive(Debug, Clone, Default)]
pub struct Book {
    bids: BookSide,
    asks: BookSide,
}

impl Book {
    pub fn new() -> Self {
        Self::default()
    }

    /// The collection holding orders of the given side
    pub fn side(&self, side: Side) -> &BookSide {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut BookSide {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    /// Insert an order into its side, overwriting any entry with the same
    /// identifier. Callers must not reuse an identifier for two live
    /// orders on the same side.
    pub fn insert(&mut self, order: Order) {
        self.side_mut(order.side).insert(order);
    }

    /// Remove the identifier from whichever side holds it
    ///
    /// A no-op when absent: cancel of an unknown id is silently ignored.
    pub fn remove(&mut self, order_id: &OrderId) -> Option<Order> {
        self.bids
            .remove(order_id)
            .or_else(|| self.asks.remove(order_id))
    }

    /// Find an order on either side, mutably (used by Modify)
    pub fn find_mut(&mut self, order_id: &OrderId) -> Option<&mut Order> {
        if self.bids.contains(order_id) {
            self.bids.get_mut(order_id)
        } else {
            self.asks.get_mut(order_id)
        }
    }

    /// Drop every order whose need list is empty
    ///
    /// Invoked after any command that may have zeroed quantities.
    pub fn compact(&mut self) {
        self.bids.compact();
        self.asks.compact();
    }

    /// Orders on one side, ascending by limit price (ties arbitrary)
    pub fn orders_on(&self, side: Side) -> Vec<&Order> {
        self.side(side).by_price()
    }

    /// Total number of resting orders across both sides
    pub fn len(&self) -> usize {
        self.bids.len() + self.asks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}
