//! Order entity model
//!
//! An order owns an ordered sequence of needs, each one lot of outstanding
//! quantity with its own arrival sequence number. The order's total
//! outstanding quantity is always the sum of its needs; an order whose
//! need list is empty is eligible for removal from the book.

use crate::fill::Fill;
use crate::ids::OrderId;
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

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

    /// Resting-side crossing test: does an order on this side, with the
    /// given limit, want to fill at the offered price?
    ///
    /// A resting buy pays no more than its limit; a resting sell accepts
    /// no less than its limit. The test is always evaluated from the
    /// resting side, regardless of which side is the aggressor.
    pub fn wants_to_fill(&self, limit: Price, offered: Price) -> bool {
        match self {
            Side::Buy => limit >= offered,
            Side::Sell => limit <= offered,
        }
    }
}

/// One lot of an order's outstanding quantity
///
/// Carries its own arrival sequence number, which orders lots of the same
/// order among themselves in price-time priority. Needs are owned by their
/// order; the book addresses a need as `(order_id, arrival)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Need {
    /// Engine-wide monotonic arrival sequence assigned at creation
    pub arrival: u64,
    /// Remaining quantity, decremented by fills and modify-down
    pub quantity: Quantity,
}

impl Need {
    pub fn new(arrival: u64, quantity: Quantity) -> Self {
        Self { arrival, quantity }
    }
}

/// A resting or incoming limit order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub side: Side,
    pub price: Price,
    /// Outstanding lots, in creation order
    pub needs: Vec<Need>,
    /// Fills this order participated in as the resting side
    pub fills: Vec<Fill>,
}

impl Order {
    /// Create a new order with exactly one initial need
    ///
    /// The need's arrival is the sequence number assigned to the New
    /// command that created the order.
    pub fn new(order_id: OrderId, side: Side, quantity: Quantity, price: Price, arrival: u64) -> Self {
        Self {
            order_id,
            side,
            price,
            needs: vec![Need::new(arrival, quantity)],
            fills: Vec::new(),
        }
    }

    /// Total outstanding quantity: the sum of all needs
    pub fn total_quantity(&self) -> Quantity {
        self.needs
            .iter()
            .fold(Quantity::zero(), |acc, n| acc + n.quantity)
    }

    /// Whether any outstanding quantity remains
    pub fn is_open(&self) -> bool {
        !self.needs.is_empty()
    }

    /// Append a fresh lot at the back of price-time priority
    pub fn add_need(&mut self, arrival: u64, quantity: Quantity) {
        self.needs.push(Need::new(arrival, quantity));
    }

    /// Look up a need by its arrival sequence
    ///
    /// Arrivals are unique engine-wide, so at most one need matches.
    pub fn need_by_arrival_mut(&mut self, arrival: u64) -> Option<&mut Need> {
        self.needs.iter_mut().find(|n| n.arrival == arrival)
    }

    /// Drop needs whose quantity reached zero
    pub fn strip_zero_needs(&mut self) {
        self.needs.retain(|n| !n.quantity.is_zero());
    }

    /// Set the order's total outstanding quantity
    ///
    /// Shrinking decrements needs newest-arrival-first, never driving a
    /// need below zero; growing appends one new need carrying the
    /// command's own arrival, so incremental quantity queues behind
    /// everything already resting. Equal quantity is a no-op. Afterwards
    /// `total_quantity() == new_total` exactly.
    pub fn resize(&mut self, new_total: Quantity, arrival: u64) {
        let current = self.total_quantity();
        if new_total < current {
            self.decrement_needs_backward(current - new_total);
        } else if new_total > current {
            self.add_need(arrival, new_total - current);
        }
        self.strip_zero_needs();
    }

    /// Reduce outstanding quantity by `reduction`, newest lot first
    ///
    /// The LIFO direction mirrors modify-up queueing new quantity last:
    /// the most recently added quantity is the first taken away.
    fn decrement_needs_backward(&mut self, mut reduction: Quantity) {
        let mut indices: Vec<usize> = (0..self.needs.len()).collect();
        indices.sort_by_key(|&i| Reverse(self.needs[i].arrival));

        for i in indices {
            if reduction.is_zero() {
                break;
            }
            let take = self.needs[i].quantity.min(reduction);
            self.needs[i].quantity = self.needs[i].quantity - take;
            reduction = reduction - take;
        }
    }
}
