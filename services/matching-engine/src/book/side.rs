//! One side of the book: identifier-keyed resting orders
//!
//! Uses BTreeMap for deterministic iteration order.

use std::collections::BTreeMap;
use types::prelude::*;

/// Orders resting on a single side, keyed by identifier
#[derive(Debug, Clone, Default)]
pub struct BookSide {
    orders: BTreeMap<OrderId, Order>,
}

impl BookSide {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, order: Order) {
        self.orders.insert(order.order_id.clone(), order);
    }

    pub fn remove(&mut self, order_id: &OrderId) -> Option<Order> {
        self.orders.remove(order_id)
    }

    pub fn contains(&self, order_id: &OrderId) -> bool {
        self.orders.contains_key(order_id)
    }

    pub fn get(&self, order_id: &OrderId) -> Option<&Order> {
        self.orders.get(order_id)
    }

    pub fn get_mut(&mut self, order_id: &OrderId) -> Option<&mut Order> {
        self.orders.get_mut(order_id)
    }

    /// All resting orders, in identifier order
    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }

    /// Resting orders sorted ascending by limit price
    ///
    /// Tie order among equal prices is unspecified; display relies only
    /// on the price ordering.
    pub fn by_price(&self) -> Vec<&Order> {
        let mut orders: Vec<&Order> = self.orders.values().collect();
        orders.sort_by(|a, b| a.price.cmp(&b.price));
        orders
    }

    /// Drop orders with no remaining needs
    pub fn compact(&mut self) {
        self.orders.retain(|_, order| order.is_open());
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
