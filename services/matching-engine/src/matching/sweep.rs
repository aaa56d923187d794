//! The matching sweep
//!
//! Given an incoming aggressor, every need of every resting order on the
//! opposite side is flattened into one sequence and sorted ascending by
//! `(resting price, need arrival)`. One left-to-right pass executes fills
//! wherever the resting side's crossing test accepts the aggressor's
//! price and both sides still have quantity. The pass never re-sorts or
//! restarts: scanning already exhausts every currently eligible counter,
//! and the aggressor's remaining quantity gates how many fills occur.
//!
//! Note the ordering is ascending for both aggressor sides. For a buy
//! aggressor that is best-price-first (cheapest ask tried first); for a
//! sell aggressor it tries the lowest-priced bid first, which is the
//! reverse of best-bid-first. Preserved as-is.

use tracing::debug;
use types::prelude::*;

use crate::book::Book;

/// Handle to one resting need: the order's key plus the need's arrival,
/// with the resting price denormalized for sorting.
struct CounterNeed {
    price: Price,
    arrival: u64,
    order_id: OrderId,
}

/// Match an incoming order against the opposite side of the book.
///
/// Precondition: the aggressor is matched while singly-lotted. Only its
/// first need is engaged, which is complete because every New order
/// starts with exactly one need and is matched before it can be
/// modified. Re-matching an order that has accumulated further lots
/// would need an explicit design decision first.
///
/// Mutates matched resting needs in place (pruning zeroed ones and
/// recording the fill on the resting order) and decrements the
/// aggressor's first need. Returns the executed fills in order.
pub fn sweep(book: &mut Book, aggressor: &mut Order) -> Vec<Fill> {
    let Some(first) = aggressor.needs.first() else {
        return Vec::new();
    };
    let mut remaining = first.quantity;

    let mut fills = Vec::new();
    for counter in counter_needs(book, aggressor.side) {
        let side = book.side_mut(aggressor.side.opposite());
        let Some(resting) = side.get_mut(&counter.order_id) else {
            continue;
        };
        if !resting.side.wants_to_fill(resting.price, aggressor.price) {
            continue;
        }
        let Some(need) = resting.need_by_arrival_mut(counter.arrival) else {
            continue;
        };

        let quantity = need.quantity.min(remaining);
        if quantity.is_zero() {
            continue;
        }

        need.quantity = need.quantity - quantity;
        remaining = remaining - quantity;
        resting.strip_zero_needs();

        let fill = Fill::new(
            resting.order_id.clone(),
            aggressor.order_id.clone(),
            aggressor.side,
            quantity,
            resting.price,
        );
        debug!(%fill, "executed");
        resting.fills.push(fill.clone());
        fills.push(fill);
    }

    if let Some(first) = aggressor.needs.first_mut() {
        first.quantity = remaining;
    }
    aggressor.strip_zero_needs();
    fills
}

/// Flatten the opposite side's needs and sort them into match priority:
/// ascending resting price, then ascending arrival.
fn counter_needs(book: &Book, aggressor_side: Side) -> Vec<CounterNeed> {
    let mut counters: Vec<CounterNeed> = book
        .side(aggressor_side.opposite())
        .orders()
        .flat_map(|order| {
            order.needs.iter().map(|need| CounterNeed {
                price: order.price,
                arrival: need.arrival,
                order_id: order.order_id.clone(),
            })
        })
        .collect();
    counters.sort_by(|a, b| a.price.cmp(&b.price).then(a.arrival.cmp(&b.arrival)));
    counters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: &str, side: Side, quantity: u64, price: &str, arrival: u64) -> Order {
        Order::new(
            OrderId::new(id),
            side,
            Quantity::new(quantity),
            price.parse().unwrap(),
            arrival,
        )
    }

    #[test]
    fn test_sweep_empty_book_no_fills() {
        let mut book = Book::new();
        let mut aggressor = order("a", Side::Buy, 10, "99.0", 1);

        assert!(sweep(&mut book, &mut aggressor).is_empty());
        assert_eq!(aggressor.total_quantity(), Quantity::new(10));
    }

    #[test]
    fn test_sweep_fills_at_resting_price() {
        let mut book = Book::new();
        book.insert(order("s", Side::Sell, 10, "99.0", 1));
        let mut aggressor = order("b", Side::Buy, 10, "99.5", 2);

        let fills = sweep(&mut book, &mut aggressor);

        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0].price, "99.0".parse().unwrap());
        assert_eq!(fills[0].quantity, Quantity::new(10));
        assert!(!aggressor.is_open());
    }

    #[test]
    fn test_sweep_respects_resting_crossing_test() {
        let mut book = Book::new();
        book.insert(order("s", Side::Sell, 10, "100.0", 1));
        let mut aggressor = order("b", Side::Buy, 10, "99.5", 2);

        assert!(sweep(&mut book, &mut aggressor).is_empty());
        assert_eq!(aggressor.total_quantity(), Quantity::new(10));
    }

    #[test]
    fn test_sweep_price_then_arrival_priority() {
        let mut book = Book::new();
        book.insert(order("late_cheap", Side::Sell, 5, "99.0", 3));
        book.insert(order("early_cheap", Side::Sell, 5, "99.0", 1));
        book.insert(order("pricier", Side::Sell, 5, "99.5", 2));
        let mut aggressor = order("b", Side::Buy, 12, "100.0", 4);

        let fills = sweep(&mut book, &mut aggressor);

        let sellers: Vec<&str> = fills.iter().map(|f| f.resting_order_id.as_str()).collect();
        assert_eq!(sellers, vec!["early_cheap", "late_cheap", "pricier"]);
        let quantities: Vec<u64> = fills.iter().map(|f| f.quantity.as_u64()).collect();
        assert_eq!(quantities, vec![5, 5, 2]);
    }

    #[test]
    fn test_sweep_partial_fill_leaves_resting_remainder() {
        let mut book = Book::new();
        book.insert(order("s", Side::Sell, 10, "99.0", 1));
        let mut aggressor = order("b", Side::Buy, 4, "99.0", 2);

        let fills = sweep(&mut book, &mut aggressor);

        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0].quantity, Quantity::new(4));
        let resting = book.side(Side::Sell).get(&OrderId::new("s")).unwrap();
        assert_eq!(resting.total_quantity(), Quantity::new(6));
        assert!(!aggressor.is_open());
    }

    #[test]
    fn test_sweep_records_fill_on_resting_order() {
        let mut book = Book::new();
        book.insert(order("s", Side::Sell, 10, "99.0", 1));
        let mut aggressor = order("b", Side::Buy, 4, "99.0", 2);

        sweep(&mut book, &mut aggressor);

        let resting = book.side(Side::Sell).get(&OrderId::new("s")).unwrap();
        assert_eq!(resting.fills.len(), 1);
        assert_eq!(resting.fills[0].quantity, Quantity::new(4));
    }

    #[test]
    fn test_sell_aggressor_sweeps_lowest_bid_first() {
        // Ascending price order is kept for both aggressor sides, so a
        // sell aggressor tries the lowest-priced resting bid first.
        let mut book = Book::new();
        book.insert(order("low_bid", Side::Buy, 5, "99.5", 1));
        book.insert(order("high_bid", Side::Buy, 5, "100.0", 2));
        let mut aggressor = order("s", Side::Sell, 5, "99.0", 3);

        let fills = sweep(&mut book, &mut aggressor);

        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0].resting_order_id.as_str(), "low_bid");
        assert_eq!(fills[0].price, "99.5".parse().unwrap());
    }

    #[test]
    fn test_sweep_spans_multiple_lots_of_one_order() {
        let mut book = Book::new();
        let mut resting = order("r", Side::Sell, 3, "99.0", 1);
        resting.add_need(2, Quantity::new(4));
        book.insert(resting);
        let mut aggressor = order("b", Side::Buy, 7, "99.0", 3);

        let fills = sweep(&mut book, &mut aggressor);

        let quantities: Vec<u64> = fills.iter().map(|f| f.quantity.as_u64()).collect();
        assert_eq!(quantities, vec![3, 4]);
        assert!(!book.side(Side::Sell).get(&OrderId::new("r")).unwrap().is_open());
    }
}
