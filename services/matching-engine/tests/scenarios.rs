//! End-to-end command sequences and book invariants

use matching_engine::{Engine, SubmitResult};
use proptest::prelude::*;
use types::prelude::*;

fn feed(engine: &mut Engine, lines: &[&str]) {
    for line in lines {
        engine.submit_line(line).unwrap();
    }
}

fn total_resting(engine: &Engine) -> u64 {
    engine
        .buys()
        .iter()
        .chain(engine.sells().iter())
        .map(|o| o.total_quantity().as_u64())
        .sum()
}

/// The book is non-crossed when every resting bid is strictly below every
/// resting ask.
fn book_is_crossed(engine: &Engine) -> bool {
    let best_bid = engine.buys().iter().map(|o| o.price).max();
    let best_ask = engine.sells().iter().map(|o| o.price).min();
    matches!((best_bid, best_ask), (Some(bid), Some(ask)) if bid >= ask)
}

#[test]
fn acceptance_sequence() {
    let mut engine = Engine::new();
    feed(
        &mut engine,
        &[
            "1,BUY,10,99.0",
            "2,BUY,25,99.25",
            "3,SELL,5,99.50",
            "4,SELL,20,99.75",
            "5,SELL,10,100.0",
            "6,SELL,10,99.5",
            "7,BUY,10,99.50",
            "8,BUY,30,99.75",
        ],
    );

    let summaries: Vec<String> = engine.fills().iter().map(|f| f.to_string()).collect();
    assert_eq!(
        summaries,
        vec![
            "F<7 bought 3 5@99.50>",
            "F<7 bought 6 5@99.5>",
            "F<8 bought 6 5@99.5>",
            "F<8 bought 4 20@99.75>",
        ]
    );

    let buys: Vec<(String, u64)> = engine
        .buys()
        .iter()
        .map(|o| (o.order_id.to_string(), o.total_quantity().as_u64()))
        .collect();
    assert_eq!(
        buys,
        vec![
            ("1".to_string(), 10),
            ("2".to_string(), 25),
            ("8".to_string(), 5),
        ]
    );

    let sells: Vec<(String, u64)> = engine
        .sells()
        .iter()
        .map(|o| (o.order_id.to_string(), o.total_quantity().as_u64()))
        .collect();
    assert_eq!(sells, vec![("5".to_string(), 10)]);

    // Order 8's resting remainder is its submission net of its fills.
    let filled_for_8: u64 = engine
        .fills()
        .iter()
        .filter(|f| f.incoming_order_id == OrderId::new("8"))
        .map(|f| f.quantity.as_u64())
        .sum();
    assert_eq!(filled_for_8, 25);

    assert!(!book_is_crossed(&engine));
}

#[test]
fn fill_price_is_always_the_resting_limit() {
    let mut engine = Engine::new();
    feed(
        &mut engine,
        &["1,BUY,10,99.0", "2,BUY,10,100.0", "3,SELL,10,99.5"],
    );

    assert_eq!(engine.fills().len(), 1);
    // The aggressor asked 99.5 but receives the resting bid's 100.0.
    assert_eq!(engine.fills()[0].price, "100.0".parse::<Price>().unwrap());
}

#[test]
fn resting_orders_accumulate_their_fill_history() {
    let mut engine = Engine::new();
    feed(
        &mut engine,
        &["1,BUY,10,99.5", "2,SELL,7,99.5", "3,SELL,3,99.5"],
    );

    // Order 1 rested through both counter-fills before emptying out.
    assert_eq!(engine.fills().len(), 2);
    assert!(engine
        .fills()
        .iter()
        .all(|f| f.resting_order_id == OrderId::new("1")));
}

#[test]
fn cancel_then_modify_same_id_reports_unknown() {
    let mut engine = Engine::new();
    feed(&mut engine, &["1,SELL,5,10.0", "1,CANCEL"]);

    let err = engine.submit_line("1,MODIFY,3").unwrap_err();
    assert_eq!(err, EngineError::unknown_order("1"));
}

#[test]
fn modify_result_reports_post_modify_state() {
    let mut engine = Engine::new();
    feed(&mut engine, &["1,SELL,5,10.0"]);

    match engine.submit_line("1,MODIFY,8").unwrap() {
        SubmitResult::Modified { order } => {
            assert_eq!(order.total_quantity(), Quantity::new(8));
            assert_eq!(order.needs.len(), 2);
        }
        other => panic!("expected Modified, got {other:?}"),
    }
}

proptest! {
    /// Randomized New-order streams: the book is never left crossed, and
    /// every unit of submitted quantity is either still resting or was
    /// consumed by exactly one fill on each side.
    #[test]
    fn prop_new_streams_conserve_quantity_and_never_cross(
        orders in proptest::collection::vec(
            (prop_oneof![Just("BUY"), Just("SELL")], 1u64..50, 0usize..5),
            1..40,
        )
    ) {
        let prices = ["99.0", "99.25", "99.5", "99.75", "100.0"];
        let mut engine = Engine::new();
        let mut submitted = 0u64;

        for (i, (side, quantity, price_idx)) in orders.iter().enumerate() {
            let line = format!("{},{},{},{}", i + 1, side, quantity, prices[*price_idx]);
            engine.submit_line(&line).unwrap();
            submitted += quantity;

            prop_assert!(!book_is_crossed(&engine));
        }

        let filled: u64 = engine.fills().iter().map(|f| f.quantity.as_u64()).sum();
        prop_assert_eq!(total_resting(&engine) + 2 * filled, submitted);
    }

    /// Interleaved cancels and modifies keep every order's outstanding
    /// quantity equal to the sum of its needs, with no zero-quantity lots
    /// left behind.
    #[test]
    fn prop_commands_leave_no_zero_lots(
        steps in proptest::collection::vec((0u8..4, 1u64..30), 1..60)
    ) {
        let mut engine = Engine::new();
        let mut next_id = 0usize;

        for (kind, quantity) in steps {
            match kind {
                0 => {
                    next_id += 1;
                    let line = format!("{next_id},BUY,{quantity},99.5");
                    engine.submit_line(&line).unwrap();
                }
                1 => {
                    next_id += 1;
                    let line = format!("{next_id},SELL,{quantity},99.5");
                    engine.submit_line(&line).unwrap();
                }
                2 if next_id > 0 => {
                    let target = quantity as usize % next_id + 1;
                    engine.submit_line(&format!("{target},CANCEL")).unwrap();
                }
                3 if next_id > 0 => {
                    let target = quantity as usize % next_id + 1;
                    // Unknown targets are a legitimate rejection here.
                    let _ = engine.submit_line(&format!("{target},MODIFY,{quantity}"));
                }
                _ => {}
            }

            for order in engine.buys().iter().chain(engine.sells().iter()) {
                prop_assert!(order.is_open());
                prop_assert!(order.needs.iter().all(|n| !n.quantity.is_zero()));
            }
        }
    }
}
