//! Matching Engine Service
//!
//! Continuous double-auction matching core for a single instrument. The
//! engine consumes a stream of typed commands (new order, cancel,
//! modify-quantity), maintains the two sides of the resting book, and
//! emits fills whenever an incoming order crosses the opposite side.
//!
//! **Key Invariants:**
//! - Quantity conservation: every fill decrements both participating
//!   orders by exactly its quantity
//! - Price-of-fill: a fill always executes at the resting order's limit
//! - The book is never left crossed after a New command completes
//! - Deterministic processing (same command sequence → same fills)

pub mod book;
pub mod command;
pub mod engine;
pub mod matching;

pub use command::Command;
pub use engine::{Engine, SubmitResult};
