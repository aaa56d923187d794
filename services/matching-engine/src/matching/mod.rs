//! Matching algorithm
//!
//! Single-pass price-time sweep of the opposite side's needs. See
//! `sweep` for the contract and its named preconditions.

mod sweep;

pub use sweep::sweep;
