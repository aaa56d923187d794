//! Types library for the matching venue
//!
//! This library provides the core type definitions shared across the
//! workspace: identifiers, numeric newtypes, the order/need entity model,
//! fill records, and the error taxonomy.
//!
//! # Modules
//! - `ids`: Unique identifiers (OrderId, FillId)
//! - `numeric`: Price and quantity newtypes
//! - `order`: Order, Need, and Side
//! - `fill`: Executed trade records
//! - `errors`: Error taxonomy

// Public modules
pub mod errors;
pub mod fill;
pub mod ids;
pub mod numeric;
pub mod order;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::errors::*;
    pub use crate::fill::*;
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::order::*;
}
