//! Error taxonomy for the matching venue
//!
//! The matching core itself has exactly one fallible condition: a Modify
//! naming an identifier that is not resting on either side. Malformed
//! command text is rejected by the parsing boundary and never reaches the
//! core. Cancel of an unknown identifier is a successful no-op, not an
//! error; that asymmetry with Modify is deliberate.

use thiserror::Error;

/// Top-level engine error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("unknown order: {order_id}")]
    UnknownOrder { order_id: String },

    #[error("invalid command: {reason}")]
    InvalidCommand { reason: String },
}

impl EngineError {
    pub fn unknown_order(order_id: impl Into<String>) -> Self {
        Self::UnknownOrder {
            order_id: order_id.into(),
        }
    }

    pub fn invalid_command(reason: impl Into<String>) -> Self {
        Self::InvalidCommand {
            reason: reason.into(),
        }
    }
}
