//! Engine errors.
//!
//! Only caller bugs and bad configuration are errors. Flip requests that
//! break the table rules are answered with `RejectReason`, and stale
//! operations from the resolution delay window are absorbed as no-ops.

use thiserror::Error;

use super::state::Scene;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("deck has {actual} cards, deal expects {expected}")]
    DeckSizeMismatch { expected: usize, actual: usize },

    #[error("unknown player seat {0}")]
    UnknownPlayer(u8),

    #[error("invalid rules configuration: {0}")]
    InvalidConfig(String),

    #[error("scene cannot move from {from:?} to {to:?}")]
    SceneRegression { from: Scene, to: Scene },
}
