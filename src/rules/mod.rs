//! Game rules: who may flip what, when a turn is judged, and how.
//!
//! - `admission`: flip admission policy and the resolution trigger
//! - `resolver`: end-of-turn matching, scoring, refresh and game over
//! - `engine`: the `Engine` facade presentation layers drive

pub mod admission;
pub mod engine;
pub mod resolver;

pub use admission::{check_flip, legal_flips, resolution_due, RejectReason};
pub use engine::{Engine, FlipOutcome, GameResult, ResolutionTicket};
pub use resolver::{resolve_turn, TurnSummary};

pub use crate::core::state::select_winning_number;
