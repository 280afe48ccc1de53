//! Core engine types: players, RNG, configuration, errors, state.
//!
//! Everything the rules need to describe one game lives here; the `rules`
//! module only decides which of these transitions to apply and when.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;
pub mod state;

pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::{GameRng, GameRngState};
pub use config::RulesConfig;
pub use error::EngineError;
pub use state::{select_winning_number, GameState, MatchedSet, Scene};
