//! # ploutos
//!
//! Rules engine for Ploutos, a two-player card-matching game played over a
//! shared common zone and one personal zone per player.
//!
//! ## Game
//!
//! Twenty cards (numbers 1-5, four copies each) are dealt face down: ten to
//! the common zone, five to each player. On their turn a player flips cards
//! from the common zone and their own zone, at most two face up per zone.
//! After three flips the turn is judged: the largest face-up group of one
//! number (two or more cards) goes to the player's gain pile. Everything
//! else turns back down. Each full round bumps every common card's number
//! by one, wrapping 5 to 1. The game ends when any zone runs out of cards.
//!
//! ## Modules
//!
//! - `core`: Players, RNG, rules configuration, errors, game state
//! - `cards`: Card model and deck factory
//! - `zones`: Slot zones and gain piles
//! - `rules`: Flip admission, turn resolution, the `Engine` facade
//! - `session`: Tokio-driven session with timed resolution and snapshot feed
//!
//! ## Example
//!
//! ```
//! use ploutos::{Engine, PlayerId, Scene};
//!
//! let mut engine = Engine::seeded(7).unwrap();
//! engine.start_new_game().unwrap();
//!
//! let snapshot = engine.snapshot();
//! assert_eq!(snapshot.scene(), Scene::Playing);
//! assert_eq!(snapshot.turn_player(), PlayerId::FIRST);
//! assert_eq!(snapshot.common().present_count(), 10);
//! ```

pub mod core;
pub mod cards;
pub mod zones;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    EngineError, GameRng, GameRngState, GameState, MatchedSet, PlayerId, PlayerMap, RulesConfig,
    Scene,
};

pub use crate::cards::{Card, CardId, Deal, Orientation};

pub use crate::zones::{CardLocation, GainPile, Zone};

pub use crate::rules::{Engine, FlipOutcome, GameResult, RejectReason, ResolutionTicket, TurnSummary};

pub use crate::session::GameSession;
