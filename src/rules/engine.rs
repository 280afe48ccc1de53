//! The engine: the in-process API a presentation layer drives.
//!
//! - `start_new_game` deals a fresh table and enters `Playing`
//! - `request_flip` applies the admission policy and, when the turn is ripe,
//!   hands back a `ResolutionTicket`
//! - `resolve` consumes that ticket once its delay has elapsed
//! - `snapshot` returns an independent copy of the state for rendering
//!
//! The engine never sleeps. Whoever holds the ticket decides when to call
//! `resolve` (see `session::GameSession` for the tokio-driven version).
//! At most one ticket is outstanding; starting a new game or cancelling
//! invalidates it, and a stale ticket resolves nothing.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::admission::{self, RejectReason};
use super::resolver::{self, TurnSummary};
use crate::cards::{self, CardId};
use crate::core::config::RulesConfig;
use crate::core::error::EngineError;
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;
use crate::core::state::{GameState, Scene};

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// The player with the larger gain pile.
    Winner(PlayerId),
    /// Equal gain piles.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// Handle for a deferred turn resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolutionTicket {
    id: u64,
    delay: Duration,
}

impl ResolutionTicket {
    /// How long to wait before calling `Engine::resolve`.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Answer to a flip request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipOutcome {
    /// The card was flipped. `resolution` is set when this flip closed the
    /// turn; no further flips are admitted until it is resolved.
    Accepted { resolution: Option<ResolutionTicket> },
    /// Nothing changed.
    Rejected(RejectReason),
}

impl FlipOutcome {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, FlipOutcome::Accepted { .. })
    }

    /// The resolution ticket, if this flip closed the turn.
    #[must_use]
    pub fn resolution(&self) -> Option<ResolutionTicket> {
        match self {
            FlipOutcome::Accepted { resolution } => *resolution,
            FlipOutcome::Rejected(_) => None,
        }
    }
}

/// Rules engine for one table.
#[derive(Clone, Debug)]
pub struct Engine {
    config: RulesConfig,
    rng: GameRng,
    state: GameState,
    pending: Option<ResolutionTicket>,
    next_ticket: u64,
}

impl Engine {
    /// Create an engine in `Preparing`.
    pub fn new(config: RulesConfig, rng: GameRng) -> Result<Self, EngineError> {
        config.validate()?;
        let state = GameState::new(&config);
        Ok(Self {
            config,
            rng,
            state,
            pending: None,
            next_ticket: 0,
        })
    }

    /// Classic rules dealt from a fixed seed.
    pub fn seeded(seed: u64) -> Result<Self, EngineError> {
        Self::new(RulesConfig::default(), GameRng::new(seed))
    }

    /// Continue from a previously captured state.
    pub fn resume(config: RulesConfig, rng: GameRng, state: GameState) -> Result<Self, EngineError> {
        let mut engine = Self::new(config, rng)?;
        engine.state = state;
        Ok(engine)
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Borrow the live state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Independent copy of the state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    /// The outstanding resolution ticket, if any.
    #[must_use]
    pub fn pending(&self) -> Option<ResolutionTicket> {
        self.pending
    }

    /// Shuffle, deal and enter `Playing`.
    ///
    /// Replaces the whole state; any outstanding ticket becomes stale.
    pub fn start_new_game(&mut self) -> Result<(), EngineError> {
        if self.pending.take().is_some() {
            debug!("pending resolution dropped by new game");
        }

        let deck = cards::shuffle(cards::build_deck(&self.config), &mut self.rng);
        let deal = cards::deal(deck, &self.config)?;
        let (first, second) = deal.personal.into_pair();

        let mut state = GameState::new(&self.config);
        state.set_zones(deal.common, first, second);
        state.reset_round_meta();
        state.set_turn_player(PlayerId::FIRST);
        state.set_scene(Scene::Playing)?;
        self.state = state;

        info!(seed = self.rng.seed(), "new game dealt");
        Ok(())
    }

    /// Ask to flip a card for the turn player.
    pub fn request_flip(&mut self, id: CardId) -> FlipOutcome {
        if self.pending.is_some() {
            return self.reject(id, RejectReason::ResolutionPending);
        }
        if let Err(reason) = admission::check_flip(&self.state, &self.config, id) {
            return self.reject(id, reason);
        }

        self.state.flip(id);
        debug!(
            card = id.raw(),
            player = %self.state.turn_player(),
            flips = self.state.flipped_count(),
            "flip accepted"
        );

        let resolution = admission::resolution_due(&self.state, &self.config).then(|| self.schedule());
        FlipOutcome::Accepted { resolution }
    }

    fn reject(&self, id: CardId, reason: RejectReason) -> FlipOutcome {
        debug!(card = id.raw(), %reason, "flip rejected");
        FlipOutcome::Rejected(reason)
    }

    fn schedule(&mut self) -> ResolutionTicket {
        let ticket = ResolutionTicket {
            id: self.next_ticket,
            delay: self.config.resolution_delay,
        };
        self.next_ticket += 1;
        self.pending = Some(ticket);
        ticket
    }

    /// Resolve the turn the ticket was issued for.
    ///
    /// A ticket that is no longer the outstanding one (a new game was
    /// started, it was cancelled, or it already fired) is ignored.
    pub fn resolve(&mut self, ticket: ResolutionTicket) -> Option<TurnSummary> {
        if self.pending != Some(ticket) {
            debug!(ticket = ticket.id, "stale resolution ticket ignored");
            return None;
        }
        self.pending = None;
        resolver::resolve_turn(&mut self.state)
    }

    /// Resolve the outstanding ticket immediately, ignoring its delay.
    pub fn resolve_pending(&mut self) -> Option<TurnSummary> {
        let ticket = self.pending?;
        self.resolve(ticket)
    }

    /// Drop the outstanding ticket without resolving.
    ///
    /// The flipped cards stay face up and the turn stays open.
    pub fn cancel_pending(&mut self) -> Option<ResolutionTicket> {
        self.pending.take()
    }

    /// Cards the turn player may flip right now.
    #[must_use]
    pub fn legal_flips(&self) -> Vec<CardId> {
        if self.pending.is_some() {
            return Vec::new();
        }
        admission::legal_flips(&self.state, &self.config)
    }

    /// Final standings once the game has finished.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        if self.state.scene() != Scene::Finished {
            return None;
        }
        let first = self.state.score(PlayerId::FIRST);
        let second = self.state.score(PlayerId::SECOND);
        Some(match first.cmp(&second) {
            std::cmp::Ordering::Greater => GameResult::Winner(PlayerId::FIRST),
            std::cmp::Ordering::Less => GameResult::Winner(PlayerId::SECOND),
            std::cmp::Ordering::Equal => GameResult::Draw,
        })
    }
}
