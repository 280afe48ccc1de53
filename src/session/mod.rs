//! Tokio-driven game session.
//!
//! `GameSession` wraps an `Engine` for an interactive front end:
//!
//! - a flip that closes a turn spawns one timer task that waits out the
//!   ticket's delay and then resolves it
//! - starting a new game aborts that task; the engine also refuses the
//!   stale ticket, should the task already be past its sleep
//! - every state change is published on a `watch` channel
//!
//! ```
//! use ploutos::{Engine, GameSession, Scene};
//!
//! # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
//! let session = GameSession::new(Engine::seeded(1).unwrap());
//! let mut feed = session.subscribe();
//!
//! session.start_new_game().await.unwrap();
//! feed.changed().await.unwrap();
//! assert_eq!(feed.borrow().scene(), Scene::Playing);
//! # });
//! ```

use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::cards::CardId;
use crate::core::error::EngineError;
use crate::core::state::GameState;
use crate::rules::{Engine, FlipOutcome, GameResult, ResolutionTicket};

struct Shared {
    engine: Mutex<Engine>,
    timer: Mutex<Option<JoinHandle<()>>>,
    snapshots: watch::Sender<GameState>,
}

/// Shared handle to one table. Cheap to clone.
#[derive(Clone)]
pub struct GameSession {
    shared: Arc<Shared>,
}

impl GameSession {
    #[must_use]
    pub fn new(engine: Engine) -> Self {
        let (snapshots, _) = watch::channel(engine.snapshot());
        Self {
            shared: Arc::new(Shared {
                engine: Mutex::new(engine),
                timer: Mutex::new(None),
                snapshots,
            }),
        }
    }

    /// Receive a fresh snapshot after every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<GameState> {
        self.shared.snapshots.subscribe()
    }

    pub async fn snapshot(&self) -> GameState {
        self.shared.engine.lock().await.snapshot()
    }

    pub async fn legal_flips(&self) -> Vec<CardId> {
        self.shared.engine.lock().await.legal_flips()
    }

    pub async fn result(&self) -> Option<GameResult> {
        self.shared.engine.lock().await.result()
    }

    /// True while a resolution timer is outstanding.
    pub async fn is_resolving(&self) -> bool {
        self.shared.engine.lock().await.pending().is_some()
    }

    /// Deal a new game, abandoning any pending resolution.
    pub async fn start_new_game(&self) -> Result<(), EngineError> {
        let mut engine = self.shared.engine.lock().await;

        if let Some(timer) = self.shared.timer.lock().await.take() {
            timer.abort();
        }

        engine.start_new_game()?;
        self.shared.snapshots.send_replace(engine.snapshot());
        Ok(())
    }

    /// Flip a card for the turn player, scheduling resolution when the turn
    /// closes.
    pub async fn request_flip(&self, id: CardId) -> FlipOutcome {
        let mut engine = self.shared.engine.lock().await;
        let outcome = engine.request_flip(id);

        if outcome.is_accepted() {
            self.shared.snapshots.send_replace(engine.snapshot());
        }
        if let Some(ticket) = outcome.resolution() {
            let handle = tokio::spawn(resolve_after_delay(Arc::clone(&self.shared), ticket));
            if let Some(previous) = self.shared.timer.lock().await.replace(handle) {
                previous.abort();
            }
        }

        outcome
    }
}

async fn resolve_after_delay(shared: Arc<Shared>, ticket: ResolutionTicket) {
    tokio::time::sleep(ticket.delay()).await;

    let mut engine = shared.engine.lock().await;
    match engine.resolve(ticket) {
        Some(summary) => {
            debug!(
                player = %summary.player,
                matched = summary.matched.len(),
                game_over = summary.game_over,
                "timed resolution applied"
            );
            shared.snapshots.send_replace(engine.snapshot());
        }
        None => debug!("timed resolution found nothing to resolve"),
    }
}
