//! Flip admission policy.
//!
//! A flip request is judged against the state as it is before the flip:
//!
//! - the game must be in play
//! - the card must still be on the table
//! - the card must not sit in the opponent's personal zone
//! - the card's zone (common, or the acting player's own) must have fewer
//!   than `zone_open_cap` cards face up
//!
//! After an accepted flip the turn is due for resolution once the flip count
//! reaches `flip_threshold`, or once every card the player can reach has
//! been flipped.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::config::RulesConfig;
use crate::core::state::{GameState, Scene};
use crate::zones::CardLocation;

/// Why a flip request was turned down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectReason {
    /// The game has not started or is over.
    NotPlaying,
    /// The turn is waiting to be resolved.
    ResolutionPending,
    /// No card with that id is on the table.
    CardNotPresent,
    /// The card belongs to the other player.
    OpponentZone,
    /// The card's zone already shows the maximum number of face-up cards.
    ZoneCapReached,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            RejectReason::NotPlaying => "game is not in play",
            RejectReason::ResolutionPending => "turn is being resolved",
            RejectReason::CardNotPresent => "card is not on the table",
            RejectReason::OpponentZone => "card is in the opponent's zone",
            RejectReason::ZoneCapReached => "zone already has its face-up cards",
        };
        f.write_str(text)
    }
}

/// Decide whether the turn player may flip `id`.
///
/// Returns the zone the card sits in on success.
pub fn check_flip(
    state: &GameState,
    config: &RulesConfig,
    id: CardId,
) -> Result<CardLocation, RejectReason> {
    if state.scene() != Scene::Playing {
        return Err(RejectReason::NotPlaying);
    }

    let player = state.turn_player();
    let location = state.location_of(id).ok_or(RejectReason::CardNotPresent)?;

    let zone = match location {
        CardLocation::Personal(owner) if owner != player => {
            return Err(RejectReason::OpponentZone);
        }
        CardLocation::Personal(owner) => state.personal(owner),
        CardLocation::Common => state.common(),
    };

    if zone.face_up_count() >= config.zone_open_cap {
        return Err(RejectReason::ZoneCapReached);
    }

    Ok(location)
}

/// Has the open turn reached a resolution point?
#[must_use]
pub fn resolution_due(state: &GameState, config: &RulesConfig) -> bool {
    let flipped = state.flipped_count();
    flipped >= config.flip_threshold
        || flipped as usize == state.reachable_cards(state.turn_player())
}

/// Every card the turn player could flip right now, in id order.
#[must_use]
pub fn legal_flips(state: &GameState, config: &RulesConfig) -> Vec<CardId> {
    let player = state.turn_player();
    let mut ids: Vec<CardId> = state
        .common()
        .cards()
        .chain(state.personal(player).cards())
        .map(|card| card.id)
        .filter(|&id| check_flip(state, config, id).is_ok())
        .collect();
    ids.sort_unstable();
    ids
}
