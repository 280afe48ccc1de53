//! End-of-turn resolution.
//!
//! Runs once per resolution trigger, in a fixed order:
//!
//! 1. Match: the best face-up group in the common zone plus the turn
//!    player's zone is removed and scored (`GameState::resolve_match`).
//! 2. Every remaining face-up card is turned back down.
//! 3. The turn passes; a completed round rotates the common numbers.
//! 4. An exhausted zone finishes the game.
//! 5. The flip counter is zeroed.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::player::PlayerId;
use crate::core::state::{GameState, MatchedSet, Scene};

/// What a resolution did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSummary {
    /// The player whose turn was resolved.
    pub player: PlayerId,
    /// Cards moved to that player's gain pile (empty on a miss).
    pub matched: MatchedSet,
    /// True when this turn closed a round and the common numbers rotated.
    pub round_completed: bool,
    /// True when this turn ended the game.
    pub game_over: bool,
}

impl TurnSummary {
    #[must_use]
    pub fn is_match(&self) -> bool {
        !self.matched.is_empty()
    }
}

/// Resolve the turn player's open turn.
///
/// Returns `None` without touching the state unless the scene is `Playing`;
/// a stale timer firing after the game finished lands here.
pub fn resolve_turn(state: &mut GameState) -> Option<TurnSummary> {
    if state.scene() != Scene::Playing {
        debug!(scene = ?state.scene(), "resolution skipped, game not in play");
        return None;
    }

    let player = state.turn_player();
    let matched: MatchedSet = state.resolve_match().iter().copied().collect();
    if let Some(first) = matched.first() {
        info!(%player, number = first.number, cards = matched.len(), "match scored");
    } else {
        debug!(%player, "no match");
    }

    state.unflip_unmatched();

    let round_completed = state.advance_turn(player.opponent());

    let game_over = state.is_game_over();
    if game_over {
        state.finish();
        info!(
            rounds = state.turn_count(),
            first = state.score(PlayerId::FIRST),
            second = state.score(PlayerId::SECOND),
            "game over"
        );
    }

    state.reset_flipped_count();

    Some(TurnSummary {
        player,
        matched,
        round_completed,
        game_over,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardId, Orientation};
    use crate::core::config::RulesConfig;

    fn card(id: u32, number: u8) -> Card {
        Card::new(CardId(id), number)
    }

    fn playing(common: Vec<Card>, first: Vec<Card>, second: Vec<Card>) -> GameState {
        let mut state = GameState::new(&RulesConfig::default());
        state.set_zones(common, first, second);
        state.set_scene(Scene::Playing).unwrap();
        state
    }

    #[test]
    fn test_three_way_match() {
        let mut state = playing(
            vec![card(0, 3), card(1, 3), card(2, 5)],
            vec![card(3, 3), card(4, 2)],
            vec![card(5, 1)],
        );
        for id in [0, 1, 3] {
            state.flip(CardId(id));
        }

        let summary = resolve_turn(&mut state).unwrap();

        assert_eq!(summary.player, PlayerId::FIRST);
        assert_eq!(summary.matched.len(), 3);
        assert!(summary.matched.iter().all(|c| c.number == 3));
        assert!(!summary.round_completed);
        assert!(!summary.game_over);
        assert_eq!(state.score(PlayerId::FIRST), 3);
        assert_eq!(
            state.card(CardId(2)).map(|c| (c.number, c.orientation)),
            Some((5, Orientation::Back))
        );
        assert_eq!(state.turn_player(), PlayerId::SECOND);
        assert_eq!(state.flipped_count(), 0);
    }

    #[test]
    fn test_miss_refreshes_cards() {
        let mut state = playing(
            vec![card(0, 2), card(1, 4), card(2, 1)],
            vec![card(3, 5)],
            vec![card(4, 5)],
        );
        state.flip(CardId(0));
        state.flip(CardId(1));

        let summary = resolve_turn(&mut state).unwrap();

        assert!(!summary.is_match());
        assert!(state.matched().is_empty());
        assert_eq!(state.common().face_up_count(), 0);
        assert_eq!(state.common().present_count(), 3);
    }

    #[test]
    fn test_second_player_closes_round() {
        let mut state = playing(vec![card(0, 5), card(1, 1)], vec![card(2, 2)], vec![card(3, 3)]);
        state.set_turn_player(PlayerId::SECOND);

        let summary = resolve_turn(&mut state).unwrap();

        assert!(summary.round_completed);
        assert_eq!(state.turn_count(), 1);
        assert_eq!(state.turn_player(), PlayerId::FIRST);
        assert_eq!(state.card(CardId(0)).map(|c| c.number), Some(1));
        assert_eq!(state.card(CardId(1)).map(|c| c.number), Some(2));
        assert_eq!(state.card(CardId(3)).map(|c| c.number), Some(3));
    }

    #[test]
    fn test_emptying_personal_zone_finishes_game() {
        let mut state = playing(
            vec![card(0, 4), card(1, 1)],
            vec![card(2, 4)],
            vec![card(3, 2)],
        );
        state.flip(CardId(0));
        state.flip(CardId(2));

        let summary = resolve_turn(&mut state).unwrap();

        assert!(summary.game_over);
        assert_eq!(state.scene(), Scene::Finished);
        assert_eq!(state.score(PlayerId::FIRST), 2);
    }

    #[test]
    fn test_resolution_after_finish_is_noop() {
        let mut state = playing(vec![card(0, 1), card(1, 1)], vec![card(2, 2)], vec![card(3, 3)]);
        state.set_scene(Scene::Finished).unwrap();
        state.flip(CardId(0));
        state.flip(CardId(1));
        let before = state.clone();

        assert_eq!(resolve_turn(&mut state), None);
        assert_eq!(state, before);
    }
}
