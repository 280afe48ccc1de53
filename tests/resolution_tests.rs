//! End-of-turn resolution tests, from hand-built tables up to full games.

use ploutos::cards::{Card, CardId, Orientation};
use ploutos::core::{GameRng, GameState, PlayerId, RulesConfig, Scene};
use ploutos::rules::{Engine, FlipOutcome, GameResult, RejectReason, TurnSummary};

fn card(id: u32, number: u8) -> Card {
    Card::new(CardId(id), number)
}

fn table(common: Vec<Card>, first: Vec<Card>, second: Vec<Card>) -> Engine {
    let config = RulesConfig::instant();
    let mut state = GameState::new(&config);
    state.set_zones(common, first, second);
    state.set_scene(Scene::Playing).unwrap();
    Engine::resume(config, GameRng::new(0), state).unwrap()
}

fn flip_all(engine: &mut Engine, ids: &[u32]) -> Option<TurnSummary> {
    let mut summary = None;
    for &id in ids {
        let outcome = engine.request_flip(CardId(id));
        assert!(outcome.is_accepted(), "flip {id} refused: {outcome:?}");
        if let Some(ticket) = outcome.resolution() {
            summary = engine.resolve(ticket);
        }
    }
    summary
}

/// Two common 3s and a personal 3 are all matched; the 5 stays, face down.
#[test]
fn test_three_of_a_kind_across_zones() {
    let mut engine = table(
        vec![card(0, 3), card(1, 3), card(2, 5), card(3, 1)],
        vec![card(4, 3), card(5, 2)],
        vec![card(6, 4)],
    );

    let summary = flip_all(&mut engine, &[0, 1, 4]).unwrap();

    let matched: Vec<CardId> = summary.matched.iter().map(|c| c.id).collect();
    assert_eq!(matched, vec![CardId(0), CardId(1), CardId(4)]);

    let state = engine.snapshot();
    assert_eq!(state.score(PlayerId::FIRST), 3);
    let pile: Vec<CardId> = state.gain_pile(PlayerId::FIRST).cards().map(|c| c.id).collect();
    assert_eq!(pile, matched);
    assert_eq!(
        state.card(CardId(2)).map(|c| (c.number, c.orientation)),
        Some((5, Orientation::Back))
    );
    assert_eq!(state.common().slot_count(), 4);
    assert_eq!(state.common().present_count(), 2);
}

/// A 2 and a 4 do not match: nothing scores and both turn back down.
#[test]
fn test_no_match_refresh() {
    let mut engine = table(
        vec![card(0, 2), card(1, 4), card(2, 1)],
        vec![card(3, 5), card(4, 3)],
        vec![card(5, 5)],
    );

    let summary = flip_all(&mut engine, &[0, 1, 3]).unwrap();

    assert!(summary.matched.is_empty());
    let state = engine.snapshot();
    assert!(state.matched().is_empty());
    for id in [0, 1, 3] {
        assert_eq!(state.card(CardId(id)).map(|c| c.orientation), Some(Orientation::Back));
    }
    assert_eq!(state.turn_player(), PlayerId::SECOND);
}

/// After both players move, common numbers advance by one (5 wraps to 1)
/// while personal numbers stay put.
#[test]
fn test_round_rotation() {
    let mut engine = table(
        vec![card(0, 1), card(1, 2), card(2, 3), card(3, 4), card(4, 5)],
        vec![card(5, 1), card(6, 2), card(7, 3)],
        vec![card(8, 4), card(9, 5), card(10, 1)],
    );

    let first = flip_all(&mut engine, &[0, 1, 7]).unwrap();
    assert!(!first.is_match());
    assert!(!first.round_completed);
    assert_eq!(engine.state().card(CardId(0)).map(|c| c.number), Some(1));

    let second = flip_all(&mut engine, &[2, 3, 10]).unwrap();
    assert!(!second.is_match());
    assert!(second.round_completed);

    let state = engine.snapshot();
    assert_eq!(state.turn_count(), 1);
    assert_eq!(state.turn_player(), PlayerId::FIRST);
    let common: Vec<u8> = state.common().cards().map(|c| c.number).collect();
    assert_eq!(common, vec![2, 3, 4, 5, 1]);
    let own: Vec<u8> = state.personal(PlayerId::FIRST).cards().map(|c| c.number).collect();
    assert_eq!(own, vec![1, 2, 3]);
    let theirs: Vec<u8> = state.personal(PlayerId::SECOND).cards().map(|c| c.number).collect();
    assert_eq!(theirs, vec![4, 5, 1]);
}

/// Emptying the common zone ends the game; nothing revives it.
#[test]
fn test_game_over_is_terminal() {
    let mut engine = table(
        vec![card(0, 2), card(1, 2)],
        vec![card(2, 4), card(3, 5)],
        vec![card(4, 1)],
    );

    let summary = flip_all(&mut engine, &[0, 1, 2]).unwrap();

    assert!(summary.game_over);
    assert_eq!(engine.state().scene(), Scene::Finished);
    assert_eq!(engine.result(), Some(GameResult::Winner(PlayerId::FIRST)));

    let frozen = engine.snapshot();
    assert_eq!(
        engine.request_flip(CardId(4)),
        FlipOutcome::Rejected(RejectReason::NotPlaying)
    );
    assert_eq!(engine.resolve_pending(), None);
    assert_eq!(engine.snapshot(), frozen);
}

/// Game over is judged after the round's rotation.
#[test]
fn test_game_over_after_second_player_rotation() {
    let mut engine = table(
        vec![card(0, 5), card(1, 1), card(2, 3)],
        vec![card(3, 2), card(4, 4)],
        vec![card(5, 5)],
    );
    engine.request_flip(CardId(3));
    engine.request_flip(CardId(1));
    engine.request_flip(CardId(2));
    engine.resolve_pending().unwrap();

    // second player matches their only card with the common 5
    let summary = flip_all(&mut engine, &[5, 0, 1]).unwrap();

    assert!(summary.is_match());
    assert!(summary.round_completed);
    assert!(summary.game_over);
    let state = engine.snapshot();
    assert_eq!(state.turn_count(), 1);
    assert_eq!(state.score(PlayerId::SECOND), 2);
    assert_eq!(engine.result(), Some(GameResult::Winner(PlayerId::SECOND)));
}

#[test]
fn test_equal_scores_draw() {
    let mut engine = table(
        vec![card(0, 1), card(1, 1), card(2, 2), card(3, 2)],
        vec![card(4, 4)],
        vec![card(5, 5)],
    );

    let first = flip_all(&mut engine, &[0, 1, 4]).unwrap();
    assert_eq!(first.matched.len(), 2);
    assert!(!first.game_over);

    let second = flip_all(&mut engine, &[2, 3, 5]).unwrap();
    assert_eq!(second.matched.len(), 2);
    assert!(second.game_over);

    assert_eq!(engine.state().score(PlayerId::FIRST), 2);
    assert_eq!(engine.state().score(PlayerId::SECOND), 2);
    assert_eq!(engine.result(), Some(GameResult::Draw));
}

/// Pick a pair of equal numbers the turn player can reach, then anything.
fn play_turn(engine: &mut Engine) -> TurnSummary {
    let state = engine.snapshot();
    let player = state.turn_player();
    let reachable: Vec<Card> = state
        .common()
        .cards()
        .chain(state.personal(player).cards())
        .copied()
        .collect();

    let mut order: Vec<CardId> = (1..=5u8)
        .find_map(|number| {
            let pair: Vec<CardId> = reachable
                .iter()
                .filter(|c| c.number == number)
                .map(|c| c.id)
                .take(2)
                .collect();
            (pair.len() == 2).then_some(pair)
        })
        .unwrap_or_default();
    let rest: Vec<CardId> = reachable
        .iter()
        .map(|c| c.id)
        .filter(|id| !order.contains(id))
        .collect();
    order.extend(rest);

    for id in order {
        if let FlipOutcome::Accepted {
            resolution: Some(ticket),
        } = engine.request_flip(id)
        {
            return engine.resolve(ticket).expect("pending ticket resolves");
        }
    }
    panic!("turn never closed");
}

#[test]
fn test_full_games_terminate() {
    for seed in 0..25u64 {
        let mut engine = Engine::new(RulesConfig::instant(), GameRng::new(seed)).unwrap();
        engine.start_new_game().unwrap();

        let mut turns = 0;
        let mut last_scene = engine.state().scene();
        while engine.state().scene() == Scene::Playing {
            assert!(turns < 500, "seed {seed} did not finish");
            let summary = play_turn(&mut engine);
            turns += 1;

            let state = engine.snapshot();
            assert!(state.scene() >= last_scene);
            last_scene = state.scene();
            assert_eq!(state.flipped_count(), 0);
            assert_eq!(summary.game_over, state.scene() == Scene::Finished);

            // every card is on the table or in exactly one gain pile
            let mut seen: Vec<u32> = state
                .common()
                .cards()
                .chain(state.personal(PlayerId::FIRST).cards())
                .chain(state.personal(PlayerId::SECOND).cards())
                .chain(state.gain_pile(PlayerId::FIRST).cards())
                .chain(state.gain_pile(PlayerId::SECOND).cards())
                .map(|c| c.id.raw())
                .collect();
            seen.sort_unstable();
            assert_eq!(seen, (0..20).collect::<Vec<_>>());
        }

        assert!(engine.state().is_game_over());
        assert!(engine.result().is_some());
    }
}

#[test]
fn test_snapshot_serializes() {
    let mut engine = Engine::seeded(99).unwrap();
    engine.start_new_game().unwrap();
    let snapshot = engine.snapshot();

    let json = serde_json::to_string(&snapshot).unwrap();
    let restored: GameState = serde_json::from_str(&json).unwrap();

    assert_eq!(snapshot, restored);
}
