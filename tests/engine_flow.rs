//! Full-match walkthroughs through the `Engine` session.

use element_duel::engine::{Action, Engine};
use element_duel::error::Reason;
use element_duel::event::Event;
use element_duel::model::{GameState, Phase, SideId, LOG_CAPACITY};

fn engine(seed: u64, auto_opponent: bool) -> Engine {
    let mut engine = Engine::new();
    engine.set_option("Seed".to_string(), Some(seed.to_string()));
    engine.set_option("AutoOpponent".to_string(), Some(auto_opponent.to_string()));
    engine
}

fn assert_invariants(state: &GameState) {
    for c in state.all_characters() {
        assert!(c.current_hp <= c.max_hp, "{} over max hp", c.id);
        assert_eq!(c.is_defeated, c.current_hp == 0, "{} defeat flag out of sync", c.id);
        assert!(c.current_energy <= c.max_energy, "{} over max energy", c.id);
    }
    assert!(state.log.len() <= LOG_CAPACITY);
    if !state.is_over() {
        for side in [&state.player, &state.enemy] {
            if let Some(active) = side.active() {
                assert!(!active.is_defeated, "defeated active character {}", active.id);
            }
        }
    }
}

#[test]
fn selection_then_roll_then_action() {
    let mut e = engine(11, false);
    e.new_match().unwrap();
    let events = e.perform(Action::StartMatch { selection: vec![5, 2, 3] }).unwrap();
    assert!(matches!(&events[0], Event::MatchStarted { player, .. }
        if player == &vec!["p_diluc".to_string(), "p_paimon".into(), "p_nefer".into()]));
    assert_eq!(e.state.phase, Phase::Roll);
    assert_eq!(e.state.player.dice.len(), 8);
    assert!(e.state.enemy.dice.is_empty());

    e.perform(Action::RerollSelected { indices: vec![0, 1, 2] }).unwrap();
    let err = e.perform(Action::RerollSelected { indices: vec![3] }).unwrap_err();
    assert_eq!(err.reason(), Reason::AlreadyRerolled);

    e.perform(Action::ConfirmRoll).unwrap();
    assert_eq!(e.state.phase, Phase::Action);
    assert_eq!(e.state.turn, SideId::Player);
    assert_eq!(e.state.enemy.dice.len(), 8);
}

#[test]
fn autopilot_match_reaches_game_over() {
    for seed in [1, 2, 3, 4, 5] {
        let mut e = engine(seed, false);
        e.new_match().unwrap();
        e.perform(Action::StartMatch { selection: vec![0, 4, 8] }).unwrap();

        let mut steps = 0;
        while !e.state.is_over() {
            let action = match e.state.phase {
                Phase::Roll => Action::ConfirmRoll,
                Phase::Action => Action::AutoTurn { side: e.state.turn },
                other => panic!("unexpected phase {:?}", other),
            };
            e.perform(action).unwrap();
            assert_invariants(&e.state);
            steps += 1;
            assert!(steps < 2000, "seed {} did not finish", seed);
        }
        assert!(e.state.winner.is_some());
        assert!(matches!(e.state.log.last(), Some(Event::MatchEnded { .. })));
    }
}

#[test]
fn auto_opponent_hands_turn_back() {
    let mut e = engine(99, true);
    e.new_match().unwrap();
    e.perform(Action::StartMatch { selection: vec![1, 3, 6] }).unwrap();
    e.perform(Action::ConfirmRoll).unwrap();

    let mut steps = 0;
    while !e.state.is_over() && steps < 500 {
        match e.state.phase {
            Phase::Roll => {
                e.perform(Action::ConfirmRoll).unwrap();
            }
            Phase::Action => {
                assert_eq!(e.state.turn, SideId::Player, "enemy left holding the turn");
                e.perform(Action::AutoTurn { side: SideId::Player }).unwrap();
            }
            other => panic!("unexpected phase {:?}", other),
        }
        assert_invariants(&e.state);
        steps += 1;
    }
    assert!(e.state.is_over());
}

#[test]
fn same_seed_same_match() {
    let play = |seed: u64| {
        let mut e = engine(seed, true);
        e.new_match().unwrap();
        e.perform(Action::StartMatch { selection: vec![2, 5, 7] }).unwrap();
        e.perform(Action::ConfirmRoll).unwrap();
        e.perform(Action::EndRound { side: SideId::Player }).unwrap();
        e.state
    };
    assert_eq!(play(5), play(5));
}

#[test]
fn ended_side_cannot_act() {
    let mut e = engine(3, false);
    e.new_match().unwrap();
    e.perform(Action::StartMatch { selection: vec![5, 2, 3] }).unwrap();
    e.perform(Action::ConfirmRoll).unwrap();
    e.perform(Action::EndRound { side: SideId::Player }).unwrap();
    assert!(e.state.player.has_ended_round);

    if e.state.phase == Phase::Action {
        assert_eq!(e.state.turn, SideId::Enemy);
        let err = e.perform(Action::EndRound { side: SideId::Player }).unwrap_err();
        assert_eq!(err.reason(), Reason::NotYourTurn);
    }
}
