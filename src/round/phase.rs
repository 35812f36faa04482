//! Roll phase and end-of-round resolution.

use crate::dice::{roll_dice, RandomSource, DICE_PER_ROLL};
use crate::event::Event;
use crate::model::{GameState, Phase, SideId, StatusKind};

/// Enters the roll phase: the player's dice are rolled for preview and the
/// reroll allowance is restored.
pub fn begin_roll(state: &mut GameState, rng: &mut dyn RandomSource, events: &mut Vec<Event>) {
    state.phase = Phase::Roll;
    state.turn = SideId::Player;
    state.player.has_rerolled = false;
    state.player.dice = roll_dice(DICE_PER_ROLL, rng);
    events.push(Event::DiceRolled { side: SideId::Player, dice: state.player.dice.clone() });
}

/// Locks in the player's dice, rolls the enemy's, and opens the action phase
/// with the player to move and both round-end flags cleared.
pub fn confirm_roll(state: &mut GameState, rng: &mut dyn RandomSource, events: &mut Vec<Event>) {
    state.enemy.dice = roll_dice(DICE_PER_ROLL, rng);
    events.push(Event::DiceRolled { side: SideId::Enemy, dice: state.enemy.dice.clone() });

    state.phase = Phase::Action;
    state.turn = SideId::Player;
    state.player.has_ended_round = false;
    state.enemy.has_ended_round = false;
}

/// Runs once both sides have ended the round.
///
/// Burning ticks first (living characters only), then every status loses one
/// round of duration. If the enemy roster is wiped the player wins, even when
/// both rosters fell in the same tick; otherwise a wiped player roster loses.
/// Without a winner the next round begins in the roll phase.
pub fn end_of_round(state: &mut GameState, rng: &mut dyn RandomSource, events: &mut Vec<Event>) {
    for side in [SideId::Player, SideId::Enemy] {
        for c in state.side_mut(side).characters.iter_mut() {
            if c.is_defeated {
                continue;
            }
            if let Some(burn) = c.status(StatusKind::Burning).copied() {
                let damage = c.take_damage(burn.value_or(1));
                events.push(Event::BurnTick { character: c.id.clone(), damage });
                if c.is_defeated {
                    events.push(Event::CharacterDefeated { character: c.id.clone() });
                }
            }
        }
    }

    for side in [SideId::Player, SideId::Enemy] {
        for c in state.side_mut(side).characters.iter_mut() {
            for status in c.statuses.iter_mut() {
                status.duration = status.duration.saturating_sub(1);
            }
            let (kept, expired): (Vec<_>, Vec<_>) =
                c.statuses.drain(..).partition(|s| s.duration > 0);
            c.statuses = kept;
            for status in expired {
                events.push(Event::StatusExpired { character: c.id.clone(), kind: status.kind });
            }
        }
    }

    for side in [SideId::Player, SideId::Enemy] {
        if let Some(to) = state.side_mut(side).retarget_if_defeated() {
            events.push(Event::Switched { side, to, forced: true });
        }
    }

    let winner = if state.enemy.all_defeated() {
        Some(SideId::Player)
    } else if state.player.all_defeated() {
        Some(SideId::Enemy)
    } else {
        None
    };

    if let Some(winner) = winner {
        state.winner = Some(winner);
        state.phase = Phase::GameOver;
        events.push(Event::MatchEnded { winner });
        return;
    }

    state.round += 1;
    state.player.has_ended_round = false;
    state.enemy.has_ended_round = false;
    events.push(Event::RoundAdvanced { round: state.round });
    begin_roll(state, rng, events);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::standard_roster;
    use crate::dice::ScriptedRng;
    use crate::model::{CharacterStatus, Element, PlayerState};

    fn state() -> GameState {
        let roster = standard_roster();
        let mut state = GameState::new();
        state.phase = Phase::Action;
        state.player =
            PlayerState::with_roster(SideId::Player, roster.instantiate(&[5, 2, 3], SideId::Player));
        state.enemy =
            PlayerState::with_roster(SideId::Enemy, roster.instantiate(&[0, 1, 4], SideId::Enemy));
        state.player.has_ended_round = true;
        state.enemy.has_ended_round = true;
        state
    }

    #[test]
    fn begin_roll_rolls_player_dice() {
        let mut s = state();
        s.player.has_rerolled = true;
        let mut rng = ScriptedRng::new(vec![7]);
        let mut events = Vec::new();
        begin_roll(&mut s, &mut rng, &mut events);
        assert_eq!(s.phase, Phase::Roll);
        assert_eq!(s.player.dice, vec![Element::Omni; DICE_PER_ROLL]);
        assert!(!s.player.has_rerolled);
        assert!(matches!(events[0], Event::DiceRolled { side: SideId::Player, .. }));
    }

    #[test]
    fn confirm_roll_opens_action_phase() {
        let mut s = state();
        s.phase = Phase::Roll;
        s.turn = SideId::Enemy;
        let mut events = Vec::new();
        confirm_roll(&mut s, &mut ScriptedRng::new(vec![0]), &mut events);
        assert_eq!(s.phase, Phase::Action);
        assert_eq!(s.turn, SideId::Player);
        assert_eq!(s.enemy.dice, vec![Element::Pyro; DICE_PER_ROLL]);
        assert!(!s.player.has_ended_round && !s.enemy.has_ended_round);
    }

    #[test]
    fn burning_ticks_then_expires() {
        let mut s = state();
        s.enemy.characters[0]
            .upsert_status(CharacterStatus::with_value(StatusKind::Burning, 1, 1));
        let mut events = Vec::new();
        end_of_round(&mut s, &mut ScriptedRng::new(vec![0]), &mut events);

        assert_eq!(s.enemy.characters[0].current_hp, 11);
        assert!(s.enemy.characters[0].statuses.is_empty());
        assert!(events.contains(&Event::BurnTick { character: "e_moziqin".into(), damage: 1 }));
        assert!(events.contains(&Event::StatusExpired {
            character: "e_moziqin".into(),
            kind: StatusKind::Burning,
        }));
        assert_eq!(s.round, 2);
        assert_eq!(s.phase, Phase::Roll);
        assert!(!s.player.has_ended_round && !s.enemy.has_ended_round);
    }

    #[test]
    fn durations_decrement_without_expiring() {
        let mut s = state();
        s.player.characters[1].upsert_status(CharacterStatus::new(StatusKind::PhysResDown, 2));
        end_of_round(&mut s, &mut ScriptedRng::new(vec![0]), &mut Vec::new());
        assert_eq!(s.player.characters[1].status(StatusKind::PhysResDown).unwrap().duration, 1);
    }

    #[test]
    fn burn_defeat_retargets_active() {
        let mut s = state();
        let diluc = &mut s.player.characters[0];
        diluc.current_hp = 1;
        diluc.upsert_status(CharacterStatus::with_value(StatusKind::Burning, 2, 1));
        let mut events = Vec::new();
        end_of_round(&mut s, &mut ScriptedRng::new(vec![0]), &mut events);
        assert!(s.player.characters[0].is_defeated);
        assert_eq!(s.player.active_id, "p_paimon");
        assert!(events.contains(&Event::Switched {
            side: SideId::Player,
            to: "p_paimon".into(),
            forced: true,
        }));
    }

    #[test]
    fn mutual_wipe_favors_player() {
        let mut s = state();
        for side in [SideId::Player, SideId::Enemy] {
            for c in s.side_mut(side).characters.iter_mut() {
                c.current_hp = 1;
                c.upsert_status(CharacterStatus::with_value(StatusKind::Burning, 1, 1));
            }
        }
        let mut events = Vec::new();
        end_of_round(&mut s, &mut ScriptedRng::new(vec![0]), &mut events);
        assert_eq!(s.winner, Some(SideId::Player));
        assert_eq!(s.phase, Phase::GameOver);
        assert_eq!(events.last(), Some(&Event::MatchEnded { winner: SideId::Player }));
    }

    #[test]
    fn player_wipe_loses() {
        let mut s = state();
        for c in s.player.characters.iter_mut() {
            c.current_hp = 2;
            c.upsert_status(CharacterStatus::with_value(StatusKind::Burning, 1, 2));
        }
        end_of_round(&mut s, &mut ScriptedRng::new(vec![0]), &mut Vec::new());
        assert_eq!(s.winner, Some(SideId::Enemy));
        assert_eq!(s.round, 1);
    }
}
