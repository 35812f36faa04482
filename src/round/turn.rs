//! Turn passing and round ends.

use crate::combat::{prepare_skill, validate_switch};
use crate::dice::RandomSource;
use crate::event::Event;
use crate::model::{GameState, Phase, SideId};

use super::phase::end_of_round;

/// True when `side` has some turn-consuming action other than ending the
/// round: a forfeit while frozen, an affordable skill, or a legal switch.
pub fn has_legal_action(state: &GameState, side: SideId) -> bool {
    let player = state.side(side);
    let Some(active) = player.active() else {
        return false;
    };
    if active.is_defeated {
        return false;
    }
    if active.is_frozen() {
        return true;
    }

    let can_skill = active.skills.iter().any(|s| prepare_skill(player, &s.id).is_ok());
    can_skill || player.characters.iter().any(|c| validate_switch(player, &c.id).is_ok())
}

/// Declares that `side` is done for this round and hands the turn over.
pub fn end_round(state: &mut GameState, side: SideId, events: &mut Vec<Event>) {
    state.side_mut(side).has_ended_round = true;
    state.turn = side.opponent();
    events.push(Event::RoundEnded { side, forced: false });
}

/// Brings the state to the next point where a side must decide.
///
/// While in the action phase: if both sides have ended, the end-of-round tick
/// runs. A turn held by a side that already ended passes to the other. A side
/// with nothing legal to do but end the round has its round ended for it. A
/// frozen side is left to forfeit, which keeps its round open.
pub fn settle(state: &mut GameState, rng: &mut dyn RandomSource, events: &mut Vec<Event>) {
    while state.phase == Phase::Action {
        if state.player.has_ended_round && state.enemy.has_ended_round {
            end_of_round(state, rng, events);
            return;
        }

        let side = state.turn;
        if state.side(side).has_ended_round {
            state.turn = side.opponent();
            continue;
        }

        if !has_legal_action(state, side) {
            state.side_mut(side).has_ended_round = true;
            state.turn = side.opponent();
            events.push(Event::RoundEnded { side, forced: true });
            continue;
        }

        return;
    }
}
