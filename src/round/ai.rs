//! Automated turn policy.
//!
//! A frozen active character forfeits. Otherwise the first affordable skill
//! in the order burst, elemental skill, normal attack is used; with none
//! affordable the round is ended.

use crate::combat::prepare_skill;
use crate::event::Event;
use crate::model::{GameState, SideId, StatusKind};

/// What the automated policy wants to do with its turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnPlan {
    /// Frozen: lose the action and clear the freeze.
    Forfeit,
    UseSkill { skill_id: String },
    EndRound,
}

pub fn choose_action(state: &GameState, side: SideId) -> TurnPlan {
    let player = state.side(side);
    let Some(active) = player.active() else {
        return TurnPlan::EndRound;
    };
    if active.is_frozen() {
        return TurnPlan::Forfeit;
    }

    active
        .skills
        .iter()
        .rev()
        .find(|s| prepare_skill(player, &s.id).is_ok())
        .map(|s| TurnPlan::UseSkill { skill_id: s.id.clone() })
        .unwrap_or(TurnPlan::EndRound)
}

/// Spends `side`'s turn without acting: Frozen is removed and the turn passes,
/// but the round is not ended.
pub fn forfeit(state: &mut GameState, side: SideId, events: &mut Vec<Event>) {
    if let Some(active) = state.side_mut(side).active_mut() {
        active.remove_status(StatusKind::Frozen);
        events.push(Event::ActionSkipped { side, character: active.id.clone() });
    }
    state.turn = side.opponent();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::standard_roster;
    use crate::model::{CharacterStatus, Element, Phase, PlayerState};

    fn state() -> GameState {
        let roster = standard_roster();
        let mut state = GameState::new();
        state.phase = Phase::Action;
        state.turn = SideId::Enemy;
        state.player =
            PlayerState::with_roster(SideId::Player, roster.instantiate(&[5, 2, 3], SideId::Player));
        state.enemy =
            PlayerState::with_roster(SideId::Enemy, roster.instantiate(&[8, 1, 4], SideId::Enemy));
        state
    }

    #[test]
    fn prefers_burst_when_charged() {
        let mut s = state();
        s.enemy.dice = vec![Element::Omni; 8];
        s.enemy.active_mut().unwrap().current_energy = 3;
        assert_eq!(choose_action(&s, SideId::Enemy), TurnPlan::UseSkill { skill_id: "e_rdn_3".into() });
    }

    #[test]
    fn falls_back_to_cheaper_skills() {
        let mut s = state();
        s.enemy.dice = vec![Element::Electro, Element::Omni];
        assert_eq!(choose_action(&s, SideId::Enemy), TurnPlan::UseSkill { skill_id: "e_rdn_2".into() });

        s.enemy.dice = vec![Element::Electro];
        assert_eq!(choose_action(&s, SideId::Enemy), TurnPlan::UseSkill { skill_id: "e_rdn_1".into() });
    }

    #[test]
    fn ends_round_when_broke() {
        let mut s = state();
        s.enemy.dice = vec![Element::Pyro];
        assert_eq!(choose_action(&s, SideId::Enemy), TurnPlan::EndRound);
    }

    #[test]
    fn frozen_forfeits_without_ending_round() {
        let mut s = state();
        s.enemy.dice = vec![Element::Omni; 8];
        s.enemy.active_mut().unwrap().upsert_status(CharacterStatus::new(StatusKind::Frozen, 1));
        assert_eq!(choose_action(&s, SideId::Enemy), TurnPlan::Forfeit);

        let mut events = Vec::new();
        forfeit(&mut s, SideId::Enemy, &mut events);
        assert!(!s.enemy.active().unwrap().is_frozen());
        assert!(!s.enemy.has_ended_round);
        assert_eq!(s.turn, SideId::Player);
        assert_eq!(events, vec![Event::ActionSkipped { side: SideId::Enemy, character: "e_raiden".into() }]);
    }
}
