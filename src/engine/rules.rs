//! The transition function.

use std::collections::HashSet;

use crate::combat::{execute_skill, prepare_skill, switch_character};
use crate::content::Roster;
use crate::dice::{reroll_selected, shuffle, RandomSource};
use crate::error::{ensure, ActionError, Reason};
use crate::event::Event;
use crate::model::{GameState, Phase, PlayerState, SideId, ROSTER_SIZE};
use crate::round::{begin_roll, choose_action, confirm_roll, end_round, forfeit, settle, TurnPlan};

/// An inbound request against a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// `Init -> Selection`.
    BeginSelection,
    /// Picks the player's roster by template index; the enemy gets three
    /// random templates from the rest.
    StartMatch { selection: Vec<usize> },
    /// Rerolls the player's dice at these positions. Once per roll phase.
    RerollSelected { indices: Vec<usize> },
    ConfirmRoll,
    /// `skill_id` may be an instance id (`p_dlk_2`) or a template id (`dlk_2`).
    UseSkill { side: SideId, skill_id: String },
    SwitchCharacter { side: SideId, to: String },
    EndRound { side: SideId },
    /// Lets the automated policy take `side`'s turn.
    AutoTurn { side: SideId },
}

/// The result of an accepted action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: GameState,
    pub events: Vec<Event>,
}

/// Applies `action` to `state`.
///
/// The input is never modified. On rejection nothing is returned but the
/// reason, so repeating a rejected action is always a no-op.
pub fn apply(
    state: &GameState,
    action: &Action,
    roster: &Roster,
    rng: &mut dyn RandomSource,
) -> Result<Transition, ActionError> {
    let mut next = state.clone();
    let mut events = Vec::new();

    match action {
        Action::BeginSelection => {
            ensure(next.phase == Phase::Init, Reason::WrongPhase)?;
            next.phase = Phase::Selection;
            events.push(Event::SelectionOpened);
        }
        Action::StartMatch { selection } => {
            ensure(next.phase == Phase::Selection, Reason::WrongPhase)?;
            start_match(&mut next, selection, roster, rng, &mut events)?;
        }
        Action::RerollSelected { indices } => {
            ensure(next.phase == Phase::Roll, Reason::WrongPhase)?;
            ensure(!next.player.has_rerolled, Reason::AlreadyRerolled)?;
            ensure(valid_positions(indices, next.player.dice.len()), Reason::InvalidSelection)?;
            next.player.dice = reroll_selected(&next.player.dice, indices, rng);
            next.player.has_rerolled = true;
            events.push(Event::DiceRerolled {
                side: SideId::Player,
                indices: indices.clone(),
                dice: next.player.dice.clone(),
            });
        }
        Action::ConfirmRoll => {
            ensure(next.phase == Phase::Roll, Reason::WrongPhase)?;
            confirm_roll(&mut next, rng, &mut events);
            settle(&mut next, rng, &mut events);
        }
        Action::UseSkill { side, skill_id } => {
            check_actor(&next, *side)?;
            let prepared = prepare_skill(next.side(*side), skill_id)?;
            events.extend(execute_skill(&mut next, *side, &prepared.skill, &prepared.paid_indices));
            settle(&mut next, rng, &mut events);
        }
        Action::SwitchCharacter { side, to } => {
            check_actor(&next, *side)?;
            events.extend(switch_character(&mut next, *side, to)?);
            settle(&mut next, rng, &mut events);
        }
        Action::EndRound { side } => {
            check_actor(&next, *side)?;
            end_round(&mut next, *side, &mut events);
            settle(&mut next, rng, &mut events);
        }
        Action::AutoTurn { side } => {
            check_actor(&next, *side)?;
            match choose_action(&next, *side) {
                TurnPlan::Forfeit => forfeit(&mut next, *side, &mut events),
                TurnPlan::UseSkill { skill_id } => {
                    let prepared = prepare_skill(next.side(*side), &skill_id)?;
                    events.extend(execute_skill(
                        &mut next,
                        *side,
                        &prepared.skill,
                        &prepared.paid_indices,
                    ));
                }
                TurnPlan::EndRound => end_round(&mut next, *side, &mut events),
            }
            settle(&mut next, rng, &mut events);
        }
    }

    next.record(&events);
    Ok(Transition { state: next, events })
}

/// Phase, turn, and round-end checks shared by every turn-consuming action.
fn check_actor(state: &GameState, side: SideId) -> Result<(), ActionError> {
    ensure(state.phase == Phase::Action, Reason::WrongPhase)?;
    ensure(state.turn == side, Reason::NotYourTurn)?;
    ensure(!state.side(side).has_ended_round, Reason::RoundAlreadyEnded)
}

/// Non-empty, in range, no repeats.
fn valid_positions(indices: &[usize], len: usize) -> bool {
    let mut seen = HashSet::new();
    !indices.is_empty() && indices.iter().all(|&i| i < len && seen.insert(i))
}

fn start_match(
    state: &mut GameState,
    selection: &[usize],
    roster: &Roster,
    rng: &mut dyn RandomSource,
    events: &mut Vec<Event>,
) -> Result<(), ActionError> {
    ensure(selection.len() == ROSTER_SIZE, Reason::InvalidSelection)?;
    ensure(valid_positions(selection, roster.len()), Reason::InvalidSelection)?;

    let mut pool: Vec<usize> = (0..roster.len()).filter(|i| !selection.contains(i)).collect();
    ensure(pool.len() >= ROSTER_SIZE, Reason::InvalidSelection)?;
    shuffle(&mut pool, rng);
    pool.truncate(ROSTER_SIZE);

    state.player = PlayerState::with_roster(SideId::Player, roster.instantiate(selection, SideId::Player));
    state.enemy = PlayerState::with_roster(SideId::Enemy, roster.instantiate(&pool, SideId::Enemy));
    state.round = 1;
    state.winner = None;

    events.push(Event::MatchStarted {
        player: state.player.characters.iter().map(|c| c.id.clone()).collect(),
        enemy: state.enemy.characters.iter().map(|c| c.id.clone()).collect(),
    });
    begin_roll(state, rng, events);
    Ok(())
}
