//! Active character switching.

use crate::dice::{switch_die_index, SWITCH_COST};
use crate::error::{ensure, ActionError, Reason};
use crate::event::Event;
use crate::model::{GameState, PlayerState, SideId};

/// Moves the active slot to the first living member other than the current one.
/// Returns the new active id, or `None` when nobody can take over.
pub fn force_switch(side: &mut PlayerState) -> Option<String> {
    let next = side.first_alive_except(&side.active_id)?.id.clone();
    side.active_id = next.clone();
    Some(next)
}

/// Checks whether `side` may switch to `to` right now, ignoring turn and phase.
pub fn validate_switch(side: &PlayerState, to: &str) -> Result<(), ActionError> {
    let target = side
        .character(to)
        .ok_or(ActionError::PreconditionFailed(Reason::TargetInvalid))?;
    ensure(target.id != side.active_id, Reason::TargetInvalid)?;
    ensure(!target.is_defeated, Reason::TargetDefeated)?;
    ensure(side.dice.len() >= SWITCH_COST, Reason::InsufficientDice)
}

/// Voluntary switch: pays one die (non-Omni when possible), activates `to`,
/// and passes the turn to the opponent. Allowed while frozen.
pub fn switch_character(
    state: &mut GameState,
    side: SideId,
    to: &str,
) -> Result<Vec<Event>, ActionError> {
    let acting = state.side_mut(side);
    validate_switch(acting, to)?;

    let idx = switch_die_index(&acting.dice)
        .ok_or(ActionError::PreconditionFailed(Reason::InsufficientDice))?;
    acting.dice.remove(idx);
    acting.active_id = to.to_string();

    state.turn = side.opponent();
    Ok(vec![Event::Switched { side, to: to.to_string(), forced: false }])
}
