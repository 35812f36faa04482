//! Skill-use preconditions.

use crate::dice::check_cost;
use crate::error::{ensure, ActionError, Reason};
use crate::model::{PlayerState, Skill};

/// A skill use that passed every precondition: the skill itself and the dice
/// positions that pay for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedSkill {
    pub skill: Skill,
    pub paid_indices: Vec<usize>,
}

/// Checks that `side`'s active character may use `skill_id` right now.
///
/// Order: active character present, not frozen, skill known, energy, dice.
/// Turn and phase are the caller's concern.
pub fn prepare_skill(side: &PlayerState, skill_id: &str) -> Result<PreparedSkill, ActionError> {
    let active = side.active().ok_or(ActionError::PreconditionFailed(Reason::TargetInvalid))?;
    ensure(!active.is_defeated, Reason::TargetDefeated)?;
    ensure(!active.is_frozen(), Reason::Frozen)?;

    let skill = active
        .find_skill(skill_id)
        .ok_or(ActionError::PreconditionFailed(Reason::UnknownSkill))?;

    ensure(
        active.current_energy >= skill.cost.energy_required(),
        Reason::InsufficientEnergy,
    )?;

    let check = check_cost(&skill.cost, &side.dice);
    ensure(check.can_pay, Reason::InsufficientDice)?;

    Ok(PreparedSkill { skill: skill.clone(), paid_indices: check.paid_indices })
}
