//! Skill execution.
//!
//! `execute_skill` applies one skill use as a single transition on a working
//! copy of the state. Cost, energy, turn, and frozen checks belong to the
//! caller; by the time this runs the action is committed.

use crate::dice::remove_indices;
use crate::event::Event;
use crate::model::{CharacterStatus, Element, GameState, Phase, SideId, Skill, StatusKind};
use crate::reaction::{resolve, ReactionOutcome, CRYSTALLIZE_SHIELD_DURATION};

use super::damage::{absorb_with_shield, apply_bench_damage};
use super::switch::force_switch;

/// Executes `skill` for `side`'s active character, consuming `paid_indices`
/// from its dice pool.
///
/// On return the turn has passed to the defending side, unless the defender
/// lost its last character, in which case the phase is `GameOver`.
pub fn execute_skill(
    state: &mut GameState,
    side: SideId,
    skill: &Skill,
    paid_indices: &[usize],
) -> Vec<Event> {
    let mut events = Vec::new();
    let defender_side = side.opponent();
    let (attacker_state, defender_state) = state.sides_mut(side);

    let (attacker_id, attacker_element, dendro_core) = match attacker_state.active() {
        Some(a) => (a.id.clone(), a.element, a.status(StatusKind::DendroCore).copied()),
        None => return events,
    };

    // Incoming element and the Bloom buff.
    let incoming = skill.incoming_element(attacker_element);
    let mut damage = skill.damage;
    let mut consume_core = false;
    if let Some(core) = dendro_core {
        if matches!(incoming, Element::Pyro | Element::Electro) {
            damage = damage.saturating_add(core.value_or(1));
            consume_core = true;
        }
    }

    // Reaction.
    let target_id = defender_state.active().map(|t| t.id.clone());
    let outcome = match defender_state.active() {
        Some(target) if skill.damage > 0 || !skill.is_normal_attack() => {
            resolve(damage, incoming, target.aura, &target.statuses)
        }
        Some(target) => ReactionOutcome { damage, new_aura: target.aura, ..Default::default() },
        None => ReactionOutcome { damage, ..Default::default() },
    };

    // Damage, aura, and reaction status on the target.
    if let Some(target) = defender_state.active_mut() {
        let (shield_absorbed, remaining) = absorb_with_shield(target, outcome.damage);
        let was_defeated = target.is_defeated;
        target.take_damage(remaining);
        target.aura = outcome.new_aura;
        if let Some(status) = outcome.target_status {
            target.upsert_status(status);
        }

        events.push(Event::SkillExecuted {
            side,
            attacker: attacker_id.clone(),
            skill: skill.id.clone(),
            target: Some(target.id.clone()),
            reaction: outcome.reaction,
            damage: outcome.damage,
            shield_absorbed,
        });
        if let Some(status) = outcome.target_status {
            events.push(Event::StatusApplied {
                character: target.id.clone(),
                kind: status.kind,
                duration: status.duration,
            });
        }
        if target.is_defeated && !was_defeated {
            events.push(Event::CharacterDefeated { character: target.id.clone() });
        }
    } else {
        events.push(Event::SkillExecuted {
            side,
            attacker: attacker_id.clone(),
            skill: skill.id.clone(),
            target: None,
            reaction: None,
            damage: 0,
            shield_absorbed: 0,
        });
    }

    // Bench damage.
    if let Some(target_id) = &target_id {
        apply_bench_damage(defender_state, target_id, outcome.bench_damage, &mut events);
    }

    // Attacker energy, heal, and reaction rewards.
    if let Some(attacker) = attacker_state.active_mut() {
        attacker.current_energy = if skill.is_burst() {
            0
        } else {
            attacker.current_energy.saturating_add(1).min(attacker.max_energy)
        };

        if let Some(heal) = skill.heal {
            let amount = attacker.heal(heal);
            events.push(Event::Healed { character: attacker.id.clone(), amount });
        }

        if consume_core {
            attacker.remove_status(StatusKind::DendroCore);
        }

        let mut rewards = Vec::new();
        if outcome.attacker_shield > 0 {
            rewards.push(CharacterStatus::with_value(
                StatusKind::Shield,
                CRYSTALLIZE_SHIELD_DURATION,
                outcome.attacker_shield,
            ));
        }
        rewards.extend(outcome.attacker_buff);
        for status in rewards {
            attacker.upsert_status(status);
            events.push(Event::StatusApplied {
                character: attacker.id.clone(),
                kind: status.kind,
                duration: status.duration,
            });
        }
    }

    // Overload pushes the target out.
    if outcome.force_switch {
        if let Some(to) = force_switch(defender_state) {
            events.push(Event::Switched { side: defender_side, to, forced: true });
        }
    }

    // A defeated active defender is replaced.
    if let Some(to) = defender_state.retarget_if_defeated() {
        events.push(Event::Switched { side: defender_side, to, forced: true });
    }

    // Paid dice leave the pool.
    attacker_state.dice = remove_indices(&attacker_state.dice, paid_indices);

    // Win check, then the turn passes.
    if defender_state.all_defeated() {
        state.winner = Some(side);
        state.phase = Phase::GameOver;
        events.push(Event::MatchEnded { winner: side });
    } else {
        state.turn = defender_side;
    }

    events
}
