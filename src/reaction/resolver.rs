//! The reaction table and the pure resolver.

use serde::{Deserialize, Serialize};

use crate::model::{CharacterStatus, Element, StatusKind};

/// Rounds the Crystallize shield lasts.
pub const CRYSTALLIZE_SHIELD_DURATION: u32 = 2;

/// Extra damage a physical hit deals to a target under `PhysResDown`.
const PHYS_RES_DOWN_BONUS: u32 = 1;

/// Every reaction the table can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Reaction {
    Vaporize,
    Melt,
    Overload,
    Burning,
    Quicken,
    Superconduct,
    ElectroCharged,
    Bloom,
    Frozen,
    Swirl,
    Crystallize,
}

pub const ALL_REACTIONS: [Reaction; 11] = [
    Reaction::Vaporize,
    Reaction::Melt,
    Reaction::Overload,
    Reaction::Burning,
    Reaction::Quicken,
    Reaction::Superconduct,
    Reaction::ElectroCharged,
    Reaction::Bloom,
    Reaction::Frozen,
    Reaction::Swirl,
    Reaction::Crystallize,
];

impl Reaction {
    /// Looks up the reaction for an unordered element pair.
    pub fn for_pair(aura: Element, incoming: Element) -> Option<Reaction> {
        use Element::*;
        let reaction = match (aura, incoming) {
            (Hydro, Pyro) | (Pyro, Hydro) => Reaction::Vaporize,
            (Cryo, Pyro) | (Pyro, Cryo) => Reaction::Melt,
            (Electro, Pyro) | (Pyro, Electro) => Reaction::Overload,
            (Dendro, Pyro) | (Pyro, Dendro) => Reaction::Burning,
            (Dendro, Electro) | (Electro, Dendro) => Reaction::Quicken,
            (Cryo, Electro) | (Electro, Cryo) => Reaction::Superconduct,
            (Electro, Hydro) | (Hydro, Electro) => Reaction::ElectroCharged,
            (Dendro, Hydro) | (Hydro, Dendro) => Reaction::Bloom,
            (Cryo, Hydro) | (Hydro, Cryo) => Reaction::Frozen,
            (aura, Anemo) if aura.is_swirlable() => Reaction::Swirl,
            (aura, Geo) if aura.is_swirlable() => Reaction::Crystallize,
            _ => return None,
        };
        Some(reaction)
    }

    /// Damage multiplier in tenths (15 = x1.5).
    pub const fn multiplier_x10(self) -> u32 {
        match self {
            Reaction::Vaporize | Reaction::Quicken => 15,
            Reaction::Melt => 17,
            Reaction::Overload => 13,
            Reaction::Burning
            | Reaction::Superconduct
            | Reaction::ElectroCharged
            | Reaction::Bloom
            | Reaction::Frozen
            | Reaction::Swirl
            | Reaction::Crystallize => 10,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Reaction::Vaporize => "Vaporize",
            Reaction::Melt => "Melt",
            Reaction::Overload => "Overload",
            Reaction::Burning => "Burning",
            Reaction::Quicken => "Quicken",
            Reaction::Superconduct => "Superconduct",
            Reaction::ElectroCharged => "Electro-Charged",
            Reaction::Bloom => "Bloom",
            Reaction::Frozen => "Frozen",
            Reaction::Swirl => "Swirl",
            Reaction::Crystallize => "Crystallize",
        }
    }
}

/// Everything a hit produces once the aura has been consulted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReactionOutcome {
    pub reaction: Option<Reaction>,
    pub damage: u32,
    /// Aura left on the target after the hit.
    pub new_aura: Option<Element>,
    /// Overload: the target side must switch active character.
    pub force_switch: bool,
    /// Piercing damage to every living benched character on the target side.
    pub bench_damage: u32,
    /// Status placed on the target.
    pub target_status: Option<CharacterStatus>,
    /// Shield granted to the attacker's active character.
    pub attacker_shield: u32,
    /// Buff granted to the attacker's active character.
    pub attacker_buff: Option<CharacterStatus>,
}

/// Multiplies `damage` by `multiplier_x10 / 10`, rounding up.
pub fn scale_damage(damage: u32, multiplier_x10: u32) -> u32 {
    damage.saturating_mul(multiplier_x10).div_ceil(10)
}

/// Resolves a hit of `incoming` for `damage` against a target holding `aura`
/// and `target_statuses`.
pub fn resolve(
    damage: u32,
    incoming: Element,
    aura: Option<Element>,
    target_statuses: &[CharacterStatus],
) -> ReactionOutcome {
    let mut outcome = ReactionOutcome { damage, ..ReactionOutcome::default() };

    if incoming == Element::Physical {
        if target_statuses.iter().any(|s| s.kind == StatusKind::PhysResDown) {
            outcome.damage = outcome.damage.saturating_add(PHYS_RES_DOWN_BONUS);
        }
        outcome.new_aura = aura;
        return outcome;
    }

    let aura = match aura {
        Some(aura) => aura,
        None => {
            if incoming.is_sticky() {
                outcome.new_aura = Some(incoming);
            }
            return outcome;
        }
    };

    let reaction = match Reaction::for_pair(aura, incoming) {
        Some(reaction) => reaction,
        None => {
            outcome.new_aura = Some(aura);
            return outcome;
        }
    };

    outcome.reaction = Some(reaction);
    outcome.damage = scale_damage(damage, reaction.multiplier_x10());
    outcome.new_aura = None;

    match reaction {
        Reaction::Vaporize | Reaction::Melt | Reaction::Quicken => {}
        Reaction::Overload => outcome.force_switch = true,
        Reaction::Burning => {
            outcome.target_status = Some(CharacterStatus::with_value(StatusKind::Burning, 2, 1));
        }
        Reaction::Superconduct => {
            outcome.target_status = Some(CharacterStatus::new(StatusKind::PhysResDown, 2));
        }
        Reaction::ElectroCharged | Reaction::Swirl => outcome.bench_damage = 1,
        Reaction::Bloom => {
            outcome.attacker_buff = Some(CharacterStatus::with_value(StatusKind::DendroCore, 2, 1));
        }
        Reaction::Frozen => {
            outcome.target_status = Some(CharacterStatus::new(StatusKind::Frozen, 1));
        }
        Reaction::Crystallize => outcome.attacker_shield = 1,
    }

    outcome
}
