//! Skill templates and their dice/energy costs.

use serde::{Deserialize, Serialize};

use super::element::Element;

/// The three skill tiers. A character's skill list follows this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillKind {
    NormalAttack,
    ElementalSkill,
    ElementalBurst,
}

/// The die element a cost asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CostElement {
    /// Dice of exactly this element (Omni dice cover any shortfall).
    Aligned(Element),
    /// Any die face.
    Any,
}

/// Dice (and, for bursts, energy) required to use a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cost {
    pub element: CostElement,
    pub count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<u32>,
}

impl Cost {
    /// An aligned dice cost without energy.
    pub const fn dice(element: Element, count: usize) -> Self {
        Cost { element: CostElement::Aligned(element), count, energy: None }
    }

    /// An aligned dice cost that also requires energy.
    pub const fn burst(element: Element, count: usize, energy: u32) -> Self {
        Cost { element: CostElement::Aligned(element), count, energy: Some(energy) }
    }

    /// Energy required, zero when the cost has none.
    pub fn energy_required(&self) -> u32 {
        self.energy.unwrap_or(0)
    }
}

/// An immutable skill definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub kind: SkillKind,
    #[serde(default)]
    pub description: String,
    pub damage: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heal: Option<u32>,
    pub cost: Cost,
}

impl Skill {
    pub fn is_burst(&self) -> bool {
        self.kind == SkillKind::ElementalBurst
    }

    pub fn is_normal_attack(&self) -> bool {
        self.kind == SkillKind::NormalAttack
    }

    /// The element a hit from this skill carries for an attacker of `own`.
    pub fn incoming_element(&self, own: Element) -> Element {
        match self.kind {
            SkillKind::NormalAttack => Element::Physical,
            SkillKind::ElementalSkill | SkillKind::ElementalBurst => own,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(kind: SkillKind) -> Skill {
        Skill {
            id: "x_1".into(),
            name: "Test".into(),
            kind,
            description: String::new(),
            damage: 2,
            heal: None,
            cost: Cost::dice(Element::Pyro, 1),
        }
    }

    #[test]
    fn normal_attacks_are_physical() {
        assert_eq!(
            skill(SkillKind::NormalAttack).incoming_element(Element::Pyro),
            Element::Physical
        );
        assert_eq!(
            skill(SkillKind::ElementalSkill).incoming_element(Element::Pyro),
            Element::Pyro
        );
        assert_eq!(
            skill(SkillKind::ElementalBurst).incoming_element(Element::Geo),
            Element::Geo
        );
    }

    #[test]
    fn energy_defaults_to_zero() {
        assert_eq!(Cost::dice(Element::Cryo, 2).energy_required(), 0);
        assert_eq!(Cost::burst(Element::Cryo, 3, 3).energy_required(), 3);
    }
}
