//! Roster database: the built-in characters and JSON loading.
//!
//! A roster file has the same shape as `Roster` serialized with serde:
//! `{"characters": [{"id", "name", "element", "max_hp", "max_energy", "skills": [...]}]}`.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{
    Character, CharacterTemplate, Cost, Element, SideId, Skill, SkillKind, ROSTER_SIZE,
};

/// Errors raised while loading or validating a roster.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse roster JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("roster needs at least {needed} characters, got {got}")]
    TooFewCharacters { needed: usize, got: usize },

    #[error("character '{0}' must have a normal attack, an elemental skill and a burst, in that order")]
    BadSkillLayout(String),

    #[error("duplicate id '{0}'")]
    DuplicateId(String),

    #[error("character '{0}' has an element that cannot be a character element")]
    BadElement(String),

    #[error("'{id}' has {field} {value}, above the limit of {limit}", limit = MAX_STAT)]
    ValueOutOfRange { id: String, field: &'static str, value: u64 },
}

/// Upper bound on HP, energy, damage, heal and dice counts in a loaded roster.
pub const MAX_STAT: u32 = 999;

fn check_stat(id: &str, field: &'static str, value: u64) -> Result<(), RosterError> {
    if value > u64::from(MAX_STAT) {
        return Err(RosterError::ValueOutOfRange { id: id.to_string(), field, value });
    }
    Ok(())
}

/// The full template database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub characters: Vec<CharacterTemplate>,
}

impl Roster {
    /// Checks the invariants the rules rely on: enough characters for two full
    /// sides, unique ids, a `[normal, skill, burst]` skill layout and stats
    /// no larger than `MAX_STAT`.
    pub fn validate(&self) -> Result<(), RosterError> {
        let needed = ROSTER_SIZE * 2;
        if self.characters.len() < needed {
            return Err(RosterError::TooFewCharacters { needed, got: self.characters.len() });
        }

        let mut ids = HashSet::new();
        for c in &self.characters {
            if !ids.insert(c.id.as_str()) {
                return Err(RosterError::DuplicateId(c.id.clone()));
            }
            if matches!(c.element, Element::Omni | Element::Physical) {
                return Err(RosterError::BadElement(c.id.clone()));
            }
            let kinds: Vec<SkillKind> = c.skills.iter().map(|s| s.kind).collect();
            if kinds != [SkillKind::NormalAttack, SkillKind::ElementalSkill, SkillKind::ElementalBurst]
            {
                return Err(RosterError::BadSkillLayout(c.id.clone()));
            }
            check_stat(&c.id, "max_hp", u64::from(c.max_hp))?;
            check_stat(&c.id, "max_energy", u64::from(c.max_energy))?;
            for s in &c.skills {
                if !ids.insert(s.id.as_str()) {
                    return Err(RosterError::DuplicateId(s.id.clone()));
                }
                check_stat(&s.id, "damage", u64::from(s.damage))?;
                check_stat(&s.id, "heal", u64::from(s.heal.unwrap_or(0)))?;
                check_stat(&s.id, "dice cost", s.cost.count as u64)?;
                check_stat(&s.id, "energy cost", u64::from(s.cost.energy.unwrap_or(0)))?;
            }
        }
        Ok(())
    }

    /// Instantiates the templates at `indices` for `side`. Indices must be in range.
    pub fn instantiate(&self, indices: &[usize], side: SideId) -> Vec<Character> {
        indices
            .iter()
            .filter_map(|&i| self.characters.get(i))
            .map(|t| Character::from_template(t, side.prefix()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

/// Loads and validates a roster from a JSON file.
pub fn load_roster(path: &Path) -> Result<Roster, RosterError> {
    let data = fs::read_to_string(path).map_err(|source| RosterError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_roster_from_str(&data)
}

/// Loads and validates a roster from a JSON string.
pub fn load_roster_from_str(json: &str) -> Result<Roster, RosterError> {
    let roster: Roster = serde_json::from_str(json)?;
    roster.validate()?;
    Ok(roster)
}

fn skill(id: &str, name: &str, kind: SkillKind, damage: u32, cost: Cost, description: &str) -> Skill {
    Skill {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        description: description.to_string(),
        damage,
        heal: None,
        cost,
    }
}

fn healing(mut skill: Skill, heal: u32) -> Skill {
    skill.heal = Some(heal);
    skill
}

fn character(
    id: &str,
    name: &str,
    element: Element,
    max_hp: u32,
    max_energy: u32,
    skills: [Skill; 3],
) -> CharacterTemplate {
    CharacterTemplate {
        id: id.to_string(),
        name: name.to_string(),
        element,
        max_hp,
        max_energy,
        skills: skills.to_vec(),
    }
}

/// The nine built-in characters, in selection-index order.
pub fn standard_roster() -> Roster {
    use Element::*;
    use SkillKind::*;

    Roster {
        characters: vec![
            character("moziqin", "Qiqi", Cryo, 12, 3, [
                skill("mzq_1", "Roll Over", NormalAttack, 2, Cost::dice(Cryo, 1),
                    "Reluctantly rolls into the opponent. Deals 2 Physical DMG."),
                healing(skill("mzq_2", "Deep Sleep", ElementalSkill, 0, Cost::dice(Cryo, 2),
                    "Ignores the fight entirely and naps. Heals 3 HP."), 3),
                skill("mzq_3", "Avalanche Drop", ElementalBurst, 6, Cost::burst(Cryo, 4, 3),
                    "Falls on the opponent like an avalanche. Deals 6 Cryo DMG."),
            ]),
            character("tiantian", "Sayu", Anemo, 8, 2, [
                skill("tt_1", "Knee Jump", NormalAttack, 2, Cost::dice(Anemo, 1),
                    "Deals 2 Physical DMG."),
                skill("tt_2", "Leg Dash", ElementalSkill, 3, Cost::dice(Anemo, 2),
                    "Deals 3 Anemo DMG."),
                skill("tt_3", "Whirlwind Wheel", ElementalBurst, 5, Cost::burst(Anemo, 3, 2),
                    "Deals 5 Anemo DMG."),
            ]),
            character("paimon", "Paimon", Hydro, 10, 3, [
                skill("pm_1", "Rude Nickname", NormalAttack, 2, Cost::dice(Hydro, 1),
                    "Deals 2 Physical DMG."),
                healing(skill("pm_2", "Snack Time", ElementalSkill, 1, Cost::dice(Hydro, 2),
                    "Deals 1 Hydro DMG and heals 2 HP."), 2),
                skill("pm_3", "Mental Pollution", ElementalBurst, 6, Cost::burst(Hydro, 3, 3),
                    "Deals 6 Hydro DMG."),
            ]),
            character("nefer", "Ningguang", Geo, 10, 3, [
                skill("nf_1", "Coin Toss", NormalAttack, 2, Cost::dice(Geo, 1),
                    "Deals 2 Physical DMG."),
                skill("nf_2", "Money Talks", ElementalSkill, 3, Cost::dice(Geo, 2),
                    "Deals 3 Geo DMG."),
                skill("nf_3", "Big Spender", ElementalBurst, 7, Cost::burst(Geo, 4, 3),
                    "Deals 7 Geo DMG."),
            ]),
            character("qianqian", "Qianqian", Dendro, 9, 2, [
                skill("qq_1", "Woof!", NormalAttack, 2, Cost::dice(Dendro, 1),
                    "Deals 2 Physical DMG."),
                skill("qq_2", "Pounce", ElementalSkill, 4, Cost::dice(Dendro, 2),
                    "Deals 4 Dendro DMG."),
                skill("qq_3", "Rabid Frenzy", ElementalBurst, 6, Cost::burst(Dendro, 3, 2),
                    "Deals 6 Dendro DMG."),
            ]),
            character("diluc", "Diluc", Pyro, 10, 3, [
                skill("dlk_1", "Tempered Sword", NormalAttack, 2, Cost::dice(Pyro, 1),
                    "Deals 2 Physical DMG."),
                skill("dlk_2", "Searing Onslaught", ElementalSkill, 2, Cost::dice(Pyro, 2),
                    "Deals 2 Pyro DMG."),
                skill("dlk_3", "Dawn", ElementalBurst, 4, Cost::burst(Pyro, 3, 3),
                    "Deals 4 Pyro DMG."),
            ]),
            character("bennett", "Bennett", Pyro, 10, 2, [
                skill("bnt_1", "Lucky Strike?", NormalAttack, 2, Cost::dice(Pyro, 1),
                    "Deals 2 Physical DMG."),
                skill("bnt_2", "Passion Overload", ElementalSkill, 3, Cost::dice(Pyro, 2),
                    "Deals 3 Pyro DMG."),
                healing(skill("bnt_3", "Fantastic Voyage", ElementalBurst, 3, Cost::burst(Pyro, 3, 2),
                    "Deals 3 Pyro DMG and heals 2 HP."), 2),
            ]),
            character("citlali", "Citlali", Cryo, 10, 3, [
                skill("ctl_1", "Pillow Smack", NormalAttack, 2, Cost::dice(Cryo, 1),
                    "Deals 2 Physical DMG."),
                skill("ctl_2", "Deep Freeze", ElementalSkill, 3, Cost::dice(Cryo, 2),
                    "Deals 3 Cryo DMG."),
                skill("ctl_3", "Morning Grump", ElementalBurst, 6, Cost::burst(Cryo, 3, 3),
                    "Deals 6 Cryo DMG."),
            ]),
            character("raiden", "Raiden", Electro, 10, 3, [
                skill("rdn_1", "Origin", NormalAttack, 2, Cost::dice(Electro, 1),
                    "Deals 2 Physical DMG."),
                skill("rdn_2", "Eye of Stormy Judgment", ElementalSkill, 3, Cost::dice(Electro, 2),
                    "Deals 3 Electro DMG."),
                skill("rdn_3", "Musou Isshin", ElementalBurst, 8, Cost::burst(Electro, 4, 3),
                    "Deals 8 Electro DMG."),
            ]),
        ],
    }
}
