//! Character templates and per-match character instances.

use serde::{Deserialize, Serialize};

use super::element::Element;
use super::skill::Skill;
use super::status::{CharacterStatus, StatusKind};

/// Read-only character definition from the roster database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterTemplate {
    pub id: String,
    pub name: String,
    pub element: Element,
    pub max_hp: u32,
    pub max_energy: u32,
    /// Ordered normal attack, elemental skill, elemental burst.
    pub skills: Vec<Skill>,
}

/// Mutable per-match character state.
///
/// Invariants: `current_hp <= max_hp`, `is_defeated == (current_hp == 0)`,
/// `current_energy <= max_energy`, at most one status of each kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub template_id: String,
    pub name: String,
    pub element: Element,
    pub max_hp: u32,
    pub current_hp: u32,
    pub max_energy: u32,
    pub current_energy: u32,
    pub skills: Vec<Skill>,
    pub is_defeated: bool,
    /// Element currently applied to this character.
    pub aura: Option<Element>,
    pub statuses: Vec<CharacterStatus>,
}

impl Character {
    /// Instantiates a template with ids prefixed by `prefix` (`p` or `e`).
    pub fn from_template(template: &CharacterTemplate, prefix: &str) -> Self {
        Character {
            id: format!("{}_{}", prefix, template.id),
            template_id: template.id.clone(),
            name: template.name.clone(),
            element: template.element,
            max_hp: template.max_hp,
            current_hp: template.max_hp,
            max_energy: template.max_energy,
            current_energy: 0,
            skills: template
                .skills
                .iter()
                .map(|s| Skill { id: format!("{}_{}", prefix, s.id), ..s.clone() })
                .collect(),
            is_defeated: template.max_hp == 0,
            aura: None,
            statuses: Vec::new(),
        }
    }

    pub fn status(&self, kind: StatusKind) -> Option<&CharacterStatus> {
        self.statuses.iter().find(|s| s.kind == kind)
    }

    pub fn has_status(&self, kind: StatusKind) -> bool {
        self.status(kind).is_some()
    }

    pub fn is_frozen(&self) -> bool {
        self.has_status(StatusKind::Frozen)
    }

    /// Adds a status, replacing any status of the same kind.
    pub fn upsert_status(&mut self, status: CharacterStatus) {
        match self.statuses.iter_mut().find(|s| s.kind == status.kind) {
            Some(existing) => *existing = status,
            None => self.statuses.push(status),
        }
    }

    /// Removes the status of `kind`. Returns true if one was present.
    pub fn remove_status(&mut self, kind: StatusKind) -> bool {
        let before = self.statuses.len();
        self.statuses.retain(|s| s.kind != kind);
        self.statuses.len() != before
    }

    /// Subtracts HP, flooring at zero, and refreshes the defeated flag.
    /// Returns the HP actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.current_hp);
        self.current_hp -= lost;
        self.is_defeated = self.current_hp == 0;
        lost
    }

    /// Restores HP up to the maximum. Returns the HP actually gained.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.max_hp - self.current_hp);
        self.current_hp += gained;
        gained
    }

    /// Looks up a skill by instance id (`p_dlk_2`) or template id (`dlk_2`).
    pub fn find_skill(&self, id: &str) -> Option<&Skill> {
        self.skills.iter().find(|s| {
            s.id == id
                || s.id
                    .split_once('_')
                    .map(|(_, template_id)| template_id == id)
                    .unwrap_or(false)
        })
    }
}
