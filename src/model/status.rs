//! Timed statuses attached to character instances.

use serde::{Deserialize, Serialize};

/// The kinds of timed effect a character can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    /// Deals its value as damage at each end of round.
    Burning,
    /// The character cannot use skills.
    Frozen,
    /// Absorbs incoming damage up to its value.
    Shield,
    /// Physical hits deal +1 damage.
    PhysResDown,
    /// The next Pyro or Electro hit by this character deals its value extra.
    DendroCore,
}

/// A status instance. `duration` counts remaining rounds and is > 0 while held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterStatus {
    pub kind: StatusKind,
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u32>,
}

impl CharacterStatus {
    pub const fn new(kind: StatusKind, duration: u32) -> Self {
        CharacterStatus { kind, duration, value: None }
    }

    pub const fn with_value(kind: StatusKind, duration: u32, value: u32) -> Self {
        CharacterStatus { kind, duration, value: Some(value) }
    }

    /// Stored value, or `default` when the status carries none.
    pub fn value_or(&self, default: u32) -> u32 {
        self.value.unwrap_or(default)
    }
}
