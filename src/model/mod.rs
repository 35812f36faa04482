//! Match data model.
//!
//! Contains elements, skill templates, timed statuses, character instances,
//! the two sides of a match, and the aggregate game state.

pub mod character;
pub mod element;
pub mod skill;
pub mod state;
pub mod status;

pub use character::{Character, CharacterTemplate};
pub use element::{Element, DICE_FACES, STICKY_ELEMENTS};
pub use skill::{Cost, CostElement, Skill, SkillKind};
pub use state::{GameState, Phase, PlayerState, SideId, LOG_CAPACITY, ROSTER_SIZE};
pub use status::{CharacterStatus, StatusKind};
