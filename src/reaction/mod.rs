//! Elemental reactions.
//!
//! Maps an incoming hit against the aura already on a target to a reaction,
//! its damage, the aura left behind, and the side effects the combat engine
//! must apply.

pub mod resolver;

pub use resolver::{
    resolve, scale_damage, Reaction, ReactionOutcome, ALL_REACTIONS, CRYSTALLIZE_SHIELD_DURATION,
};
