//! Elemental dice.
//!
//! Rolling and rerolling through an injectable random source, and the greedy
//! cost-payment check used before every skill.

pub mod cost;
pub mod source;

pub use cost::{check_cost, remove_indices, switch_die_index, CostCheck};
pub use source::{roll_dice, reroll_selected, shuffle, RandomSource, ScriptedRng, SeededRng};

/// Dice rolled by each side at the start of a round.
pub const DICE_PER_ROLL: usize = 8;

/// Dice consumed by a voluntary character switch.
pub const SWITCH_COST: usize = 1;
