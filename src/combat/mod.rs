//! Combat resolution.
//!
//! Executes a paid-for skill end to end (reaction, shields, statuses, bench
//! damage, energy, forced switches, defeat retargeting, win check) and handles
//! voluntary character switches.

pub mod check;
pub mod damage;
pub mod execute;
pub mod switch;

pub use check::{prepare_skill, PreparedSkill};
pub use damage::{absorb_with_shield, apply_bench_damage};
pub use execute::execute_skill;
pub use switch::{force_switch, switch_character, validate_switch};
