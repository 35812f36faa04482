//! Round and turn flow.
//!
//! Roll-phase entry and confirmation, turn passing with automatic and forced
//! round ends, the end-of-round status tick with win detection, and the
//! automated turn policy used for the opposing side.

pub mod ai;
pub mod phase;
pub mod turn;

pub use ai::{choose_action, forfeit, TurnPlan};
pub use phase::{begin_roll, confirm_roll, end_of_round};
pub use turn::{end_round, has_legal_action, settle};
