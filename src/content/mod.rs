//! Character and skill template database.
//!
//! The rules treat templates as read-only input. A standard roster ships
//! with the crate; alternatives can be loaded from JSON.

pub mod roster;

pub use roster::{load_roster, load_roster_from_str, standard_roster, Roster, RosterError};
