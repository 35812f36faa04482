//! Element Duel rules engine library.
//!
//! A two-player elemental dice duel: dice costs, elemental reactions, combat
//! resolution, and round/turn flow, exposed as a pure transition function
//! (`engine::apply`) plus a session wrapper and simulation tooling used by
//! the binaries, integration tests, and benchmarks.

pub mod combat;
pub mod content;
pub mod dice;
pub mod engine;
pub mod error;
pub mod event;
pub mod model;
pub mod protocol;
pub mod reaction;
pub mod round;
pub mod selfplay;
