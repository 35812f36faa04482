//! The rules entry point and the stateful session wrapper around it.
//!
//! `apply` is the pure transition function: it never mutates its input and
//! either returns the next state plus events or a rejection. `Engine` owns a
//! match, a roster, options, and a random source for the driver binary.

pub mod rules;
pub mod session;

pub use rules::{apply, Action, Transition};
pub use session::Engine;
