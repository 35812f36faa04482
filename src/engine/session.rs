//! Engine session state.
//!
//! Holds the current match, the roster database, engine options, and the
//! random source, and turns driver commands into rule transitions. When
//! `AutoOpponent` is on, the enemy's turns are played right after each
//! accepted human action.

use std::collections::HashMap;
use std::io::{self, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::content::{load_roster, standard_roster, Roster, RosterError};
use crate::dice::SeededRng;
use crate::error::ActionError;
use crate::event::Event;
use crate::model::{GameState, Phase, SideId};

use super::rules::{apply, Action};

/// Upper bound on consecutive automated enemy turns after one human action.
/// A round can never need this many; it only guards the loop.
const MAX_AUTO_TURNS: usize = 256;

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub state: GameState,
    pub roster: Roster,
    pub options: HashMap<String, String>,
    rng: SeededRng,
}

impl Engine {
    /// Creates an engine with the standard roster and an entropy-seeded source.
    pub fn new() -> Self {
        Engine::with_roster(standard_roster())
    }

    pub fn with_roster(roster: Roster) -> Self {
        Engine {
            state: GameState::new(),
            roster,
            options: HashMap::new(),
            rng: SeededRng::from_entropy(),
        }
    }

    /// Sets an engine option. `Seed` reseeds the random source immediately.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        if name == "Seed" {
            let seed = value.as_deref().and_then(|v| v.parse::<u64>().ok()).unwrap_or(0);
            self.rng = SeededRng::new(seed);
            debug!(seed, "reseeded random source");
        }
        self.options.insert(name, value.unwrap_or_default());
    }

    /// Whether enemy turns are played automatically (default on).
    fn auto_opponent(&self) -> bool {
        self.options
            .get("AutoOpponent")
            .map(|v| v != "false")
            .unwrap_or(true)
    }

    /// Replaces the roster database from a JSON file. The current match is
    /// unaffected; the new roster applies from the next `StartMatch`.
    pub fn load_roster(&mut self, path: &Path) -> Result<(), RosterError> {
        self.roster = load_roster(path)?;
        info!(path = %path.display(), characters = self.roster.len(), "roster loaded");
        Ok(())
    }

    /// Throws away the current match and opens a fresh selection phase.
    pub fn new_match(&mut self) -> Result<Vec<Event>, ActionError> {
        self.state = GameState::new();
        info!("new match");
        self.perform(Action::BeginSelection)
    }

    /// Applies `action`, then plays the enemy if it now holds the turn.
    pub fn perform(&mut self, action: Action) -> Result<Vec<Event>, ActionError> {
        let transition = match apply(&self.state, &action, &self.roster, &mut self.rng) {
            Ok(t) => t,
            Err(e) => {
                debug!(?action, reason = %e, "action rejected");
                return Err(e);
            }
        };
        debug!(?action, events = transition.events.len(), "action accepted");
        self.state = transition.state;
        let mut events = transition.events;

        if self.auto_opponent() {
            events.extend(self.play_opponent());
        }
        if let Some(winner) = self.state.winner.filter(|_| self.state.is_over()) {
            info!(winner = winner.name(), round = self.state.round, "match over");
        }
        Ok(events)
    }

    /// Runs automated enemy turns until the player must act or the action
    /// phase ends.
    fn play_opponent(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        for _ in 0..MAX_AUTO_TURNS {
            if self.state.phase != Phase::Action || self.state.turn != SideId::Enemy {
                break;
            }
            let action = Action::AutoTurn { side: SideId::Enemy };
            match apply(&self.state, &action, &self.roster, &mut self.rng) {
                Ok(t) => {
                    self.state = t.state;
                    events.extend(t.events);
                }
                Err(e) => {
                    debug!(reason = %e, "automated turn rejected");
                    break;
                }
            }
        }
        events
    }

    /// Performs `action` and reports it: one `event <json>` line per event,
    /// then `ok`, or a single `rejected <reason>` line.
    pub fn handle_action<W: Write>(&mut self, action: Action, out: &mut W) -> io::Result<()> {
        let result = self.perform(action);
        write_result(result, out)
    }

    pub fn handle_new_match<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let result = self.new_match();
        write_result(result, out)
    }

    /// Writes `state <json>`.
    pub fn handle_state<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let json = serde_json::to_string(&self.state).map_err(io::Error::other)?;
        writeln!(out, "state {}", json)?;
        out.flush()
    }

    /// Writes one `character <index> <id> <name> <element> <hp>` line per template.
    pub fn handle_list<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (i, c) in self.roster.characters.iter().enumerate() {
            writeln!(
                out,
                "character {} {} {} {} {}",
                i,
                c.id,
                c.name.replace(' ', "_"),
                c.element.name(),
                c.max_hp
            )?;
        }
        writeln!(out, "ok")?;
        out.flush()
    }

    pub fn handle_roster<W: Write>(&mut self, path: &Path, out: &mut W) -> io::Result<()> {
        match self.load_roster(path) {
            Ok(()) => writeln!(out, "ok")?,
            Err(e) => writeln!(out, "rejected {}", e)?,
        }
        out.flush()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

fn write_result<W: Write>(result: Result<Vec<Event>, ActionError>, out: &mut W) -> io::Result<()> {
    match result {
        Ok(events) => {
            for event in &events {
                let json = serde_json::to_string(event).map_err(io::Error::other)?;
                writeln!(out, "event {}", json)?;
            }
            writeln!(out, "ok")?;
        }
        Err(e) => writeln!(out, "rejected {}", e)?,
    }
    out.flush()
}
