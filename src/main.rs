//! element-duel -- an elemental dice-and-card duel played over a line protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Diagnostics go to stderr through `tracing` (filter with `RUST_LOG`).

use std::io::{self, BufRead, Write};

use tracing_subscriber::EnvFilter;

use element_duel::engine::{Action, Engine};
use element_duel::model::SideId;
use element_duel::protocol::parser::{parse_command, Command};

/// Runs the main protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::NewMatch => engine.handle_new_match(&mut out)?,
            Command::Select { indices } => {
                engine.handle_action(Action::StartMatch { selection: indices }, &mut out)?
            }
            Command::Reroll { indices } => {
                engine.handle_action(Action::RerollSelected { indices }, &mut out)?
            }
            Command::Confirm => engine.handle_action(Action::ConfirmRoll, &mut out)?,
            Command::Skill { id } => engine.handle_action(
                Action::UseSkill { side: SideId::Player, skill_id: id },
                &mut out,
            )?,
            Command::Switch { id } => engine.handle_action(
                Action::SwitchCharacter { side: SideId::Player, to: id },
                &mut out,
            )?,
            Command::EndRound => {
                engine.handle_action(Action::EndRound { side: SideId::Player }, &mut out)?
            }
            Command::Auto => {
                engine.handle_action(Action::AutoTurn { side: SideId::Player }, &mut out)?
            }
            Command::State => engine.handle_state(&mut out)?,
            Command::Roster { path } => engine.handle_roster(&path, &mut out)?,
            Command::List => engine.handle_list(&mut out)?,
            Command::SetOption { name, value } => engine.set_option(name, value),
            Command::Quit => break,
        }
    }

    out.flush()
}
