//! Driver command parser.
//!
//! Parses incoming protocol lines from raw text into structured `Command`
//! variants that the main loop can dispatch on.

use std::path::PathBuf;

use tracing::warn;

/// A parsed driver-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Discard any match in progress and open character selection.
    NewMatch,

    /// Pick the player's three characters by template index.
    Select { indices: Vec<usize> },

    /// Reroll the listed dice positions.
    Reroll { indices: Vec<usize> },

    /// Lock in the rolled dice.
    Confirm,

    /// Use a skill of the active character.
    Skill { id: String },

    /// Switch the active character.
    Switch { id: String },

    EndRound,

    /// Let the automated policy take the player's turn.
    Auto,

    /// Print the full game state as JSON.
    State,

    /// Load a roster database from a JSON file.
    Roster { path: PathBuf },

    /// List the roster templates.
    List,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (&head, args) = tokens.split_first()?;

    match head {
        "newmatch" => Some(Command::NewMatch),
        "confirm" => Some(Command::Confirm),
        "endround" => Some(Command::EndRound),
        "auto" => Some(Command::Auto),
        "state" => Some(Command::State),
        "list" => Some(Command::List),
        "quit" => Some(Command::Quit),

        "select" => parse_indices("select", args).map(|indices| Command::Select { indices }),
        "reroll" => parse_indices("reroll", args).map(|indices| Command::Reroll { indices }),
        "skill" => parse_id("skill", args).map(|id| Command::Skill { id }),
        "switch" => parse_id("switch", args).map(|id| Command::Switch { id }),
        "roster" => parse_id("roster", args).map(|p| Command::Roster { path: PathBuf::from(p) }),
        "setoption" => parse_setoption(args),

        other => {
            warn!("unknown command: {}", other);
            None
        }
    }
}

/// Parses one or more non-negative integers.
fn parse_indices(cmd: &str, args: &[&str]) -> Option<Vec<usize>> {
    if args.is_empty() {
        warn!("malformed {}: expected '{} <index>...'", cmd, cmd);
        return None;
    }
    let mut indices = Vec::with_capacity(args.len());
    for arg in args {
        match arg.parse::<usize>() {
            Ok(i) => indices.push(i),
            Err(_) => {
                warn!("invalid index for {}: '{}'", cmd, arg);
                return None;
            }
        }
    }
    Some(indices)
}

/// Parses exactly one argument.
fn parse_id(cmd: &str, args: &[&str]) -> Option<String> {
    match args {
        [id] => Some(id.to_string()),
        _ => {
            warn!("malformed {}: expected '{} <id>'", cmd, cmd);
            None
        }
    }
}

/// Parses `name <id> [value <x>]` after `setoption`.
fn parse_setoption(args: &[&str]) -> Option<Command> {
    if args.len() < 2 || args[0] != "name" {
        warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let (name_parts, value_parts) = match args.iter().position(|&t| t == "value") {
        Some(vi) => (&args[1..vi], Some(&args[vi + 1..])),
        None => (&args[1..], None),
    };
    if name_parts.is_empty() {
        warn!("malformed setoption: empty name");
        return None;
    }

    let name = name_parts.join(" ");
    let value = value_parts.filter(|v| !v.is_empty()).map(|v| v.join(" "));
    Some(Command::SetOption { name, value })
}
