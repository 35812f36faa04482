//! Automated match simulation.
//!
//! Plays full matches with the automated policy on both sides: a random
//! three-character selection for the player, the regular random enemy pick,
//! no rerolls. Records rosters, the outcome, reaction counts and skill usage
//! per match, for balance checks over the roster.

use std::collections::BTreeMap;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::content::Roster;
use crate::dice::{shuffle, RandomSource, SeededRng};
use crate::engine::{apply, Action};
use crate::error::ActionError;
use crate::event::Event;
use crate::model::{GameState, Phase, SideId, ROSTER_SIZE};

/// Configuration for simulated matches.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of matches to play.
    pub num_games: usize,
    /// Number of parallel threads for concurrent matches.
    pub threads: usize,
    /// Base random seed (0 = use entropy). Match `i` uses `seed + i`.
    pub seed: u64,
    /// A match still running after this many rounds is recorded as a draw.
    pub max_rounds: u32,
    /// Suppress per-match progress output.
    pub quiet: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig { num_games: 100, threads: 4, seed: 0, max_rounds: 30, quiet: false }
    }
}

/// One simulated match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub game_id: usize,
    /// Template ids, in selection order.
    pub player: Vec<String>,
    pub enemy: Vec<String>,
    /// `None` when the round cap was hit.
    pub winner: Option<SideId>,
    pub rounds: u32,
    /// Reaction name to number of times it fired.
    pub reactions: BTreeMap<String, u32>,
    /// Skill template id to number of uses, both sides combined.
    pub skills_used: BTreeMap<String, u32>,
    pub actions: usize,
}

impl MatchRecord {
    fn new(game_id: usize) -> Self {
        MatchRecord {
            game_id,
            player: Vec::new(),
            enemy: Vec::new(),
            winner: None,
            rounds: 0,
            reactions: BTreeMap::new(),
            skills_used: BTreeMap::new(),
            actions: 0,
        }
    }

    fn tally(&mut self, events: &[Event]) {
        for event in events {
            if let Event::SkillExecuted { skill, reaction, .. } = event {
                let template = skill.split_once('_').map(|(_, t)| t).unwrap_or(skill);
                *self.skills_used.entry(template.to_string()).or_default() += 1;
                if let Some(reaction) = reaction {
                    *self.reactions.entry(reaction.name().to_string()).or_default() += 1;
                }
            }
        }
    }
}

/// Plays one match to completion or to the round cap.
pub fn play_game(
    config: &SimConfig,
    roster: &Roster,
    game_id: usize,
    rng: &mut dyn RandomSource,
) -> MatchRecord {
    let mut record = MatchRecord::new(game_id);
    match drive_match(config, roster, rng, &mut record) {
        Ok(state) => {
            record.winner = state.winner;
            record.rounds = state.round;
        }
        Err(e) => warn!(game_id, reason = %e, "simulated match aborted"),
    }
    record
}

fn drive_match(
    config: &SimConfig,
    roster: &Roster,
    rng: &mut dyn RandomSource,
    record: &mut MatchRecord,
) -> Result<GameState, ActionError> {
    let mut picks: Vec<usize> = (0..roster.len()).collect();
    shuffle(&mut picks, rng);
    picks.truncate(ROSTER_SIZE);

    let state = GameState::new();
    let state = step(&state, Action::BeginSelection, roster, rng, record)?;
    let mut state = step(&state, Action::StartMatch { selection: picks }, roster, rng, record)?;

    while !state.is_over() && state.round <= config.max_rounds {
        let action = match state.phase {
            Phase::Roll => Action::ConfirmRoll,
            Phase::Action => Action::AutoTurn { side: state.turn },
            Phase::Init | Phase::Selection | Phase::GameOver => break,
        };
        state = step(&state, action, roster, rng, record)?;
    }

    record.player = state.player.characters.iter().map(|c| c.template_id.clone()).collect();
    record.enemy = state.enemy.characters.iter().map(|c| c.template_id.clone()).collect();
    Ok(state)
}

fn step(
    state: &GameState,
    action: Action,
    roster: &Roster,
    rng: &mut dyn RandomSource,
    record: &mut MatchRecord,
) -> Result<GameState, ActionError> {
    let t = apply(state, &action, roster, rng)?;
    record.actions += 1;
    record.tally(&t.events);
    Ok(t.state)
}

fn game_rng(config: &SimConfig, game_id: usize) -> SeededRng {
    if config.seed != 0 {
        SeededRng::new(config.seed.wrapping_add(game_id as u64))
    } else {
        SeededRng::from_entropy()
    }
}

fn log_game(config: &SimConfig, n: usize, game: &MatchRecord, started: Instant) {
    if config.quiet {
        return;
    }
    let outcome = match game.winner {
        Some(w) => format!("{} wins", w.name()),
        None => "draw".to_string(),
    };
    info!(
        "Game {}/{}: {} in {} rounds ({:.3}s)",
        n,
        config.num_games,
        outcome,
        game.rounds,
        started.elapsed().as_secs_f64()
    );
}

/// Plays `config.num_games` matches and returns their records, ordered by game id.
///
/// When `config.threads > 1`, matches are played concurrently using rayon.
pub fn run_simulation(config: &SimConfig, roster: &Roster) -> Vec<MatchRecord> {
    let mut games = Vec::with_capacity(config.num_games);
    run_simulation_with_callback(config, roster, |game| games.push(game));
    games.sort_by_key(|g| g.game_id);
    games
}

/// Plays matches, calling `on_game` with each record as it completes.
pub fn run_simulation_with_callback<F>(config: &SimConfig, roster: &Roster, on_game: F)
where
    F: FnMut(MatchRecord) + Send,
{
    if config.threads > 1 {
        run_parallel(config, roster, on_game);
    } else {
        run_sequential(config, roster, on_game);
    }
}

fn run_sequential<F>(config: &SimConfig, roster: &Roster, mut on_game: F)
where
    F: FnMut(MatchRecord),
{
    for i in 0..config.num_games {
        let started = Instant::now();
        let mut rng = game_rng(config, i);
        let game = play_game(config, roster, i, &mut rng);
        log_game(config, i + 1, &game, started);
        on_game(game);
    }
}

/// Uses a channel to deliver completed matches to the callback from worker threads.
fn run_parallel<F>(config: &SimConfig, roster: &Roster, mut on_game: F)
where
    F: FnMut(MatchRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let pool = match rayon::ThreadPoolBuilder::new().num_threads(config.threads).build() {
        Ok(pool) => pool,
        Err(e) => {
            warn!(error = %e, "failed to build thread pool, running sequentially");
            return run_sequential(config, roster, on_game);
        }
    };

    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<MatchRecord>();

    std::thread::scope(|scope| {
        scope.spawn(|| {
            pool.install(|| {
                (0..config.num_games).into_par_iter().for_each_with(tx, |tx, i| {
                    let started = Instant::now();
                    let mut rng = game_rng(config, i);
                    let game = play_game(config, roster, i, &mut rng);
                    let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    log_game(config, n, &game, started);
                    let _ = tx.send(game);
                });
            });
        });

        for game in rx {
            on_game(game);
        }
    });
}

/// Writes match records as JSONL (one JSON object per line).
pub fn write_jsonl<W: Write>(games: &[MatchRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Aggregated results over a batch of matches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub games: usize,
    pub player_wins: usize,
    pub enemy_wins: usize,
    pub draws: usize,
    pub total_rounds: u64,
    /// Template id to (matches played, matches won).
    pub characters: BTreeMap<String, (usize, usize)>,
    pub reactions: BTreeMap<String, u32>,
}

impl Summary {
    pub fn from_games(games: &[MatchRecord]) -> Self {
        let mut summary = Summary { games: games.len(), ..Default::default() };
        for game in games {
            summary.total_rounds += u64::from(game.rounds);
            match game.winner {
                Some(SideId::Player) => summary.player_wins += 1,
                Some(SideId::Enemy) => summary.enemy_wins += 1,
                None => summary.draws += 1,
            }
            for (side, ids) in [(SideId::Player, &game.player), (SideId::Enemy, &game.enemy)] {
                for id in ids {
                    let entry = summary.characters.entry(id.clone()).or_default();
                    entry.0 += 1;
                    if game.winner == Some(side) {
                        entry.1 += 1;
                    }
                }
            }
            for (name, count) in &game.reactions {
                *summary.reactions.entry(name.clone()).or_default() += count;
            }
        }
        summary
    }
}

fn pct(part: usize, whole: usize) -> f64 {
    100.0 * part as f64 / whole.max(1) as f64
}

/// Prints a summary of simulation results to stderr.
pub fn print_summary(games: &[MatchRecord]) {
    let s = Summary::from_games(games);

    eprintln!("=== Simulation Summary ===");
    eprintln!("Games: {}", s.games);
    eprintln!("Avg rounds/game: {:.1}", s.total_rounds as f64 / s.games.max(1) as f64);
    eprintln!("Player wins: {} ({:.1}%)", s.player_wins, pct(s.player_wins, s.games));
    eprintln!("Enemy wins: {} ({:.1}%)", s.enemy_wins, pct(s.enemy_wins, s.games));
    eprintln!("Draws (round cap): {}", s.draws);
    eprintln!("Character win rates:");
    for (id, (played, won)) in &s.characters {
        eprintln!("  {:>10}: {}/{} ({:.1}%)", id, won, played, pct(*won, *played));
    }
    eprintln!("Reactions:");
    for (name, count) in &s.reactions {
        eprintln!("  {:>16}: {}", name, count);
    }
}
