//! Game state representation.
//!
//! Holds the complete snapshot of a match at a given point in time: phase,
//! turn holder, round number, both sides, the winner, and the recent-events log.
//! Every accepted action produces a fresh `GameState`; nothing is edited in place
//! from outside a transition.

use serde::{Deserialize, Serialize};

use super::character::Character;
use super::element::Element;
use crate::event::Event;

/// Characters per side.
pub const ROSTER_SIZE: usize = 3;

/// Number of recent events kept in `GameState::log`.
pub const LOG_CAPACITY: usize = 5;

/// One of the two combatants. `Player` is the human side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SideId {
    Player,
    Enemy,
}

impl SideId {
    pub const fn opponent(self) -> SideId {
        match self {
            SideId::Player => SideId::Enemy,
            SideId::Enemy => SideId::Player,
        }
    }

    /// Id prefix given to this side's character and skill instances.
    pub const fn prefix(self) -> &'static str {
        match self {
            SideId::Player => "p",
            SideId::Enemy => "e",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            SideId::Player => "player",
            SideId::Enemy => "enemy",
        }
    }
}

/// The match phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Init,
    Selection,
    Roll,
    Action,
    GameOver,
}

/// One side of the match.
///
/// Invariant: `active_id` names a non-defeated roster member whenever one exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub side: SideId,
    pub characters: Vec<Character>,
    pub active_id: String,
    pub dice: Vec<Element>,
    pub has_ended_round: bool,
    /// Whether the one reroll of the current roll phase has been spent.
    pub has_rerolled: bool,
}

impl PlayerState {
    /// Creates a side with no roster.
    pub fn empty(side: SideId) -> Self {
        PlayerState {
            side,
            characters: Vec::new(),
            active_id: String::new(),
            dice: Vec::new(),
            has_ended_round: false,
            has_rerolled: false,
        }
    }

    /// Creates a side from its instantiated roster; the first member starts active.
    pub fn with_roster(side: SideId, characters: Vec<Character>) -> Self {
        let active_id = characters.first().map(|c| c.id.clone()).unwrap_or_default();
        PlayerState { active_id, characters, ..PlayerState::empty(side) }
    }

    pub fn character(&self, id: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    pub fn character_mut(&mut self, id: &str) -> Option<&mut Character> {
        self.characters.iter_mut().find(|c| c.id == id)
    }

    pub fn active(&self) -> Option<&Character> {
        self.character(&self.active_id)
    }

    pub fn active_mut(&mut self) -> Option<&mut Character> {
        let id = self.active_id.clone();
        self.character_mut(&id)
    }

    /// True once every roster member is defeated (false for an empty roster).
    pub fn all_defeated(&self) -> bool {
        !self.characters.is_empty() && self.characters.iter().all(|c| c.is_defeated)
    }

    /// First non-defeated member other than `except`, in roster order.
    pub fn first_alive_except(&self, except: &str) -> Option<&Character> {
        self.characters.iter().find(|c| !c.is_defeated && c.id != except)
    }

    /// Moves `active_id` to the first living member if the active one is defeated.
    /// Returns the new active id when it changed.
    pub fn retarget_if_defeated(&mut self) -> Option<String> {
        let defeated = self.active().map(|c| c.is_defeated).unwrap_or(true);
        if !defeated {
            return None;
        }
        let next = self.characters.iter().find(|c| !c.is_defeated)?.id.clone();
        if next == self.active_id {
            return None;
        }
        self.active_id = next.clone();
        Some(next)
    }
}

/// The aggregate root of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: Phase,
    pub turn: SideId,
    pub round: u32,
    pub player: PlayerState,
    pub enemy: PlayerState,
    pub winner: Option<SideId>,
    /// The most recent events, oldest first, at most `LOG_CAPACITY` long.
    pub log: Vec<Event>,
}

impl GameState {
    /// A fresh match in the `Init` phase.
    pub fn new() -> Self {
        GameState {
            phase: Phase::Init,
            turn: SideId::Player,
            round: 1,
            player: PlayerState::empty(SideId::Player),
            enemy: PlayerState::empty(SideId::Enemy),
            winner: None,
            log: Vec::new(),
        }
    }

    pub fn side(&self, side: SideId) -> &PlayerState {
        match side {
            SideId::Player => &self.player,
            SideId::Enemy => &self.enemy,
        }
    }

    pub fn side_mut(&mut self, side: SideId) -> &mut PlayerState {
        match side {
            SideId::Player => &mut self.player,
            SideId::Enemy => &mut self.enemy,
        }
    }

    /// Borrows the acting side and its opponent mutably at the same time.
    pub fn sides_mut(&mut self, acting: SideId) -> (&mut PlayerState, &mut PlayerState) {
        match acting {
            SideId::Player => (&mut self.player, &mut self.enemy),
            SideId::Enemy => (&mut self.enemy, &mut self.player),
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Appends events to the log, dropping the oldest beyond `LOG_CAPACITY`.
    pub fn record(&mut self, events: &[Event]) {
        self.log.extend_from_slice(events);
        if self.log.len() > LOG_CAPACITY {
            let excess = self.log.len() - LOG_CAPACITY;
            self.log.drain(..excess);
        }
    }

    /// Iterates over every character on both sides.
    pub fn all_characters(&self) -> impl Iterator<Item = &Character> {
        self.player.characters.iter().chain(self.enemy.characters.iter())
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}
