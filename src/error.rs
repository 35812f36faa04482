//! Rejected-action errors.
//!
//! The rules produce exactly one error kind: a failed precondition. A rejected
//! action leaves the game state untouched.

use thiserror::Error;

/// Why an action was rejected. `Display` yields the user-facing reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    NotYourTurn,
    WrongPhase,
    InsufficientDice,
    InsufficientEnergy,
    Frozen,
    TargetInvalid,
    TargetDefeated,
    UnknownSkill,
    RoundAlreadyEnded,
    AlreadyRerolled,
    InvalidSelection,
}

impl Reason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Reason::NotYourTurn => "not your turn",
            Reason::WrongPhase => "wrong phase",
            Reason::InsufficientDice => "insufficient dice",
            Reason::InsufficientEnergy => "insufficient energy",
            Reason::Frozen => "frozen",
            Reason::TargetInvalid => "target invalid",
            Reason::TargetDefeated => "target defeated",
            Reason::UnknownSkill => "unknown skill",
            Reason::RoundAlreadyEnded => "round already ended",
            Reason::AlreadyRerolled => "already rerolled",
            Reason::InvalidSelection => "invalid selection",
        }
    }
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by a rules transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("{0}")]
    PreconditionFailed(Reason),
}

impl ActionError {
    pub const fn reason(self) -> Reason {
        match self {
            ActionError::PreconditionFailed(reason) => reason,
        }
    }
}

impl From<Reason> for ActionError {
    fn from(reason: Reason) -> Self {
        ActionError::PreconditionFailed(reason)
    }
}

/// Returns `Err(reason)` unless `condition` holds.
pub fn ensure(condition: bool, reason: Reason) -> Result<(), ActionError> {
    if condition {
        Ok(())
    } else {
        Err(ActionError::PreconditionFailed(reason))
    }
}
