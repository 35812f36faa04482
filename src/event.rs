//! Outbound notifications.
//!
//! Every accepted action returns the events it produced, in order. They are
//! informational only: the presentation layer animates or narrates them, and
//! the rules never read them back (apart from the bounded log on `GameState`).

use serde::{Deserialize, Serialize};

use crate::model::{Element, SideId, StatusKind};
use crate::reaction::Reaction;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    SelectionOpened,
    MatchStarted {
        player: Vec<String>,
        enemy: Vec<String>,
    },
    DiceRolled {
        side: SideId,
        dice: Vec<Element>,
    },
    DiceRerolled {
        side: SideId,
        indices: Vec<usize>,
        dice: Vec<Element>,
    },
    SkillExecuted {
        side: SideId,
        attacker: String,
        skill: String,
        target: Option<String>,
        reaction: Option<Reaction>,
        damage: u32,
        shield_absorbed: u32,
    },
    Healed {
        character: String,
        amount: u32,
    },
    StatusApplied {
        character: String,
        kind: StatusKind,
        duration: u32,
    },
    StatusExpired {
        character: String,
        kind: StatusKind,
    },
    BenchDamaged {
        character: String,
        damage: u32,
    },
    BurnTick {
        character: String,
        damage: u32,
    },
    Switched {
        side: SideId,
        to: String,
        forced: bool,
    },
    ActionSkipped {
        side: SideId,
        character: String,
    },
    CharacterDefeated {
        character: String,
    },
    RoundEnded {
        side: SideId,
        forced: bool,
    },
    RoundAdvanced {
        round: u32,
    },
    MatchEnded {
        winner: SideId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_type_tag() {
        let json = serde_json::to_string(&Event::RoundAdvanced { round: 2 }).unwrap();
        assert_eq!(json, r#"{"type":"round_advanced","round":2}"#);
    }

    #[test]
    fn skill_event_carries_reaction() {
        let event = Event::SkillExecuted {
            side: SideId::Player,
            attacker: "p_diluc".into(),
            skill: "p_dlk_2".into(),
            target: Some("e_paimon".into()),
            reaction: Some(Reaction::Vaporize),
            damage: 3,
            shield_absorbed: 0,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""reaction":"Vaporize""#));
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
