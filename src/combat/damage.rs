//! Damage application helpers: shields and bench damage.

use crate::event::Event;
use crate::model::{Character, PlayerState, StatusKind};

/// Drains the character's `Shield` point for point before HP.
///
/// Returns `(absorbed, remaining)`. A depleted shield is removed.
pub fn absorb_with_shield(character: &mut Character, damage: u32) -> (u32, u32) {
    if damage == 0 {
        return (0, 0);
    }
    let pool = match character.status(StatusKind::Shield) {
        Some(shield) => shield.value_or(0),
        None => return (0, damage),
    };

    let absorbed = pool.min(damage);
    let left = pool - absorbed;
    if left == 0 {
        character.remove_status(StatusKind::Shield);
    } else if let Some(shield) = character.statuses.iter_mut().find(|s| s.kind == StatusKind::Shield)
    {
        shield.value = Some(left);
    }
    (absorbed, damage - absorbed)
}

/// Deals `amount` to every living character on `side` other than `target_id`.
/// Shields are bypassed; HP floors at zero.
pub fn apply_bench_damage(
    side: &mut PlayerState,
    target_id: &str,
    amount: u32,
    events: &mut Vec<Event>,
) {
    if amount == 0 {
        return;
    }
    for c in side.characters.iter_mut() {
        if c.id == target_id || c.is_defeated {
            continue;
        }
        let lost = c.take_damage(amount);
        events.push(Event::BenchDamaged { character: c.id.clone(), damage: lost });
        if c.is_defeated {
            events.push(Event::CharacterDefeated { character: c.id.clone() });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::standard_roster;
    use crate::model::{CharacterStatus, SideId};

    fn character() -> Character {
        Character::from_template(&standard_roster().characters[2], "p")
    }

    #[test]
    fn shield_absorbs_part_and_breaks() {
        let mut c = character();
        c.upsert_status(CharacterStatus::with_value(StatusKind::Shield, 2, 3));
        assert_eq!(absorb_with_shield(&mut c, 5), (3, 2));
        assert!(!c.has_status(StatusKind::Shield));
    }

    #[test]
    fn shield_absorbs_all_and_keeps_remainder() {
        let mut c = character();
        c.upsert_status(CharacterStatus::with_value(StatusKind::Shield, 2, 3));
        assert_eq!(absorb_with_shield(&mut c, 2), (2, 0));
        assert_eq!(c.status(StatusKind::Shield).unwrap().value, Some(1));
    }

    #[test]
    fn exact_shield_is_removed() {
        let mut c = character();
        c.upsert_status(CharacterStatus::with_value(StatusKind::Shield, 2, 2));
        assert_eq!(absorb_with_shield(&mut c, 2), (2, 0));
        assert!(!c.has_status(StatusKind::Shield));
    }

    #[test]
    fn zero_damage_leaves_shield() {
        let mut c = character();
        c.upsert_status(CharacterStatus::with_value(StatusKind::Shield, 2, 1));
        assert_eq!(absorb_with_shield(&mut c, 0), (0, 0));
        assert!(c.has_status(StatusKind::Shield));
    }

    #[test]
    fn bench_damage_skips_target_and_defeated() {
        let roster = standard_roster();
        let chars = roster.characters[..3]
            .iter()
            .map(|t| Character::from_template(t, "e"))
            .collect();
        let mut side = PlayerState::with_roster(SideId::Enemy, chars);
        side.characters[2].current_hp = 1;
        let target = side.active_id.clone();
        let mut events = Vec::new();
        apply_bench_damage(&mut side, &target, 1, &mut events);

        assert_eq!(side.characters[0].current_hp, side.characters[0].max_hp);
        assert_eq!(side.characters[1].current_hp, side.characters[1].max_hp - 1);
        assert!(side.characters[2].is_defeated);
        assert_eq!(events.len(), 3);

        events.clear();
        apply_bench_damage(&mut side, &target, 1, &mut events);
        assert_eq!(events.len(), 1);
    }
}
