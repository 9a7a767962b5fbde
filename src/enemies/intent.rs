//! Enemy intent selection.
//!
//! An enemy telegraphs its next action as an `Intent` before it resolves.
//! Selection takes the active move list for the enemy's phase, drops
//! once-per-combat moves already used, and rolls a weighted choice over the
//! rest. With no definition or no eligible moves the enemy falls back to a
//! plain attack.

use serde::{Deserialize, Serialize};

use super::definition::{EnemyDefinition, EnemyMove, IntentKind, MoveId};
use crate::core::enemy::Enemy;
use crate::core::rng::GameRng;

/// An enemy's telegraphed next action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub move_id: MoveId,
    pub name: String,
    pub kind: IntentKind,
    pub once_per_combat: bool,
}

impl Intent {
    /// The minimal attack used when nothing else is eligible.
    #[must_use]
    pub fn fallback(damage: i32) -> Self {
        Self {
            move_id: MoveId::FALLBACK,
            name: "Attack".to_string(),
            kind: IntentKind::Attack {
                damage,
                lifesteal: false,
            },
            once_per_combat: false,
        }
    }
}

impl From<&EnemyMove> for Intent {
    fn from(enemy_move: &EnemyMove) -> Self {
        Self {
            move_id: enemy_move.id,
            name: enemy_move.name.clone(),
            kind: enemy_move.intent.clone(),
            once_per_combat: enemy_move.once_per_combat,
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

/// Moves the enemy may currently roll.
#[must_use]
pub fn eligible_moves<'a>(enemy: &Enemy, definition: &'a EnemyDefinition) -> Vec<&'a EnemyMove> {
    definition
        .active_moves(enemy.phase)
        .iter()
        .filter(|m| !(m.once_per_combat && enemy.has_used(m.id)))
        .collect()
}

/// Pick the next intent for an enemy.
pub fn select_intent(
    enemy: &Enemy,
    definition: Option<&EnemyDefinition>,
    rng: &mut GameRng,
    fallback_attack: i32,
) -> Intent {
    let Some(definition) = definition else {
        return Intent::fallback(fallback_attack);
    };

    let moves = eligible_moves(enemy, definition);
    let weights: Vec<u32> = moves.iter().map(|m| m.weight).collect();

    match rng.roll_weighted(&weights) {
        Some(index) => Intent::from(moves[index]),
        None => Intent::fallback(fallback_attack),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemies::definition::{EnemyPhase, EnemyTypeId};

    fn definition() -> EnemyDefinition {
        EnemyDefinition::new(EnemyTypeId::new(1), "Cultist", 48)
            .with_move(EnemyMove::new(MoveId::new(0), "Ritual", IntentKind::Buff).once_per_combat())
            .with_move(EnemyMove::new(
                MoveId::new(1),
                "Strike",
                IntentKind::Attack {
                    damage: 6,
                    lifesteal: false,
                },
            ))
    }

    #[test]
    fn test_fallback_without_definition() {
        let def = definition();
        let enemy = Enemy::from_definition(&def);
        let mut rng = GameRng::new(1);

        let intent = select_intent(&enemy, None, &mut rng, 5);
        assert_eq!(intent.move_id, MoveId::FALLBACK);
        assert_eq!(intent.kind, IntentKind::Attack { damage: 5, lifesteal: false });
    }

    #[test]
    fn test_used_once_per_combat_excluded() {
        let def = definition();
        let mut enemy = Enemy::from_definition(&def);
        enemy.record_move(MoveId::new(0));
        let mut rng = GameRng::new(1);

        for _ in 0..50 {
            let intent = select_intent(&enemy, Some(&def), &mut rng, 5);
            assert_eq!(intent.move_id, MoveId::new(1));
        }
    }

    #[test]
    fn test_fallback_when_nothing_eligible() {
        let def = EnemyDefinition::new(EnemyTypeId::new(2), "Totem", 20)
            .with_move(EnemyMove::new(MoveId::new(0), "Call", IntentKind::Buff).once_per_combat());
        let mut enemy = Enemy::from_definition(&def);
        enemy.record_move(MoveId::new(0));
        let mut rng = GameRng::new(1);

        let intent = select_intent(&enemy, Some(&def), &mut rng, 4);
        assert_eq!(intent.move_id, MoveId::FALLBACK);
    }

    #[test]
    fn test_zero_weight_never_chosen() {
        let def = EnemyDefinition::new(EnemyTypeId::new(3), "Golem", 60)
            .with_move(
                EnemyMove::new(MoveId::new(0), "Rest", IntentKind::Defend { block: 5 })
                    .with_weight(0),
            )
            .with_move(EnemyMove::new(
                MoveId::new(1),
                "Slam",
                IntentKind::Attack { damage: 9, lifesteal: false },
            ));
        let enemy = Enemy::from_definition(&def);
        let mut rng = GameRng::new(11);

        for _ in 0..50 {
            assert_eq!(select_intent(&enemy, Some(&def), &mut rng, 5).move_id, MoveId::new(1));
        }
    }

    #[test]
    fn test_phase_move_set() {
        let def = EnemyDefinition::new(EnemyTypeId::new(4), "Warden", 250)
            .with_phase(EnemyPhase::new(
                "Calm",
                vec![EnemyMove::new(MoveId::new(0), "Guard", IntentKind::Defend { block: 8 })],
            ))
            .with_phase(EnemyPhase::new(
                "Wrath",
                vec![EnemyMove::new(
                    MoveId::new(1),
                    "Smash",
                    IntentKind::Attack { damage: 20, lifesteal: false },
                )],
            ));
        let mut enemy = Enemy::from_definition(&def);
        let mut rng = GameRng::new(5);

        assert_eq!(select_intent(&enemy, Some(&def), &mut rng, 5).move_id, MoveId::new(0));
        enemy.phase = 1;
        assert_eq!(select_intent(&enemy, Some(&def), &mut rng, 5).move_id, MoveId::new(1));
    }
}
