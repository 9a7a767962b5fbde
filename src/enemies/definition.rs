//! Enemy definitions - static enemy data.
//!
//! An `EnemyDefinition` is external catalog data: base stats, either a flat
//! move list or an ordered list of phases with their own move lists, and the
//! health-fraction thresholds that promote the enemy between phases.

use serde::{Deserialize, Serialize};

use crate::ledger::StatusKind;

/// Unique identifier for an enemy type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EnemyTypeId(pub u32);

impl EnemyTypeId {
    /// Create a new enemy type ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EnemyTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EnemyType({})", self.0)
    }
}

/// Identifier of a move within an enemy's move set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MoveId(pub u32);

impl MoveId {
    /// Move ID of the fallback attack intent.
    pub const FALLBACK: MoveId = MoveId(u32::MAX);

    /// Create a new move ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Boss/elite classification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyRank {
    #[default]
    Normal,
    Elite,
    Boss,
}

/// What an enemy move does when it resolves.
///
/// Unknown `kind` tags deserialize to `Unrecognized` and resolve as no-ops.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntentKind {
    /// Deal damage to the player, optionally healing by the health removed.
    Attack {
        damage: i32,
        #[serde(default)]
        lifesteal: bool,
    },
    /// Deal damage `hits` times, stopping once the player is defeated.
    MultiAttack { damage: i32, hits: u32 },
    /// Gain block.
    Defend { block: i32 },
    /// Become untargetable until this enemy's next action.
    Buff,
    /// Grant bonus damage to a random living ally.
    BuffAlly { bonus: i32 },
    /// Apply a status to the player.
    Debuff {
        status: StatusKind,
        amount: i32,
        #[serde(default)]
        duration: Option<u32>,
    },
    /// Heal the most damaged living ally (or self), optionally paying health.
    Heal {
        amount: i32,
        #[serde(default)]
        self_damage: i32,
    },
    /// Add new enemies to the roster.
    Summon { enemies: Vec<EnemyTypeId> },
    #[serde(other)]
    Unrecognized,
}

impl std::fmt::Display for IntentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntentKind::Attack { damage, .. } => write!(f, "attack for {}", damage),
            IntentKind::MultiAttack { damage, hits } => write!(f, "attack for {}x{}", damage, hits),
            IntentKind::Defend { block } => write!(f, "defend for {}", block),
            IntentKind::Buff => write!(f, "shroud"),
            IntentKind::BuffAlly { bonus } => write!(f, "empower an ally by {}", bonus),
            IntentKind::Debuff { status, amount, .. } => write!(f, "apply {} {}", amount, status),
            IntentKind::Heal { amount, .. } => write!(f, "heal for {}", amount),
            IntentKind::Summon { enemies } => write!(f, "summon {}", enemies.len()),
            IntentKind::Unrecognized => write!(f, "do something unknown"),
        }
    }
}

fn default_weight() -> u32 {
    1
}

/// One entry in an enemy's move set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyMove {
    pub id: MoveId,
    pub name: String,

    /// Relative weight in the intent roll.
    #[serde(default = "default_weight")]
    pub weight: u32,

    pub intent: IntentKind,

    /// Once resolved, never selected again this combat.
    #[serde(default)]
    pub once_per_combat: bool,
}

impl EnemyMove {
    /// Create a move with weight 1.
    #[must_use]
    pub fn new(id: MoveId, name: impl Into<String>, intent: IntentKind) -> Self {
        Self {
            id,
            name: name.into(),
            weight: 1,
            intent,
            once_per_combat: false,
        }
    }

    /// Set the roll weight (builder pattern).
    #[must_use]
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    /// Mark as once-per-combat (builder pattern).
    #[must_use]
    pub fn once_per_combat(mut self) -> Self {
        self.once_per_combat = true;
        self
    }
}

/// A health-gated stage of a multi-phase enemy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyPhase {
    pub name: String,
    pub moves: Vec<EnemyMove>,
}

impl EnemyPhase {
    /// Create a phase.
    #[must_use]
    pub fn new(name: impl Into<String>, moves: Vec<EnemyMove>) -> Self {
        Self {
            name: name.into(),
            moves,
        }
    }
}

/// Static enemy definition.
///
/// ## Example
///
/// ```
/// use deck_combat::enemies::{EnemyDefinition, EnemyMove, EnemyTypeId, IntentKind, MoveId};
///
/// let slime = EnemyDefinition::new(EnemyTypeId::new(1), "Slime", 30)
///     .with_move(EnemyMove::new(
///         MoveId::new(0),
///         "Tackle",
///         IntentKind::Attack { damage: 6, lifesteal: false },
///     ));
///
/// assert_eq!(slime.active_moves(0).len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyDefinition {
    pub id: EnemyTypeId,
    pub name: String,
    pub max_health: i32,

    #[serde(default)]
    pub rank: EnemyRank,

    /// Flat move list, used when `phases` is empty.
    #[serde(default)]
    pub moves: Vec<EnemyMove>,

    /// Ordered phases, each with its own move list.
    #[serde(default)]
    pub phases: Vec<EnemyPhase>,

    /// Health fractions that each advance the phase once crossed.
    #[serde(default)]
    pub thresholds: Vec<f64>,
}

impl EnemyDefinition {
    /// Create a definition with no moves.
    #[must_use]
    pub fn new(id: EnemyTypeId, name: impl Into<String>, max_health: i32) -> Self {
        Self {
            id,
            name: name.into(),
            max_health,
            rank: EnemyRank::Normal,
            moves: Vec::new(),
            phases: Vec::new(),
            thresholds: Vec::new(),
        }
    }

    /// Set the rank (builder pattern).
    #[must_use]
    pub fn with_rank(mut self, rank: EnemyRank) -> Self {
        self.rank = rank;
        self
    }

    /// Add a move to the flat list (builder pattern).
    #[must_use]
    pub fn with_move(mut self, enemy_move: EnemyMove) -> Self {
        self.moves.push(enemy_move);
        self
    }

    /// Add a phase (builder pattern).
    #[must_use]
    pub fn with_phase(mut self, phase: EnemyPhase) -> Self {
        self.phases.push(phase);
        self
    }

    /// Set the phase thresholds (builder pattern).
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: Vec<f64>) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Moves available in a phase.
    ///
    /// The flat list when no phases are defined; otherwise the move list of
    /// `phase`, clamped to the last defined phase.
    #[must_use]
    pub fn active_moves(&self, phase: usize) -> &[EnemyMove] {
        if self.phases.is_empty() {
            return &self.moves;
        }
        let index = phase.min(self.phases.len() - 1);
        &self.phases[index].moves
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attack(id: u32, damage: i32) -> EnemyMove {
        EnemyMove::new(MoveId::new(id), "Hit", IntentKind::Attack { damage, lifesteal: false })
    }

    #[test]
    fn test_flat_moves() {
        let def = EnemyDefinition::new(EnemyTypeId::new(1), "Rat", 12).with_move(attack(0, 3));

        assert_eq!(def.active_moves(0).len(), 1);
        assert_eq!(def.active_moves(4).len(), 1);
    }

    #[test]
    fn test_phase_moves_clamp_to_last() {
        let def = EnemyDefinition::new(EnemyTypeId::new(2), "Warden", 250)
            .with_phase(EnemyPhase::new("Calm", vec![attack(0, 5)]))
            .with_phase(EnemyPhase::new("Wrath", vec![attack(1, 9), attack(2, 12)]));

        assert_eq!(def.active_moves(0)[0].id, MoveId::new(0));
        assert_eq!(def.active_moves(1).len(), 2);
        assert_eq!(def.active_moves(7).len(), 2);
    }

    #[test]
    fn test_intent_display() {
        assert_eq!(IntentKind::Attack { damage: 6, lifesteal: false }.to_string(), "attack for 6");
        assert_eq!(IntentKind::MultiAttack { damage: 3, hits: 4 }.to_string(), "attack for 3x4");
    }

    #[test]
    fn test_definition_serde_defaults() {
        let json = r#"{
            "id": 7,
            "name": "Cultist",
            "max_health": 48,
            "moves": [
                {
                    "id": 0,
                    "name": "Incantation",
                    "intent": { "kind": "buff" },
                    "once_per_combat": true
                },
                { "id": 1, "name": "Dark Strike", "intent": { "kind": "attack", "damage": 6 } }
            ]
        }"#;

        let def: EnemyDefinition = serde_json::from_str(json).unwrap();

        assert_eq!(def.rank, EnemyRank::Normal);
        assert!(def.moves[0].once_per_combat);
        assert_eq!(def.moves[1].weight, 1);
        assert_eq!(def.moves[1].intent, IntentKind::Attack { damage: 6, lifesteal: false });
        assert!(def.thresholds.is_empty());
    }

    #[test]
    fn test_unknown_intent_kind_loads() {
        let json = r#"{ "id": 3, "name": "Stare", "intent": { "kind": "gaze_into_abyss" } }"#;
        let enemy_move: EnemyMove = serde_json::from_str(json).unwrap();
        assert_eq!(enemy_move.intent, IntentKind::Unrecognized);
    }
}
