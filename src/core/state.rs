//! Combat state.
//!
//! ## CombatPhase
//!
//! `NotStarted → Draw → PlayerAction → EnemyAction → Cleanup → Draw → …`,
//! ending in `Victory` or `Defeat`.
//!
//! ## CombatState
//!
//! The root of all combat data, exclusively owned by one `CombatEngine`.
//! Uses `im` persistent vectors so a snapshot handed to callers is an O(1)
//! defensive copy.
//!
//! Invariant: `game_over` is true exactly when the phase is `Victory` or
//! `Defeat`.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::player::Player;

/// Combat-wide phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatPhase {
    #[default]
    NotStarted,
    Draw,
    PlayerAction,
    EnemyAction,
    Cleanup,
    Victory,
    Defeat,
}

impl CombatPhase {
    /// Check if this is a terminal phase.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, CombatPhase::Victory | CombatPhase::Defeat)
    }
}

impl std::fmt::Display for CombatPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CombatPhase::NotStarted => "not started",
            CombatPhase::Draw => "draw",
            CombatPhase::PlayerAction => "player action",
            CombatPhase::EnemyAction => "enemy action",
            CombatPhase::Cleanup => "cleanup",
            CombatPhase::Victory => "victory",
            CombatPhase::Defeat => "defeat",
        };
        write!(f, "{}", label)
    }
}

/// Complete combat state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatState {
    /// Turn number (starts at 1).
    pub turn: u32,

    phase: CombatPhase,

    pub player: Player,

    /// Roster in acting order. Dead enemies stay in place.
    pub enemies: Vector<Enemy>,

    game_over: bool,
    victory: bool,
}

impl CombatState {
    /// Create a state that has not started.
    #[must_use]
    pub fn new(player: Player, enemies: Vec<Enemy>) -> Self {
        Self {
            turn: 1,
            phase: CombatPhase::NotStarted,
            player,
            enemies: enemies.into_iter().collect(),
            game_over: false,
            victory: false,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    /// Move to a non-terminal phase. Returns the previous phase.
    ///
    /// Ignored once the combat is over.
    pub(crate) fn set_phase(&mut self, phase: CombatPhase) -> CombatPhase {
        let previous = self.phase;
        if !self.game_over && !phase.is_terminal() {
            self.phase = phase;
        }
        previous
    }

    /// End the combat. Returns the previous phase, or `None` if it was
    /// already over.
    pub(crate) fn finish(&mut self, victory: bool) -> Option<CombatPhase> {
        if self.game_over {
            return None;
        }
        let previous = self.phase;
        self.game_over = true;
        self.victory = victory;
        self.phase = if victory {
            CombatPhase::Victory
        } else {
            CombatPhase::Defeat
        };
        Some(previous)
    }

    /// Check if the combat has ended.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.game_over
    }

    /// Check if the player won.
    #[must_use]
    pub fn is_victory(&self) -> bool {
        self.victory
    }

    /// Get an enemy by roster index.
    #[must_use]
    pub fn enemy(&self, index: usize) -> Option<&Enemy> {
        self.enemies.get(index)
    }

    /// Roster indices of living enemies.
    #[must_use]
    pub fn living_enemies(&self) -> Vec<usize> {
        self.enemies
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_alive())
            .map(|(i, _)| i)
            .collect()
    }

    /// Roster indices of enemies that may be targeted.
    #[must_use]
    pub fn targetable_enemies(&self) -> Vec<usize> {
        self.enemies
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_targetable())
            .map(|(i, _)| i)
            .collect()
    }

    /// Check if an index names a living, targetable enemy.
    #[must_use]
    pub fn is_valid_target(&self, index: usize) -> bool {
        self.enemy(index).is_some_and(Enemy::is_targetable)
    }

    /// Check if every enemy is at zero health.
    #[must_use]
    pub fn all_enemies_dead(&self) -> bool {
        self.enemies.iter().all(|e| !e.is_alive())
    }
}
