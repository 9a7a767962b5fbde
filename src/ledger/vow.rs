//! Vows: a self-imposed bonus paired with a restriction.
//!
//! While a vow is active every player attack deals `bonus` extra damage, and
//! the vow's restriction applies. Cards flagged `requires_vow` are only
//! playable while a vow is active.

use serde::{Deserialize, Serialize};

/// What a vow forbids while it is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VowRestriction {
    /// Block effects grant nothing.
    NoBlock,
    /// Skill cards cannot be played.
    NoSkills,
    /// Heal effects restore nothing (devotion is still gained).
    NoHealing,
}

impl std::fmt::Display for VowRestriction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            VowRestriction::NoBlock => "no block",
            VowRestriction::NoSkills => "no skills",
            VowRestriction::NoHealing => "no healing",
        };
        write!(f, "{}", label)
    }
}

/// The player's currently sworn vow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveVow {
    pub bonus: i32,
    pub restriction: VowRestriction,
    /// Player turns left, counted down during upkeep.
    pub turns_remaining: u32,
}

impl ActiveVow {
    /// Create a vow.
    #[must_use]
    pub const fn new(bonus: i32, restriction: VowRestriction, turns: u32) -> Self {
        Self {
            bonus,
            restriction,
            turns_remaining: turns,
        }
    }

    /// Check whether this vow forbids something.
    #[must_use]
    pub fn forbids(&self, restriction: VowRestriction) -> bool {
        self.restriction == restriction
    }

    /// Count down one turn. Returns false once the vow has expired.
    pub fn tick(&mut self) -> bool {
        self.turns_remaining = self.turns_remaining.saturating_sub(1);
        self.turns_remaining > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbids() {
        let vow = ActiveVow::new(3, VowRestriction::NoBlock, 2);
        assert!(vow.forbids(VowRestriction::NoBlock));
        assert!(!vow.forbids(VowRestriction::NoSkills));
    }

    #[test]
    fn test_tick_expires() {
        let mut vow = ActiveVow::new(3, VowRestriction::NoHealing, 2);
        assert!(vow.tick());
        assert!(!vow.tick());
        assert_eq!(vow.turns_remaining, 0);
    }
}
