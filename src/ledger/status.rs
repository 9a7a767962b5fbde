//! Stacking status effects.
//!
//! A holder (the player or an enemy) has at most one entry per
//! `StatusKind`. Re-applying a kind merges into the existing entry using
//! that kind's `MergeRule`:
//!
//! | Kind                      | Rule                     |
//! |---------------------------|--------------------------|
//! | Weak, Vulnerable, Frail   | `Refresh`                |
//! | Poison, Regeneration      | `Additive` (counter)     |
//! | Strength                  | `Additive`               |
//! | Debt                      | `AdditiveLongerDuration` |
//!
//! Durations count down at the end of the holder's turn, except `Debt`,
//! which counts down at the start of the player's turn when it is paid.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Status effect type tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    /// Deals reduced damage.
    Weak,
    /// Takes increased damage.
    Vulnerable,
    /// Gains reduced block.
    Frail,
    /// Loses `amount` health at turn start, then `amount` drops by one.
    Poison,
    /// Heals `amount` at turn start, then `amount` drops by one.
    Regeneration,
    /// Adds `amount` to attack damage.
    Strength,
    /// The recurring cost of a priced card: lose `amount` health each turn.
    Debt,
}

/// How a re-applied status merges into an existing entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergeRule {
    /// Amount and duration each become the larger of old and new.
    Refresh,
    /// Amounts add; duration becomes the larger of old and new.
    Additive,
    /// Amounts add; duration becomes the longer one.
    AdditiveLongerDuration,
}

impl StatusKind {
    /// Merge rule for this kind.
    #[must_use]
    pub const fn merge_rule(self) -> MergeRule {
        match self {
            StatusKind::Weak | StatusKind::Vulnerable | StatusKind::Frail => MergeRule::Refresh,
            StatusKind::Poison | StatusKind::Regeneration | StatusKind::Strength => {
                MergeRule::Additive
            }
            StatusKind::Debt => MergeRule::AdditiveLongerDuration,
        }
    }

    /// Whether the amount itself counts down each tick.
    #[must_use]
    pub const fn is_counter(self) -> bool {
        matches!(self, StatusKind::Poison | StatusKind::Regeneration)
    }

    /// Whether the duration counts down at the holder's turn start
    /// (when it is paid) instead of at turn end.
    #[must_use]
    pub const fn ticks_at_upkeep(self) -> bool {
        matches!(self, StatusKind::Debt)
    }
}

impl std::fmt::Display for StatusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            StatusKind::Weak => "Weak",
            StatusKind::Vulnerable => "Vulnerable",
            StatusKind::Frail => "Frail",
            StatusKind::Poison => "Poison",
            StatusKind::Regeneration => "Regeneration",
            StatusKind::Strength => "Strength",
            StatusKind::Debt => "Debt",
        };
        write!(f, "{}", label)
    }
}

/// One active status on a holder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: StatusKind,
    /// Stack amount, always at least 1 while the entry exists.
    pub amount: i32,
    /// Remaining turns. `None` for effects without a duration.
    pub duration: Option<u32>,
}

impl StatusEffect {
    /// Create a status effect.
    #[must_use]
    pub const fn new(kind: StatusKind, amount: i32, duration: Option<u32>) -> Self {
        Self {
            kind,
            amount,
            duration,
        }
    }

    fn merge(&mut self, incoming: &StatusEffect) {
        let longer = match (self.duration, incoming.duration) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        match self.kind.merge_rule() {
            MergeRule::Refresh => {
                self.amount = self.amount.max(incoming.amount);
                self.duration = longer;
            }
            MergeRule::Additive | MergeRule::AdditiveLongerDuration => {
                self.amount = self.amount.saturating_add(incoming.amount);
                self.duration = longer;
            }
        }
    }
}

/// Result of a status bookkeeping step, reported so callers can emit events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusChange {
    /// The entry now has these values.
    Updated(StatusEffect),
    /// The entry was removed.
    Removed(StatusKind),
}

/// Active statuses on one holder, in application order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSet {
    entries: SmallVec<[StatusEffect; 4]>,
}

impl StatusSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a status, merging with an existing entry of the same kind.
    ///
    /// Amounts below 1 are ignored and return `None`.
    pub fn apply(&mut self, incoming: StatusEffect) -> Option<StatusEffect> {
        if incoming.amount < 1 || incoming.duration == Some(0) {
            return None;
        }

        if let Some(existing) = self.entries.iter_mut().find(|e| e.kind == incoming.kind) {
            existing.merge(&incoming);
            Some(*existing)
        } else {
            self.entries.push(incoming);
            Some(incoming)
        }
    }

    /// Get an active status.
    #[must_use]
    pub fn get(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.entries.iter().find(|e| e.kind == kind)
    }

    /// Stack amount of a status (0 if absent).
    #[must_use]
    pub fn amount(&self, kind: StatusKind) -> i32 {
        self.get(kind).map_or(0, |e| e.amount)
    }

    /// Check if a status is active.
    #[must_use]
    pub fn has(&self, kind: StatusKind) -> bool {
        self.get(kind).is_some()
    }

    /// Remove a status. Returns true if it was present.
    pub fn remove(&mut self, kind: StatusKind) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.kind != kind);
        self.entries.len() != before
    }

    /// Count down a counter status (poison, regeneration).
    ///
    /// Returns the amount that should take effect this tick, plus the
    /// resulting change. `None` if the status is absent.
    pub fn tick_counter(&mut self, kind: StatusKind) -> Option<(i32, StatusChange)> {
        let pos = self.entries.iter().position(|e| e.kind == kind)?;
        let amount = self.entries[pos].amount;

        self.entries[pos].amount -= 1;
        if self.entries[pos].amount < 1 {
            self.entries.remove(pos);
            Some((amount, StatusChange::Removed(kind)))
        } else {
            Some((amount, StatusChange::Updated(self.entries[pos])))
        }
    }

    /// Count down the duration of one status, removing it at zero.
    ///
    /// `None` if the status is absent or has no duration.
    pub fn tick_duration(&mut self, kind: StatusKind) -> Option<StatusChange> {
        let pos = self.entries.iter().position(|e| e.kind == kind)?;
        let turns = self.entries[pos].duration?.saturating_sub(1);

        if turns == 0 {
            self.entries.remove(pos);
            Some(StatusChange::Removed(kind))
        } else {
            self.entries[pos].duration = Some(turns);
            Some(StatusChange::Updated(self.entries[pos]))
        }
    }

    /// Count down every turn-end duration by one turn, removing expired
    /// entries. Statuses that tick at upkeep are left alone.
    pub fn expire_durations(&mut self) -> Vec<StatusChange> {
        let mut changes = Vec::new();

        for entry in self.entries.iter_mut() {
            if entry.kind.ticks_at_upkeep() {
                continue;
            }
            if let Some(turns) = entry.duration.as_mut() {
                *turns = turns.saturating_sub(1);
                if *turns > 0 {
                    changes.push(StatusChange::Updated(*entry));
                } else {
                    changes.push(StatusChange::Removed(entry.kind));
                }
            }
        }

        self.entries.retain(|e| e.duration != Some(0));
        changes
    }

    /// Iterate over active statuses.
    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.entries.iter()
    }

    /// Number of active statuses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no statuses are active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
