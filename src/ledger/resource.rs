//! Class-specific numeric resources.
//!
//! Rather than a struct field per class mechanic, the player carries a
//! `ResourceLedger`: a map from `ResourceKind` to a value, plus a
//! `ResourceRule` per kind describing its cap and how it decays between
//! turns. All resource mutation goes through the ledger so clamping is
//! applied in exactly one place.
//!
//! ```
//! use deck_combat::ledger::{Decay, ResourceKind, ResourceLedger, ResourceRule};
//!
//! let mut ledger = ResourceLedger::new();
//! ledger.set_rule(ResourceKind::Favor, ResourceRule::capped(3));
//!
//! ledger.add(ResourceKind::Favor, 5);
//! assert_eq!(ledger.get(ResourceKind::Favor), 3);
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A tracked class resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Gained by every heal effect.
    Devotion,
    /// Persistent shield consumed after block.
    Fortify,
    /// Adds weight to lucky whimsy outcomes.
    Luck,
    Radiance,
    Favor,
    Tide,
    Shadow,
    Corruption,
    /// One-shot bonus damage consumed by the next damage effect.
    Empower,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ResourceKind::Devotion => "devotion",
            ResourceKind::Fortify => "fortify",
            ResourceKind::Luck => "luck",
            ResourceKind::Radiance => "radiance",
            ResourceKind::Favor => "favor",
            ResourceKind::Tide => "tide",
            ResourceKind::Shadow => "shadow",
            ResourceKind::Corruption => "corruption",
            ResourceKind::Empower => "empower",
        };
        write!(f, "{}", label)
    }
}

/// How a resource changes during the player's turn upkeep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decay {
    /// Value persists across turns.
    #[default]
    Never,
    /// Value drops to zero.
    Reset,
    /// Value drops by a fixed amount.
    Fixed(i32),
    /// Value is halved, rounding down.
    Halve,
}

impl Decay {
    /// Value after one upkeep step.
    #[must_use]
    pub fn apply(self, value: i32) -> i32 {
        match self {
            Decay::Never => value,
            Decay::Reset => 0,
            Decay::Fixed(amount) => (value - amount).max(0),
            Decay::Halve => value / 2,
        }
    }
}

/// Cap and decay rule for one resource kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRule {
    /// Maximum value. `None` for uncapped.
    #[serde(default)]
    pub cap: Option<i32>,

    /// Upkeep behaviour.
    #[serde(default)]
    pub decay: Decay,
}

impl ResourceRule {
    /// Uncapped, never decays.
    #[must_use]
    pub const fn persistent() -> Self {
        Self {
            cap: None,
            decay: Decay::Never,
        }
    }

    /// Capped, never decays.
    #[must_use]
    pub const fn capped(cap: i32) -> Self {
        Self {
            cap: Some(cap),
            decay: Decay::Never,
        }
    }

    /// Set the decay rule (builder pattern).
    #[must_use]
    pub const fn with_decay(mut self, decay: Decay) -> Self {
        self.decay = decay;
        self
    }

    /// Clamp a value into `0..=cap`.
    #[must_use]
    pub fn clamp(&self, value: i32) -> i32 {
        let floored = value.max(0);
        match self.cap {
            Some(cap) => floored.min(cap),
            None => floored,
        }
    }
}

/// A change to one resource, reported so callers can emit events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceChange {
    pub kind: ResourceKind,
    pub old: i32,
    pub new: i32,
}

/// Per-holder resource values and rules.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLedger {
    values: FxHashMap<ResourceKind, i32>,
    rules: FxHashMap<ResourceKind, ResourceRule>,
}

impl ResourceLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the rule for a resource kind.
    ///
    /// The current value is re-clamped against the new cap.
    pub fn set_rule(&mut self, kind: ResourceKind, rule: ResourceRule) {
        self.rules.insert(kind, rule);
        if let Some(value) = self.values.get_mut(&kind) {
            *value = rule.clamp(*value);
        }
    }

    /// Get the rule for a resource kind (persistent if unregistered).
    #[must_use]
    pub fn rule(&self, kind: ResourceKind) -> ResourceRule {
        self.rules.get(&kind).copied().unwrap_or_default()
    }

    /// Get a resource value (0 if never set).
    #[must_use]
    pub fn get(&self, kind: ResourceKind) -> i32 {
        self.values.get(&kind).copied().unwrap_or(0)
    }

    /// Set a resource value, clamped by its rule.
    ///
    /// Returns the change, or `None` if the value did not move.
    pub fn set(&mut self, kind: ResourceKind, value: i32) -> Option<ResourceChange> {
        let old = self.get(kind);
        let new = self.rule(kind).clamp(value);
        if old == new {
            return None;
        }
        self.values.insert(kind, new);
        Some(ResourceChange { kind, old, new })
    }

    /// Add a delta to a resource value, clamped by its rule.
    pub fn add(&mut self, kind: ResourceKind, delta: i32) -> Option<ResourceChange> {
        let current = self.get(kind);
        self.set(kind, current.saturating_add(delta))
    }

    /// Remove up to `amount` from a resource.
    ///
    /// Returns how much was actually removed and the change.
    pub fn consume(&mut self, kind: ResourceKind, amount: i32) -> (i32, Option<ResourceChange>) {
        let current = self.get(kind);
        let taken = amount.clamp(0, current);
        (taken, self.set(kind, current - taken))
    }

    /// Remove the whole value of a resource.
    pub fn take_all(&mut self, kind: ResourceKind) -> (i32, Option<ResourceChange>) {
        let current = self.get(kind);
        self.consume(kind, current)
    }

    /// Apply every registered decay rule.
    ///
    /// Changes are returned in `ResourceKind` order.
    pub fn decay_all(&mut self) -> Vec<ResourceChange> {
        let mut kinds: Vec<ResourceKind> = self.values.keys().copied().collect();
        kinds.sort();

        kinds
            .into_iter()
            .filter_map(|kind| {
                let decayed = self.rule(kind).decay.apply(self.get(kind));
                self.set(kind, decayed)
            })
            .collect()
    }

    /// Iterate over non-zero resources in `ResourceKind` order.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, i32)> {
        let mut entries: Vec<(ResourceKind, i32)> = self
            .values
            .iter()
            .filter(|(_, &v)| v != 0)
            .map(|(&k, &v)| (k, v))
            .collect();
        entries.sort_by_key(|(k, _)| *k);
        entries.into_iter()
    }
}
