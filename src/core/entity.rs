//! Card instance identification.
//!
//! Every card instance in a combat has a unique `InstanceId`. Two copies of
//! the same card definition share a `CardId` but never an `InstanceId`.
//!
//! ## Usage
//!
//! ```
//! use deck_combat::core::InstanceAllocator;
//!
//! let mut ids = InstanceAllocator::new();
//! let a = ids.next_id();
//! let b = ids.next_id();
//! assert_ne!(a, b);
//! assert_eq!(b.raw(), a.raw() + 1);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// Create a new instance ID.
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

impl From<u32> for InstanceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Instance({})", self.0)
    }
}

/// Hands out sequential instance IDs.
///
/// One allocator is used per run so instance IDs stay unique across every
/// deck assembled from recipes.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InstanceAllocator {
    next: u32,
}

impl InstanceAllocator {
    /// Create an allocator starting at ID 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an allocator starting at a specific ID.
    #[must_use]
    pub fn starting_at(first: u32) -> Self {
        Self { next: first }
    }

    /// Allocate the next instance ID.
    pub fn next_id(&mut self) -> InstanceId {
        let id = InstanceId(self.next);
        self.next += 1;
        id
    }

    /// Peek at the ID the next call will return.
    #[must_use]
    pub fn peek(&self) -> InstanceId {
        InstanceId(self.next)
    }
}
