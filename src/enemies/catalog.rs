//! Enemy catalog for definition lookup.
//!
//! Summons resolve enemy type IDs against the catalog during combat; an ID
//! that is not registered makes the summon a logged no-op.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::definition::{EnemyDefinition, EnemyTypeId};

/// Read-only lookup of enemy definitions keyed by type ID.
#[derive(Clone, Debug, Default)]
pub struct EnemyCatalog {
    definitions: FxHashMap<EnemyTypeId, Arc<EnemyDefinition>>,
}

impl EnemyCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition, replacing any with the same ID.
    ///
    /// Returns the shared handle to the stored definition.
    pub fn register(&mut self, definition: EnemyDefinition) -> Arc<EnemyDefinition> {
        let definition = Arc::new(definition);
        self.definitions.insert(definition.id, Arc::clone(&definition));
        definition
    }

    /// Get a definition by ID.
    #[must_use]
    pub fn get(&self, id: EnemyTypeId) -> Option<&Arc<EnemyDefinition>> {
        self.definitions.get(&id)
    }
}

impl FromIterator<EnemyDefinition> for EnemyCatalog {
    fn from_iter<I: IntoIterator<Item = EnemyDefinition>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for definition in iter {
            catalog.register(definition);
        }
        catalog
    }
}
