//! Identity map for tracked reads
//!
//! Every tracked read registers a handle for each identity it returns, stamped
//! with the current tracking generation. An update may only proceed while at
//! most one handle for its identity is outstanding in the current generation;
//! a second tracked read of the same identity means two edit sessions exist and
//! the update is refused.
//!
//! Starting a new generation discards every outstanding handle. Callers do
//! this at the start of each logical unit of work (one shell command, one
//! request).

use std::collections::HashMap;

use super::entity::EntityKey;

/// Monotonic tracking generation
pub type Generation = u64;

/// Outstanding tracked handles, keyed by identity
#[derive(Debug)]
pub struct IdentityMap<K: EntityKey> {
    generation: Generation,
    handles: HashMap<K, Vec<Generation>>,
}

impl<K: EntityKey> Default for IdentityMap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: EntityKey> IdentityMap<K> {
    pub fn new() -> Self {
        Self {
            generation: 0,
            handles: HashMap::new(),
        }
    }

    /// Current tracking generation
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Record one more live handle for `key`
    pub fn register(&mut self, key: K) {
        self.handles.entry(key).or_default().push(self.generation);
    }

    /// Number of live handles for `key` in the current generation
    pub fn outstanding(&self, key: K) -> usize {
        self.handles
            .get(&key)
            .map(|stamps| stamps.iter().filter(|g| **g == self.generation).count())
            .unwrap_or(0)
    }

    /// Drop every handle for `key`
    pub fn release(&mut self, key: K) {
        self.handles.remove(&key);
    }

    /// Number of identities with at least one live handle
    pub fn tracked_identities(&self) -> usize {
        self.handles
            .keys()
            .filter(|key| self.outstanding(**key) > 0)
            .count()
    }

    /// Discard all handles and advance the generation
    pub fn begin_generation(&mut self) -> Generation {
        self.handles.clear();
        self.generation += 1;
        self.generation
    }
}
