//! Entity identifiers and their allocation.
//!
//! An [`EntityId`] is a small recyclable `u32` handle. Ids are unique among
//! live entities only: once an entity is destroyed its id goes back to the
//! allocator and is handed out again before any fresh id is issued.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A recyclable entity identifier. Valid ids start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create an entity id from a raw `u32`.
    #[must_use]
    pub const fn from_raw(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw `u32` identifier.
    #[must_use]
    pub const fn id(self) -> u32 {
        self.0
    }

    /// Returns the dense slot index this id maps to (`id - 1`).
    #[must_use]
    pub const fn index(self) -> Option<usize> {
        match self.0.checked_sub(1) {
            Some(index) => Some(index as usize),
            None => None,
        }
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Hands out entity ids, preferring the smallest previously freed id.
#[derive(Debug)]
pub struct IdAllocator {
    last_id: u32,
    free: BTreeSet<u32>,
}

impl IdAllocator {
    /// Creates a new allocator. The first id issued is 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_id: 0,
            free: BTreeSet::new(),
        }
    }

    /// Allocates an id, reusing the smallest freed one if any exist.
    pub fn allocate(&mut self) -> EntityId {
        if let Some(id) = self.free.pop_first() {
            return EntityId(id);
        }
        self.last_id = self
            .last_id
            .checked_add(1)
            .expect("entity id space exhausted");
        EntityId(self.last_id)
    }

    /// Returns an id to the free pool.
    ///
    /// Freeing an id that was never issued, or freeing it twice, is ignored.
    pub fn free(&mut self, id: EntityId) {
        if id.0 == 0 || id.0 > self.last_id {
            return;
        }
        self.free.insert(id.0);
    }

    /// Returns the number of ids currently in use.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.last_id as usize - self.free.len()
    }

    /// Returns the highest id ever issued (0 if none).
    #[must_use]
    pub fn high_water_mark(&self) -> u32 {
        self.last_id
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator_produces_sequential_ids() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.allocate(), EntityId(1));
        assert_eq!(alloc.allocate(), EntityId(2));
        assert_eq!(alloc.allocate(), EntityId(3));
        assert_eq!(alloc.live_count(), 3);
    }

    #[test]
    fn test_freed_id_is_reused_first() {
        let mut alloc = IdAllocator::new();
        let _a = alloc.allocate();
        let b = alloc.allocate();
        let _c = alloc.allocate();

        alloc.free(b);
        assert_eq!(alloc.allocate(), b);
        assert_eq!(alloc.allocate(), EntityId(4));
    }

    #[test]
    fn test_smallest_freed_id_wins() {
        let mut alloc = IdAllocator::new();
        for _ in 0..5 {
            alloc.allocate();
        }
        alloc.free(EntityId(4));
        alloc.free(EntityId(2));
        alloc.free(EntityId(3));

        assert_eq!(alloc.allocate(), EntityId(2));
        assert_eq!(alloc.allocate(), EntityId(3));
        assert_eq!(alloc.allocate(), EntityId(4));
        assert_eq!(alloc.allocate(), EntityId(6));
    }

    #[test]
    fn test_free_ignores_unknown_and_double_free() {
        let mut alloc = IdAllocator::new();
        let a = alloc.allocate();
        alloc.free(EntityId(0));
        alloc.free(EntityId(9));
        alloc.free(a);
        alloc.free(a);
        assert_eq!(alloc.live_count(), 0);
        assert_eq!(alloc.allocate(), a);
        assert_eq!(alloc.allocate(), EntityId(2));
    }

    #[test]
    fn test_high_water_mark_survives_frees() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.high_water_mark(), 0);
        let a = alloc.allocate();
        let b = alloc.allocate();
        alloc.free(b);
        alloc.free(a);
        assert_eq!(alloc.high_water_mark(), 2);
        alloc.allocate();
        assert_eq!(alloc.high_water_mark(), 2);
        assert_eq!(alloc.live_count(), 1);
    }

    #[test]
    fn test_entity_index() {
        assert_eq!(EntityId(1).index(), Some(0));
        assert_eq!(EntityId(0).index(), None);
        assert_eq!(EntityId(5).to_string(), "Entity(5)");
    }
}
