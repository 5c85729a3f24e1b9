//! Listener registrations.
//!
//! Each (entity, event kind) pair is either registered or not; registering
//! twice is a no-op. The registry is ordered by entity id, which fixes the
//! order broadcast events reach their recipients.

use std::collections::{BTreeMap, BTreeSet};

use spark_component::EntityId;
use spark_event::{EventKind, Target};

/// The set of (entity, kind) registrations known to a world.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    listeners: BTreeMap<EntityId, BTreeSet<EventKind>>,
}

impl ListenerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `entity` for `kind`. Returns `false` if it already was.
    pub fn listen(&mut self, entity: EntityId, kind: EventKind) -> bool {
        self.listeners.entry(entity).or_default().insert(kind)
    }

    /// Removes the registration. Returns `false` if there was none.
    pub fn stop_listening(&mut self, entity: EntityId, kind: EventKind) -> bool {
        let Some(kinds) = self.listeners.get_mut(&entity) else {
            return false;
        };
        let removed = kinds.remove(&kind);
        if kinds.is_empty() {
            self.listeners.remove(&entity);
        }
        removed
    }

    /// Drops every registration held by `entity` and returns how many there
    /// were.
    pub fn remove_entity(&mut self, entity: EntityId) -> usize {
        self.listeners
            .remove(&entity)
            .map(|kinds| kinds.len())
            .unwrap_or(0)
    }

    #[must_use]
    pub fn is_listening(&self, entity: EntityId, kind: EventKind) -> bool {
        self.listeners
            .get(&entity)
            .is_some_and(|kinds| kinds.contains(&kind))
    }

    /// The kinds `entity` listens for, in kind order.
    pub fn kinds(&self, entity: EntityId) -> impl Iterator<Item = EventKind> + '_ {
        self.listeners
            .get(&entity)
            .into_iter()
            .flat_map(|kinds| kinds.iter().copied())
    }

    /// Entities that should receive an event of `kind` sent to `target`,
    /// in registry order.
    #[must_use]
    pub fn recipients(&self, target: Target, kind: EventKind) -> Vec<EntityId> {
        match target {
            Target::All => self
                .listeners
                .iter()
                .filter(|(_, kinds)| kinds.contains(&kind))
                .map(|(&entity, _)| entity)
                .collect(),
            Target::Entity(entity) if self.is_listening(entity, kind) => vec![entity],
            Target::Entity(_) => Vec::new(),
        }
    }

    /// Total number of registrations across all entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.values().map(BTreeSet::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listen_is_idempotent() {
        let mut registry = ListenerRegistry::new();
        assert!(registry.listen(EntityId(1), EventKind::Update));
        assert!(!registry.listen(EntityId(1), EventKind::Update));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_stop_listening() {
        let mut registry = ListenerRegistry::new();
        registry.listen(EntityId(1), EventKind::Update);
        assert!(registry.stop_listening(EntityId(1), EventKind::Update));
        assert!(!registry.stop_listening(EntityId(1), EventKind::Update));
        assert!(!registry.stop_listening(EntityId(9), EventKind::Heal));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_targeted_recipients() {
        let mut registry = ListenerRegistry::new();
        registry.listen(EntityId(1), EventKind::DealDamage);

        assert_eq!(
            registry.recipients(Target::Entity(EntityId(1)), EventKind::DealDamage),
            vec![EntityId(1)]
        );
        assert!(
            registry
                .recipients(Target::Entity(EntityId(1)), EventKind::Heal)
                .is_empty()
        );
        assert!(
            registry
                .recipients(Target::Entity(EntityId(2)), EventKind::DealDamage)
                .is_empty()
        );
    }

    #[test]
    fn test_broadcast_recipients_in_id_order() {
        let mut registry = ListenerRegistry::new();
        registry.listen(EntityId(3), EventKind::Update);
        registry.listen(EntityId(1), EventKind::Update);
        registry.listen(EntityId(2), EventKind::Heal);

        assert_eq!(
            registry.recipients(Target::All, EventKind::Update),
            vec![EntityId(1), EntityId(3)]
        );
    }

    #[test]
    fn test_remove_entity_purges_everything() {
        let mut registry = ListenerRegistry::new();
        registry.listen(EntityId(1), EventKind::Update);
        registry.listen(EntityId(1), EventKind::Heal);
        registry.listen(EntityId(2), EventKind::Heal);

        assert_eq!(registry.remove_entity(EntityId(1)), 2);
        assert_eq!(registry.kinds(EntityId(1)).count(), 0);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.remove_entity(EntityId(1)), 0);
    }
}
