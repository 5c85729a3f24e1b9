//! Spark World: entity storage, component composition and event delivery.
//!
//! Entities live in a dense arena of optional slots addressed by
//! `id - 1`. Destroying an entity empties its slot, returns its id to the
//! allocator and purges its listener registrations; nothing else moves.

use spark_component::{ComponentKind, ComponentRegistry, EntityId, IdAllocator};
use spark_event::{Event, EventKind};
use tracing::debug;

use crate::component::Component;
use crate::config::WorldConfig;
use crate::container::ComponentContainer;
use crate::error::WorldError;
use crate::listener::ListenerRegistry;

/// The Spark world: entity lifecycle, components and listener dispatch.
#[derive(Debug)]
pub struct World {
    config: WorldConfig,
    ids: IdAllocator,
    entities: Vec<Option<ComponentContainer>>,
    components: ComponentRegistry,
    listeners: ListenerRegistry,
}

impl World {
    pub fn new(config: WorldConfig) -> Self {
        Self {
            ids: IdAllocator::new(),
            entities: Vec::with_capacity(config.entity_capacity),
            components: ComponentRegistry::new(),
            listeners: ListenerRegistry::new(),
            config,
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// The registry that assigns kinds to component types for this world.
    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    /// Establishes the kind for `T` ahead of first use.
    pub fn register_component<T: Component>(&mut self) -> ComponentKind {
        self.components.register::<T>()
    }

    // -- Entity lifecycle --

    /// Create an empty entity, reusing the smallest freed id if there is one.
    pub fn create_entity(&mut self) -> EntityId {
        let id = self.ids.allocate();
        let index = slot_index(id);
        if index >= self.entities.len() {
            self.entities.resize_with(index + 1, || None);
        }
        self.entities[index] = Some(ComponentContainer::new(id));
        debug!(entity = %id, "entity created");
        id
    }

    /// Destroy an entity. Returns `false` if `id` was not live.
    pub fn destroy_entity(&mut self, id: EntityId) -> bool {
        let Some(slot) = id.index().and_then(|index| self.entities.get_mut(index)) else {
            return false;
        };
        if slot.take().is_none() {
            return false;
        }
        self.ids.free(id);
        let purged = self.listeners.remove_entity(id);
        debug!(entity = %id, listeners = purged, "entity destroyed");
        true
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entity(id).is_some()
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.ids.live_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live entity ids in ascending order.
    pub fn entity_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.iter().flatten().map(ComponentContainer::owner)
    }

    /// The component container of a live entity.
    pub fn entity(&self, id: EntityId) -> Option<&ComponentContainer> {
        self.entities.get(id.index()?)?.as_ref()
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut ComponentContainer> {
        self.entities.get_mut(id.index()?)?.as_mut()
    }

    // -- Component operations --

    /// Attach a component to an entity and return its kind.
    ///
    /// # Panics
    ///
    /// Panics if the entity already holds a component of type `T`.
    pub fn add_component<T: Component>(
        &mut self,
        id: EntityId,
        component: T,
    ) -> Result<ComponentKind, WorldError> {
        let kind = self.components.register::<T>();
        let container = self
            .entity_mut(id)
            .ok_or(WorldError::EntityNotFound(id))?;
        container.insert(kind, Box::new(component));
        debug!(
            entity = %id,
            %kind,
            component = std::any::type_name::<T>(),
            "component attached"
        );
        Ok(kind)
    }

    /// Detach the component of type `T`. Returns `false` if there was none.
    pub fn remove_component<T: Component>(&mut self, id: EntityId) -> bool {
        match self.components.get::<T>() {
            Some(kind) => self.remove_component_kind(id, kind).is_some(),
            None => false,
        }
    }

    /// Detach the component of the given kind and hand it back.
    pub fn remove_component_kind(
        &mut self,
        id: EntityId,
        kind: ComponentKind,
    ) -> Option<Box<dyn Component>> {
        let removed = self.entity_mut(id)?.remove(kind);
        if removed.is_some() {
            debug!(entity = %id, %kind, "component removed");
        }
        removed
    }

    pub fn get_component<T: Component>(&self, id: EntityId) -> Option<&T> {
        let kind = self.components.get::<T>()?;
        self.entity(id)?.downcast::<T>(kind)
    }

    pub fn get_component_mut<T: Component>(&mut self, id: EntityId) -> Option<&mut T> {
        let kind = self.components.get::<T>()?;
        self.entity_mut(id)?.downcast_mut::<T>(kind)
    }

    pub fn has_component<T: Component>(&self, id: EntityId) -> bool {
        self.components
            .get::<T>()
            .is_some_and(|kind| self.has_component_kind(id, kind))
    }

    pub fn has_component_kind(&self, id: EntityId, kind: ComponentKind) -> bool {
        self.entity(id).is_some_and(|entity| entity.contains(kind))
    }

    // -- Listeners --

    /// Register a live entity for events of `kind`. Registering twice is a
    /// no-op.
    pub fn listen(&mut self, id: EntityId, kind: EventKind) -> Result<(), WorldError> {
        if !self.contains(id) {
            return Err(WorldError::EntityNotFound(id));
        }
        if self.listeners.listen(id, kind) {
            debug!(entity = %id, %kind, "listening");
        }
        Ok(())
    }

    /// Remove a registration. Missing registrations are ignored.
    pub fn stop_listening(&mut self, id: EntityId, kind: EventKind) {
        if self.listeners.stop_listening(id, kind) {
            debug!(entity = %id, %kind, "stopped listening");
        }
    }

    pub fn is_listening(&self, id: EntityId, kind: EventKind) -> bool {
        self.listeners.is_listening(id, kind)
    }

    pub fn listened_kinds(&self, id: EntityId) -> impl Iterator<Item = EventKind> + '_ {
        self.listeners.kinds(id)
    }

    // -- Delivery --

    /// Deliver an event to its target through the listener registry.
    ///
    /// A broadcast reaches every entity listening for the event's kind, in
    /// ascending id order, all sharing the same payload. A targeted event
    /// reaches its target only if it listens for the kind; otherwise it is
    /// dropped. Returns the number of entities the event reached.
    pub fn submit(&mut self, event: &mut Event) -> usize {
        let recipients = self.listeners.recipients(event.target, event.kind());
        let mut delivered = 0;
        for id in recipients {
            if let Some(entity) = self.entity_mut(id) {
                entity.dispatch(event);
                delivered += 1;
            }
        }
        debug!(
            kind = %event.kind(),
            target = %event.target,
            delivered,
            "event submitted"
        );
        delivered
    }

    /// Hand an event straight to one entity's components, ignoring listener
    /// registrations and the event's own target.
    pub fn dispatch(&mut self, id: EntityId, event: &mut Event) -> Result<(), WorldError> {
        let entity = self
            .entity_mut(id)
            .ok_or(WorldError::EntityNotFound(id))?;
        entity.dispatch(event);
        Ok(())
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

fn slot_index(id: EntityId) -> usize {
    // Allocated ids start at 1.
    id.id() as usize - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use spark_event::{Damage, DamageType, EventPayload, Target};

    /// Pushes a fixed amount onto deal-damage events.
    struct Blade(i32);

    impl Component for Blade {
        fn handle_event(&mut self, _owner: EntityId, event: &mut Event) {
            if let Some(deal) = event.deal_damage_mut() {
                deal.damage.push(Damage::new(self.0, DamageType::Slash));
            }
        }
    }

    struct Flame(i32);

    impl Component for Flame {
        fn handle_event(&mut self, _owner: EntityId, event: &mut Event) {
            if let Some(deal) = event.deal_damage_mut() {
                deal.damage.push(Damage::new(self.0, DamageType::Fire));
            }
        }
    }

    /// Counts every event it sees, whatever the kind.
    #[derive(Default)]
    struct Counter(usize);

    impl Component for Counter {
        fn handle_event(&mut self, _owner: EntityId, _event: &mut Event) {
            self.0 += 1;
        }
    }

    fn deal_damage(target: impl Into<Target>) -> Event {
        Event::new(target, EventPayload::empty(EventKind::DealDamage))
    }

    fn make_test_world() -> World {
        World::new(WorldConfig::default().with_entity_capacity(8))
    }

    #[test]
    fn test_create_and_destroy() {
        let mut world = make_test_world();
        let id = world.create_entity();
        assert_eq!(id, EntityId(1));
        assert!(world.contains(id));
        assert_eq!(world.len(), 1);

        assert!(world.destroy_entity(id));
        assert!(!world.contains(id));
        assert!(world.is_empty());
    }

    #[test]
    fn test_destroy_unknown_is_noop() {
        let mut world = make_test_world();
        assert!(!world.destroy_entity(EntityId(0)));
        assert!(!world.destroy_entity(EntityId(5)));

        let id = world.create_entity();
        assert!(world.destroy_entity(id));
        assert!(!world.destroy_entity(id));
    }

    #[test]
    fn test_id_reuse_prefers_freed_id() {
        let mut world = make_test_world();
        let _a = world.create_entity();
        let b = world.create_entity();
        let _c = world.create_entity();

        world.destroy_entity(b);
        assert_eq!(world.create_entity(), b);
        assert_eq!(world.create_entity(), EntityId(4));
        assert_eq!(
            world.entity_ids().collect::<Vec<_>>(),
            vec![EntityId(1), EntityId(2), EntityId(3), EntityId(4)]
        );
    }

    #[test]
    fn test_reused_entity_is_fresh() {
        let mut world = make_test_world();
        let id = world.create_entity();
        world.add_component(id, Blade(3)).unwrap();
        world.listen(id, EventKind::DealDamage).unwrap();

        world.destroy_entity(id);
        let reused = world.create_entity();
        assert_eq!(reused, id);
        assert!(!world.has_component::<Blade>(reused));
        assert!(!world.is_listening(reused, EventKind::DealDamage));
        assert_eq!(world.entity(reused).unwrap().len(), 0);
    }

    #[test]
    fn test_add_get_remove_component() {
        let mut world = make_test_world();
        let id = world.create_entity();

        let kind = world.add_component(id, Blade(4)).unwrap();
        assert_eq!(world.components().get::<Blade>(), Some(kind));
        assert!(world.has_component::<Blade>(id));
        assert!(world.has_component_kind(id, kind));
        assert_eq!(world.get_component::<Blade>(id).unwrap().0, 4);

        world.get_component_mut::<Blade>(id).unwrap().0 = 9;
        assert_eq!(world.get_component::<Blade>(id).unwrap().0, 9);

        assert!(world.remove_component::<Blade>(id));
        assert!(!world.has_component::<Blade>(id));
        assert!(!world.remove_component::<Blade>(id));
    }

    #[test]
    fn test_unregistered_component_is_absent() {
        let mut world = make_test_world();
        let id = world.create_entity();
        assert!(!world.has_component::<Flame>(id));
        assert!(world.get_component::<Flame>(id).is_none());
        assert!(!world.remove_component::<Flame>(id));
    }

    #[test]
    #[should_panic(expected = "already attached")]
    fn test_duplicate_component_panics() {
        let mut world = make_test_world();
        let id = world.create_entity();
        world.add_component(id, Blade(1)).unwrap();
        let _ = world.add_component(id, Blade(2));
    }

    #[test]
    fn test_add_component_to_missing_entity() {
        let mut world = make_test_world();
        let err = world.add_component(EntityId(3), Blade(1)).unwrap_err();
        assert_eq!(err, WorldError::EntityNotFound(EntityId(3)));
    }

    #[test]
    fn test_component_kinds_shared_across_entities() {
        let mut world = make_test_world();
        let a = world.create_entity();
        let b = world.create_entity();
        let kind_a = world.add_component(a, Blade(1)).unwrap();
        let kind_b = world.add_component(b, Blade(2)).unwrap();
        let flame = world.add_component(b, Flame(2)).unwrap();
        assert_eq!(kind_a, kind_b);
        assert_ne!(kind_a, flame);
    }

    #[test]
    fn test_targeted_submit_reaches_listener_once() {
        let mut world = make_test_world();
        let id = world.create_entity();
        world.add_component(id, Counter::default()).unwrap();
        world.listen(id, EventKind::DealDamage).unwrap();

        let mut event = deal_damage(id);
        assert_eq!(world.submit(&mut event), 1);
        assert_eq!(world.get_component::<Counter>(id).unwrap().0, 1);
    }

    #[test]
    fn test_targeted_submit_wrong_target_or_kind_is_dropped() {
        let mut world = make_test_world();
        let listener = world.create_entity();
        let other = world.create_entity();
        world.add_component(listener, Counter::default()).unwrap();
        world.add_component(other, Counter::default()).unwrap();
        world.listen(listener, EventKind::DealDamage).unwrap();

        assert_eq!(world.submit(&mut deal_damage(other)), 0);
        let mut heal = Event::new(listener, EventPayload::empty(EventKind::Heal));
        assert_eq!(world.submit(&mut heal), 0);

        assert_eq!(world.get_component::<Counter>(listener).unwrap().0, 0);
        assert_eq!(world.get_component::<Counter>(other).unwrap().0, 0);
    }

    #[test]
    fn test_double_listen_delivers_once() {
        let mut world = make_test_world();
        let id = world.create_entity();
        world.add_component(id, Counter::default()).unwrap();
        world.listen(id, EventKind::Update).unwrap();
        world.listen(id, EventKind::Update).unwrap();

        let mut event = Event::new(id, EventPayload::Update);
        assert_eq!(world.submit(&mut event), 1);
        assert_eq!(world.get_component::<Counter>(id).unwrap().0, 1);
    }

    #[test]
    fn test_stop_listening() {
        let mut world = make_test_world();
        let id = world.create_entity();
        world.listen(id, EventKind::Update).unwrap();
        world.stop_listening(id, EventKind::Update);
        world.stop_listening(id, EventKind::Update);
        assert!(!world.is_listening(id, EventKind::Update));
        assert_eq!(world.submit(&mut Event::new(id, EventPayload::Update)), 0);
    }

    #[test]
    fn test_listen_requires_live_entity() {
        let mut world = make_test_world();
        let err = world.listen(EntityId(1), EventKind::Update).unwrap_err();
        assert_eq!(err, WorldError::EntityNotFound(EntityId(1)));
    }

    #[test]
    fn test_broadcast_reaches_every_listener() {
        let mut world = make_test_world();
        let e1 = world.create_entity();
        let e2 = world.create_entity();
        let e3 = world.create_entity();
        world.add_component(e1, Blade(1)).unwrap();
        world.add_component(e2, Blade(2)).unwrap();
        world.add_component(e3, Blade(3)).unwrap();
        world.listen(e1, EventKind::DealDamage).unwrap();
        world.listen(e2, EventKind::DealDamage).unwrap();
        world.listen(e3, EventKind::Heal).unwrap();

        let mut event = deal_damage(Target::All);
        assert_eq!(world.submit(&mut event), 2);

        // Shared payload, ascending id order.
        let amounts: Vec<i32> = event
            .deal_damage()
            .unwrap()
            .damage
            .iter()
            .map(|d| d.amount)
            .collect();
        assert_eq!(amounts, vec![1, 2]);
    }

    #[test]
    fn test_destroy_purges_listeners() {
        let mut world = make_test_world();
        let id = world.create_entity();
        world.listen(id, EventKind::Update).unwrap();
        world.listen(id, EventKind::Heal).unwrap();
        world.destroy_entity(id);

        assert_eq!(world.listened_kinds(id).count(), 0);
        assert_eq!(world.submit(&mut Event::broadcast(EventPayload::Update)), 0);
    }

    #[test]
    fn test_multiple_components_accumulate() {
        let mut world = make_test_world();
        let id = world.create_entity();
        world.add_component(id, Blade(5)).unwrap();
        world.add_component(id, Flame(7)).unwrap();
        world.listen(id, EventKind::DealDamage).unwrap();

        let mut event = deal_damage(id);
        world.submit(&mut event);

        let deal = event.deal_damage().unwrap();
        assert_eq!(deal.damage.len(), 2);
        assert_eq!(deal.damage[0], Damage::new(5, DamageType::Slash));
        assert_eq!(deal.damage[1], Damage::new(7, DamageType::Fire));
        assert_eq!(deal.total(), 12);
    }

    #[test]
    fn test_direct_dispatch_ignores_listeners() {
        let mut world = make_test_world();
        let id = world.create_entity();
        world.add_component(id, Counter::default()).unwrap();

        let mut event = Event::broadcast(EventPayload::Update);
        world.dispatch(id, &mut event).unwrap();
        assert_eq!(world.get_component::<Counter>(id).unwrap().0, 1);

        assert_eq!(
            world.dispatch(EntityId(9), &mut event).unwrap_err(),
            WorldError::EntityNotFound(EntityId(9))
        );
    }

    #[test]
    fn test_submit_pooled_event() {
        let pool = spark_event::EventPool::new(world_pool_size());
        let mut world = make_test_world();
        let id = world.create_entity();
        world.add_component(id, Blade(2)).unwrap();
        world.listen(id, EventKind::DealDamage).unwrap();

        let mut event = pool.acquire().unwrap();
        event.set(id, EventPayload::empty(EventKind::DealDamage));
        assert_eq!(world.submit(&mut event), 1);
        assert_eq!(event.deal_damage().unwrap().total(), 2);
        event.release();
        assert_eq!(pool.available(), pool.capacity());
    }

    fn world_pool_size() -> usize {
        WorldConfig::default().event_pool_capacity
    }
}
