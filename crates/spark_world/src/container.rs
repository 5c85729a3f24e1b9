//! Per-entity component storage.
//!
//! A [`ComponentContainer`] is an ordered list of boxed components, at most
//! one per [`ComponentKind`]. Lookups are linear scans; entities carry a
//! handful of components, so a `Vec` beats any map here.

use spark_component::{ComponentKind, EntityId};
use spark_event::Event;
use tracing::trace;

use crate::component::{AsAny, Component};

struct Slot {
    kind: ComponentKind,
    component: Box<dyn Component>,
}

/// The components attached to one entity.
pub struct ComponentContainer {
    owner: EntityId,
    slots: Vec<Slot>,
}

impl ComponentContainer {
    /// Creates an empty container owned by `owner`.
    #[must_use]
    pub fn new(owner: EntityId) -> Self {
        Self {
            owner,
            slots: Vec::new(),
        }
    }

    /// The entity every component in this container belongs to.
    #[must_use]
    pub fn owner(&self) -> EntityId {
        self.owner
    }

    /// Appends a component.
    ///
    /// # Panics
    ///
    /// Panics if a component of the same kind is already attached.
    pub fn insert(&mut self, kind: ComponentKind, component: Box<dyn Component>) {
        assert!(
            !self.contains(kind),
            "{kind} is already attached to {}",
            self.owner
        );
        self.slots.push(Slot { kind, component });
    }

    /// Removes the component of the given kind, moving the last component
    /// into its place. Order of the remaining components is not preserved.
    pub fn remove(&mut self, kind: ComponentKind) -> Option<Box<dyn Component>> {
        let index = self.position(kind)?;
        Some(self.slots.swap_remove(index).component)
    }

    #[must_use]
    pub fn contains(&self, kind: ComponentKind) -> bool {
        self.position(kind).is_some()
    }

    #[must_use]
    pub fn get(&self, kind: ComponentKind) -> Option<&(dyn Component + 'static)> {
        let index = self.position(kind)?;
        Some(&*self.slots[index].component)
    }

    pub fn get_mut(&mut self, kind: ComponentKind) -> Option<&mut (dyn Component + 'static)> {
        let index = self.position(kind)?;
        Some(&mut *self.slots[index].component)
    }

    /// Typed access to the component of the given kind.
    ///
    /// Returns `None` if nothing is attached under `kind` or if the attached
    /// component is not a `T`.
    #[must_use]
    pub fn downcast<T: Component>(&self, kind: ComponentKind) -> Option<&T> {
        AsAny::as_any(self.get(kind)?).downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Component>(&mut self, kind: ComponentKind) -> Option<&mut T> {
        AsAny::as_any_mut(self.get_mut(kind)?).downcast_mut::<T>()
    }

    /// Hands the event to every attached component in container order.
    pub fn dispatch(&mut self, event: &mut Event) {
        trace!(
            entity = %self.owner,
            kind = %event.kind(),
            components = self.slots.len(),
            "dispatching event"
        );
        for slot in &mut self.slots {
            slot.component.handle_event(self.owner, event);
        }
    }

    /// Kinds of the attached components, in container order.
    pub fn kinds(&self) -> impl Iterator<Item = ComponentKind> + '_ {
        self.slots.iter().map(|slot| slot.kind)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn position(&self, kind: ComponentKind) -> Option<usize> {
        self.slots.iter().position(|slot| slot.kind == kind)
    }
}

impl std::fmt::Debug for ComponentContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentContainer")
            .field("owner", &self.owner)
            .field("kinds", &self.kinds().collect::<Vec<_>>())
            .finish()
    }
}
