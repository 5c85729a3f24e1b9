//! The [`Component`] trait.
//!
//! A component is a behavior unit owned by exactly one entity. It reacts to
//! events by inspecting [`Event::kind`] and either ignoring the event or
//! mutating its payload.

use std::any::Any;

use spark_component::EntityId;
use spark_event::Event;

/// Object-safe access to [`Any`] for downcasting boxed components.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A behavior unit attached to an entity.
///
/// # Examples
///
/// ```rust
/// use spark_component::EntityId;
/// use spark_event::{Event, EventPayload};
/// use spark_world::Component;
///
/// struct Regeneration {
///     per_tick: i32,
/// }
///
/// impl Component for Regeneration {
///     fn handle_event(&mut self, _owner: EntityId, event: &mut Event) {
///         if let EventPayload::Heal(heal) = &mut event.payload {
///             heal.health += self.per_tick;
///         }
///     }
/// }
/// ```
pub trait Component: AsAny {
    /// Called for every event dispatched to the owning entity, whether or not
    /// this component cares about its kind.
    fn handle_event(&mut self, owner: EntityId, event: &mut Event);
}
