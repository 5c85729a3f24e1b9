//! # spark_world
//!
//! The runtime half of Spark: a [`World`] owns entities, each entity owns a
//! [`ComponentContainer`], and events reach containers through the
//! [`ListenerRegistry`].
//!
//! Everything here is single-threaded and synchronous. Submitting an event
//! runs every recipient's components to completion before returning.
//!
//! ## Usage
//!
//! ```rust
//! use spark_component::EntityId;
//! use spark_event::{Damage, DamageType, Event, EventKind, EventPayload, EventPool};
//! use spark_world::{Component, World, WorldConfig};
//!
//! struct Blade;
//!
//! impl Component for Blade {
//!     fn handle_event(&mut self, _owner: EntityId, event: &mut Event) {
//!         if let Some(deal) = event.deal_damage_mut() {
//!             deal.damage.push(Damage::new(3, DamageType::Slash));
//!         }
//!     }
//! }
//!
//! let config = WorldConfig::default();
//! let pool = EventPool::new(config.event_pool_capacity);
//! let mut world = World::new(config);
//!
//! let sword = world.create_entity();
//! world.add_component(sword, Blade).unwrap();
//! world.listen(sword, EventKind::DealDamage).unwrap();
//!
//! let mut event = pool.acquire().unwrap();
//! event.set(sword, EventPayload::empty(EventKind::DealDamage));
//! assert_eq!(world.submit(&mut event), 1);
//! assert_eq!(event.deal_damage().unwrap().total(), 3);
//! ```

pub mod component;
pub mod config;
pub mod container;
pub mod error;
pub mod listener;
pub mod world;

pub use component::{AsAny, Component};
pub use config::WorldConfig;
pub use container::ComponentContainer;
pub use error::WorldError;
pub use listener::ListenerRegistry;
pub use world::World;
