//! # spark_event
//!
//! Events are the only way Spark components talk to each other.
//!
//! - [`Event`]: a [`Target`] plus a typed [`EventPayload`].
//! - [`EventKind`]: the tag entities register listeners for.
//! - [`Pool`] / [`EventPool`]: preallocated containers handed out as
//!   [`Pooled`] handles that return themselves on drop.

pub mod error;
pub mod event;
pub mod pool;

pub use error::{PoolError, UnknownEventKind};
pub use event::{
    Damage, DamageType, DealDamage, Event, EventKind, EventPayload, Heal, IncrementPosition,
    RenderData, Target,
};
pub use pool::{EventPool, Pool, Pooled, PooledEvent};
