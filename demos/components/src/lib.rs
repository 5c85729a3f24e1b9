//! Demo components for the Spark runtime.
//!
//! These are the building blocks the armory demo assembles from blueprint
//! files: a [`RenderComponent`] that answers render-data queries, three
//! damage dealers that stack dice rolls onto deal-damage events, and the
//! [`Factory`] that maps blueprint component names onto them.

pub mod damage;
pub mod die;
pub mod factory;
pub mod render;

pub use damage::{DamageComponent, DamageRoll, FireDamageComponent, IceDamageComponent};
pub use die::Die;
pub use factory::{Factory, FactoryError};
pub use render::RenderComponent;
