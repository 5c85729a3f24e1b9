//! Builds entities from blueprints.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spark_blueprint::{Blueprint, BlueprintComponent};
use spark_component::EntityId;
use spark_event::EventKind;
use spark_world::{World, WorldError};
use thiserror::Error;
use tracing::debug;

use crate::damage::{DamageComponent, FireDamageComponent, IceDamageComponent};
use crate::die::Die;
use crate::render::RenderComponent;

#[derive(Debug, Error)]
pub enum FactoryError {
    #[error("{blueprint}: unknown component {component}")]
    UnknownComponent { blueprint: String, component: String },
    #[error("{blueprint}: component {component} listed twice")]
    DuplicateComponent { blueprint: String, component: String },
    #[error("{blueprint}: unknown event {event}")]
    UnknownEvent { blueprint: String, event: String },
    #[error("{component}: missing argument {key}")]
    MissingArgument { component: String, key: &'static str },
    #[error("{component}: invalid {key} {value:?}")]
    InvalidArgument {
        component: String,
        key: &'static str,
        value: String,
    },
    #[error(transparent)]
    World(#[from] WorldError),
}

pub const RENDER_COMPONENT: &str = "RenderComponent";
pub const DAMAGE_COMPONENT: &str = "DamageComponent";
pub const FIRE_DAMAGE_COMPONENT: &str = "FireDamageComponent";
pub const ICE_DAMAGE_COMPONENT: &str = "IceDamageComponent";

/// One validated component, ready to attach.
enum Part {
    Render(RenderComponent),
    Damage(DamageComponent),
    FireDamage(FireDamageComponent),
    IceDamage(IceDamageComponent),
}

/// Turns blueprints into live entities.
///
/// Every damage dealer gets its own rng, seeded from the factory's, so a
/// seeded factory builds entities that roll the same numbers every run.
#[derive(Debug)]
pub struct Factory {
    rng: StdRng,
}

impl Factory {
    /// Component names this factory can build.
    pub const COMPONENT_NAMES: [&'static str; 4] = [
        RENDER_COMPONENT,
        DAMAGE_COMPONENT,
        FIRE_DAMAGE_COMPONENT,
        ICE_DAMAGE_COMPONENT,
    ];

    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Registers every component type this factory can build so their kinds
    /// are fixed before the first entity is created.
    pub fn register_components(world: &mut World) {
        world.register_component::<RenderComponent>();
        world.register_component::<DamageComponent>();
        world.register_component::<FireDamageComponent>();
        world.register_component::<IceDamageComponent>();
    }

    /// Creates an entity carrying the blueprint's components and listener
    /// registrations. The blueprint is validated first; on error no entity
    /// is created.
    pub fn build(
        &mut self,
        world: &mut World,
        blueprint: &Blueprint,
    ) -> Result<EntityId, FactoryError> {
        let mut parts = Vec::with_capacity(blueprint.components.len());
        for (i, component) in blueprint.components.iter().enumerate() {
            if blueprint.components[..i].iter().any(|c| c.name == component.name) {
                return Err(FactoryError::DuplicateComponent {
                    blueprint: blueprint.name.clone(),
                    component: component.name.clone(),
                });
            }
            parts.push(self.part(blueprint, component)?);
        }

        let events = blueprint
            .listen_for_events
            .iter()
            .map(|name| {
                name.parse::<EventKind>()
                    .map_err(|_| FactoryError::UnknownEvent {
                        blueprint: blueprint.name.clone(),
                        event: name.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let id = world.create_entity();
        for part in parts {
            match part {
                Part::Render(c) => world.add_component(id, c)?,
                Part::Damage(c) => world.add_component(id, c)?,
                Part::FireDamage(c) => world.add_component(id, c)?,
                Part::IceDamage(c) => world.add_component(id, c)?,
            };
        }
        for kind in events {
            world.listen(id, kind)?;
        }

        debug!(entity = %id, blueprint = %blueprint.name, "entity built");
        Ok(id)
    }

    fn part(
        &mut self,
        blueprint: &Blueprint,
        component: &BlueprintComponent,
    ) -> Result<Part, FactoryError> {
        let part = match component.name.as_str() {
            RENDER_COMPONENT => Part::Render(render(blueprint, component)?),
            DAMAGE_COMPONENT => {
                Part::Damage(DamageComponent::new(die(component)?, self.rng.r#gen()))
            }
            FIRE_DAMAGE_COMPONENT => {
                Part::FireDamage(FireDamageComponent::new(die(component)?, self.rng.r#gen()))
            }
            ICE_DAMAGE_COMPONENT => {
                Part::IceDamage(IceDamageComponent::new(die(component)?, self.rng.r#gen()))
            }
            other => {
                return Err(FactoryError::UnknownComponent {
                    blueprint: blueprint.name.clone(),
                    component: other.to_string(),
                });
            }
        };
        Ok(part)
    }
}

impl Default for Factory {
    fn default() -> Self {
        Self::new()
    }
}

fn render(
    blueprint: &Blueprint,
    component: &BlueprintComponent,
) -> Result<RenderComponent, FactoryError> {
    let symbol = required(component, "symbol")?;
    let mut chars = symbol.chars();
    let (Some(glyph), None) = (chars.next(), chars.next()) else {
        return Err(invalid(component, "symbol", symbol));
    };
    let name = component.argument("name").unwrap_or(&blueprint.name);
    let description = component.argument("description").unwrap_or_default();
    Ok(RenderComponent::new(glyph, name, description))
}

fn die(component: &BlueprintComponent) -> Result<Die, FactoryError> {
    let rolls = number(component, "rolls")?;
    let sides = number(component, "sides")?;
    Die::new(rolls, sides).ok_or_else(|| invalid(component, "sides", "0"))
}

fn number(component: &BlueprintComponent, key: &'static str) -> Result<u32, FactoryError> {
    let value = required(component, key)?;
    value.trim().parse().map_err(|_| invalid(component, key, value))
}

fn required<'c>(
    component: &'c BlueprintComponent,
    key: &'static str,
) -> Result<&'c str, FactoryError> {
    component
        .argument(key)
        .ok_or_else(|| FactoryError::MissingArgument {
            component: component.name.clone(),
            key,
        })
}

fn invalid(component: &BlueprintComponent, key: &'static str, value: &str) -> FactoryError {
    FactoryError::InvalidArgument {
        component: component.name.clone(),
        key,
        value: value.to_string(),
    }
}
