//! Event records exchanged between the world and components.
//!
//! An [`Event`] pairs a [`Target`] with an [`EventPayload`]. The payload enum
//! has one variant per [`EventKind`], so the kind of an event is always the
//! kind of its payload.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use spark_component::EntityId;

use crate::error::UnknownEventKind;

/// The finite set of event kinds entities can listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventKind {
    Damage,
    Heal,
    DealDamage,
    IncrementPosition,
    Update,
    GetRenderData,
}

impl EventKind {
    /// Every kind, in declaration order.
    pub const ALL: [EventKind; 6] = [
        EventKind::Damage,
        EventKind::Heal,
        EventKind::DealDamage,
        EventKind::IncrementPosition,
        EventKind::Update,
        EventKind::GetRenderData,
    ];

    /// The name used for this kind in blueprint files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EventKind::Damage => "EVENT_DAMAGE",
            EventKind::Heal => "EVENT_HEAL",
            EventKind::DealDamage => "EVENT_DEAL_DAMAGE",
            EventKind::IncrementPosition => "EVENT_INCREMENT_POSITION",
            EventKind::Update => "EVENT_UPDATE",
            EventKind::GetRenderData => "EVENT_GET_RENDER_DATA",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EventKind {
    type Err = UnknownEventKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownEventKind(s.to_string()))
    }
}

/// Elemental flavour of a damage roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageType {
    Fire,
    Ice,
    Slash,
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DamageType::Fire => f.write_str("fire"),
            DamageType::Ice => f.write_str("ice"),
            DamageType::Slash => f.write_str("slash"),
        }
    }
}

/// A single amount of damage of one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Damage {
    pub amount: i32,
    pub damage_type: DamageType,
}

impl Damage {
    #[must_use]
    pub const fn new(amount: i32, damage_type: DamageType) -> Self {
        Self {
            amount,
            damage_type,
        }
    }
}

/// Damage contributions collected from every component that deals damage.
///
/// Each responding component pushes one entry, so effects stack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealDamage {
    pub damage: Vec<Damage>,
}

impl DealDamage {
    /// Sum of every contribution.
    #[must_use]
    pub fn total(&self) -> i32 {
        self.damage.iter().map(|d| d.amount).sum()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heal {
    pub health: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncrementPosition {
    pub amount: i32,
}

/// Render information filled in by the single component that owns it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderData {
    pub symbol: char,
    pub name: String,
    pub description: String,
}

/// Kind-specific event data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventPayload {
    Damage(Damage),
    Heal(Heal),
    DealDamage(DealDamage),
    IncrementPosition(IncrementPosition),
    Update,
    GetRenderData(RenderData),
}

impl EventPayload {
    /// The kind tag matching this payload.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            EventPayload::Damage(_) => EventKind::Damage,
            EventPayload::Heal(_) => EventKind::Heal,
            EventPayload::DealDamage(_) => EventKind::DealDamage,
            EventPayload::IncrementPosition(_) => EventKind::IncrementPosition,
            EventPayload::Update => EventKind::Update,
            EventPayload::GetRenderData(_) => EventKind::GetRenderData,
        }
    }

    /// An empty payload of the given kind.
    #[must_use]
    pub fn empty(kind: EventKind) -> Self {
        match kind {
            EventKind::Damage => EventPayload::Damage(Damage::new(0, DamageType::Slash)),
            EventKind::Heal => EventPayload::Heal(Heal::default()),
            EventKind::DealDamage => EventPayload::DealDamage(DealDamage::default()),
            EventKind::IncrementPosition => {
                EventPayload::IncrementPosition(IncrementPosition::default())
            }
            EventKind::Update => EventPayload::Update,
            EventKind::GetRenderData => EventPayload::GetRenderData(RenderData::default()),
        }
    }
}

/// Who an event is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    /// Every entity listening for the event's kind.
    All,
    /// A single entity.
    Entity(EntityId),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::All => f.write_str("all"),
            Target::Entity(id) => write!(f, "{id}"),
        }
    }
}

impl From<EntityId> for Target {
    fn from(id: EntityId) -> Self {
        Target::Entity(id)
    }
}

/// A mutable event record. Usually borrowed from an
/// [`EventPool`](crate::pool::EventPool) rather than built directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub target: Target,
    pub payload: EventPayload,
}

impl Event {
    #[must_use]
    pub fn new(target: impl Into<Target>, payload: EventPayload) -> Self {
        Self {
            target: target.into(),
            payload,
        }
    }

    /// A broadcast event.
    #[must_use]
    pub fn broadcast(payload: EventPayload) -> Self {
        Self {
            target: Target::All,
            payload,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> EventKind {
        self.payload.kind()
    }

    /// Overwrites the target and payload of a reused container.
    pub fn set(&mut self, target: impl Into<Target>, payload: EventPayload) {
        self.target = target.into();
        self.payload = payload;
    }

    /// Returns the damage list if this is a [`EventKind::DealDamage`] event.
    #[must_use]
    pub fn deal_damage(&self) -> Option<&DealDamage> {
        match &self.payload {
            EventPayload::DealDamage(deal) => Some(deal),
            _ => None,
        }
    }

    pub fn deal_damage_mut(&mut self) -> Option<&mut DealDamage> {
        match &mut self.payload {
            EventPayload::DealDamage(deal) => Some(deal),
            _ => None,
        }
    }

    /// Returns the render data if this is a [`EventKind::GetRenderData`] event.
    #[must_use]
    pub fn render_data(&self) -> Option<&RenderData> {
        match &self.payload {
            EventPayload::GetRenderData(render) => Some(render),
            _ => None,
        }
    }

    pub fn render_data_mut(&mut self) -> Option<&mut RenderData> {
        match &mut self.payload {
            EventPayload::GetRenderData(render) => Some(render),
            _ => None,
        }
    }
}

impl Default for Event {
    fn default() -> Self {
        Self::broadcast(EventPayload::Update)
    }
}
