//! Component identity.
//!
//! Every component variant attached to an entity is tagged with a
//! [`ComponentKind`]. Kinds are handed out by a [`ComponentRegistry`] the
//! first time a variant is registered and stay valid for the lifetime of the
//! registry. There is no global cache: whoever owns the registry (normally
//! the world) decides when identities are established.
//!
//! ## Threading
//!
//! The registry is a plain owned value mutated through `&mut self`. Callers
//! that share it across threads must establish every variant's identity
//! before concurrent access begins.

use std::any::{TypeId, type_name};
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A stable identifier for a component variant.
///
/// Kinds are allocated from a monotonic counter starting at 1, so two
/// different variants registered with the same registry never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentKind(pub u32);

impl ComponentKind {
    /// Returns the raw numeric identifier.
    #[must_use]
    pub const fn id(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ComponentKind({})", self.0)
    }
}

/// Assigns each component variant a [`ComponentKind`] on first use.
#[derive(Debug)]
pub struct ComponentRegistry {
    kinds: HashMap<TypeId, ComponentKind>,
    /// Type names indexed by `kind - 1`.
    names: Vec<&'static str>,
}

impl ComponentRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            kinds: HashMap::new(),
            names: Vec::new(),
        }
    }

    /// Returns the kind for `T`, allocating a new one the first time `T` is
    /// seen.
    pub fn register<T: 'static>(&mut self) -> ComponentKind {
        if let Some(&kind) = self.kinds.get(&TypeId::of::<T>()) {
            return kind;
        }

        self.names.push(type_name::<T>());
        let kind = ComponentKind(self.names.len() as u32);
        self.kinds.insert(TypeId::of::<T>(), kind);
        debug!(%kind, name = type_name::<T>(), "component kind registered");
        kind
    }

    /// Returns the kind for `T` if it has been registered.
    #[must_use]
    pub fn get<T: 'static>(&self) -> Option<ComponentKind> {
        self.kinds.get(&TypeId::of::<T>()).copied()
    }

    /// Returns the Rust type name the kind was registered for.
    #[must_use]
    pub fn name(&self, kind: ComponentKind) -> Option<&'static str> {
        let index = (kind.0 as usize).checked_sub(1)?;
        self.names.get(index).copied()
    }

    /// Returns the number of registered variants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no variant has been registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}
