//! Blueprint data model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A component entry inside a blueprint: the component's name plus its
/// construction arguments as raw strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlueprintComponent {
    pub name: String,
    pub arguments: BTreeMap<String, String>,
}

impl BlueprintComponent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_argument(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    pub fn argument(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).map(String::as_str)
    }
}

/// A named, declarative template for an entity.
///
/// `listen_for_events` holds event names exactly as written; resolving them
/// to event kinds is left to whoever instantiates the blueprint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blueprint {
    pub name: String,
    pub components: Vec<BlueprintComponent>,
    pub listen_for_events: Vec<String>,
}

impl Blueprint {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// The first component entry called `name`.
    pub fn component(&self, name: &str) -> Option<&BlueprintComponent> {
        self.components.iter().find(|c| c.name == name)
    }
}
