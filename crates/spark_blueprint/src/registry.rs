//! Name-keyed blueprint registry.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info};

use crate::blueprint::Blueprint;
use crate::error::BlueprintError;
use crate::parser::Parser;

/// Every blueprint loaded so far, keyed by name. Loading a blueprint whose
/// name is already present replaces the earlier one.
#[derive(Debug, Clone, Default)]
pub struct BlueprintRegistry {
    blueprints: HashMap<String, Blueprint>,
}

impl BlueprintRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a blueprint file and merges its blueprints into the registry.
    /// Returns how many blueprints the file defined.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<usize, BlueprintError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| BlueprintError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let count = self.load_source(&source)?;
        info!(file = %path.display(), count, "loaded blueprints");
        Ok(count)
    }

    /// Parses `source` and merges its blueprints. Nothing is inserted unless
    /// the whole source parses.
    pub fn load_source(&mut self, source: &str) -> Result<usize, BlueprintError> {
        let blueprints = Parser::parse(source)?;
        let count = blueprints.len();
        for blueprint in blueprints {
            self.insert(blueprint);
        }
        Ok(count)
    }

    /// Inserts `blueprint`, returning the one it replaced.
    pub fn insert(&mut self, blueprint: Blueprint) -> Option<Blueprint> {
        let previous = self.blueprints.insert(blueprint.name.clone(), blueprint);
        if let Some(previous) = &previous {
            debug!(name = %previous.name, "blueprint replaced");
        }
        previous
    }

    pub fn get(&self, name: &str) -> Option<&Blueprint> {
        self.blueprints.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.blueprints.contains_key(name)
    }

    /// All blueprints, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Blueprint> {
        self.blueprints.values()
    }

    /// Blueprint names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.blueprints.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.blueprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blueprints.is_empty()
    }
}
