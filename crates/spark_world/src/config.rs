//! World configuration.

/// Sizing knobs for a [`World`](crate::World) and the event pool that feeds
/// it.
#[derive(Debug, Clone)]
pub struct WorldConfig {
    /// Number of entity slots reserved up front.
    pub entity_capacity: usize,
    /// Number of event containers the embedding program should preallocate.
    /// Size this to the peak number of events in flight at once.
    pub event_pool_capacity: usize,
}

impl WorldConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entity_capacity(mut self, capacity: usize) -> Self {
        self.entity_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_event_pool_capacity(mut self, capacity: usize) -> Self {
        self.event_pool_capacity = capacity;
        self
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            entity_capacity: 64,
            event_pool_capacity: 100,
        }
    }
}
