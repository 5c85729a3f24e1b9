//! Event-layer error types.

/// Errors returned by a [`Pool`](crate::pool::Pool).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Every container is currently handed out.
    #[error("pool exhausted: all {capacity} containers are in flight")]
    Exhausted { capacity: usize },
}

/// A blueprint or caller named an event kind that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event kind: {0}")]
pub struct UnknownEventKind(pub String);
