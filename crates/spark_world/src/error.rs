use spark_component::EntityId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("{0} not found")]
    EntityNotFound(EntityId),
}
