use std::path::PathBuf;

use crate::entity::{EntityId, EntityKind};
use crate::relationship::{RelationshipId, RelationshipKind};

/// Alias for `Result<T, WorldError>`.
pub type WorldResult<T> = Result<T, WorldError>;

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur when manipulating a world graph.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The requested entity ID does not exist in the world.
    #[error("entity not found: {0}")]
    EntityNotFound(EntityId),

    /// An entity with the same ID already exists.
    #[error("entity already exists: \"{0}\"")]
    DuplicateId(EntityId),

    /// The requested relationship ID does not exist in the world.
    #[error("relationship not found: {0}")]
    RelationshipNotFound(RelationshipId),

    /// The edge endpoints do not fit the relationship kind.
    #[error("a {source_kind} cannot be \"{kind}\" a {target_kind}")]
    InvalidEdge {
        /// The rejected relationship kind.
        kind: RelationshipKind,
        /// Kind of the source entity.
        source_kind: EntityKind,
        /// Kind of the target entity.
        target_kind: EntityKind,
    },

    /// A singleton edge would be duplicated.
    #[error("{entity} already has a \"{kind}\" edge")]
    DuplicateEdge {
        /// The entity that already holds the edge.
        entity: EntityId,
        /// The singleton relationship kind.
        kind: RelationshipKind,
    },

    /// A structural invariant of the graph is violated.
    #[error("invalid world: {0}")]
    Validation(String),
}

/// Errors raised by the World Store and its storage backend.
///
/// Every variant is fatal for a running session.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing store cannot be read or written.
    #[error("world store unavailable: {source} ({path})")]
    Unavailable {
        /// Location of the store.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Another session holds the store.
    #[error("world store is locked by another session: {0}")]
    Locked(PathBuf),

    /// The stored graph could not be decoded or encoded.
    #[error("world store data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// The stored graph violates the world invariants.
    #[error(transparent)]
    World(#[from] WorldError),

    /// The storage has not been loaded yet or was already released.
    #[error("world store is closed")]
    Closed,
}
