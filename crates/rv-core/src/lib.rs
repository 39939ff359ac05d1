//! Core types for RagVenture: the world graph and the World Store.
//!
//! A world is a small directed graph of locations, items and exactly one
//! player. The [`WorldStore`] is the only thing that reads or rewrites it
//! during play; everything else sees owned [`EntityView`] projections.

/// Name vectors and cosine similarity.
pub mod embedding;
/// Entity types and identifiers.
pub mod entity;
/// Error types used throughout the crate.
pub mod error;
/// Relationship types and identifiers connecting entities.
pub mod relationship;
/// The bundled starter world.
pub mod sample;
/// Persistence backends.
pub mod storage;
/// Read projections and atomic mutations over a stored world.
pub mod store;
/// The relationship graph that owns entities and edges.
pub mod world;

pub use embedding::Embedding;
pub use entity::{Entity, EntityId, EntityKind, EntityView};
pub use error::{StoreError, StoreResult, WorldError, WorldResult};
pub use relationship::{Relationship, RelationshipId, RelationshipKind};
pub use storage::{JsonFileStorage, MemoryStorage, Storage};
pub use store::WorldStore;
pub use world::{World, WorldMeta, WorldSnapshot};
