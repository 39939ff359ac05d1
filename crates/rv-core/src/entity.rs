use std::fmt;

use serde::{Deserialize, Serialize};

use crate::embedding::Embedding;

/// Stable identifier of a world entity, written as a slug (`"tavern"`, `"golden-key"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    /// Create an ID from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw slug.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The kind of an entity. The graph knows exactly three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A place the player can stand in.
    Location,
    /// A physical object that is always held by a location or the player.
    Item,
    /// The singleton player.
    Player,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Location => write!(f, "location"),
            Self::Item => write!(f, "item"),
            Self::Player => write!(f, "player"),
        }
    }
}

/// Core entity struct. Every node of the world graph is an Entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Unique identifier for this entity.
    pub id: EntityId,
    /// The kind (type) of this entity.
    pub kind: EntityKind,
    /// Display name of the entity.
    pub name: String,
    /// Free-text description of the entity.
    #[serde(default)]
    pub description: String,
    /// Pre-computed vector of the entity name, used for semantic matching.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Embedding>,
}

impl Entity {
    /// Create a new entity without a description or embedding.
    pub fn new(id: impl Into<EntityId>, kind: EntityKind, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            description: String::new(),
            embedding: None,
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Read-only projection of an entity handed out by the World Store.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityView {
    /// Entity identifier.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Name vector, if one has been computed.
    pub embedding: Option<Embedding>,
}

impl From<&Entity> for EntityView {
    fn from(entity: &Entity) -> Self {
        Self {
            id: entity.id.clone(),
            name: entity.name.clone(),
            description: entity.description.clone(),
            embedding: entity.embedding.clone(),
        }
    }
}
