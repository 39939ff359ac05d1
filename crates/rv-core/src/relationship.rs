use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{EntityId, EntityKind};

/// Unique identifier for a relationship edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationshipId(pub Uuid);

impl RelationshipId {
    /// Generates a new random relationship identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RelationshipId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RelationshipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A directed edge between two entities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    /// Unique identifier for this relationship edge.
    pub id: RelationshipId,
    /// The entity where this relationship originates.
    pub source: EntityId,
    /// The entity this relationship points to.
    pub target: EntityId,
    /// The semantic kind of this relationship.
    pub kind: RelationshipKind,
}

impl Relationship {
    /// Creates a new relationship from `source` to `target` with the given kind.
    pub fn new(
        source: impl Into<EntityId>,
        kind: RelationshipKind,
        target: impl Into<EntityId>,
    ) -> Self {
        Self {
            id: RelationshipId::new(),
            source: source.into(),
            target: target.into(),
            kind,
        }
    }
}

/// The kind of relationship between two entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    /// A location has a passage to another location. One direction only.
    Reaches,
    /// The player stands at a location.
    LocatedAt,
    /// An item is held by a location or by the player.
    ContainedIn,
}

impl RelationshipKind {
    /// Returns true if an edge of this kind may run from `source` to `target`.
    pub fn accepts(&self, source: EntityKind, target: EntityKind) -> bool {
        match self {
            Self::Reaches => source == EntityKind::Location && target == EntityKind::Location,
            Self::LocatedAt => source == EntityKind::Player && target == EntityKind::Location,
            Self::ContainedIn => {
                source == EntityKind::Item
                    && matches!(target, EntityKind::Location | EntityKind::Player)
            }
        }
    }

    /// Returns true if a source may hold at most one edge of this kind.
    pub fn is_singleton(&self) -> bool {
        matches!(self, Self::LocatedAt | Self::ContainedIn)
    }

    /// Returns the human-readable phrase for this relationship kind.
    pub fn as_phrase(&self) -> &'static str {
        match self {
            Self::Reaches => "reaches",
            Self::LocatedAt => "located at",
            Self::ContainedIn => "in",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_phrase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_kinds() {
        use EntityKind::*;
        assert!(RelationshipKind::Reaches.accepts(Location, Location));
        assert!(!RelationshipKind::Reaches.accepts(Item, Location));
        assert!(RelationshipKind::LocatedAt.accepts(Player, Location));
        assert!(!RelationshipKind::LocatedAt.accepts(Item, Location));
        assert!(RelationshipKind::ContainedIn.accepts(Item, Player));
        assert!(RelationshipKind::ContainedIn.accepts(Item, Location));
        assert!(!RelationshipKind::ContainedIn.accepts(Item, Item));
    }

    #[test]
    fn singleton_kinds() {
        assert!(RelationshipKind::LocatedAt.is_singleton());
        assert!(RelationshipKind::ContainedIn.is_singleton());
        assert!(!RelationshipKind::Reaches.is_singleton());
    }

    #[test]
    fn relationship_builder() {
        let rel = Relationship::new("marketplace", RelationshipKind::Reaches, "tavern");
        assert_eq!(rel.source, EntityId::new("marketplace"));
        assert_eq!(rel.target, EntityId::new("tavern"));
        assert_eq!(rel.kind.to_string(), "reaches");
    }
}
