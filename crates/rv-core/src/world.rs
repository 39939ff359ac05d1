use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId, EntityKind};
use crate::error::{WorldError, WorldResult};
use crate::relationship::{Relationship, RelationshipId, RelationshipKind};

/// Metadata about the world itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldMeta {
    /// Display name of the world.
    pub name: String,
    /// Free-text blurb shown when a session starts.
    #[serde(default)]
    pub description: String,
    /// Fingerprint of the encoder that produced the stored name vectors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding_model: Option<String>,
    /// When the world was first created.
    pub created_at: DateTime<Utc>,
    /// When the world was last committed.
    pub updated_at: DateTime<Utc>,
}

impl WorldMeta {
    /// Create metadata with the given name and fresh timestamps.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            description: String::new(),
            embedding_model: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Serializable form of a [`World`]: entities and edges in a stable order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// World metadata.
    pub meta: WorldMeta,
    /// All entities in insertion order.
    pub entities: Vec<Entity>,
    /// All relationships, in the order they were created.
    pub relationships: Vec<Relationship>,
}

/// The relationship graph. Owns all entities and relationships.
#[derive(Debug, Clone)]
pub struct World {
    /// World metadata.
    pub meta: WorldMeta,
    entities: HashMap<EntityId, Entity>,
    relationships: HashMap<RelationshipId, Relationship>,

    // Indexes
    entity_order: Vec<EntityId>,
    relationship_order: Vec<RelationshipId>,
    by_kind: HashMap<EntityKind, Vec<EntityId>>,
    edges_from: HashMap<EntityId, Vec<RelationshipId>>,
    edges_to: HashMap<EntityId, Vec<RelationshipId>>,
}

impl World {
    /// Create an empty world.
    pub fn new(meta: WorldMeta) -> Self {
        Self {
            meta,
            entities: HashMap::new(),
            relationships: HashMap::new(),
            entity_order: Vec::new(),
            relationship_order: Vec::new(),
            by_kind: HashMap::new(),
            edges_from: HashMap::new(),
            edges_to: HashMap::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Entity CRUD
    // -----------------------------------------------------------------------

    /// Add an entity to the world. Returns the entity's ID.
    pub fn add_entity(&mut self, entity: Entity) -> WorldResult<EntityId> {
        if self.entities.contains_key(&entity.id) {
            return Err(WorldError::DuplicateId(entity.id));
        }
        if entity.kind == EntityKind::Player && self.player().is_some() {
            return Err(WorldError::Validation(
                "a world holds exactly one player".to_string(),
            ));
        }

        let id = entity.id.clone();
        self.by_kind.entry(entity.kind).or_default().push(id.clone());
        self.entity_order.push(id.clone());
        self.entities.insert(id.clone(), entity);
        Ok(id)
    }

    /// Get a reference to an entity by ID.
    pub fn get_entity(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Get a mutable reference to an entity by ID.
    pub fn get_entity_mut(&mut self, id: &EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    /// Get all entities of a specific kind, in insertion order.
    pub fn entities_by_kind(&self, kind: EntityKind) -> Vec<&Entity> {
        self.by_kind
            .get(&kind)
            .map(|ids| ids.iter().filter_map(|id| self.entities.get(id)).collect())
            .unwrap_or_default()
    }

    /// Get all entities, in insertion order.
    pub fn all_entities(&self) -> impl Iterator<Item = &Entity> {
        self.entity_order
            .iter()
            .filter_map(|id| self.entities.get(id))
    }

    // -----------------------------------------------------------------------
    // Relationship CRUD
    // -----------------------------------------------------------------------

    /// Add a relationship between two entities.
    ///
    /// Rejects edges whose endpoint kinds do not fit `rel.kind` and a second
    /// edge of a singleton kind leaving the same source.
    pub fn add_relationship(&mut self, rel: Relationship) -> WorldResult<RelationshipId> {
        self.check_edge(&rel.source, rel.kind, &rel.target)?;
        if rel.kind.is_singleton() && self.edge_from(&rel.source, rel.kind).is_some() {
            return Err(WorldError::DuplicateEdge {
                entity: rel.source,
                kind: rel.kind,
            });
        }
        Ok(self.insert_relationship(rel))
    }

    /// Remove a relationship by ID.
    pub fn remove_relationship(&mut self, id: RelationshipId) -> WorldResult<Relationship> {
        let rel = self
            .relationships
            .remove(&id)
            .ok_or(WorldError::RelationshipNotFound(id))?;
        self.relationship_order.retain(|rid| *rid != id);
        if let Some(ids) = self.edges_from.get_mut(&rel.source) {
            ids.retain(|rid| *rid != id);
        }
        if let Some(ids) = self.edges_to.get_mut(&rel.target) {
            ids.retain(|rid| *rid != id);
        }
        Ok(rel)
    }

    /// Replace the singleton `kind` edge leaving `source` with one pointing at `target`.
    ///
    /// The new edge is checked before the old one is removed, so on error the
    /// graph is unchanged.
    pub fn relink(
        &mut self,
        source: &EntityId,
        kind: RelationshipKind,
        target: &EntityId,
    ) -> WorldResult<RelationshipId> {
        if !kind.is_singleton() {
            return Err(WorldError::Validation(format!(
                "\"{kind}\" edges are not singletons"
            )));
        }
        self.check_edge(source, kind, target)?;

        if let Some(old) = self.edge_from(source, kind).map(|r| r.id) {
            self.remove_relationship(old)?;
        }
        Ok(self.insert_relationship(Relationship::new(source.clone(), kind, target.clone())))
    }

    fn check_edge(
        &self,
        source: &EntityId,
        kind: RelationshipKind,
        target: &EntityId,
    ) -> WorldResult<()> {
        let source_kind = self
            .entities
            .get(source)
            .ok_or_else(|| WorldError::EntityNotFound(source.clone()))?
            .kind;
        let target_kind = self
            .entities
            .get(target)
            .ok_or_else(|| WorldError::EntityNotFound(target.clone()))?
            .kind;
        if !kind.accepts(source_kind, target_kind) {
            return Err(WorldError::InvalidEdge {
                kind,
                source_kind,
                target_kind,
            });
        }
        Ok(())
    }

    fn insert_relationship(&mut self, rel: Relationship) -> RelationshipId {
        let id = rel.id;
        self.edges_from
            .entry(rel.source.clone())
            .or_default()
            .push(id);
        self.edges_to.entry(rel.target.clone()).or_default().push(id);
        self.relationship_order.push(id);
        self.relationships.insert(id, rel);
        id
    }

    /// Get all relationships originating from an entity, oldest first.
    pub fn relationships_from(&self, entity: &EntityId) -> Vec<&Relationship> {
        self.edges_from
            .get(entity)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.relationships.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get all relationships pointing to an entity, oldest first.
    pub fn relationships_to(&self, entity: &EntityId) -> Vec<&Relationship> {
        self.edges_to
            .get(entity)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.relationships.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The first edge of `kind` leaving `source`.
    pub fn edge_from(&self, source: &EntityId, kind: RelationshipKind) -> Option<&Relationship> {
        self.relationships_from(source)
            .into_iter()
            .find(|r| r.kind == kind)
    }

    // -----------------------------------------------------------------------
    // Graph traversal
    // -----------------------------------------------------------------------

    /// The player entity, if the world has one.
    pub fn player(&self) -> Option<&Entity> {
        self.entities_by_kind(EntityKind::Player).into_iter().next()
    }

    /// The location the player stands in.
    pub fn player_location(&self) -> Option<&EntityId> {
        let player = self.player()?;
        self.edge_from(&player.id, RelationshipKind::LocatedAt)
            .map(|r| &r.target)
    }

    /// The location or player currently holding `item`.
    pub fn holder_of(&self, item: &EntityId) -> Option<&EntityId> {
        self.edge_from(item, RelationshipKind::ContainedIn)
            .map(|r| &r.target)
    }

    /// Items held by `holder`, in the order they arrived.
    pub fn contents_of(&self, holder: &EntityId) -> Vec<&Entity> {
        self.relationships_to(holder)
            .into_iter()
            .filter(|r| r.kind == RelationshipKind::ContainedIn)
            .filter_map(|r| self.entities.get(&r.source))
            .collect()
    }

    /// Locations reachable from `location` in one step.
    pub fn exits_from(&self, location: &EntityId) -> Vec<&Entity> {
        self.relationships_from(location)
            .into_iter()
            .filter(|r| r.kind == RelationshipKind::Reaches)
            .filter_map(|r| self.entities.get(&r.target))
            .collect()
    }

    /// True if a reachability edge runs from `from` to `to`.
    pub fn reaches(&self, from: &EntityId, to: &EntityId) -> bool {
        self.relationships_from(from)
            .iter()
            .any(|r| r.kind == RelationshipKind::Reaches && &r.target == to)
    }

    // -----------------------------------------------------------------------
    // Invariants
    // -----------------------------------------------------------------------

    /// Check every structural invariant of the graph.
    pub fn validate(&self) -> WorldResult<()> {
        let players = self.entities_by_kind(EntityKind::Player);
        let player = match players.as_slice() {
            [player] => *player,
            [] => return Err(WorldError::Validation("the world has no player".into())),
            _ => return Err(WorldError::Validation("the world has several players".into())),
        };

        let located: Vec<_> = self
            .relationships_from(&player.id)
            .into_iter()
            .filter(|r| r.kind == RelationshipKind::LocatedAt)
            .collect();
        if located.len() != 1 {
            return Err(WorldError::Validation(format!(
                "the player must stand in exactly one location, found {}",
                located.len()
            )));
        }

        for item in self.entities_by_kind(EntityKind::Item) {
            let holders = self
                .relationships_from(&item.id)
                .into_iter()
                .filter(|r| r.kind == RelationshipKind::ContainedIn)
                .count();
            if holders != 1 {
                return Err(WorldError::Validation(format!(
                    "item {} must be held exactly once, found {holders}",
                    item.id
                )));
            }
        }

        for rel in self
            .relationship_order
            .iter()
            .filter_map(|id| self.relationships.get(id))
        {
            self.check_edge(&rel.source, rel.kind, &rel.target)?;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Snapshots
    // -----------------------------------------------------------------------

    /// Serializable copy of the graph.
    pub fn to_snapshot(&self) -> WorldSnapshot {
        let entities: Vec<Entity> = self.all_entities().cloned().collect();
        let relationships = self
            .relationship_order
            .iter()
            .filter_map(|id| self.relationships.get(id))
            .cloned()
            .collect();
        WorldSnapshot {
            meta: self.meta.clone(),
            entities,
            relationships,
        }
    }

    /// Rebuild a world (and its indexes) from a snapshot.
    pub fn from_snapshot(snapshot: WorldSnapshot) -> WorldResult<Self> {
        let mut world = World::new(snapshot.meta);
        for entity in snapshot.entities {
            world.add_entity(entity)?;
        }
        for rel in snapshot.relationships {
            world.add_relationship(rel)?;
        }
        Ok(world)
    }

    // -----------------------------------------------------------------------
    // Statistics
    // -----------------------------------------------------------------------

    /// Number of entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Number of relationships.
    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_world() -> World {
        let mut world = World::new(WorldMeta::new("Test World"));
        world
            .add_entity(Entity::new("market", EntityKind::Location, "Marketplace"))
            .unwrap();
        world
            .add_entity(Entity::new("tavern", EntityKind::Location, "Tavern"))
            .unwrap();
        world
            .add_entity(Entity::new("player", EntityKind::Player, "You"))
            .unwrap();
        world
            .add_entity(Entity::new("key", EntityKind::Item, "golden key"))
            .unwrap();
        world
            .add_relationship(Relationship::new("market", RelationshipKind::Reaches, "tavern"))
            .unwrap();
        world
            .add_relationship(Relationship::new(
                "player",
                RelationshipKind::LocatedAt,
                "market",
            ))
            .unwrap();
        world
            .add_relationship(Relationship::new(
                "key",
                RelationshipKind::ContainedIn,
                "market",
            ))
            .unwrap();
        world
    }

    #[test]
    fn add_and_get_entity() {
        let world = test_world();
        let tavern = world.get_entity(&"tavern".into()).unwrap();
        assert_eq!(tavern.name, "Tavern");
    }

    #[test]
    fn duplicate_id_rejected() {
        let mut world = test_world();
        let result = world.add_entity(Entity::new("tavern", EntityKind::Location, "Inn"));
        assert!(matches!(result, Err(WorldError::DuplicateId(_))));
    }

    #[test]
    fn second_player_rejected() {
        let mut world = test_world();
        let result = world.add_entity(Entity::new("other", EntityKind::Player, "Other"));
        assert!(result.is_err());
    }

    #[test]
    fn reachability_is_directed() {
        let world = test_world();
        assert!(world.reaches(&"market".into(), &"tavern".into()));
        assert!(!world.reaches(&"tavern".into(), &"market".into()));
        assert_eq!(world.exits_from(&"tavern".into()).len(), 0);
    }

    #[test]
    fn invalid_edge_kinds_rejected() {
        let mut world = test_world();
        let result =
            world.add_relationship(Relationship::new("key", RelationshipKind::Reaches, "tavern"));
        assert!(matches!(result, Err(WorldError::InvalidEdge { .. })));
    }

    #[test]
    fn second_containment_edge_rejected() {
        let mut world = test_world();
        let result = world.add_relationship(Relationship::new(
            "key",
            RelationshipKind::ContainedIn,
            "tavern",
        ));
        assert!(matches!(result, Err(WorldError::DuplicateEdge { .. })));
    }

    #[test]
    fn relink_replaces_singleton_edge() {
        let mut world = test_world();
        world
            .relink(&"player".into(), RelationshipKind::LocatedAt, &"tavern".into())
            .unwrap();
        assert_eq!(world.player_location(), Some(&EntityId::new("tavern")));
        let located = world
            .relationships_from(&"player".into())
            .into_iter()
            .filter(|r| r.kind == RelationshipKind::LocatedAt)
            .count();
        assert_eq!(located, 1);
    }

    #[test]
    fn relink_to_wrong_kind_leaves_graph_untouched() {
        let mut world = test_world();
        let result = world.relink(&"player".into(), RelationshipKind::LocatedAt, &"key".into());
        assert!(result.is_err());
        assert_eq!(world.player_location(), Some(&EntityId::new("market")));
    }

    #[test]
    fn contents_follow_containment_edges() {
        let mut world = test_world();
        assert_eq!(world.contents_of(&"market".into()).len(), 1);
        world
            .relink(&"key".into(), RelationshipKind::ContainedIn, &"player".into())
            .unwrap();
        assert!(world.contents_of(&"market".into()).is_empty());
        assert_eq!(world.contents_of(&"player".into())[0].name, "golden key");
        assert_eq!(world.holder_of(&"key".into()), Some(&EntityId::new("player")));
    }

    #[test]
    fn validate_accepts_consistent_world() {
        assert!(test_world().validate().is_ok());
    }

    #[test]
    fn validate_rejects_orphan_item() {
        let mut world = test_world();
        world
            .add_entity(Entity::new("rope", EntityKind::Item, "rope"))
            .unwrap();
        assert!(matches!(world.validate(), Err(WorldError::Validation(_))));
    }

    #[test]
    fn validate_rejects_missing_player() {
        let world = World::new(WorldMeta::new("Empty"));
        assert!(world.validate().is_err());
    }

    #[test]
    fn snapshot_preserves_graph() {
        let world = test_world();
        let json = serde_json::to_string(&world.to_snapshot()).unwrap();
        let snapshot: WorldSnapshot = serde_json::from_str(&json).unwrap();
        let restored = World::from_snapshot(snapshot).unwrap();

        assert_eq!(restored.entity_count(), world.entity_count());
        assert_eq!(restored.relationship_count(), world.relationship_count());
        assert_eq!(restored.player_location(), Some(&EntityId::new("market")));
        assert!(restored.validate().is_ok());
    }

    #[test]
    fn snapshot_keeps_arrival_order_at_holders() {
        let mut world = test_world();
        world
            .add_entity(Entity::new("coin", EntityKind::Item, "coin"))
            .unwrap();
        world
            .add_relationship(Relationship::new(
                "coin",
                RelationshipKind::ContainedIn,
                "market",
            ))
            .unwrap();
        world
            .relink(&"key".into(), RelationshipKind::ContainedIn, &"player".into())
            .unwrap();
        world
            .relink(&"key".into(), RelationshipKind::ContainedIn, &"market".into())
            .unwrap();

        let names = |w: &World| -> Vec<String> {
            w.contents_of(&"market".into())
                .into_iter()
                .map(|e| e.name.clone())
                .collect()
        };
        assert_eq!(names(&world), ["coin", "golden key"]);

        let restored = World::from_snapshot(world.to_snapshot()).unwrap();
        assert_eq!(names(&restored), ["coin", "golden key"]);
    }
}
