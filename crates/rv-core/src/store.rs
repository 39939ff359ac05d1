//! The World Store: read projections and atomic graph mutations.

use chrono::Utc;

use crate::embedding::Embedding;
use crate::entity::{EntityId, EntityKind, EntityView};
use crate::error::{StoreError, StoreResult, WorldError};
use crate::relationship::RelationshipKind;
use crate::storage::Storage;
use crate::world::World;

/// Owns the live graph and its storage backend.
///
/// Mutations validate and rewrite a staged copy, commit it to storage, and
/// only then replace the live graph. Callers never observe a half-applied edit.
pub struct WorldStore {
    world: World,
    storage: Box<dyn Storage>,
}

impl WorldStore {
    /// Load and validate the graph held by `storage`.
    pub fn open(mut storage: Box<dyn Storage>) -> StoreResult<Self> {
        let world = storage.load()?;
        world.validate()?;
        tracing::info!(
            store = %storage.describe(),
            entities = world.entity_count(),
            relationships = world.relationship_count(),
            "world store opened"
        );
        Ok(Self { world, storage })
    }

    /// The live graph.
    pub fn world(&self) -> &World {
        &self.world
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// The location the player stands in.
    pub fn current_location(&self) -> StoreResult<EntityView> {
        let id = self.location_id()?;
        self.view(id)
    }

    /// Items lying at the player's location.
    pub fn location_items(&self) -> StoreResult<Vec<EntityView>> {
        let location = self.location_id()?;
        Ok(self
            .world
            .contents_of(location)
            .into_iter()
            .map(EntityView::from)
            .collect())
    }

    /// Locations reachable from the player's location.
    pub fn location_exits(&self) -> StoreResult<Vec<EntityView>> {
        let location = self.location_id()?;
        Ok(self
            .world
            .exits_from(location)
            .into_iter()
            .map(EntityView::from)
            .collect())
    }

    /// Items carried by the player.
    pub fn inventory(&self) -> StoreResult<Vec<EntityView>> {
        let player = self.player_id()?;
        Ok(self
            .world
            .contents_of(player)
            .into_iter()
            .map(EntityView::from)
            .collect())
    }

    /// An entity the player can currently perceive: the location itself, an
    /// exit, an item lying here, or an item carried.
    pub fn describe(&self, id: &EntityId) -> StoreResult<Option<EntityView>> {
        let location = self.location_id()?;
        let player = self.player_id()?;
        let visible = id == location
            || self.world.reaches(location, id)
            || self
                .world
                .holder_of(id)
                .is_some_and(|holder| holder == location || holder == player);
        if !visible {
            return Ok(None);
        }
        self.view(id).map(Some)
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Move the player along a reachability edge to `target`.
    ///
    /// Returns the new location, or `None` if no edge leads there.
    pub fn move_player(&mut self, target: &EntityId) -> StoreResult<Option<EntityView>> {
        self.transact("move", |world| {
            let player = world.player()?.id.clone();
            let current = world.player_location()?.clone();
            if !world.reaches(&current, target) {
                return None;
            }
            world
                .relink(&player, RelationshipKind::LocatedAt, target)
                .ok()?;
            world.get_entity(target).map(EntityView::from)
        })
    }

    /// Move `item` from the player's location into the inventory.
    ///
    /// Returns the item name, or `None` if the item is not lying here.
    pub fn take_item(&mut self, item: &EntityId) -> StoreResult<Option<String>> {
        self.transact("take", |world| {
            let player = world.player()?.id.clone();
            let location = world.player_location()?.clone();
            if world.holder_of(item) != Some(&location) {
                return None;
            }
            world
                .relink(item, RelationshipKind::ContainedIn, &player)
                .ok()?;
            world.get_entity(item).map(|e| e.name.clone())
        })
    }

    /// Put `item` from the inventory down at the player's location.
    ///
    /// Returns the item name, or `None` if the player does not carry it.
    pub fn drop_item(&mut self, item: &EntityId) -> StoreResult<Option<String>> {
        self.transact("drop", |world| {
            let player = world.player()?.id.clone();
            let location = world.player_location()?.clone();
            if world.holder_of(item) != Some(&player) {
                return None;
            }
            world
                .relink(item, RelationshipKind::ContainedIn, &location)
                .ok()?;
            world.get_entity(item).map(|e| e.name.clone())
        })
    }

    /// Compute name vectors for entities that lack one, or for all entities
    /// when the stored vectors came from a different model.
    ///
    /// Returns how many vectors were written.
    pub fn ensure_embeddings(
        &mut self,
        model_id: &str,
        encode: impl Fn(&str) -> Embedding,
    ) -> StoreResult<usize> {
        let stale = self.world.meta.embedding_model.as_deref() != Some(model_id);
        let pending: Vec<EntityId> = self
            .world
            .all_entities()
            .filter(|e| e.kind != EntityKind::Player)
            .filter(|e| stale || e.embedding.is_none())
            .map(|e| e.id.clone())
            .collect();
        if pending.is_empty() {
            return Ok(0);
        }

        let mut staged = self.world.clone();
        for id in &pending {
            if let Some(entity) = staged.get_entity_mut(id) {
                entity.embedding = Some(encode(&entity.name));
            }
        }
        staged.meta.embedding_model = Some(model_id.to_string());
        self.commit(staged)?;
        tracing::info!(model = model_id, count = pending.len(), "name vectors computed");
        Ok(pending.len())
    }

    /// Run `apply` against a staged copy and commit it if it returns `Some`.
    fn transact<R>(
        &mut self,
        op: &'static str,
        apply: impl FnOnce(&mut World) -> Option<R>,
    ) -> StoreResult<Option<R>> {
        let mut staged = self.world.clone();
        let Some(result) = apply(&mut staged) else {
            tracing::debug!(op, "precondition failed, graph untouched");
            return Ok(None);
        };
        self.commit(staged)?;
        tracing::info!(op, "transaction committed");
        Ok(Some(result))
    }

    fn commit(&mut self, mut staged: World) -> StoreResult<()> {
        staged.meta.updated_at = Utc::now();
        self.storage.commit(&staged)?;
        self.world = staged;
        Ok(())
    }

    fn player_id(&self) -> StoreResult<&EntityId> {
        self.world
            .player()
            .map(|p| &p.id)
            .ok_or_else(|| WorldError::Validation("the world has no player".into()).into())
    }

    fn location_id(&self) -> StoreResult<&EntityId> {
        self.world.player_location().ok_or_else(|| {
            WorldError::Validation("the player stands nowhere".into()).into()
        })
    }

    fn view(&self, id: &EntityId) -> StoreResult<EntityView> {
        self.world
            .get_entity(id)
            .map(EntityView::from)
            .ok_or_else(|| StoreError::World(WorldError::EntityNotFound(id.clone())))
    }
}

impl Drop for WorldStore {
    fn drop(&mut self) {
        self.storage.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;
    use crate::storage::MemoryStorage;
    use proptest::prelude::*;

    fn store() -> WorldStore {
        let world = sample::marketplace().unwrap();
        WorldStore::open(Box::new(MemoryStorage::new(world))).unwrap()
    }

    fn names(views: &[EntityView]) -> Vec<&str> {
        views.iter().map(|v| v.name.as_str()).collect()
    }

    /// Accepts nothing: every commit fails as if the store went away.
    struct UnreachableStorage {
        world: World,
    }

    impl Storage for UnreachableStorage {
        fn load(&mut self) -> StoreResult<World> {
            Ok(self.world.clone())
        }

        fn commit(&mut self, _world: &World) -> StoreResult<()> {
            Err(StoreError::Unavailable {
                path: "offline".into(),
                source: std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "down"),
            })
        }

        fn release(&mut self) {}

        fn describe(&self) -> String {
            "offline".into()
        }
    }

    #[test]
    fn reads_project_the_player_surroundings() {
        let store = store();
        assert_eq!(store.current_location().unwrap().name, "Marketplace");
        assert_eq!(
            names(&store.location_items().unwrap()),
            ["golden key", "silver key"]
        );
        assert_eq!(names(&store.location_exits().unwrap()), ["Tavern"]);
        assert_eq!(names(&store.inventory().unwrap()), ["lantern"]);
    }

    #[test]
    fn move_follows_reachability_edge() {
        let mut store = store();
        let arrived = store.move_player(&"tavern".into()).unwrap().unwrap();
        assert_eq!(arrived.name, "Tavern");
        assert_eq!(store.current_location().unwrap().name, "Tavern");

        let player = EntityId::new("player");
        let located = store
            .world()
            .relationships_from(&player)
            .into_iter()
            .filter(|r| r.kind == RelationshipKind::LocatedAt)
            .count();
        assert_eq!(located, 1);
    }

    #[test]
    fn move_without_edge_fails_untouched() {
        let mut store = store();
        assert!(store.move_player(&"cellar".into()).unwrap().is_none());
        assert_eq!(store.current_location().unwrap().name, "Marketplace");
    }

    #[test]
    fn move_to_non_location_fails() {
        let mut store = store();
        assert!(store.move_player(&"golden-key".into()).unwrap().is_none());
    }

    #[test]
    fn take_then_drop_restores_containment() {
        let mut store = store();
        let key = EntityId::new("golden-key");
        let origin = store.world().holder_of(&key).cloned();

        assert_eq!(store.take_item(&key).unwrap().as_deref(), Some("golden key"));
        assert_eq!(store.world().holder_of(&key), Some(&EntityId::new("player")));
        assert_eq!(store.drop_item(&key).unwrap().as_deref(), Some("golden key"));
        assert_eq!(store.world().holder_of(&key).cloned(), origin);
    }

    #[test]
    fn take_of_carried_item_fails_untouched() {
        let mut store = store();
        let before = names(&store.inventory().unwrap())
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();
        assert!(store.take_item(&"lantern".into()).unwrap().is_none());
        assert_eq!(names(&store.inventory().unwrap()), before);
    }

    #[test]
    fn take_of_item_elsewhere_fails() {
        let mut store = store();
        assert!(store.take_item(&"rope".into()).unwrap().is_none());
        assert_eq!(
            store.world().holder_of(&"rope".into()),
            Some(&EntityId::new("tavern"))
        );
    }

    #[test]
    fn drop_of_item_not_carried_fails() {
        let mut store = store();
        assert!(store.drop_item(&"golden-key".into()).unwrap().is_none());
    }

    #[test]
    fn describe_only_sees_surroundings() {
        let store = store();
        assert!(store.describe(&"lantern".into()).unwrap().is_some());
        assert!(store.describe(&"tavern".into()).unwrap().is_some());
        assert!(store.describe(&"rope".into()).unwrap().is_none());
        assert!(store.describe(&"cellar".into()).unwrap().is_none());
    }

    #[test]
    fn failed_commit_leaves_live_graph_untouched() {
        let world = sample::marketplace().unwrap();
        let mut store = WorldStore::open(Box::new(UnreachableStorage { world })).unwrap();

        let result = store.move_player(&"tavern".into());
        assert!(matches!(result, Err(StoreError::Unavailable { .. })));
        assert_eq!(store.current_location().unwrap().name, "Marketplace");
    }

    #[test]
    fn precondition_failure_does_not_commit() {
        let world = sample::marketplace().unwrap();
        let mut store = WorldStore::open(Box::new(UnreachableStorage { world })).unwrap();
        assert!(store.drop_item(&"rope".into()).unwrap().is_none());
    }

    #[test]
    fn ensure_embeddings_is_idempotent_per_model() {
        let mut store = store();
        let encode = |text: &str| Embedding::new(vec![text.len() as f32, 1.0]);

        let first = store.ensure_embeddings("len-v1", encode).unwrap();
        assert_eq!(first, 7);
        assert_eq!(store.ensure_embeddings("len-v1", encode).unwrap(), 0);
        assert_eq!(store.ensure_embeddings("len-v2", encode).unwrap(), 7);
        assert!(store.current_location().unwrap().embedding.is_some());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Move(&'static str),
        Take(&'static str),
        Drop(&'static str),
    }

    const PLACES: [&str; 3] = ["marketplace", "tavern", "cellar"];
    const ITEMS: [&str; 4] = ["golden-key", "silver-key", "lantern", "rope"];

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            prop::sample::select(PLACES.to_vec()).prop_map(Op::Move),
            prop::sample::select(ITEMS.to_vec()).prop_map(Op::Take),
            prop::sample::select(ITEMS.to_vec()).prop_map(Op::Drop),
        ]
    }

    proptest! {
        #[test]
        fn invariants_hold_under_any_op_sequence(ops in prop::collection::vec(op(), 0..40)) {
            let mut store = store();
            for op in ops {
                match op {
                    Op::Move(to) => { store.move_player(&to.into()).unwrap(); }
                    Op::Take(item) => { store.take_item(&item.into()).unwrap(); }
                    Op::Drop(item) => { store.drop_item(&item.into()).unwrap(); }
                }
                prop_assert!(store.world().validate().is_ok());
            }
        }
    }
}
