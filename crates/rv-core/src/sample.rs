//! The bundled starter world.

use crate::entity::{Entity, EntityKind};
use crate::error::WorldResult;
use crate::relationship::{Relationship, RelationshipKind};
use crate::world::{World, WorldMeta};

/// A small town square with a tavern and its cellar.
///
/// The player starts in the Marketplace carrying a lantern; two keys lie on
/// the cobbles and a rope hangs in the tavern.
pub fn marketplace() -> WorldResult<World> {
    let mut meta = WorldMeta::new("Marketplace");
    meta.description = "A sleepy market town at the edge of the forest.".to_string();
    let mut world = World::new(meta);

    let entities = [
        Entity::new("marketplace", EntityKind::Location, "Marketplace")
            .with_description("Stalls line the square. The tavern door stands open."),
        Entity::new("tavern", EntityKind::Location, "Tavern")
            .with_description("Low beams, a cold hearth and a trapdoor behind the bar."),
        Entity::new("cellar", EntityKind::Location, "Cellar")
            .with_description("Barrels and darkness. A ladder leads back up."),
        Entity::new("player", EntityKind::Player, "You"),
        Entity::new("golden-key", EntityKind::Item, "golden key")
            .with_description("Heavy, ornate, and warm to the touch."),
        Entity::new("silver-key", EntityKind::Item, "silver key")
            .with_description("Thin and tarnished."),
        Entity::new("lantern", EntityKind::Item, "lantern")
            .with_description("A dented brass lantern."),
        Entity::new("rope", EntityKind::Item, "rope").with_description("Ten feet of hemp rope."),
    ];

    let edges = [
        ("marketplace", RelationshipKind::Reaches, "tavern"),
        ("tavern", RelationshipKind::Reaches, "marketplace"),
        ("tavern", RelationshipKind::Reaches, "cellar"),
        ("cellar", RelationshipKind::Reaches, "tavern"),
        ("player", RelationshipKind::LocatedAt, "marketplace"),
        ("golden-key", RelationshipKind::ContainedIn, "marketplace"),
        ("silver-key", RelationshipKind::ContainedIn, "marketplace"),
        ("lantern", RelationshipKind::ContainedIn, "player"),
        ("rope", RelationshipKind::ContainedIn, "tavern"),
    ];

    for entity in entities {
        world.add_entity(entity)?;
    }
    for (source, kind, target) in edges {
        world.add_relationship(Relationship::new(source, kind, target))?;
    }
    Ok(world)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starter_world_is_valid() {
        let world = marketplace().unwrap();
        assert!(world.validate().is_ok());
        assert_eq!(world.contents_of(&"marketplace".into()).len(), 2);
        assert_eq!(world.contents_of(&"player".into())[0].name, "lantern");
    }
}
