//! Semantic matching of verbs to commands and nouns to world entities.

use std::fmt;

use rv_core::{EntityId, EntityView};

use crate::command::CommandKind;
use crate::resolver::{Labeled, Resolution, resolve};
use crate::scorer::SemanticScorer;
use crate::view::WorldView;

/// Minimum similarity for a verb to select a command.
pub const COMMAND_THRESHOLD: f32 = 0.95;

/// Minimum similarity for a noun to select an entity.
pub const TARGET_THRESHOLD: f32 = 0.75;

/// Where a target candidate was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetSource {
    /// A location reachable from here.
    Exit,
    /// An item lying here.
    Item,
    /// An item the player carries.
    Inventory,
    /// The location the player stands in.
    Surroundings,
}

/// An entity in view, tagged with where it was seen.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetRef {
    /// The entity.
    pub id: EntityId,
    /// Which projection it came from.
    pub source: TargetSource,
}

/// Owns the scorer and the pre-encoded command vocabulary.
pub struct Matcher {
    scorer: Box<dyn SemanticScorer>,
    commands: Vec<Labeled<CommandKind>>,
}

impl Matcher {
    /// Encode every command synonym once.
    pub fn new(scorer: Box<dyn SemanticScorer>) -> Self {
        let commands = CommandKind::ALL
            .into_iter()
            .map(|kind| Labeled {
                key: kind,
                name: kind.label().to_string(),
                vectors: kind.synonyms().iter().map(|s| scorer.encode(s)).collect(),
            })
            .collect();
        Self { scorer, commands }
    }

    /// The scorer in use.
    pub fn scorer(&self) -> &dyn SemanticScorer {
        self.scorer.as_ref()
    }

    /// Resolve a verb against the command vocabulary.
    pub fn match_command(&self, verb: &str) -> Resolution<CommandKind> {
        let query = self.scorer.encode(verb);
        resolve(self.scorer(), &query, &self.commands, COMMAND_THRESHOLD)
    }

    /// Resolve a noun against the entities in view.
    pub fn match_target(
        &self,
        noun: &str,
        candidates: &[Labeled<TargetRef>],
    ) -> Resolution<TargetRef> {
        let query = self.scorer.encode(noun);
        resolve(self.scorer(), &query, candidates, TARGET_THRESHOLD)
    }

    /// Exits, then items here, then carried items, each tagged with its source.
    /// The current location comes last when `with_surroundings` is set.
    ///
    /// Stored name vectors are used when present; names without one are
    /// encoded on the spot.
    pub fn label_targets(
        &self,
        view: &WorldView,
        with_surroundings: bool,
    ) -> Vec<Labeled<TargetRef>> {
        let tagged = [
            (TargetSource::Exit, view.exits.as_slice()),
            (TargetSource::Item, view.items.as_slice()),
            (TargetSource::Inventory, view.inventory.as_slice()),
        ];
        let here = with_surroundings.then_some((TargetSource::Surroundings, &view.location));
        tagged
            .into_iter()
            .flat_map(|(source, entities)| entities.iter().map(move |e| (source, e)))
            .chain(here)
            .map(|(source, entity)| self.label(source, entity))
            .collect()
    }

    fn label(&self, source: TargetSource, entity: &EntityView) -> Labeled<TargetRef> {
        let vector = entity
            .embedding
            .clone()
            .unwrap_or_else(|| self.scorer.encode(&entity.name));
        Labeled {
            key: TargetRef {
                id: entity.id.clone(),
                source,
            },
            name: entity.name.clone(),
            vectors: vec![vector],
        }
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("model", &self.scorer.model_id())
            .field("commands", &self.commands.len())
            .finish()
    }
}
