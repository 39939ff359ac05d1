//! Narrative text for successful actions.

use rv_core::EntityView;

/// What a successful action produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The player arrived somewhere.
    Moved(EntityView),
    /// An item went into the inventory.
    Took(String),
    /// An item was put down.
    Dropped(String),
    /// Something was looked at closely.
    Examined(EntityView),
}

/// Second-person narration of an outcome.
pub fn narrate(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Moved(location) => {
            let mut text = format!("You are now in {}.", location.name);
            if !location.description.is_empty() {
                text.push('\n');
                text.push_str(&location.description);
            }
            text
        }
        Outcome::Took(name) => format!("You now carry the {name}."),
        Outcome::Dropped(name) => format!("You put down the {name}."),
        Outcome::Examined(entity) if entity.description.is_empty() => {
            format!("You see nothing special about the {}.", entity.name)
        }
        Outcome::Examined(entity) => format!("{}: {}", entity.name, entity.description),
    }
}
