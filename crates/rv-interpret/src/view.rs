//! What the presentation layer shows: world projections and the dialog.

use std::fmt;

use rv_core::{EntityView, StoreResult, WorldStore};

/// Observable world state around the player.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldView {
    /// Where the player stands.
    pub location: EntityView,
    /// Items lying here.
    pub items: Vec<EntityView>,
    /// Locations reachable from here.
    pub exits: Vec<EntityView>,
    /// Items the player carries.
    pub inventory: Vec<EntityView>,
}

impl WorldView {
    /// Read all four projections from the store.
    pub fn load(store: &WorldStore) -> StoreResult<Self> {
        Ok(Self {
            location: store.current_location()?,
            items: store.location_items()?,
            exits: store.location_exits()?,
            inventory: store.inventory()?,
        })
    }
}

/// A numbered choice between ambiguous candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceMenu {
    /// The question above the options.
    pub prompt: String,
    /// Option labels; option `n` is `options[n - 1]`.
    pub options: Vec<String>,
    /// Shown above the menu after an unusable answer.
    pub hint: Option<String>,
}

impl ChoiceMenu {
    /// A menu without hint.
    pub fn new(prompt: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            prompt: prompt.into(),
            options,
            hint: None,
        }
    }

    /// Number of entries including cancel.
    pub fn len(&self) -> usize {
        self.options.len() + 1
    }

    /// Always false: cancel is always present.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// `(1) golden key | (2) silver key | (0) cancel`
    pub fn render(&self) -> String {
        self.options
            .iter()
            .enumerate()
            .map(|(i, option)| format!("({}) {option}", i + 1))
            .chain(std::iter::once("(0) cancel".to_string()))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl fmt::Display for ChoiceMenu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(hint) = &self.hint {
            writeln!(f, "{hint}")?;
        }
        writeln!(f, "{}", self.prompt)?;
        f.write_str(&self.render())
    }
}

/// The dialog line under the world panels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Dialog {
    /// Nothing to say.
    #[default]
    None,
    /// A narrative or error message.
    Message(String),
    /// A pending choice.
    Choice(ChoiceMenu),
}

impl Dialog {
    /// Shorthand for [`Dialog::Message`].
    pub fn message(text: impl Into<String>) -> Self {
        Dialog::Message(text.into())
    }

    /// The pending menu, if any.
    pub fn menu(&self) -> Option<&ChoiceMenu> {
        match self {
            Dialog::Choice(menu) => Some(menu),
            _ => None,
        }
    }
}

impl fmt::Display for Dialog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialog::None => Ok(()),
            Dialog::Message(text) => f.write_str(text),
            Dialog::Choice(menu) => menu.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rv_core::{MemoryStorage, sample};

    fn keys_menu() -> ChoiceMenu {
        ChoiceMenu::new(
            "Which one do you mean?",
            vec!["golden key".into(), "silver key".into()],
        )
    }

    #[test]
    fn renders_numbered_options_with_cancel() {
        insta::assert_snapshot!(keys_menu().render(), @"(1) golden key | (2) silver key | (0) cancel");
    }

    #[test]
    fn menu_length_counts_cancel() {
        assert_eq!(keys_menu().len(), 3);
    }

    #[test]
    fn display_puts_hint_first() {
        let mut menu = keys_menu();
        menu.hint = Some("Please answer with a number.".into());
        insta::assert_snapshot!(Dialog::Choice(menu).to_string(), @r"
        Please answer with a number.
        Which one do you mean?
        (1) golden key | (2) silver key | (0) cancel
        ");
    }

    #[test]
    fn world_view_reads_all_projections() {
        let world = sample::marketplace().unwrap();
        let store = WorldStore::open(Box::new(MemoryStorage::new(world))).unwrap();
        let view = WorldView::load(&store).unwrap();
        assert_eq!(view.location.name, "Marketplace");
        assert_eq!(view.items.len(), 2);
        assert_eq!(view.exits[0].name, "Tavern");
        assert_eq!(view.inventory[0].name, "lantern");
    }
}
