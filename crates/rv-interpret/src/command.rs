//! The closed command vocabulary.

use std::fmt;

/// A command the interpreter can execute against the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Move the player to a reachable location.
    Go,
    /// Pick up an item lying at the player's location.
    Take,
    /// Put down a carried item.
    Drop,
    /// Read the description of something in view.
    Examine,
}

impl CommandKind {
    /// Every command, in menu order.
    pub const ALL: [CommandKind; 4] = [
        CommandKind::Go,
        CommandKind::Take,
        CommandKind::Drop,
        CommandKind::Examine,
    ];

    /// English verbs that name this command.
    ///
    /// "leave" is listed under both GO and DROP ("leave the tavern",
    /// "leave the rope") and always asks the player which one is meant.
    pub fn synonyms(&self) -> &'static [&'static str] {
        match self {
            CommandKind::Go => &[
                "go", "move", "walk", "head", "travel", "run", "enter", "leave", "visit", "wander",
                "return", "proceed",
            ],
            CommandKind::Take => &[
                "take", "get", "pick", "grab", "collect", "fetch", "lift", "snatch",
            ],
            CommandKind::Drop => &[
                "drop", "put", "leave", "discard", "place", "release", "dump",
            ],
            CommandKind::Examine => &["examine", "inspect", "study", "check", "observe", "describe"],
        }
    }

    /// Lowercase label shown in menus.
    pub fn label(&self) -> &'static str {
        match self {
            CommandKind::Go => "go",
            CommandKind::Take => "take",
            CommandKind::Drop => "drop",
            CommandKind::Examine => "examine",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
