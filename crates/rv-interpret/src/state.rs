//! Interpretation stages. Each stage carries only its own data, so nothing
//! from an abandoned cycle survives into the next one.

use crate::command::CommandKind;
use crate::matcher::TargetRef;
use crate::resolver::Candidate;
use crate::view::ChoiceMenu;

const COMMAND_PROMPT: &str = "Which action do you mean?";
const TARGET_PROMPT: &str = "Which one do you mean?";

/// A sentence reduced to verb and object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Understood {
    /// Dictionary form of the verb.
    pub verb: String,
    /// The object noun phrase.
    pub noun: String,
}

/// One half of an action: settled, or waiting for the player to pick.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot<T> {
    /// Settled.
    Resolved(Candidate<T>),
    /// Several candidates, best first.
    Choose(Vec<Candidate<T>>),
}

/// Command and target, at least one of them still open.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest {
    /// The command slot.
    pub command: Slot<CommandKind>,
    /// The target slot.
    pub target: Slot<TargetRef>,
}

/// A fully resolved action.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAction {
    /// What to do.
    pub command: CommandKind,
    /// What to do it to.
    pub target: Candidate<TargetRef>,
}

impl PendingRequest {
    /// The resolved action, or `self` back if a slot is still open.
    pub fn into_action(self) -> Result<ResolvedAction, Self> {
        match self {
            PendingRequest {
                command: Slot::Resolved(command),
                target: Slot::Resolved(target),
            } => Ok(ResolvedAction {
                command: command.key,
                target,
            }),
            open => Err(open),
        }
    }

    /// Menu for the first open slot, command before target.
    pub fn menu(&self) -> Option<ChoiceMenu> {
        match (&self.command, &self.target) {
            (Slot::Choose(list), _) => Some(menu(COMMAND_PROMPT, list)),
            (_, Slot::Choose(list)) => Some(menu(TARGET_PROMPT, list)),
            _ => None,
        }
    }

    /// Settle the first open slot with option `n` (1-based).
    ///
    /// Returns `self` unchanged if `n` is not a listed option.
    pub fn choose(self, n: usize) -> Result<Self, Self> {
        match self {
            PendingRequest {
                command: Slot::Choose(list),
                target,
            } => match pick(&list, n) {
                Some(choice) => Ok(PendingRequest {
                    command: Slot::Resolved(choice),
                    target,
                }),
                None => Err(PendingRequest {
                    command: Slot::Choose(list),
                    target,
                }),
            },
            PendingRequest {
                command,
                target: Slot::Choose(list),
            } => match pick(&list, n) {
                Some(choice) => Ok(PendingRequest {
                    command,
                    target: Slot::Resolved(choice),
                }),
                None => Err(PendingRequest {
                    command,
                    target: Slot::Choose(list),
                }),
            },
            settled => Err(settled),
        }
    }
}

fn pick<T: Clone>(list: &[Candidate<T>], n: usize) -> Option<Candidate<T>> {
    n.checked_sub(1).and_then(|i| list.get(i)).cloned()
}

fn menu<T>(prompt: &str, list: &[Candidate<T>]) -> ChoiceMenu {
    ChoiceMenu::new(prompt, list.iter().map(|c| c.name.clone()).collect())
}

/// Where the interpreter stands.
///
/// `Parse` and `Request` wait for input; `Match` and `Action` run to
/// completion inside one [`submit`](crate::Interpreter::submit) call.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Stage {
    /// Waiting for a command.
    #[default]
    Parse,
    /// A sentence is being matched.
    Match(Understood),
    /// Waiting for a menu answer.
    Request(PendingRequest),
    /// An action is being executed.
    Action(ResolvedAction),
}

impl Stage {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Parse => "parse",
            Stage::Match(_) => "match",
            Stage::Request(_) => "request",
            Stage::Action(_) => "action",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::TargetSource;
    use rv_core::EntityId;

    fn command(key: CommandKind) -> Candidate<CommandKind> {
        Candidate {
            key,
            name: key.label().into(),
            score: 1.0,
        }
    }

    fn target(id: &str) -> Candidate<TargetRef> {
        Candidate {
            key: TargetRef {
                id: EntityId::new(id),
                source: TargetSource::Item,
            },
            name: id.replace('-', " "),
            score: 0.83,
        }
    }

    fn both_open() -> PendingRequest {
        PendingRequest {
            command: Slot::Choose(vec![command(CommandKind::Go), command(CommandKind::Drop)]),
            target: Slot::Choose(vec![target("golden-key"), target("silver-key")]),
        }
    }

    #[test]
    fn command_menu_comes_first() {
        let menu = both_open().menu().unwrap();
        assert_eq!(menu.prompt, COMMAND_PROMPT);
        assert_eq!(menu.options, ["go", "drop"]);
    }

    #[test]
    fn choosing_walks_through_slots() {
        let pending = both_open().choose(2).unwrap();
        assert_eq!(pending.menu().unwrap().options, ["golden key", "silver key"]);

        let pending = pending.choose(1).unwrap();
        assert!(pending.menu().is_none());

        let action = pending.into_action().unwrap();
        assert_eq!(action.command, CommandKind::Drop);
        assert_eq!(action.target.key.id, EntityId::new("golden-key"));
    }

    #[test]
    fn out_of_range_choice_keeps_request() {
        let pending = both_open();
        assert_eq!(pending.clone().choose(3), Err(pending.clone()));
        assert_eq!(pending.clone().choose(0), Err(pending));
    }

    #[test]
    fn open_request_is_not_an_action() {
        assert!(both_open().into_action().is_err());
    }

    #[test]
    fn default_stage_is_parse() {
        assert_eq!(Stage::default(), Stage::Parse);
        assert_eq!(Stage::default().name(), "parse");
    }
}
