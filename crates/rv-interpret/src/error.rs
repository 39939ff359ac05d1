//! Error types for the interpretation pipeline.

use rv_core::StoreError;
use thiserror::Error;

use crate::command::CommandKind;

/// Result type for interpreter operations.
pub type InterpretResult<T> = Result<T, InterpretError>;

/// Failures that end the session.
#[derive(Debug, Error)]
pub enum InterpretError {
    /// The world store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The presentation layer could not read or draw.
    #[error("presenter failed: {0}")]
    Presenter(#[from] std::io::Error),
}

/// Recoverable setbacks. Each one is shown to the player and the
/// interpreter goes back to waiting for a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Setback {
    /// The sentence yielded no verb or no object.
    #[error("Sorry, I didn't understand that. Try something like \"go to the tavern\".")]
    ParseFailure,

    /// The verb matched no command.
    #[error("I don't know how to \"{0}\".")]
    NoCommandMatch(String),

    /// The object matched nothing in view.
    #[error("You see no \"{noun}\" here.{}", did_you_mean(.suggestions))]
    NoTargetMatch {
        /// The object as typed.
        noun: String,
        /// Similar names in view.
        suggestions: Vec<String>,
    },

    /// A menu answer was not a listed number.
    #[error("Please answer with a number between 0 and {max}.")]
    InvalidChoice {
        /// Highest valid option.
        max: usize,
    },

    /// The store refused the action.
    #[error("{}", precondition_message(*.command, .target))]
    PreconditionFailed {
        /// The attempted command.
        command: CommandKind,
        /// Display name of the target.
        target: String,
    },
}

fn did_you_mean(suggestions: &[String]) -> String {
    match suggestions {
        [] => String::new(),
        [one] => format!(" Did you mean \"{one}\"?"),
        many => format!(
            " Did you mean one of: {}?",
            many.iter()
                .map(|s| format!("\"{s}\""))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

fn precondition_message(command: CommandKind, target: &str) -> String {
    match command {
        CommandKind::Go => format!("Oops, you stumbled and could not reach {target}."),
        CommandKind::Take => format!("The {target} seems to have slipped away."),
        CommandKind::Drop => format!("The {target} isn't there."),
        CommandKind::Examine => format!("You can't make out the {target} from here."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_messages_per_command() {
        let msg = |command| {
            Setback::PreconditionFailed {
                command,
                target: "rope".into(),
            }
            .to_string()
        };
        assert!(msg(CommandKind::Go).contains("stumbled"));
        assert!(msg(CommandKind::Take).contains("seems to have slipped"));
        assert!(msg(CommandKind::Drop).contains("isn't there"));
        assert!(msg(CommandKind::Examine).contains("can't make out"));
    }

    #[test]
    fn no_target_lists_suggestions() {
        let none = Setback::NoTargetMatch {
            noun: "sword".into(),
            suggestions: vec![],
        };
        assert_eq!(none.to_string(), "You see no \"sword\" here.");

        let one = Setback::NoTargetMatch {
            noun: "lanter".into(),
            suggestions: vec!["lantern".into()],
        };
        assert_eq!(
            one.to_string(),
            "You see no \"lanter\" here. Did you mean \"lantern\"?"
        );

        let two = Setback::NoTargetMatch {
            noun: "rop".into(),
            suggestions: vec!["rope".into(), "robe".into()],
        };
        assert!(two.to_string().ends_with("one of: \"rope\", \"robe\"?"));
    }

    #[test]
    fn store_errors_convert() {
        let err: InterpretError = StoreError::Closed.into();
        assert_eq!(err.to_string(), "world store is closed");
    }
}
