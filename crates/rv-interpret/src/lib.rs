//! Command interpretation for RagVenture.
//!
//! Turns free-text player input into world actions: a rule-based front-end
//! extracts verb and object, a semantic matcher maps them onto the command
//! vocabulary and the entities in view, and a small state machine asks the
//! player to choose whenever a match is not unique.

/// The closed command vocabulary.
pub mod command;
/// Interpreter configuration.
pub mod config;
/// Error types for the interpreter.
pub mod error;
/// Natural-language front-end.
pub mod frontend;
/// The interpretation state machine.
pub mod interpreter;
/// Tokenizer for player input.
pub mod lexer;
/// English word lists and lemmatization.
pub mod lexicon;
/// Semantic matching of verbs and nouns.
pub mod matcher;
/// Narrative messages.
pub mod narrator;
/// Candidate ranking and disambiguation policy.
pub mod resolver;
/// Text encoders.
pub mod scorer;
/// The session loop and presenter seam.
pub mod session;
/// Interpretation stages.
pub mod state;
/// World projections and dialogs.
pub mod view;

pub use command::CommandKind;
pub use config::InterpreterConfig;
pub use error::{InterpretError, InterpretResult, Setback};
pub use frontend::{LanguageFrontEnd, ParseResult, RuleFrontEnd};
pub use interpreter::{Flow, Interpreter};
pub use matcher::{COMMAND_THRESHOLD, Matcher, TARGET_THRESHOLD, TargetRef, TargetSource};
pub use resolver::{Candidate, Labeled, Resolution};
pub use scorer::{SemanticScorer, VocabularyEncoder};
pub use session::{Presenter, run_session};
pub use state::Stage;
pub use view::{ChoiceMenu, Dialog, WorldView};
