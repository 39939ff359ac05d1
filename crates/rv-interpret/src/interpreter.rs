//! The interpretation state machine.

use rv_core::WorldStore;

use crate::command::CommandKind;
use crate::config::InterpreterConfig;
use crate::error::{InterpretResult, Setback};
use crate::frontend::{LanguageFrontEnd, RuleFrontEnd};
use crate::matcher::Matcher;
use crate::narrator::{Outcome, narrate};
use crate::resolver::{Resolution, suggest_names};
use crate::scorer::VocabularyEncoder;
use crate::state::{PendingRequest, ResolvedAction, Slot, Stage, Understood};
use crate::view::{Dialog, WorldView};

/// Whether the session goes on after an input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Wait for the next line.
    Continue,
    /// The player asked to quit.
    Quit,
}

/// Turns input lines into world actions.
///
/// Owns the world store, the front-end and the matcher for the whole
/// session. [`submit`](Self::submit) consumes exactly one line.
pub struct Interpreter {
    store: WorldStore,
    front_end: Box<dyn LanguageFrontEnd>,
    matcher: Matcher,
    config: InterpreterConfig,
    stage: Stage,
    view: WorldView,
    dialog: Dialog,
}

impl Interpreter {
    /// Start interpreting against `store`.
    ///
    /// Name vectors missing from the store, or computed by another model,
    /// are computed and committed first.
    pub fn new(
        mut store: WorldStore,
        front_end: Box<dyn LanguageFrontEnd>,
        matcher: Matcher,
        config: InterpreterConfig,
    ) -> InterpretResult<Self> {
        let scorer = matcher.scorer();
        store.ensure_embeddings(scorer.model_id(), |text| scorer.encode(text))?;

        let view = WorldView::load(&store)?;
        let intro = store.world().meta.description.clone();
        let dialog = if intro.is_empty() {
            Dialog::None
        } else {
            Dialog::Message(intro)
        };

        Ok(Self {
            store,
            front_end,
            matcher,
            config,
            stage: Stage::Parse,
            view,
            dialog,
        })
    }

    /// English rule front-end, an encoder over the store's vocabulary,
    /// default config.
    pub fn with_defaults(store: WorldStore) -> InterpretResult<Self> {
        let encoder = VocabularyEncoder::for_world(store.world());
        Self::new(
            store,
            Box::new(RuleFrontEnd),
            Matcher::new(Box::new(encoder)),
            InterpreterConfig::default(),
        )
    }

    /// World projections as of the last action.
    pub fn view(&self) -> &WorldView {
        &self.view
    }

    /// Current message or menu.
    pub fn dialog(&self) -> &Dialog {
        &self.dialog
    }

    /// Current stage. Always `Parse` or `Request` between calls.
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// The underlying store.
    pub fn store(&self) -> &WorldStore {
        &self.store
    }

    /// Consume one line of input.
    ///
    /// Recoverable problems end up in [`dialog`](Self::dialog); only store
    /// failures are returned as errors.
    pub fn submit(&mut self, line: &str) -> InterpretResult<Flow> {
        let next = match std::mem::take(&mut self.stage) {
            Stage::Parse => {
                let input = line.trim();
                if input.is_empty() {
                    return Ok(Flow::Continue);
                }
                if self.config.is_quit(input) {
                    tracing::info!("player quit");
                    return Ok(Flow::Quit);
                }
                self.parse(input)
            }
            Stage::Request(pending) => self.answer(pending, line),
            transient => transient,
        };
        self.stage = self.settle(next)?;
        Ok(Flow::Continue)
    }

    /// Run transient stages until the machine waits for input.
    fn settle(&mut self, mut stage: Stage) -> InterpretResult<Stage> {
        loop {
            tracing::debug!(stage = stage.name(), "enter stage");
            stage = match stage {
                Stage::Match(understood) => self.run_match(understood),
                Stage::Action(action) => {
                    self.run_action(action)?;
                    Stage::Parse
                }
                waiting => return Ok(waiting),
            };
        }
    }

    fn parse(&mut self, input: &str) -> Stage {
        let parsed = self.front_end.analyze(input);
        tracing::debug!(verb = ?parsed.verb, noun = ?parsed.noun, "parsed");
        match parsed.verb_and_noun() {
            Some((verb, noun)) => Stage::Match(Understood {
                verb: verb.to_string(),
                noun: noun.to_string(),
            }),
            None => self.setback(Setback::ParseFailure),
        }
    }

    fn run_match(&mut self, understood: Understood) -> Stage {
        let command = match self.matcher.match_command(&understood.verb) {
            Resolution::Resolved(c) => Slot::Resolved(c),
            Resolution::Ambiguous(list) => Slot::Choose(list),
            Resolution::NoMatch => {
                return self.setback(Setback::NoCommandMatch(understood.verb));
            }
        };

        let may_examine = match &command {
            Slot::Resolved(c) => c.key == CommandKind::Examine,
            Slot::Choose(list) => list.iter().any(|c| c.key == CommandKind::Examine),
        };
        let candidates = self.matcher.label_targets(&self.view, may_examine);
        let target = match self.matcher.match_target(&understood.noun, &candidates) {
            Resolution::Resolved(c) => Slot::Resolved(c),
            Resolution::Ambiguous(list) => Slot::Choose(list),
            Resolution::NoMatch => {
                let suggestions = suggest_names(
                    &understood.noun,
                    candidates.iter().map(|c| c.name.as_str()),
                    self.config.suggestion_limit,
                );
                return self.setback(Setback::NoTargetMatch {
                    noun: understood.noun,
                    suggestions,
                });
            }
        };

        self.advance(PendingRequest { command, target })
    }

    fn answer(&mut self, pending: PendingRequest, line: &str) -> Stage {
        match line.trim().parse::<usize>() {
            Ok(0) => {
                tracing::debug!("request cancelled");
                self.dialog = Dialog::message("Cancelled.");
                Stage::Parse
            }
            Ok(n) => match pending.choose(n) {
                Ok(pending) => self.advance(pending),
                Err(pending) => self.reprompt(pending),
            },
            Err(_) => self.reprompt(pending),
        }
    }

    fn advance(&mut self, pending: PendingRequest) -> Stage {
        match pending.into_action() {
            Ok(action) => Stage::Action(action),
            Err(pending) => {
                if let Some(menu) = pending.menu() {
                    self.dialog = Dialog::Choice(menu);
                }
                Stage::Request(pending)
            }
        }
    }

    fn reprompt(&mut self, pending: PendingRequest) -> Stage {
        if let Some(mut menu) = pending.menu() {
            let max = menu.options.len();
            menu.hint = Some(Setback::InvalidChoice { max }.to_string());
            self.dialog = Dialog::Choice(menu);
        }
        Stage::Request(pending)
    }

    fn run_action(&mut self, action: ResolvedAction) -> InterpretResult<()> {
        let target = &action.target.key.id;
        let outcome = match action.command {
            CommandKind::Go => self.store.move_player(target)?.map(Outcome::Moved),
            CommandKind::Take => self.store.take_item(target)?.map(Outcome::Took),
            CommandKind::Drop => self.store.drop_item(target)?.map(Outcome::Dropped),
            CommandKind::Examine => self.store.describe(target)?.map(Outcome::Examined),
        };

        let message = match outcome {
            Some(outcome) => narrate(&outcome),
            None => Setback::PreconditionFailed {
                command: action.command,
                target: action.target.name.clone(),
            }
            .to_string(),
        };
        tracing::debug!(command = %action.command, target = %target, "action done");

        self.view = WorldView::load(&self.store)?;
        self.dialog = Dialog::Message(message);
        Ok(())
    }

    fn setback(&mut self, setback: Setback) -> Stage {
        tracing::debug!(%setback, "setback");
        self.dialog = Dialog::Message(setback.to_string());
        Stage::Parse
    }
}

impl std::fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interpreter")
            .field("stage", &self.stage)
            .field("matcher", &self.matcher)
            .field("dialog", &self.dialog)
            .finish_non_exhaustive()
    }
}
