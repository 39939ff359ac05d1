//! Run an interactive session.

use std::io::{self, IsTerminal};

use miette::{IntoDiagnostic, WrapErr};
use rv_core::{JsonFileStorage, MemoryStorage, Storage, WorldStore, sample};
use rv_interpret::{Interpreter, Presenter, run_session};

use crate::config::GameConfig;
use crate::logging::{self, LogTarget};
use crate::presenter::{ConsolePresenter, TuiPresenter};

pub fn run(config: &GameConfig, plain: bool) -> miette::Result<()> {
    let full_screen = !plain && io::stdin().is_terminal() && io::stdout().is_terminal();

    let target = match (&config.log_file, full_screen) {
        (Some(path), _) => LogTarget::File(path),
        (None, true) => LogTarget::Discard,
        (None, false) => LogTarget::Stderr,
    };
    logging::init(&config.log_filter, target)?;

    let storage: Box<dyn Storage> = match &config.world {
        Some(path) => Box::new(
            JsonFileStorage::open(path)
                .into_diagnostic()
                .wrap_err("cannot open world")?,
        ),
        None => Box::new(MemoryStorage::new(sample::marketplace().into_diagnostic()?)),
    };
    let store = WorldStore::open(storage)
        .into_diagnostic()
        .wrap_err("cannot load world")?;
    let mut interpreter = Interpreter::with_defaults(store).into_diagnostic()?;
    tracing::info!(world = %interpreter.store().world().meta.name, full_screen, "session started");

    let mut presenter: Box<dyn Presenter> = if full_screen {
        Box::new(TuiPresenter::new().into_diagnostic()?)
    } else {
        if !io::stdout().is_terminal() {
            colored::control::set_override(false);
        }
        Box::new(ConsolePresenter::new(io::stdin().lock(), io::stdout()))
    };

    let lines = run_session(&mut interpreter, presenter.as_mut());
    // Restore the terminal before any error is printed.
    drop(presenter);
    let lines = lines.into_diagnostic().wrap_err("session aborted")?;
    tracing::info!(lines, "session ended");
    Ok(())
}
