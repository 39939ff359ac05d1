//! The read-submit-render loop.

use std::io;

use crate::error::InterpretResult;
use crate::interpreter::{Flow, Interpreter};
use crate::view::{Dialog, WorldView};

/// Shows the world and reads the player's lines.
pub trait Presenter {
    /// Draw the world projections and the dialog.
    fn render(&mut self, view: &WorldView, dialog: &Dialog) -> io::Result<()>;

    /// Block for one line of input. `None` means the input is exhausted.
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

/// Run until the player quits or input runs out.
///
/// Returns the number of lines submitted.
pub fn run_session(
    interpreter: &mut Interpreter,
    presenter: &mut dyn Presenter,
) -> InterpretResult<usize> {
    let mut lines = 0;
    loop {
        presenter.render(interpreter.view(), interpreter.dialog())?;
        let Some(line) = presenter.read_line()? else {
            tracing::info!(lines, "input exhausted");
            break;
        };
        lines += 1;
        if interpreter.submit(&line)? == Flow::Quit {
            break;
        }
    }
    Ok(lines)
}
