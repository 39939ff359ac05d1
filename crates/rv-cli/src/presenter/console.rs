//! Line-based presenter for pipes and plain terminals.

use std::io::{self, BufRead, Write};

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use rv_core::EntityView;
use rv_interpret::{Dialog, Presenter, WorldView};

/// Prints the surroundings whenever they change, then the dialog and a prompt.
pub struct ConsolePresenter<R, W> {
    input: R,
    output: W,
    shown: Option<WorldView>,
}

impl<R: BufRead, W: Write> ConsolePresenter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            shown: None,
        }
    }

    fn print_world(&mut self, view: &WorldView) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(
            self.output,
            "{}",
            format!("== {} ==", view.location.name).bold().cyan()
        )?;
        if !view.location.description.is_empty() {
            writeln!(self.output, "{}", view.location.description)?;
        }

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Items here", "Exits", "Carrying"]);
        table.add_row(vec![
            names(&view.items),
            names(&view.exits),
            names(&view.inventory),
        ]);
        writeln!(self.output, "{table}")
    }
}

impl<R: BufRead, W: Write> Presenter for ConsolePresenter<R, W> {
    fn render(&mut self, view: &WorldView, dialog: &Dialog) -> io::Result<()> {
        if self.shown.as_ref() != Some(view) {
            self.print_world(view)?;
            self.shown = Some(view.clone());
        }

        match dialog {
            Dialog::None => {}
            Dialog::Message(text) => writeln!(self.output, "{text}")?,
            Dialog::Choice(menu) => {
                if let Some(hint) = &menu.hint {
                    writeln!(self.output, "{}", hint.red())?;
                }
                writeln!(self.output, "{}", menu.prompt)?;
                writeln!(self.output, "{}", menu.render().yellow())?;
            }
        }
        write!(self.output, "> ")?;
        self.output.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut bytes = Vec::new();
        if self.input.read_until(b'\n', &mut bytes)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        // Undecodable bytes become U+FFFD, which the lexer drops.
        let line = String::from_utf8_lossy(&bytes);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

fn names(entities: &[EntityView]) -> String {
    if entities.is_empty() {
        return "—".to_string();
    }
    entities
        .iter()
        .map(|e| e.name.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
