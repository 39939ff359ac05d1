//! Full-screen presenter: location, items, exits, inventory, dialog, input.

use std::io::{self, Stdout};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use rv_core::EntityView;
use rv_interpret::{Dialog, Presenter, WorldView};

/// Owns the terminal in raw mode until dropped.
pub struct TuiPresenter {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    view: Option<WorldView>,
    dialog: Dialog,
    input: String,
}

impl TuiPresenter {
    /// Switch the terminal to raw mode and the alternate screen.
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            disable_raw_mode().ok();
            return Err(e);
        }
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self {
            terminal,
            view: None,
            dialog: Dialog::None,
            input: String::new(),
        })
    }

    fn draw(&mut self) -> io::Result<()> {
        let Self {
            terminal,
            view,
            dialog,
            input,
        } = self;
        terminal.draw(|frame| draw(frame, view.as_ref(), dialog, input))?;
        Ok(())
    }

    /// Apply one key. Returns the finished line on Enter.
    fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyOutcome::Quit;
        }
        match key.code {
            KeyCode::Enter => return KeyOutcome::Line(std::mem::take(&mut self.input)),
            KeyCode::Esc => self.input.clear(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
        KeyOutcome::Editing
    }
}

enum KeyOutcome {
    Editing,
    Line(String),
    Quit,
}

impl Presenter for TuiPresenter {
    fn render(&mut self, view: &WorldView, dialog: &Dialog) -> io::Result<()> {
        self.view = Some(view.clone());
        self.dialog = dialog.clone();
        self.draw()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match self.handle_key(key) {
                        KeyOutcome::Editing => self.draw()?,
                        KeyOutcome::Line(line) => return Ok(Some(line)),
                        KeyOutcome::Quit => return Ok(None),
                    }
                }
                Event::Resize(_, _) => self.draw()?,
                _ => {}
            }
        }
    }
}

impl Drop for TuiPresenter {
    fn drop(&mut self) {
        disable_raw_mode().ok();
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen).ok();
        self.terminal.show_cursor().ok();
    }
}

fn draw(frame: &mut Frame, view: Option<&WorldView>, dialog: &Dialog, input: &str) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Location
            Constraint::Min(5),    // Items / exits / inventory
            Constraint::Length(6), // Dialog
            Constraint::Length(3), // Input
        ])
        .split(frame.area());

    if let Some(view) = view {
        let location = Paragraph::new(view.location.description.as_str())
            .block(panel(&format!(" {} ", view.location.name), Color::Blue))
            .wrap(Wrap { trim: true });
        frame.render_widget(location, rows[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3])
            .split(rows[1]);
        frame.render_widget(entity_list(" Items here ", &view.items), columns[0]);
        frame.render_widget(entity_list(" Exits ", &view.exits), columns[1]);
        frame.render_widget(entity_list(" Carrying ", &view.inventory), columns[2]);
    }

    let dialog_text: Vec<Line> = match dialog {
        Dialog::None => vec![],
        Dialog::Message(text) => text.lines().map(Line::from).collect(),
        Dialog::Choice(menu) => {
            let mut lines = Vec::new();
            if let Some(hint) = &menu.hint {
                lines.push(Line::styled(hint.clone(), Style::default().fg(Color::Red)));
            }
            lines.push(Line::from(menu.prompt.clone()));
            lines.push(Line::styled(
                menu.render(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ));
            lines
        }
    };
    let dialog_panel = Paragraph::new(dialog_text)
        .block(panel(" Narrator ", Color::Cyan))
        .wrap(Wrap { trim: false });
    frame.render_widget(dialog_panel, rows[2]);

    let prompt = Paragraph::new(format!("> {input}"))
        .block(panel(" Enter:send  Esc:clear  Ctrl+C:quit ", Color::Green));
    frame.render_widget(prompt, rows[3]);

    if let Some(x) = cursor_column(rows[3], input) {
        frame.set_cursor_position(Position::new(x, rows[3].y.saturating_add(1)));
    }
}

/// Column after the typed text inside the prompt panel, if it still fits.
fn cursor_column(area: Rect, input: &str) -> Option<u16> {
    let typed = u16::try_from(input.chars().count()).unwrap_or(u16::MAX);
    let x = area.x.saturating_add(3).saturating_add(typed);
    let right_border = area.x.saturating_add(area.width.saturating_sub(1));
    (x < right_border).then_some(x)
}

fn panel(title: &str, color: Color) -> Block<'static> {
    Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

fn entity_list<'a>(title: &str, entities: &'a [EntityView]) -> List<'a> {
    let items: Vec<ListItem> = entities
        .iter()
        .map(|e| ListItem::new(e.name.as_str()))
        .collect();
    List::new(items).block(panel(title, Color::White))
}
