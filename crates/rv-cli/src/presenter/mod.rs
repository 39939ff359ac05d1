pub mod console;
pub mod tui;

pub use console::ConsolePresenter;
pub use tui::TuiPresenter;
