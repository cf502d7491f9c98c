// Terminal front end for folio, built on ratatui

pub mod app;
pub mod event;
pub mod runner;
pub mod ui;

pub use app::{App, Command, Focus, InputMode};
pub use runner::{run_tui, SystemClipboard};
