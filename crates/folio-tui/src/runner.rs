// TUI event loop and terminal management
use std::io;
use std::sync::Arc;
use std::time::Instant;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{info, warn};

use folio_core::contact::Clipboard;
use folio_core::{Aggregator, Config, Error};

use crate::app::{App, Command};
use crate::event::{spawn_input_task, spawn_tick_task, AppEvent};

/// The system clipboard
///
/// Opened per copy; headless sessions simply fail the copy.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> folio_core::Result<()> {
        let mut clipboard = arboard::Clipboard::new().map_err(|e| Error::ClipboardError(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| Error::ClipboardError(e.to_string()))
    }
}

pub async fn run_tui(config: Config, aggregator: Aggregator) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, config, Arc::new(aggregator)).await;

    // Restore terminal even if the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    config: Config,
    aggregator: Arc<Aggregator>,
) -> anyhow::Result<()> {
    let size = terminal.size()?;
    let mut app = App::new(config, size.width, size.height, Box::new(SystemClipboard));

    let (tx, mut rx) = mpsc::unbounded_channel();
    let input = spawn_input_task(tx.clone());
    let tick = spawn_tick_task(tx.clone());
    spawn_load(&mut app, &aggregator, &tx);

    loop {
        terminal.draw(|f| crate::ui::render(f, &mut app))?;
        // The first draw measures the landing page; a short one may already be past the threshold
        app.sync_scroll();

        let Some(event) = rx.recv().await else {
            break;
        };
        let command = match event {
            AppEvent::Key(key) => app.handle_key(key),
            AppEvent::Mouse(mouse) => app.handle_mouse(mouse),
            AppEvent::Resize(columns, rows) => {
                app.resize(columns, rows);
                None
            }
            AppEvent::Tick => {
                app.tick(Instant::now());
                None
            }
            AppEvent::Loaded(ticket, result) => {
                app.finish_load(ticket, result);
                None
            }
        };

        match command {
            Some(Command::Quit) => break,
            Some(Command::Reload) => spawn_load(&mut app, &aggregator, &tx),
            Some(Command::Open(target)) => {
                if let Err(e) = open::that(&target) {
                    warn!("Failed to open {}: {}", target, e);
                    app.status = Some(format!("Failed to open: {}", e));
                }
            }
            None => {}
        }

        if app.should_quit {
            break;
        }
    }

    input.abort();
    tick.abort();
    Ok(())
}

/// Kick off a load in the background; the result comes back as an event
fn spawn_load(app: &mut App, aggregator: &Arc<Aggregator>, tx: &mpsc::UnboundedSender<AppEvent>) {
    let ticket = app.begin_load();
    let accounts = app.config.github.accounts.clone();
    let aggregator = Arc::clone(aggregator);
    let tx = tx.clone();
    info!("Loading repositories for {} account(s)", accounts.len());

    tokio::spawn(async move {
        let result = aggregator.load_all(&accounts).await;
        // The loop may already be gone on quit
        let _ = tx.send(AppEvent::Loaded(ticket, result));
    });
}
