// Input, timer and load-completion events feeding the main loop
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

use folio_core::{LoadTicket, RepositoryRecord};

/// How often the tick task fires; drives copy flashes and the intro fade
pub const TICK_RATE: Duration = Duration::from_millis(100);

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// New terminal size in columns and rows
    Resize(u16, u16),
    Tick,
    /// A repository load finished, successfully or not
    Loaded(LoadTicket, folio_core::Result<Vec<RepositoryRecord>>),
}

/// Spawn the crossterm input polling task
pub fn spawn_input_task(tx: mpsc::UnboundedSender<AppEvent>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let has_event = tokio::task::spawn_blocking(|| event::poll(Duration::from_millis(50)).unwrap_or(false))
                .await
                .unwrap_or(false);

            if !has_event {
                if tx.is_closed() {
                    break;
                }
                continue;
            }

            let read = tokio::task::spawn_blocking(event::read)
                .await
                .unwrap_or(Err(std::io::Error::other("spawn_blocking failed")));

            let app_event = match read {
                Ok(Event::Key(key)) => AppEvent::Key(key),
                Ok(Event::Mouse(mouse)) => AppEvent::Mouse(mouse),
                Ok(Event::Resize(columns, rows)) => AppEvent::Resize(columns, rows),
                _ => continue,
            };
            if tx.send(app_event).is_err() {
                break;
            }
        }
    })
}

pub fn spawn_tick_task(tx: mpsc::UnboundedSender<AppEvent>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(TICK_RATE);
        loop {
            interval.tick().await;
            if tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    })
}
