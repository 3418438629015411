//! Session coordinator for the tnotes application
//!
//! Owns the terminal, the event channel and the task runner, and feeds every
//! key press, tick and task completion through the single [`AppState`] of the
//! session, one at a time.
use std::{
    io::{stdout, Stdout},
    sync::Arc,
    thread,
    time::Duration,
};

use chrono::Utc;
use crossterm::{
    cursor::Show,
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, error, info, warn};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use super::map_key;
use crate::{ui, AppEvent, AppState, Config, Effect, NoteStore, Result, TaskRunner};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Interactive session handler - drives the workflow against the note store
pub struct App {
    /// The note store, shared with background tasks
    store: Arc<NoteStore>,

    /// Application configuration
    config: Config,
}

impl App {
    pub fn new(store: Arc<NoteStore>, config: Config) -> Self {
        Self { store, config }
    }

    /// Runs the session until the user quits
    pub async fn run(&self) -> Result<()> {
        let notes = self.store.list_notes()?;
        let projects = self.store.list_projects()?;
        info!(
            "Starting session with {} notes and {} projects",
            notes.len(),
            projects.len()
        );
        let mut state = AppState::new(notes, projects, Utc::now().date_naive());

        let (tx, mut rx) = mpsc::unbounded_channel();
        let runner = TaskRunner::new(
            Arc::clone(&self.store),
            tx.clone(),
            self.config.simulated_latency(),
        );
        spawn_input_reader(tx, self.config.tick_rate());

        let _guard = TerminalGuard::enter()?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        self.event_loop(&mut terminal, &mut state, &runner, &mut rx)
            .await
    }

    async fn event_loop(
        &self,
        terminal: &mut Tui,
        state: &mut AppState,
        runner: &TaskRunner,
        events: &mut mpsc::UnboundedReceiver<AppEvent>,
    ) -> Result<()> {
        terminal.draw(|frame| ui::render(frame, &*state))?;

        while let Some(event) = events.recv().await {
            match state.update(event, self.store.as_ref()) {
                Effect::Nothing => {}
                Effect::Launch(request) => {
                    if let Err(e) = runner.run(request) {
                        state.launch_rejected(e.to_string());
                    }
                }
                Effect::Quit => {
                    info!("Quit requested");
                    return Ok(());
                }
            }
            terminal.draw(|frame| ui::render(frame, &*state))?;
        }

        warn!("Event channel closed, ending session");
        Ok(())
    }
}

/// Reads terminal events on a dedicated thread and forwards them, sending a
/// tick whenever nothing arrived within `tick_rate`.
fn spawn_input_reader(events: mpsc::UnboundedSender<AppEvent>, tick_rate: Duration) {
    thread::spawn(move || loop {
        let event = match event::poll(tick_rate) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) => match map_key(key) {
                    Some(key) => AppEvent::Key(key),
                    None => continue,
                },
                Ok(Event::Resize(..)) => AppEvent::Tick,
                Ok(_) => continue,
                Err(e) => {
                    error!("Failed to read terminal event: {}", e);
                    break;
                }
            },
            Ok(false) => AppEvent::Tick,
            Err(e) => {
                error!("Failed to poll terminal events: {}", e);
                break;
            }
        };
        if events.send(event).is_err() {
            debug!("Event loop finished, stopping input reader");
            break;
        }
    });
}

/// Raw mode and the alternate screen last exactly as long as this value,
/// including when the session unwinds.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let guard = TerminalGuard;
        execute!(stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            error!("Failed to leave raw mode: {}", e);
        }
        if let Err(e) = execute!(stdout(), LeaveAlternateScreen, Show) {
            error!("Failed to restore the terminal: {}", e);
        }
    }
}
