//! Background execution of store operations.
//!
//! The runner takes one [`TaskRequest`] at a time, performs it on the blocking
//! pool so the interactive loop never waits on SQLite, and posts exactly one
//! [`TaskCompletion`] back into the application's event channel.
use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use log::{debug, error, info, warn};
use tokio::sync::mpsc;
use tokio::time::{self, Duration};

use crate::{AppEvent, Note, NoteDraft, NoteScope, NoteStore, NotesError, Result};

/// A store operation that must not block the interactive loop.
///
/// Every request ends with a reload of the notes in `scope`, so the
/// completion always carries a fresh list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskRequest {
    /// Reload the notes in the given scope
    ReloadNotes { scope: NoteScope },
    /// Upsert the draft, then reload
    SaveNote {
        draft: NoteDraft,
        project_id: i64,
        category_id: Option<i64>,
        scope: NoteScope,
    },
    /// Delete a note by id, then reload
    DeleteNote { id: String, scope: NoteScope },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Reload,
    Save,
    Delete,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKind::Reload => write!(f, "Reload"),
            TaskKind::Save => write!(f, "Save"),
            TaskKind::Delete => write!(f, "Delete"),
        }
    }
}

impl TaskRequest {
    pub fn kind(&self) -> TaskKind {
        match self {
            TaskRequest::ReloadNotes { .. } => TaskKind::Reload,
            TaskRequest::SaveNote { .. } => TaskKind::Save,
            TaskRequest::DeleteNote { .. } => TaskKind::Delete,
        }
    }
}

/// The single terminal result of a launched task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCompletion {
    pub kind: TaskKind,
    /// The refreshed notes, or the error message of the failed store call
    pub result: std::result::Result<Vec<Note>, String>,
}

/// Runs store operations off the interactive path, one at a time.
pub struct TaskRunner {
    /// Shared store handle, also used by the foreground loop
    store: Arc<NoteStore>,

    /// Channel the completions are posted to
    events: mpsc::UnboundedSender<AppEvent>,

    /// Set while a task is in flight
    busy: Arc<AtomicBool>,

    /// Artificial delay before the store call
    latency: Duration,
}

impl TaskRunner {
    pub fn new(
        store: Arc<NoteStore>,
        events: mpsc::UnboundedSender<AppEvent>,
        latency: Duration,
    ) -> Self {
        Self {
            store,
            events,
            busy: Arc::new(AtomicBool::new(false)),
            latency,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Launches a task. Must be called from within a tokio runtime.
    ///
    /// Fails with [`NotesError::TaskInFlight`] if a previous task has not
    /// reported back yet.
    pub fn run(&self, request: TaskRequest) -> Result<()> {
        let kind = request.kind();
        if self.busy.swap(true, Ordering::SeqCst) {
            warn!("Rejecting {} task, another task is still running", kind);
            return Err(NotesError::TaskInFlight);
        }

        info!("Launching {} task", kind);
        let store = Arc::clone(&self.store);
        let events = self.events.clone();
        let busy = Arc::clone(&self.busy);
        let latency = self.latency;

        tokio::spawn(async move {
            if !latency.is_zero() {
                time::sleep(latency).await;
            }

            let result = match tokio::task::spawn_blocking(move || execute(&store, request)).await
            {
                Ok(result) => result,
                Err(e) => Err(NotesError::TaskFailed {
                    message: e.to_string(),
                }),
            };

            match &result {
                Ok(notes) => debug!("{} task finished with {} notes", kind, notes.len()),
                Err(e) => error!("{} task failed: {}", kind, e),
            }

            busy.store(false, Ordering::SeqCst);
            let completion = TaskCompletion {
                kind,
                result: result.map_err(|e| e.to_string()),
            };
            if events.send(AppEvent::Task(completion)).is_err() {
                warn!("Event loop is gone, dropping {} completion", kind);
            }
        });

        Ok(())
    }
}

fn execute(store: &NoteStore, request: TaskRequest) -> Result<Vec<Note>> {
    match request {
        TaskRequest::ReloadNotes { scope } => load_scope(store, scope),
        TaskRequest::SaveNote {
            draft,
            project_id,
            category_id,
            scope,
        } => {
            store.save_note(&draft, project_id, category_id)?;
            load_scope(store, scope)
        }
        TaskRequest::DeleteNote { id, scope } => {
            store.delete_note(&id)?;
            load_scope(store, scope)
        }
    }
}

/// Loads the notes visible in `scope`.
pub fn load_scope(store: &NoteStore, scope: NoteScope) -> Result<Vec<Note>> {
    match scope {
        NoteScope::All => store.list_notes(),
        NoteScope::Day(day) => store.list_notes_by_date(day),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(latency_ms: u64) -> (Arc<NoteStore>, TaskRunner, mpsc::UnboundedReceiver<AppEvent>) {
        let store = NoteStore::open_in_memory().unwrap();
        store.initialize().unwrap();
        let store = Arc::new(store);
        let (tx, rx) = mpsc::unbounded_channel();
        let runner = TaskRunner::new(Arc::clone(&store), tx, Duration::from_millis(latency_ms));
        (store, runner, rx)
    }

    async fn next_completion(rx: &mut mpsc::UnboundedReceiver<AppEvent>) -> TaskCompletion {
        match rx.recv().await {
            Some(AppEvent::Task(completion)) => completion,
            other => panic!("expected a task completion, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn save_posts_refreshed_notes() {
        let (store, runner, mut rx) = setup(0);
        let work = store.get_project_by_name("Work").unwrap().unwrap();

        runner
            .run(TaskRequest::SaveNote {
                draft: NoteDraft::new("Groceries"),
                project_id: work.id,
                category_id: None,
                scope: NoteScope::All,
            })
            .unwrap();

        let completion = next_completion(&mut rx).await;
        assert_eq!(completion.kind, TaskKind::Save);
        let notes = completion.result.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "Groceries");
        assert!(!runner.is_busy());
    }

    #[tokio::test]
    async fn delete_then_reload_reflects_the_store() {
        let (store, runner, mut rx) = setup(0);
        let work = store.get_project_by_name("Work").unwrap().unwrap();
        let keep = store.save_note(&NoteDraft::new("keep"), work.id, None).unwrap();
        let gone = store.save_note(&NoteDraft::new("gone"), work.id, None).unwrap();

        runner
            .run(TaskRequest::DeleteNote {
                id: gone.id,
                scope: NoteScope::All,
            })
            .unwrap();
        let completion = next_completion(&mut rx).await;
        assert_eq!(completion.kind, TaskKind::Delete);
        assert_eq!(completion.result.unwrap(), vec![keep.clone()]);

        runner
            .run(TaskRequest::ReloadNotes {
                scope: NoteScope::Day(keep.created_at.date_naive()),
            })
            .unwrap();
        assert_eq!(next_completion(&mut rx).await.result.unwrap(), vec![keep]);
    }

    #[tokio::test]
    async fn only_one_task_in_flight() {
        let (_store, runner, mut rx) = setup(50);

        runner
            .run(TaskRequest::ReloadNotes {
                scope: NoteScope::All,
            })
            .unwrap();
        assert!(runner.is_busy());
        let err = runner
            .run(TaskRequest::ReloadNotes {
                scope: NoteScope::All,
            })
            .unwrap_err();
        assert!(matches!(err, NotesError::TaskInFlight));

        let completion = next_completion(&mut rx).await;
        assert_eq!(completion.result, Ok(vec![]));
        assert!(rx.try_recv().is_err());

        runner
            .run(TaskRequest::ReloadNotes {
                scope: NoteScope::All,
            })
            .unwrap();
        next_completion(&mut rx).await;
    }

    #[tokio::test]
    async fn store_failure_is_reported_not_fatal() {
        let (_store, runner, mut rx) = setup(0);

        runner
            .run(TaskRequest::SaveNote {
                draft: NoteDraft::new("orphan"),
                project_id: 4242,
                category_id: None,
                scope: NoteScope::All,
            })
            .unwrap();

        let completion = next_completion(&mut rx).await;
        assert_eq!(completion.kind, TaskKind::Save);
        let message = completion.result.unwrap_err();
        assert!(message.contains("4242"), "{message}");
        assert!(!runner.is_busy());
    }
}
