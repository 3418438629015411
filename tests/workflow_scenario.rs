use std::{sync::Arc, time::Duration};

use chrono::Utc;
use tnotes::{AppEvent, AppState, Effect, Key, NoteDraft, NoteStore, Screen, TaskRunner};
use tokio::sync::mpsc;

struct Session {
    store: Arc<NoteStore>,
    runner: TaskRunner,
    events: mpsc::UnboundedReceiver<AppEvent>,
    state: AppState,
}

impl Session {
    fn new(store: NoteStore) -> Self {
        let store = Arc::new(store);
        let (tx, events) = mpsc::unbounded_channel();
        let runner = TaskRunner::new(Arc::clone(&store), tx, Duration::ZERO);
        let state = AppState::new(
            store.list_notes().unwrap(),
            store.list_projects().unwrap(),
            Utc::now().date_naive(),
        );
        Self {
            store,
            runner,
            events,
            state,
        }
    }

    fn press(&mut self, key: Key) {
        match self.state.update(AppEvent::Key(key), self.store.as_ref()) {
            Effect::Nothing => {}
            Effect::Launch(request) => self.runner.run(request).unwrap(),
            Effect::Quit => panic!("unexpected quit"),
        }
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.press(Key::Char(c));
        }
    }

    /// Waits for the next task completion and applies it
    async fn settle(&mut self) {
        loop {
            let event = self.events.recv().await.expect("runner hung up");
            let is_task = matches!(event, AppEvent::Task(_));
            self.state.update(event, self.store.as_ref());
            if is_task {
                return;
            }
        }
    }
}

fn seeded_store() -> NoteStore {
    let store = NoteStore::open_in_memory().unwrap();
    store.initialize().unwrap();
    store
}

#[tokio::test]
async fn composing_a_note_saves_it_and_returns_to_the_list() {
    let mut session = Session::new(seeded_store());
    assert!(session.state.notes().is_empty());

    session.press(Key::Char('n'));
    session.type_text("Groceries");
    session.press(Key::Enter);
    assert_eq!(session.state.screen(), Screen::Body);
    assert_eq!(session.state.body_input(), "");

    session.type_text("milk");
    session.press(Key::Tab);
    assert_eq!(session.state.time_input(), "");
    session.type_text("10m");
    session.press(Key::Enter);
    assert_eq!(session.state.screen(), Screen::ProjectSelect);
    assert_eq!(session.state.project_cursor(), 0);

    session.press(Key::Enter);
    assert_eq!(session.state.screen(), Screen::CategorySelect);
    let offered: Vec<&str> = session
        .state
        .categories()
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(offered, vec!["Urgent", "Important"]);

    session.press(Key::Ctrl('s'));
    assert!(session.state.is_loading());
    session.press(Key::Char('n'));
    assert_eq!(session.state.screen(), Screen::CategorySelect);

    session.settle().await;

    assert!(!session.state.is_loading());
    assert_eq!(session.state.screen(), Screen::List);
    assert_eq!(session.state.list_cursor(), 0);
    assert_eq!(session.state.draft(), &NoteDraft::default());
    let notes = session.state.notes();
    assert_eq!(notes.len(), 1);
    assert!(!notes[0].id.is_empty());
    assert_eq!(notes[0].title, "Groceries");
    assert_eq!(notes[0].body, "milk");
    assert_eq!(notes[0].total_time, "10m");
    assert_eq!(notes[0].project.name, "Work");
    assert_eq!(notes[0].category.as_ref().map(|c| c.name.as_str()), Some("Urgent"));
    assert_eq!(session.store.list_notes().unwrap(), notes.to_vec());
}

#[tokio::test]
async fn editing_keeps_identity_and_creation_time() {
    let store = seeded_store();
    let personal = store.get_project_by_name("Personal").unwrap().unwrap();
    let important = store.get_category_by_name("Important").unwrap().unwrap();
    let mut draft = NoteDraft::new("Dentist");
    draft.body = "call".to_string();
    let original = store
        .save_note(&draft, personal.id, Some(important.id))
        .unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;

    let mut session = Session::new(store);
    session.press(Key::Enter);
    assert!(session.state.is_editing());
    session.type_text(" back");
    session.press(Key::Tab);
    session.press(Key::Enter);
    assert_eq!(session.state.project_cursor(), 1);
    session.press(Key::Enter);
    assert_eq!(
        session.state.categories()[session.state.category_cursor()].name,
        "Important"
    );
    session.press(Key::Enter);
    session.settle().await;

    let notes = session.state.notes();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].id, original.id);
    assert_eq!(notes[0].body, "call back");
    assert_eq!(notes[0].created_at, original.created_at);
    assert!(notes[0].updated_at > original.updated_at);
}

#[tokio::test]
async fn deleting_the_last_row_clamps_the_cursor() {
    let store = seeded_store();
    let work = store.get_project_by_name("Work").unwrap().unwrap();
    for title in ["a", "b", "c"] {
        store.save_note(&NoteDraft::new(title), work.id, None).unwrap();
    }

    let mut session = Session::new(store);
    session.press(Key::Down);
    session.press(Key::Down);
    assert_eq!(session.state.list_cursor(), 2);

    session.press(Key::Char('d'));
    session.settle().await;
    assert_eq!(session.state.notes().len(), 2);
    assert_eq!(session.state.list_cursor(), 1);

    for _ in 0..2 {
        session.press(Key::Char('d'));
        session.settle().await;
    }
    assert!(session.state.notes().is_empty());
    assert_eq!(session.state.list_cursor(), 0);
    assert!(session.store.list_notes().unwrap().is_empty());
}
