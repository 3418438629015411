use chrono::NaiveDate;
use log::{debug, error, trace, warn};

use super::{AppEvent, CategorySource, Effect, Key, Screen};
use crate::{
    clamp_cursor, step_clamped, step_wrapping, Category, Note, NoteDraft, NoteScope, Project,
    TaskCompletion, TaskKind, TaskRequest,
};

/// A one-line message shown above the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Info(String),
    Error(String),
}

/// The complete state of an interactive session.
///
/// Owned by a single coordinator and only changed through [`AppState::update`].
#[derive(Debug, Clone)]
pub struct AppState {
    screen: Screen,

    /// True from the moment a task is launched until its completion arrives
    loading: bool,
    spinner_frame: usize,

    notes: Vec<Note>,
    list_cursor: usize,
    scope: NoteScope,
    today: NaiveDate,

    /// Set when the working copy edits a stored note
    editing: bool,
    draft: NoteDraft,
    title_input: String,
    body_input: String,
    time_input: String,

    projects: Vec<Project>,
    project_cursor: usize,

    /// Categories offered by the project picked on the project screen
    categories: Vec<Category>,
    category_cursor: usize,

    banner: Option<Banner>,
}

impl AppState {
    pub fn new(notes: Vec<Note>, projects: Vec<Project>, today: NaiveDate) -> Self {
        Self {
            screen: Screen::List,
            loading: false,
            spinner_frame: 0,
            notes,
            list_cursor: 0,
            scope: NoteScope::All,
            today,
            editing: false,
            draft: NoteDraft::default(),
            title_input: String::new(),
            body_input: String::new(),
            time_input: String::new(),
            projects,
            project_cursor: 0,
            categories: Vec::new(),
            category_cursor: 0,
            banner: None,
        }
    }

    /// Applies one event and reports what the coordinator must do next.
    pub fn update(&mut self, event: AppEvent, catalog: &dyn CategorySource) -> Effect {
        match event {
            AppEvent::Tick => {
                if self.loading {
                    self.spinner_frame = self.spinner_frame.wrapping_add(1);
                }
                Effect::Nothing
            }
            AppEvent::Task(completion) => {
                self.apply_completion(completion);
                Effect::Nothing
            }
            AppEvent::Key(key) => {
                if self.loading {
                    trace!("Ignoring {:?} while a task is running", key);
                    return Effect::Nothing;
                }
                self.banner = None;
                match self.screen {
                    Screen::List => self.on_list(key),
                    Screen::Title => self.on_title(key),
                    Screen::Body => self.on_body(key),
                    Screen::Time => self.on_time(key),
                    Screen::ProjectSelect => self.on_project_select(key, catalog),
                    Screen::CategorySelect => self.on_category_select(key),
                }
            }
        }
    }

    /// Called when the runner refused a launch this state asked for.
    pub fn launch_rejected(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.banner = Some(Banner::Error(message.into()));
    }

    fn on_list(&mut self, key: Key) -> Effect {
        match key {
            Key::Up | Key::Char('k') => {
                self.list_cursor = step_clamped(self.list_cursor, self.notes.len(), false);
            }
            Key::Down | Key::Char('j') => {
                self.list_cursor = step_clamped(self.list_cursor, self.notes.len(), true);
            }
            Key::Enter => {
                if let Some(note) = self.notes.get(self.list_cursor) {
                    debug!("Opening note {} for editing", note.id);
                    self.draft = NoteDraft::from(note);
                    self.body_input = note.body.clone();
                    self.time_input = note.total_time.clone();
                    self.editing = self.draft.existing_id().is_some();
                    self.screen = Screen::Body;
                }
            }
            Key::Char('n') => {
                self.reset_working_copy();
                self.screen = Screen::Title;
            }
            Key::Char('r') => {
                self.scope = NoteScope::All;
                return self.launch(TaskRequest::ReloadNotes { scope: self.scope });
            }
            Key::Char('d') => {
                if let Some(note) = self.notes.get(self.list_cursor) {
                    let id = note.id.clone();
                    return self.launch(TaskRequest::DeleteNote {
                        id,
                        scope: self.scope,
                    });
                }
            }
            Key::Char('t') => return self.show_scope(NoteScope::Day(self.today)),
            Key::Ctrl('n') => return self.show_scope(self.scope.next_day(self.today)),
            Key::Ctrl('p') => return self.show_scope(self.scope.previous_day(self.today)),
            Key::Char('q') => return Effect::Quit,
            _ => {}
        }
        Effect::Nothing
    }

    fn on_title(&mut self, key: Key) -> Effect {
        match key {
            Key::Enter => {
                let title = self.title_input.trim();
                if !title.is_empty() {
                    self.draft.title = title.to_string();
                    self.body_input.clear();
                    self.screen = Screen::Body;
                }
            }
            Key::Esc => {
                self.reset_working_copy();
                self.screen = Screen::List;
            }
            Key::Backspace => {
                self.title_input.pop();
            }
            Key::Char(c) => self.title_input.push(c),
            _ => {}
        }
        Effect::Nothing
    }

    fn on_body(&mut self, key: Key) -> Effect {
        match key {
            Key::Tab => {
                // Editing keeps whatever was typed since the note was opened
                if !self.editing {
                    self.time_input.clear();
                }
                self.screen = Screen::Time;
            }
            Key::Esc => {
                self.reset_working_copy();
                self.screen = Screen::List;
            }
            Key::Enter => self.body_input.push('\n'),
            Key::Backspace => {
                self.body_input.pop();
            }
            Key::Char(c) => self.body_input.push(c),
            _ => {}
        }
        Effect::Nothing
    }

    fn on_time(&mut self, key: Key) -> Effect {
        match key {
            Key::Enter => {
                if self.editing {
                    if let Some(current) = &self.draft.project {
                        if let Some(index) =
                            self.projects.iter().position(|p| p.name == current.name)
                        {
                            self.project_cursor = index;
                        }
                    }
                }
                self.screen = Screen::ProjectSelect;
            }
            Key::Esc => self.screen = Screen::Body,
            Key::Backspace => {
                self.time_input.pop();
            }
            Key::Char(c) => self.time_input.push(c),
            _ => {}
        }
        Effect::Nothing
    }

    fn on_project_select(&mut self, key: Key, catalog: &dyn CategorySource) -> Effect {
        match key {
            Key::Up | Key::Char('k') => {
                self.project_cursor = step_wrapping(self.project_cursor, self.projects.len(), false);
            }
            Key::Down | Key::Char('j') => {
                self.project_cursor = step_wrapping(self.project_cursor, self.projects.len(), true);
            }
            Key::Esc => self.screen = Screen::Time,
            Key::Enter => {
                let Some(project) = self.projects.get(self.project_cursor).cloned() else {
                    self.banner = Some(Banner::Info("No projects to choose from".to_string()));
                    return Effect::Nothing;
                };
                match catalog.categories_for_project(project.id) {
                    Ok(categories) if categories.is_empty() => {
                        debug!("Project {} offers no categories", project.name);
                        self.banner = Some(Banner::Info(format!(
                            "Project {} has no categories yet",
                            project.name
                        )));
                        self.categories.clear();
                    }
                    Ok(categories) => {
                        self.category_cursor = self
                            .draft
                            .category
                            .as_ref()
                            .filter(|_| self.editing)
                            .and_then(|current| categories.iter().position(|c| c.id == current.id))
                            .unwrap_or(0);
                        self.categories = categories;
                        self.draft.project = Some(project);
                        self.screen = Screen::CategorySelect;
                    }
                    Err(e) => {
                        error!("Failed to load categories for {}: {}", project.name, e);
                        self.banner = Some(Banner::Error(format!(
                            "Could not load categories: {}",
                            e
                        )));
                    }
                }
            }
            _ => {}
        }
        Effect::Nothing
    }

    fn on_category_select(&mut self, key: Key) -> Effect {
        match key {
            Key::Up | Key::Char('k') => {
                self.category_cursor =
                    step_wrapping(self.category_cursor, self.categories.len(), false);
            }
            Key::Down | Key::Char('j') => {
                self.category_cursor =
                    step_wrapping(self.category_cursor, self.categories.len(), true);
            }
            Key::Esc => self.screen = Screen::ProjectSelect,
            Key::Enter | Key::Ctrl('s') => return self.confirm_save(),
            _ => {}
        }
        Effect::Nothing
    }

    fn confirm_save(&mut self) -> Effect {
        let (Some(project), Some(category)) = (
            self.draft.project.clone(),
            self.categories.get(self.category_cursor).cloned(),
        ) else {
            return Effect::Nothing;
        };

        self.draft.body = self.body_input.clone();
        self.draft.total_time = self.time_input.clone();
        self.draft.category = Some(category.clone());

        self.launch(TaskRequest::SaveNote {
            draft: self.draft.clone(),
            project_id: project.id,
            category_id: Some(category.id),
            scope: self.scope,
        })
    }

    fn show_scope(&mut self, scope: NoteScope) -> Effect {
        self.scope = scope;
        self.launch(TaskRequest::ReloadNotes { scope })
    }

    fn launch(&mut self, request: TaskRequest) -> Effect {
        self.loading = true;
        self.spinner_frame = 0;
        Effect::Launch(request)
    }

    fn apply_completion(&mut self, completion: TaskCompletion) {
        self.loading = false;
        match completion.result {
            Ok(notes) => {
                self.notes = notes;
                self.list_cursor = clamp_cursor(self.list_cursor, self.notes.len());
                if completion.kind == TaskKind::Save {
                    self.reset_working_copy();
                    self.screen = Screen::List;
                }
            }
            Err(message) => {
                warn!("{} task failed: {}", completion.kind, message);
                self.banner = Some(Banner::Error(format!(
                    "{} failed: {}",
                    completion.kind, message
                )));
                self.screen = Screen::List;
            }
        }
    }

    fn reset_working_copy(&mut self) {
        self.editing = false;
        self.draft = NoteDraft::default();
        self.title_input.clear();
        self.body_input.clear();
        self.time_input.clear();
        self.project_cursor = 0;
        self.categories.clear();
        self.category_cursor = 0;
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn spinner_frame(&self) -> usize {
        self.spinner_frame
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn list_cursor(&self) -> usize {
        self.list_cursor
    }

    pub fn selected_note(&self) -> Option<&Note> {
        self.notes.get(self.list_cursor)
    }

    pub fn scope(&self) -> NoteScope {
        self.scope
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// The working copy being composed or edited
    pub fn draft(&self) -> &NoteDraft {
        &self.draft
    }

    pub fn title_input(&self) -> &str {
        &self.title_input
    }

    pub fn body_input(&self) -> &str {
        &self.body_input
    }

    pub fn time_input(&self) -> &str {
        &self.time_input
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project_cursor(&self) -> usize {
        self.project_cursor
    }

    pub fn current_project(&self) -> Option<&Project> {
        self.draft.project.as_ref()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category_cursor(&self) -> usize {
        self.category_cursor
    }

    pub fn current_category(&self) -> Option<&Category> {
        self.draft.category.as_ref()
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }
}
