//! Turns an [`AppState`] snapshot into terminal output. Reads state, never changes it.
use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::{body_preview, format_timestamp, AppState, Banner, NoteScope, Screen};

const SPINNER_FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];
const PREVIEW_CHARS: usize = 30;

fn faint() -> Style {
    Style::default().fg(Color::Indexed(255)).add_modifier(Modifier::DIM)
}

fn badge(color: u8) -> Style {
    Style::default().bg(Color::Indexed(color))
}

pub fn render(frame: &mut Frame, state: &AppState) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(" NOTES APP ", badge(99)))),
        header,
    );
    frame.render_widget(
        Paragraph::new(screen_lines(state)).wrap(Wrap { trim: false }),
        body,
    );
    frame.render_widget(Paragraph::new(help_line(state)), footer);
}

/// The main content for the current screen
pub fn screen_lines(state: &AppState) -> Vec<Line<'static>> {
    if state.is_loading() {
        let frame = SPINNER_FRAMES[state.spinner_frame() % SPINNER_FRAMES.len()];
        return vec![Line::from(format!("{frame} Loading..."))];
    }

    let mut lines = Vec::new();
    if let Some(banner) = state.banner() {
        lines.push(match banner {
            Banner::Info(text) => Line::from(Span::styled(text.clone(), badge(75))),
            Banner::Error(text) => Line::from(Span::styled(
                text.clone(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
        });
        lines.push(Line::default());
    }

    match state.screen() {
        Screen::List => list_lines(state, &mut lines),
        Screen::Title => {
            lines.push(Line::from("Note title:"));
            lines.push(Line::default());
            lines.push(input_line(state.title_input()));
        }
        Screen::Body => {
            lines.push(Line::from(Span::styled(" Note: ", badge(98))));
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                format!(" {} ", state.draft().title),
                badge(95),
            )));
            lines.push(Line::default());
            for text in state.body_input().split('\n') {
                lines.push(Line::from(text.to_string()));
            }
            if let Some(last) = lines.last_mut() {
                last.push_span(Span::raw("█"));
            }
            lines.push(Line::default());
            if state.is_editing() {
                if let (Some(created), Some(updated)) =
                    (state.draft().created_at, state.draft().updated_at)
                {
                    lines.push(Line::from(Span::styled(
                        format!("Created At: {}", format_timestamp(&created)),
                        faint(),
                    )));
                    lines.push(Line::from(Span::styled(
                        format!("Updated At: {}", format_timestamp(&updated)),
                        faint(),
                    )));
                }
            }
        }
        Screen::Time => {
            lines.push(Line::from("What's your time?"));
            lines.push(Line::default());
            lines.push(input_line(state.time_input()));
        }
        Screen::ProjectSelect => {
            lines.push(Line::from("Project?"));
            lines.push(Line::default());
            for (i, project) in state.projects().iter().enumerate() {
                lines.push(radio_line(i == state.project_cursor(), &project.name));
            }
        }
        Screen::CategorySelect => {
            let project = state
                .current_project()
                .map(|p| p.name.clone())
                .unwrap_or_default();
            lines.push(Line::from(format!("Category for {project}?")));
            if state.is_editing() {
                if let Some(current) = state.current_category() {
                    lines.push(Line::from(Span::styled(
                        format!("Currently: {}", current.name),
                        faint(),
                    )));
                }
            }
            lines.push(Line::default());
            for (i, category) in state.categories().iter().enumerate() {
                lines.push(radio_line(i == state.category_cursor(), &category.name));
            }
        }
    }
    lines
}

fn list_lines(state: &AppState, lines: &mut Vec<Line<'static>>) {
    let scope = match state.scope() {
        NoteScope::All => "All notes".to_string(),
        NoteScope::Day(day) => day.format("%a, %d %b %Y").to_string(),
    };
    lines.push(Line::from(Span::styled(format!(" {scope} "), badge(75))));
    lines.push(Line::default());

    if state.notes().is_empty() {
        lines.push(Line::from(Span::styled("No notes yet.", faint())));
    }
    let selected = state.selected_note().map(|note| note.id.as_str());
    for note in state.notes() {
        let marker = if Some(note.id.as_str()) == selected { ">" } else { " " };
        let mut spans = vec![
            Span::styled(format!("{marker} "), Style::default().fg(Color::Indexed(99))),
            Span::raw(note.title.clone()),
            Span::raw(" | "),
            Span::styled(body_preview(&note.body, PREVIEW_CHARS), faint()),
            Span::styled(format!("  [{}", note.project.name), faint()),
        ];
        if let Some(category) = &note.category {
            spans.push(Span::styled(format!(" / {}", category.name), faint()));
        }
        spans.push(Span::styled("]", faint()));
        lines.push(Line::from(spans));
        lines.push(Line::default());
    }
}

fn input_line(text: &str) -> Line<'static> {
    Line::from(vec![Span::raw("> "), Span::raw(text.to_string()), Span::raw("█")])
}

fn radio_line(selected: bool, label: &str) -> Line<'static> {
    let mark = if selected { "(•) " } else { "( ) " };
    Line::from(format!("{mark}{label}"))
}

/// Key hints for the current screen
pub fn help_line(state: &AppState) -> Line<'static> {
    if state.is_loading() {
        return Line::default();
    }
    let text = match state.screen() {
        Screen::List if state.notes().is_empty() => {
            "n - new note, r - all notes, t - today, ctrl+n/ctrl+p - next/previous day, q - quit"
        }
        Screen::List => {
            "enter - edit, n - new note, d - delete, r - all notes, t - today, ctrl+n/ctrl+p - day, q - quit"
        }
        Screen::Title => "enter - next, esc - discard",
        Screen::Body => "tab - next, esc - discard",
        Screen::Time => "enter - next, esc - back",
        Screen::ProjectSelect => "enter - next, esc - back",
        Screen::CategorySelect => "ctrl+s/enter - save, esc - back",
    };
    Line::from(Span::styled(text, faint()))
}
