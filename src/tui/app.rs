//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which owns the session and the
//! store, turns key presses into lifecycle and selector calls, and lays out
//! the project, task and form panes.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, ListState, Paragraph, TableState},
    Frame, Terminal,
};

use crate::{
    bridge::VALIDATION_MESSAGE,
    date::today_banner,
    lifecycle::SubmitOutcome,
    session::{PaneMode, Session},
    storage::KeyValueStore,
    tui::{
        colors::BAR,
        enums::Focus,
        input::InputField,
        task_form::TaskForm,
        utils::centered_rect,
        view,
    },
};

/// Placeholder for the new-project input after an empty submit.
pub const PROJECT_NAME_PROMPT: &str = "Enter project name.";

/// Main application state for the terminal user interface.
pub struct App<S: KeyValueStore> {
    session: Session,
    store: S,
    form: TaskForm,
    focus: Focus,
    project_list_state: ListState,
    task_list_state: TableState,
    new_project: InputField,
    status_message: String,
    show_help: bool,
    today: String,
}

impl<S: KeyValueStore> App<S> {
    /// Create a new App around a loaded session.
    pub fn new(session: Session, store: S) -> Self {
        let mut app = App {
            session,
            store,
            form: TaskForm::new(),
            focus: Focus::Tasks,
            project_list_state: ListState::default(),
            task_list_state: TableState::default(),
            new_project: InputField::new(),
            status_message: String::new(),
            show_help: false,
            today: today_banner(),
        };
        let active_row = app
            .session
            .active_list_key()
            .and_then(|k| app.session.board.projects_list.get_index_of(&k));
        app.project_list_state.select(active_row.or(Some(0)));
        app.reset_task_list();
        app
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn form(&self) -> &TaskForm {
        &self.form
    }

    pub fn new_project_input(&self) -> &InputField {
        &self.new_project
    }

    /// Identifiers of the active project's tasks, in display order.
    fn task_ids(&self) -> Vec<u64> {
        self.session
            .active_project()
            .map(|p| p.tasks.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Identifier of the highlighted task row.
    pub fn selected_task(&self) -> Option<u64> {
        let ids = self.task_ids();
        self.task_list_state.selected().and_then(|i| ids.get(i).copied())
    }

    /// Drop the old task list selection after the active project changed.
    fn reset_task_list(&mut self) {
        let first = if self.task_ids().is_empty() { None } else { Some(0) };
        self.task_list_state = TableState::default();
        self.task_list_state.select(first);
    }

    fn select_task_row(&mut self, task_id: u64) {
        let row = self.task_ids().iter().position(|&id| id == task_id);
        self.task_list_state.select(row);
    }

    fn set_status_message(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    fn move_selection(selected: Option<usize>, len: usize, down: bool) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(match selected {
            None => 0,
            Some(i) if down => (i + 1).min(len - 1),
            Some(i) => i.saturating_sub(1),
        })
    }

    /// Handle one key press. Returns true if the application should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        if self.show_help {
            self.show_help = false;
            return false;
        }
        self.status_message.clear();

        match self.focus {
            Focus::Projects => self.handle_project_list_input(key.code),
            Focus::Tasks => self.handle_task_list_input(key.code),
            Focus::NewProject => {
                self.handle_new_project_input(key.code);
                false
            }
            Focus::Form => {
                self.handle_form_input(key.code, key.modifiers);
                false
            }
        }
    }

    fn handle_project_list_input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Tab => self.focus = self.focus.cycle(),
            KeyCode::Char('h') => self.show_help = true,
            KeyCode::Char('p') => self.focus = Focus::NewProject,
            KeyCode::Char('n') => self.start_new_task(),
            KeyCode::Up | KeyCode::Down => {
                let len = self.session.board.projects_list.len();
                let next = Self::move_selection(self.project_list_state.selected(), len, key == KeyCode::Down);
                self.project_list_state.select(next);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let list_key = self
                    .project_list_state
                    .selected()
                    .and_then(|i| self.session.board.projects_list.get_index(i))
                    .map(|(k, _)| k.to_string());
                if let Some(list_key) = list_key {
                    if self.session.select_project(&list_key) {
                        self.reset_task_list();
                        self.focus = Focus::Tasks;
                    }
                }
            }
            _ => {}
        }
        false
    }

    fn handle_task_list_input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Tab => self.focus = self.focus.cycle(),
            KeyCode::Char('h') => self.show_help = true,
            KeyCode::Char('p') => self.focus = Focus::NewProject,
            KeyCode::Char('n') => self.start_new_task(),
            KeyCode::Up | KeyCode::Down => {
                let len = self.task_ids().len();
                let next = Self::move_selection(self.task_list_state.selected(), len, key == KeyCode::Down);
                self.task_list_state.select(next);
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(task_id) = self.selected_task() {
                    if self.session.begin_edit(&mut self.form, task_id) {
                        self.focus = Focus::Form;
                    }
                }
            }
            KeyCode::Char('d') => {
                if let Some(task_id) = self.selected_task() {
                    match self.session.delete_task(task_id, &mut self.store) {
                        Ok(true) => {
                            self.set_status_message(format!("Task {task_id} deleted"));
                            let len = self.task_ids().len();
                            let row = self.task_list_state.selected().map(|i| i.min(len.saturating_sub(1)));
                            self.task_list_state.select(if len == 0 { None } else { row });
                        }
                        Ok(false) => {}
                        Err(e) => self.set_status_message(format!("Error: {e}")),
                    }
                }
            }
            _ => {}
        }
        false
    }

    fn start_new_task(&mut self) {
        self.session.begin_create(&mut self.form);
        self.focus = Focus::Form;
    }

    fn handle_new_project_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.new_project.clear();
                self.focus = Focus::Projects;
            }
            KeyCode::Enter => {
                let name = self.new_project.value.clone();
                self.new_project.clear();
                match self.session.register_project(&name, &mut self.store) {
                    Ok(Some(list_key)) => {
                        let row = self.session.board.projects_list.get_index_of(&list_key);
                        self.project_list_state.select(row);
                        self.set_status_message(format!("Project '{}' added", name.trim()));
                        self.focus = Focus::Projects;
                    }
                    Ok(None) => self.new_project.placeholder = PROJECT_NAME_PROMPT.to_string(),
                    Err(e) => self.set_status_message(format!("Error: {e}")),
                }
            }
            KeyCode::Backspace => self.new_project.handle_backspace(),
            KeyCode::Delete => self.new_project.handle_delete(),
            KeyCode::Left => self.new_project.move_cursor_left(),
            KeyCode::Right => self.new_project.move_cursor_right(),
            KeyCode::Char(c) => self.new_project.handle_char(c),
            _ => {}
        }
    }

    fn handle_form_input(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        match key {
            KeyCode::Esc => {
                self.session.cancel(&mut self.form);
                self.focus = Focus::Tasks;
            }
            KeyCode::Char('s') if modifiers.contains(KeyModifiers::CONTROL) => self.submit_form(),
            KeyCode::Enter => self.submit_form(),
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.prev_field(),
            KeyCode::Left => self.form.handle_left_right(false),
            KeyCode::Right => self.form.handle_left_right(true),
            KeyCode::Backspace => self.form.handle_backspace(),
            KeyCode::Delete => self.form.handle_delete(),
            KeyCode::Char(c) => self.form.handle_char(c),
            _ => {}
        }
    }

    fn submit_form(&mut self) {
        match self.session.submit(&mut self.form, &mut self.store) {
            Ok(SubmitOutcome::Created(id)) => {
                self.select_task_row(id);
                self.focus = Focus::Tasks;
                self.set_status_message("Task created");
            }
            Ok(SubmitOutcome::Updated(id)) => {
                self.select_task_row(id);
                self.focus = Focus::Tasks;
                self.set_status_message("Task updated");
            }
            Ok(SubmitOutcome::Invalid(_)) => self.set_status_message(VALIDATION_MESSAGE),
            Ok(SubmitOutcome::Ignored) => {}
            Err(e) => {
                // The board changed in memory; only the write failed.
                self.focus = Focus::Tasks;
                self.set_status_message(format!("Error saving: {e}"));
            }
        }
    }

    /// Poll for one input event. Returns true if the application should quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                return Ok(self.handle_key(key));
            }
        }
        Ok(false)
    }

    fn render_projects_pane(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(area);
        let active = self.session.active_list_key();
        view::render_project_list(
            f,
            chunks[0],
            &self.session.board,
            active.as_deref(),
            &mut self.project_list_state,
            self.focus == Focus::Projects,
        );
        view::render_input(f, chunks[1], "New Project", &self.new_project, self.focus == Focus::NewProject, false);
    }

    fn render_tasks_pane(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);
        match self.session.active_project() {
            Ok(project) => {
                view::render_project_title(f, chunks[0], &project.meta);
                view::render_task_table(f, chunks[1], project, &mut self.task_list_state, self.focus == Focus::Tasks);
            }
            Err(e) => {
                let msg = Paragraph::new(e.to_string()).block(Block::default().borders(Borders::ALL));
                f.render_widget(msg, area);
            }
        }
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let popup = centered_rect(60, 60, area);
        let lines = vec![
            Line::from("Tab        switch between projects and tasks"),
            Line::from("↑/↓        move selection"),
            Line::from("Enter      open project / edit task"),
            Line::from("p          new project"),
            Line::from("n          new task"),
            Line::from("e          edit task"),
            Line::from("d          delete task"),
            Line::from("q / Esc    quit"),
            Line::from(""),
            Line::from("Press any key to close"),
        ];
        let help = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Help"));
        f.render_widget(Clear, popup);
        f.render_widget(help, popup);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match (self.session.mode, self.focus) {
                (PaneMode::Creating, _) => "New Task".to_string(),
                (PaneMode::Editing(id), _) => format!("Editing task {id}"),
                (PaneMode::ListOnly, Focus::NewProject) => "Type a project name, Enter to add".to_string(),
                (PaneMode::ListOnly, _) => {
                    let name = self.session.active_project().map(|p| p.name().to_string()).unwrap_or_default();
                    format!("{name} | Press 'h' for help")
                }
            }
        };
        let status = Paragraph::new(text)
            .style(Style::default().bg(BAR).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Draw the whole screen.
    pub fn render(&mut self, f: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        view::render_header(f, rows[0], &self.today);

        let columns = if self.session.mode.form_visible() {
            vec![Constraint::Percentage(22), Constraint::Percentage(43), Constraint::Percentage(35)]
        } else {
            vec![Constraint::Percentage(30), Constraint::Percentage(70)]
        };
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(columns)
            .split(rows[1]);

        self.render_projects_pane(f, panes[0]);
        self.render_tasks_pane(f, panes[1]);
        match self.session.mode {
            PaneMode::Creating => view::render_task_form(f, panes[2], &self.form, "New Task"),
            PaneMode::Editing(id) => view::render_task_form(f, panes[2], &self.form, &format!("Edit Task {id}")),
            PaneMode::ListOnly => {}
        }

        self.render_status_bar(f, rows[2]);
        if self.show_help {
            self.render_help(f, rows[1]);
        }
    }

    /// Main event loop for the TUI application.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::bridge::FormField;
    use crate::config::ListAttributes;
    use crate::storage::{MemoryStore, PROJECT_MAPPING_KEY};
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App<MemoryStore>, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn make_app() -> App<MemoryStore> {
        let attrs = ListAttributes::default();
        let session = Session::new(Board::seeded(&attrs), attrs).unwrap();
        App::new(session, MemoryStore::new())
    }

    fn draw(app: &mut App<MemoryStore>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 32)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect()
    }

    /// Fill and save a task through the keyboard.
    fn add_task(app: &mut App<MemoryStore>, title: &str) {
        app.handle_key(key(KeyCode::Char('n')));
        type_text(app, title);
        app.handle_key(key(KeyCode::Tab));
        type_text(app, "some details");
        app.handle_key(key(KeyCode::Tab));
        type_text(app, "2025-03-07");
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Right)); // High
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Right)); // Not Started
        app.handle_key(key(KeyCode::Enter));
    }

    #[test]
    fn app_starts_on_task_list() {
        let mut app = make_app();
        assert_eq!(app.focus(), Focus::Tasks);
        assert_eq!(app.session().mode, PaneMode::ListOnly);
        let screen = draw(&mut app);
        assert!(screen.contains("Personal"));
        assert!(!screen.contains("New Task *"));
    }

    #[test]
    fn create_task_through_keys() {
        let mut app = make_app();
        add_task(&mut app, "Write report");
        assert_eq!(app.status_message(), "Task created");
        assert_eq!(app.focus(), Focus::Tasks);
        assert_eq!(app.session().mode, PaneMode::ListOnly);
        assert_eq!(app.selected_task(), Some(1));

        let task = app.session().active_project().unwrap().task(1).unwrap().clone();
        assert_eq!(task.title, "Write report");
        assert_eq!(task.due_date.to_string(), "03/07/2025");
        assert_eq!(task.priority.as_str(), "high");
        assert_eq!(task.status, "not-started");

        let stored = app.store().raw(PROJECT_MAPPING_KEY).unwrap();
        assert_eq!(stored["Project1"]["1"]["task-duedate"], "03/07/2025");
        assert!(draw(&mut app).contains("Write report"));
    }

    #[test]
    fn empty_submit_reports_validation() {
        let mut app = make_app();
        app.handle_key(key(KeyCode::Char('n')));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.status_message(), VALIDATION_MESSAGE);
        assert_eq!(app.focus(), Focus::Form);
        assert!(app.form().is_invalid(FormField::Title));
        assert!(app.session().active_project().unwrap().tasks.is_empty());
        assert!(draw(&mut app).contains("One or more inputs"));
    }

    #[test]
    fn edit_prefills_form_and_updates() {
        let mut app = make_app();
        add_task(&mut app, "Draft");
        app.handle_key(key(KeyCode::Char('e')));
        assert_eq!(app.session().mode, PaneMode::Editing(1));
        assert_eq!(app.form().due.value, "2025-03-07");
        assert!(draw(&mut app).contains("Edit Task 1"));

        type_text(&mut app, " v2");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.status_message(), "Task updated");
        let project = app.session().active_project().unwrap();
        assert_eq!(project.tasks.len(), 1);
        assert_eq!(project.task(1).unwrap().title, "Draft v2");
    }

    #[test]
    fn escape_cancels_form() {
        let mut app = make_app();
        app.handle_key(key(KeyCode::Char('n')));
        type_text(&mut app, "unsaved");
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.session().mode, PaneMode::ListOnly);
        assert_eq!(app.focus(), Focus::Tasks);
        assert!(app.session().active_project().unwrap().tasks.is_empty());
    }

    #[test]
    fn add_and_select_project() {
        let mut app = make_app();
        app.handle_key(key(KeyCode::Char('p')));
        assert_eq!(app.focus(), Focus::NewProject);
        type_text(&mut app, "Launch Plan");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.focus(), Focus::Projects);
        assert_eq!(app.session().board.projects_list.get("p2").map(String::as_str), Some("Launch Plan"));
        assert_eq!(app.store().writes(), 2);

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.session().active, "Project2");
        assert_eq!(app.focus(), Focus::Tasks);
        assert_eq!(app.selected_task(), None);
        assert!(draw(&mut app).contains("Launch Plan"));
    }

    #[test]
    fn blank_project_name_prompts() {
        let mut app = make_app();
        app.handle_key(key(KeyCode::Char('p')));
        type_text(&mut app, "   ");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.focus(), Focus::NewProject);
        assert_eq!(app.new_project_input().placeholder, PROJECT_NAME_PROMPT);
        assert!(app.new_project_input().value.is_empty());
        assert_eq!(app.session().board.projects_list.len(), 1);
    }

    #[test]
    fn switching_project_resets_task_list() {
        let mut app = make_app();
        add_task(&mut app, "Only in Personal");
        app.handle_key(key(KeyCode::Char('p')));
        type_text(&mut app, "Work");
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.selected_task(), None);
        assert!(!draw(&mut app).contains("Only in Personal"));

        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Up));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.session().active, "Project1");
        assert_eq!(app.selected_task(), Some(1));
    }

    #[test]
    fn delete_selected_task() {
        let mut app = make_app();
        add_task(&mut app, "Temp");
        app.handle_key(key(KeyCode::Char('d')));
        assert_eq!(app.status_message(), "Task 1 deleted");
        assert!(app.session().active_project().unwrap().tasks.is_empty());
        assert_eq!(app.selected_task(), None);
    }

    #[test]
    fn help_popup_and_quit() {
        let mut app = make_app();
        assert!(!app.handle_key(key(KeyCode::Char('h'))));
        assert!(draw(&mut app).contains("Press any key to close"));
        assert!(!app.handle_key(key(KeyCode::Char('x'))));
        assert!(app.handle_key(key(KeyCode::Char('q'))));
        assert!(app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }
}
