//! Command implementations for the CLI interface.
//!
//! Task commands drive the same lifecycle controller as the terminal form:
//! the flags are wrapped in an [`ArgsForm`] that implements [`FormBridge`].

use clap::Subcommand;
use clap_complete::{generate, Shell};

use crate::board::{project_key_for, Board};
use crate::bridge::{FormBridge, FormField, FormValues};
use crate::date::DueDate;
use crate::error::BoardError;
use crate::fields::{status_label, Priority, PRIORITY_OPTIONS, STATUS_OPTIONS};
use crate::lifecycle::SubmitOutcome;
use crate::session::Session;
use crate::storage::KeyValueStore;
use crate::task::Task;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive board.
    Ui,

    /// List projects.
    Projects,

    /// Register a new project.
    AddProject {
        /// Display name of the project.
        name: String,
    },

    /// List the tasks of a project.
    Tasks {
        /// Project list key (p1, p2, ...) or name. Defaults to the first project.
        #[arg(long)]
        project: Option<String>,
    },

    /// Add a task to a project.
    Add {
        /// Project list key (p1, p2, ...) or name.
        #[arg(long)]
        project: Option<String>,
        /// Task title.
        #[arg(long)]
        title: String,
        /// Task description.
        #[arg(long = "desc")]
        description: String,
        /// Due date: YYYY-MM-DD.
        #[arg(long)]
        due: String,
        /// Priority: high | medium | low.
        #[arg(long, value_enum)]
        priority: Priority,
        /// Status: not-started | in-progress | completed.
        #[arg(long, value_parser = status_values(), default_value = "not-started")]
        status: String,
    },

    /// Edit fields of a task. Unspecified fields keep their values.
    Edit {
        /// Task ID.
        id: u64,
        #[arg(long)]
        project: Option<String>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long = "desc")]
        description: Option<String>,
        /// Due date: YYYY-MM-DD.
        #[arg(long)]
        due: Option<String>,
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        #[arg(long, value_parser = status_values())]
        status: Option<String>,
    },

    /// Delete a task.
    Delete {
        /// Task ID.
        id: u64,
        #[arg(long)]
        project: Option<String>,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn status_values() -> clap::builder::PossibleValuesParser {
    clap::builder::PossibleValuesParser::new(STATUS_OPTIONS.iter().map(|o| o.value))
}

/// Task fields supplied on the command line.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ArgsForm {
    pub title: String,
    pub description: String,
    /// Date in input form, `YYYY-MM-DD`.
    pub due: String,
    pub priority: Option<Priority>,
    pub status: Option<String>,
    pub invalid: Vec<FormField>,
}

impl FormBridge for ArgsForm {
    fn clear(&mut self) {
        *self = ArgsForm::default();
    }

    fn populate(&mut self, task: &Task) {
        self.title = task.title.clone();
        self.description = task.description.clone();
        self.due = task.due_date.to_input();
        self.priority = Some(task.priority);
        self.status = Some(task.status.clone());
    }

    fn read(&self) -> FormValues {
        FormValues {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            due_date: DueDate::parse_input(&self.due),
            priority_label: self.priority.and_then(|p| {
                PRIORITY_OPTIONS
                    .iter()
                    .find(|o| o.value == p.as_str())
                    .map(|o| o.label.to_lowercase())
            }),
            status: self.status.clone(),
        }
    }

    fn flag_invalid(&mut self, fields: &[FormField]) {
        self.invalid = fields.to_vec();
    }
}

/// Resolve a project given by list key or by name (case-insensitive) to its
/// list key. `None` picks the first project.
pub fn resolve_project(board: &Board, identifier: Option<&str>) -> Result<String, BoardError> {
    let Some(identifier) = identifier else {
        return board
            .projects_list
            .keys()
            .next()
            .cloned()
            .ok_or(BoardError::NoProjects);
    };
    if board.projects_list.contains_key(identifier) {
        return Ok(identifier.to_string());
    }
    let wanted = identifier.trim().to_lowercase();
    board
        .projects_list
        .iter()
        .find(|(_, name)| name.to_lowercase() == wanted)
        .map(|(key, _)| key.to_string())
        .ok_or_else(|| BoardError::UnknownProject(identifier.to_string()))
}

/// Make the named project active in the session.
fn activate(session: &mut Session, identifier: Option<&str>) -> Result<String, BoardError> {
    let list_key = resolve_project(&session.board, identifier)?;
    if !session.select_project(&list_key) {
        let project_key = project_key_for(&list_key).unwrap_or_else(|| list_key.clone());
        return Err(BoardError::UnknownProject(project_key));
    }
    Ok(list_key)
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

pub fn cmd_projects(session: &Session) {
    println!("{:<5} {:<6} {}", "Key", "Tasks", "Name");
    for (key, name) in session.board.projects_list.iter() {
        let count = session
            .board
            .project_for_list_key(key)
            .map(|p| p.tasks.len())
            .unwrap_or(0);
        println!("{:<5} {:<6} {}", key, count, name);
    }
}

pub fn cmd_add_project<S: KeyValueStore>(session: &mut Session, store: &mut S, name: &str) -> Result<(), BoardError> {
    match session.register_project(name, store)? {
        Some(key) => println!("Added project {key}: {}", name.trim()),
        None => println!("Enter project name."),
    }
    Ok(())
}

pub fn cmd_tasks(session: &mut Session, project: Option<String>) -> Result<(), BoardError> {
    activate(session, project.as_deref())?;
    let project = session.active_project()?;
    println!("{}", project.name());
    println!(
        "{:<4} {:<8} {:<12} {:<11} {:<24} {}",
        "ID", "Priority", "Status", "Due", "Title", "Description"
    );
    for (id, task) in &project.tasks {
        println!(
            "{:<4} {:<8} {:<12} {:<11} {:<24} {}",
            id,
            task.priority,
            status_label(&task.status),
            task.due_date,
            truncate(&task.title, 24),
            truncate(&task.description, 40)
        );
    }
    Ok(())
}

/// Submit a filled form and report the outcome.
fn submit_and_report<S: KeyValueStore>(session: &mut Session, form: &mut ArgsForm, store: &mut S) -> Result<bool, BoardError> {
    match session.submit(form, store)? {
        SubmitOutcome::Created(id) => println!("Added task {id}"),
        SubmitOutcome::Updated(id) => println!("Updated task {id}"),
        SubmitOutcome::Invalid(fields) => {
            let names: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
            eprintln!("Invalid or missing: {}", names.join(", "));
            return Ok(false);
        }
        SubmitOutcome::Ignored => return Ok(false),
    }
    Ok(true)
}

#[allow(clippy::too_many_arguments)]
pub fn cmd_add<S: KeyValueStore>(
    session: &mut Session,
    store: &mut S,
    project: Option<String>,
    title: String,
    description: String,
    due: String,
    priority: Priority,
    status: String,
) -> Result<bool, BoardError> {
    activate(session, project.as_deref())?;
    let mut form = ArgsForm::default();
    session.begin_create(&mut form);
    form.title = title;
    form.description = description;
    form.due = due;
    form.priority = Some(priority);
    form.status = Some(status);
    submit_and_report(session, &mut form, store)
}

#[allow(clippy::too_many_arguments)]
pub fn cmd_edit<S: KeyValueStore>(
    session: &mut Session,
    store: &mut S,
    id: u64,
    project: Option<String>,
    title: Option<String>,
    description: Option<String>,
    due: Option<String>,
    priority: Option<Priority>,
    status: Option<String>,
) -> Result<bool, BoardError> {
    activate(session, project.as_deref())?;
    let mut form = ArgsForm::default();
    if !session.begin_edit(&mut form, id) {
        eprintln!("Task {id} not found");
        return Ok(false);
    }
    if let Some(title) = title {
        form.title = title;
    }
    if let Some(description) = description {
        form.description = description;
    }
    if let Some(due) = due {
        form.due = due;
    }
    if priority.is_some() {
        form.priority = priority;
    }
    if status.is_some() {
        form.status = status;
    }
    submit_and_report(session, &mut form, store)
}

pub fn cmd_delete<S: KeyValueStore>(session: &mut Session, store: &mut S, id: u64, project: Option<String>) -> Result<bool, BoardError> {
    activate(session, project.as_deref())?;
    if session.delete_task(id, store)? {
        println!("Deleted task {id}");
        Ok(true)
    } else {
        eprintln!("Task {id} not found");
        Ok(false)
    }
}

pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    let mut cmd = crate::cli::Cli::command();
    generate(shell, &mut cmd, "tb", &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ListAttributes;
    use crate::storage::MemoryStore;

    fn session() -> Session {
        let attrs = ListAttributes::default();
        let mut board = Board::seeded(&attrs);
        board.push_project("Work", &attrs);
        Session::new(board, attrs).unwrap()
    }

    #[test]
    fn resolves_by_key_or_name() {
        let s = session();
        assert_eq!(resolve_project(&s.board, None).unwrap(), "p1");
        assert_eq!(resolve_project(&s.board, Some("p2")).unwrap(), "p2");
        assert_eq!(resolve_project(&s.board, Some("work")).unwrap(), "p2");
        assert!(matches!(
            resolve_project(&s.board, Some("nope")),
            Err(BoardError::UnknownProject(_))
        ));
    }

    #[test]
    fn add_then_edit_through_args() {
        let mut s = session();
        let mut store = MemoryStore::new();
        let added = cmd_add(
            &mut s,
            &mut store,
            Some("Work".into()),
            "Budget".into(),
            "Q3 numbers".into(),
            "2025-03-07".into(),
            Priority::Low,
            "in-progress".into(),
        )
        .unwrap();
        assert!(added);
        assert_eq!(s.active, "Project2");

        let edited = cmd_edit(&mut s, &mut store, 1, Some("p2".into()), None, None, Some("2025-04-01".into()), None, None).unwrap();
        assert!(edited);
        let task = s.active_project().unwrap().task(1).unwrap();
        assert_eq!(task.title, "Budget");
        assert_eq!(task.due_date.to_string(), "04/01/2025");
        assert_eq!(task.priority, Priority::Low);
        assert_eq!(task.status, "in-progress");
    }

    #[test]
    fn bad_due_date_is_rejected() {
        let mut s = session();
        let mut store = MemoryStore::new();
        let added = cmd_add(
            &mut s,
            &mut store,
            None,
            "T".into(),
            "D".into(),
            "03/07/2025".into(),
            Priority::High,
            "not-started".into(),
        )
        .unwrap();
        assert!(!added);
        assert!(s.active_project().unwrap().tasks.is_empty());
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn edit_and_delete_of_missing_task() {
        let mut s = session();
        let mut store = MemoryStore::new();
        assert!(!cmd_edit(&mut s, &mut store, 9, None, None, None, None, None, None).unwrap());
        assert!(!cmd_delete(&mut s, &mut store, 9, None).unwrap());
    }

    #[test]
    fn args_form_round_trip() {
        let task = Task::new("a", "b", DueDate::parse_display("12/31/2025").unwrap(), Priority::Medium, "completed");
        let mut form = ArgsForm::default();
        form.populate(&task);
        assert_eq!(form.due, "2025-12-31");
        assert_eq!(form.read().validate().unwrap().into_task(), task);
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }
}
