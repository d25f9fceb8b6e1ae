//! The seam between task lifecycle logic and whatever surface edits a task.
//!
//! The terminal form and the command-line flags both implement [`FormBridge`],
//! so the lifecycle controller never touches widgets or arguments directly.

use std::fmt;

use crate::date::DueDate;
use crate::fields::Priority;
use crate::task::Task;

/// Placeholder shown on offending fields after a failed submit.
pub const VALIDATION_MESSAGE: &str = "One or more inputs are blank or not selected.";

/// A field of the task form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Title,
    Description,
    DueDate,
    Priority,
    Status,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FormField::Title => "title",
            FormField::Description => "description",
            FormField::DueDate => "due date",
            FormField::Priority => "priority",
            FormField::Status => "status",
        })
    }
}

/// A snapshot of the form as read by [`FormBridge::read`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues {
    /// Trimmed title.
    pub title: String,
    /// Trimmed description.
    pub description: String,
    /// The date input converted to a due date; `None` when blank or not a
    /// valid `YYYY-MM-DD` value.
    pub due_date: Option<DueDate>,
    /// Lower-cased label text of the checked priority option.
    pub priority_label: Option<String>,
    /// Value of the selected status option.
    pub status: Option<String>,
}

/// A task that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub due_date: DueDate,
    pub priority: Priority,
    pub status: String,
}

impl FormValues {
    /// Check every required field, collecting all failures.
    pub fn validate(self) -> Result<TaskDraft, Vec<FormField>> {
        let mut invalid = Vec::new();
        if self.title.trim().is_empty() {
            invalid.push(FormField::Title);
        }
        if self.description.trim().is_empty() {
            invalid.push(FormField::Description);
        }
        if self.due_date.is_none() {
            invalid.push(FormField::DueDate);
        }
        let priority = self
            .priority_label
            .as_deref()
            .and_then(|label| label.parse::<Priority>().ok());
        if priority.is_none() {
            invalid.push(FormField::Priority);
        }
        let status = self.status.filter(|s| !s.trim().is_empty());
        if status.is_none() {
            invalid.push(FormField::Status);
        }

        match (self.due_date, priority, status) {
            (Some(due_date), Some(priority), Some(status)) if invalid.is_empty() => Ok(TaskDraft {
                title: self.title,
                description: self.description,
                due_date,
                priority,
                status,
            }),
            _ => Err(invalid),
        }
    }
}

impl TaskDraft {
    /// A brand-new task record.
    pub fn into_task(self) -> Task {
        Task::new(self.title, self.description, self.due_date, self.priority, self.status)
    }

    /// Overwrite the form-covered fields of an existing task, keeping the rest.
    pub fn merge_into(self, mut existing: Task) -> Task {
        existing.title = self.title;
        existing.description = self.description;
        existing.due_date = self.due_date;
        existing.priority = self.priority;
        existing.status = self.status;
        existing.edit_label = crate::task::EDIT_LABEL.to_string();
        existing
    }
}

/// Binding between a task record and an editing surface.
pub trait FormBridge {
    /// Reset every field to empty/unselected and drop validation marks.
    fn clear(&mut self);

    /// Write a task's values into the fields.
    fn populate(&mut self, task: &Task);

    /// Read the current field values.
    fn read(&self) -> FormValues;

    /// Mark fields that failed validation.
    fn flag_invalid(&mut self, fields: &[FormField]);
}
