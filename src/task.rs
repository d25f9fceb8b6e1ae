//! Task data structure.
//!
//! Attribute names on disk follow the board's established JSON layout
//! (`task-title`, `task-duedate`, ...), so boards written by earlier versions
//! load unchanged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::date::DueDate;
use crate::fields::Priority;

/// Text shown in the edit column of every task row.
pub const EDIT_LABEL: &str = "Edit";

fn default_edit_label() -> String {
    EDIT_LABEL.to_string()
}

/// A single work item inside a project.
///
/// The task identifier is not stored here; it is the key under which the task
/// lives in [`crate::project::Project::tasks`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "task-title")]
    pub title: String,
    #[serde(rename = "task-description")]
    pub description: String,
    #[serde(rename = "task-duedate")]
    pub due_date: DueDate,
    #[serde(rename = "priority-level")]
    pub priority: Priority,
    pub status: String,
    #[serde(rename = "task-edit", default = "default_edit_label")]
    pub edit_label: String,
    /// Attributes this version does not know about, kept for write-back.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Task {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: DueDate,
        priority: Priority,
        status: impl Into<String>,
    ) -> Self {
        Task {
            title: title.into(),
            description: description.into(),
            due_date,
            priority,
            status: status.into(),
            edit_label: default_edit_label(),
            extra: BTreeMap::new(),
        }
    }
}
