//! Task create/edit lifecycle.
//!
//! The pane mode is the edit state: `Creating` submits a new task,
//! `Editing(id)` submits over task `id`, and `ListOnly` ignores submits.

use crate::bridge::{FormBridge, FormField};
use crate::error::BoardError;
use crate::session::{PaneMode, Session};
use crate::storage::KeyValueStore;

/// What a submit did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The form was not visible.
    Ignored,
    /// Validation failed on these fields; nothing changed.
    Invalid(Vec<FormField>),
    Created(u64),
    Updated(u64),
}

impl Session {
    /// Open an empty form for a new task.
    pub fn begin_create<F: FormBridge + ?Sized>(&mut self, form: &mut F) {
        form.clear();
        self.mode = PaneMode::Creating;
        tracing::debug!(project = %self.active, "begin new task");
    }

    /// Open the form on an existing task of the active project.
    ///
    /// Returns `false` and changes nothing if the task does not exist.
    pub fn begin_edit<F: FormBridge + ?Sized>(&mut self, form: &mut F, task_id: u64) -> bool {
        let Some(task) = self.active_project().ok().and_then(|p| p.task(task_id)) else {
            tracing::debug!(project = %self.active, task_id, "edit requested for missing task");
            return false;
        };
        form.clear();
        form.populate(task);
        self.mode = PaneMode::Editing(task_id);
        tracing::debug!(project = %self.active, task_id, "begin edit");
        true
    }

    /// Close the form without saving.
    pub fn cancel<F: FormBridge + ?Sized>(&mut self, form: &mut F) {
        form.clear();
        self.mode = PaneMode::ListOnly;
    }

    /// Validate the form and create or update a task in the active project.
    ///
    /// On success the session returns to `ListOnly` and the board is saved.
    pub fn submit<F, S>(&mut self, form: &mut F, store: &mut S) -> Result<SubmitOutcome, BoardError>
    where
        F: FormBridge + ?Sized,
        S: KeyValueStore + ?Sized,
    {
        let editing = match self.mode {
            PaneMode::ListOnly => return Ok(SubmitOutcome::Ignored),
            PaneMode::Creating => None,
            PaneMode::Editing(id) => Some(id),
        };

        let draft = match form.read().validate() {
            Ok(draft) => draft,
            Err(fields) => {
                tracing::warn!(?fields, "task form failed validation");
                form.flag_invalid(&fields);
                return Ok(SubmitOutcome::Invalid(fields));
            }
        };

        let project = self.active_project_mut()?;
        let existing = editing.and_then(|id| project.tasks.remove(&id).map(|task| (id, task)));
        let outcome = match existing {
            Some((id, task)) => {
                project.tasks.insert(id, draft.merge_into(task));
                SubmitOutcome::Updated(id)
            }
            None => {
                let id = project.next_task_id()?;
                project.tasks.insert(id, draft.into_task());
                SubmitOutcome::Created(id)
            }
        };
        tracing::info!(project = %self.active, ?outcome, "task saved");

        self.mode = PaneMode::ListOnly;
        self.board.save(store)?;
        Ok(outcome)
    }

    /// Remove a task from the active project and save.
    ///
    /// Returns `false` if the task does not exist. Deleting the task open in
    /// the form closes the form.
    pub fn delete_task<S: KeyValueStore + ?Sized>(&mut self, task_id: u64, store: &mut S) -> Result<bool, BoardError> {
        if self.active_project_mut()?.tasks.remove(&task_id).is_none() {
            return Ok(false);
        }
        if self.editing_task() == Some(task_id) {
            self.mode = PaneMode::ListOnly;
        }
        tracing::info!(project = %self.active, task_id, "task deleted");
        self.board.save(store)?;
        Ok(true)
    }
}
