//! Application state passed to every handler.

use crate::board::{list_key_for, Board};
use crate::config::ListAttributes;
use crate::error::BoardError;
use crate::project::Project;

/// Which panes are visible, and for the form which task it edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaneMode {
    /// Project list and task list only.
    #[default]
    ListOnly,
    /// Form visible for a new task.
    Creating,
    /// Form visible for the task with this identifier.
    Editing(u64),
}

impl PaneMode {
    pub fn form_visible(&self) -> bool {
        !matches!(self, PaneMode::ListOnly)
    }
}

/// The board plus everything transient about the current session.
#[derive(Debug, Clone)]
pub struct Session {
    pub board: Board,
    /// Mapping key of the project whose tasks are shown.
    pub active: String,
    pub mode: PaneMode,
    pub list_attributes: ListAttributes,
}

impl Session {
    pub fn new(board: Board, list_attributes: ListAttributes) -> Result<Self, BoardError> {
        let active = board.initial_project_key()?;
        Ok(Session {
            board,
            active,
            mode: PaneMode::ListOnly,
            list_attributes,
        })
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, PaneMode::Editing(_))
    }

    /// Identifier of the task being edited, if any.
    pub fn editing_task(&self) -> Option<u64> {
        match self.mode {
            PaneMode::Editing(id) => Some(id),
            _ => None,
        }
    }

    pub fn active_project(&self) -> Result<&Project, BoardError> {
        self.board.project(&self.active)
    }

    pub fn active_project_mut(&mut self) -> Result<&mut Project, BoardError> {
        self.board.project_mut(&self.active)
    }

    /// List key (`pN`) of the active project.
    pub fn active_list_key(&self) -> Option<String> {
        list_key_for(&self.active)
    }
}
