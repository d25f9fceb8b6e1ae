//! Enumerations for TUI state management.

/// Which part of the screen receives key presses.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Focus {
    Projects,
    Tasks,
    NewProject,
    Form,
}

impl Focus {
    /// Next pane for `Tab` outside the form.
    pub fn cycle(self) -> Self {
        match self {
            Focus::Projects => Focus::Tasks,
            Focus::Tasks => Focus::Projects,
            other => other,
        }
    }
}
