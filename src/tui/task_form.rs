//! Task form handling for the terminal user interface.
//!
//! `TaskForm` holds the editing widgets' state (three text inputs, the
//! priority radio group and the status selector) and implements
//! [`FormBridge`] so the lifecycle controller can drive it.

use crate::{
    bridge::{FormBridge, FormField, FormValues, VALIDATION_MESSAGE},
    date::DueDate,
    fields::{PRIORITY_OPTIONS, STATUS_OPTIONS},
    task::Task,
    tui::input::InputField,
};

/// Field order for form navigation.
pub const TITLE_FIELD: usize = 0;
pub const DESCRIPTION_FIELD: usize = 1;
pub const DUE_FIELD: usize = 2;
pub const PRIORITY_FIELD: usize = 3;
pub const STATUS_FIELD: usize = 4;
const FIELD_COUNT: usize = 5;

/// Placeholder for the due date input.
pub const DUE_HINT: &str = "YYYY-MM-DD";

/// The task details form.
#[derive(Debug, Default)]
pub struct TaskForm {
    pub title: InputField,
    pub description: InputField,
    pub due: InputField,
    /// Index into `PRIORITY_OPTIONS` of the checked radio.
    pub priority: Option<usize>,
    /// Index into `STATUS_OPTIONS` of the selected option.
    pub status: Option<usize>,
    pub current_field: usize,
    pub invalid: Vec<FormField>,
}

impl TaskForm {
    pub fn new() -> Self {
        let mut form = Self::default();
        form.due.placeholder = DUE_HINT.to_string();
        form
    }

    pub fn is_invalid(&self, field: FormField) -> bool {
        self.invalid.contains(&field)
    }

    /// Move to the next field in the form.
    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_COUNT;
    }

    /// Move to the previous field in the form.
    pub fn prev_field(&mut self) {
        self.current_field = (self.current_field + FIELD_COUNT - 1) % FIELD_COUNT;
    }

    fn active_input(&mut self) -> Option<&mut InputField> {
        match self.current_field {
            TITLE_FIELD => Some(&mut self.title),
            DESCRIPTION_FIELD => Some(&mut self.description),
            DUE_FIELD => Some(&mut self.due),
            _ => None,
        }
    }

    /// Handle character input for the currently active field.
    ///
    /// On the priority row, a space checks the highlighted option.
    pub fn handle_char(&mut self, c: char) {
        if let Some(input) = self.active_input() {
            input.handle_char(c);
        } else if c == ' ' {
            self.handle_left_right(true);
        }
    }

    /// Handle backspace input for the currently active field.
    pub fn handle_backspace(&mut self) {
        if let Some(input) = self.active_input() {
            input.handle_backspace();
        }
    }

    pub fn handle_delete(&mut self) {
        if let Some(input) = self.active_input() {
            input.handle_delete();
        }
    }

    /// Handle left/right arrow keys for cursor movement or selector changes.
    pub fn handle_left_right(&mut self, right: bool) {
        match self.current_field {
            PRIORITY_FIELD => self.priority = cycle(self.priority, PRIORITY_OPTIONS.len(), right),
            STATUS_FIELD => self.status = cycle(self.status, STATUS_OPTIONS.len(), right),
            _ => {
                if let Some(input) = self.active_input() {
                    if right {
                        input.move_cursor_right()
                    } else {
                        input.move_cursor_left()
                    }
                }
            }
        }
    }
}

/// Step a selector. Nothing selected steps onto the first (or last) option.
fn cycle(current: Option<usize>, len: usize, forward: bool) -> Option<usize> {
    match (current, forward) {
        (None, true) => Some(0),
        (None, false) => Some(len - 1),
        (Some(i), true) => Some((i + 1) % len),
        (Some(i), false) => Some((i + len - 1) % len),
    }
}

impl FormBridge for TaskForm {
    fn clear(&mut self) {
        *self = TaskForm::new();
    }

    fn populate(&mut self, task: &Task) {
        self.title.set(&task.title);
        self.description.set(&task.description);
        self.due.set(&task.due_date.to_input());
        self.priority = PRIORITY_OPTIONS
            .iter()
            .position(|o| o.value == task.priority.as_str());
        self.status = STATUS_OPTIONS.iter().position(|o| o.value == task.status);
    }

    fn read(&self) -> FormValues {
        FormValues {
            title: self.title.trimmed().to_string(),
            description: self.description.trimmed().to_string(),
            due_date: DueDate::parse_input(self.due.trimmed()),
            priority_label: self
                .priority
                .and_then(|i| PRIORITY_OPTIONS.get(i))
                .map(|o| o.label.trim().to_lowercase()),
            status: self
                .status
                .and_then(|i| STATUS_OPTIONS.get(i))
                .map(|o| o.value.to_string()),
        }
    }

    fn flag_invalid(&mut self, fields: &[FormField]) {
        self.invalid = fields.to_vec();
        self.title.placeholder = VALIDATION_MESSAGE.to_string();
        self.description.placeholder = VALIDATION_MESSAGE.to_string();
        if self.is_invalid(FormField::DueDate) {
            self.due.placeholder = DUE_HINT.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Priority;

    fn sample() -> Task {
        Task::new(
            "Write report",
            "Quarterly numbers",
            DueDate::parse_display("03/07/2025").unwrap(),
            Priority::Medium,
            "in-progress",
        )
    }

    #[test]
    fn populate_fills_inputs() {
        let mut form = TaskForm::new();
        form.populate(&sample());
        assert_eq!(form.title.value, "Write report");
        assert_eq!(form.due.value, "2025-03-07");
        assert_eq!(form.priority, Some(1));
        assert_eq!(form.status, Some(1));
    }

    #[test]
    fn read_of_populate_round_trips() {
        let task = sample();
        let mut form = TaskForm::new();
        form.populate(&task);
        let draft = form.read().validate().unwrap();
        assert_eq!(draft.into_task(), task);
    }

    #[test]
    fn unknown_status_leaves_selector_unset() {
        let mut task = sample();
        task.status = "archived".into();
        let mut form = TaskForm::new();
        form.populate(&task);
        assert_eq!(form.status, None);
        assert_eq!(form.read().status, None);
    }

    #[test]
    fn read_trims_and_lowercases_label() {
        let mut form = TaskForm::new();
        form.title.set("  padded  ");
        form.priority = Some(0);
        let values = form.read();
        assert_eq!(values.title, "padded");
        assert_eq!(values.priority_label.as_deref(), Some("high"));
        assert_eq!(values.due_date, None);
    }

    #[test]
    fn selectors_cycle_from_unset() {
        let mut form = TaskForm::new();
        form.current_field = PRIORITY_FIELD;
        form.handle_left_right(false);
        assert_eq!(form.priority, Some(2));
        form.handle_char(' ');
        assert_eq!(form.priority, Some(0));
        form.next_field();
        form.handle_left_right(true);
        assert_eq!(form.status, Some(0));
    }

    #[test]
    fn typing_goes_to_current_input() {
        let mut form = TaskForm::new();
        form.next_field();
        form.next_field();
        for c in "2025-01-02".chars() {
            form.handle_char(c);
        }
        assert_eq!(form.due.value, "2025-01-02");
        form.prev_field();
        form.prev_field();
        form.prev_field();
        assert_eq!(form.current_field, STATUS_FIELD);
    }

    #[test]
    fn flag_and_clear() {
        let mut form = TaskForm::new();
        form.flag_invalid(&[FormField::Title]);
        assert!(form.is_invalid(FormField::Title));
        assert_eq!(form.title.placeholder, VALIDATION_MESSAGE);
        form.clear();
        assert!(form.invalid.is_empty());
        assert!(form.title.placeholder.is_empty());
        assert_eq!(form.due.placeholder, DUE_HINT);
    }
}
