//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::Priority;

/// Border of the focused pane or field.
pub const FOCUS: Color = Color::Rgb(255, 215, 0);
/// Header and status bar background.
pub const BAR: Color = Color::Rgb(0, 80, 0);

/// Due date colour for a task's priority: red, yellow, green.
pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Green,
    }
}
