//! Enumerations and option tables for task fields.
//!
//! Priority is a closed set; status is free-form in storage but the form only
//! offers the values listed in [`STATUS_OPTIONS`].

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Task priority. Drives the colour of the due date in the task list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[serde(alias = "High")]
    High,
    #[serde(alias = "Medium")]
    Medium,
    #[serde(alias = "Low")]
    Low,
}

impl Priority {
    /// The value stored in task records and on the form's radio inputs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    /// Exact, case-sensitive match against the stored values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(format!("unknown priority '{other}'")),
        }
    }
}

/// A selectable form option: the stored value and the label shown beside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Priority radio inputs, in display order.
pub const PRIORITY_OPTIONS: [FieldOption; 3] = [
    FieldOption { value: "high", label: "High" },
    FieldOption { value: "medium", label: "Medium" },
    FieldOption { value: "low", label: "Low" },
];

/// Status dropdown options, in display order.
pub const STATUS_OPTIONS: [FieldOption; 3] = [
    FieldOption { value: "not-started", label: "Not Started" },
    FieldOption { value: "in-progress", label: "In Progress" },
    FieldOption { value: "completed", label: "Completed" },
];

/// Label for a stored status value, falling back to the raw value.
pub fn status_label(value: &str) -> &str {
    STATUS_OPTIONS
        .iter()
        .find(|o| o.value == value)
        .map(|o| o.label)
        .unwrap_or(value)
}
