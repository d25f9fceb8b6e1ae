//! Due date handling.
//!
//! Due dates are stored and displayed as `MM/DD/YYYY` while the editing form
//! works with the ISO `YYYY-MM-DD` form. Both conversions go through
//! [`NaiveDate`], so there is no time-of-day and no timezone to shift the day.

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Storage and display format.
pub const DISPLAY_FORMAT: &str = "%m/%d/%Y";
/// Form input format.
pub const INPUT_FORMAT: &str = "%Y-%m-%d";

/// A task due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DueDate(NaiveDate);

impl DueDate {
    /// Parse the display form. Month and day may be given without padding.
    pub fn parse_display(s: &str) -> Option<Self> {
        let mut parts = s.trim().split('/');
        let (month, day, year) = (parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() {
            return None;
        }
        let date = NaiveDate::from_ymd_opt(
            year.trim().parse().ok()?,
            month.trim().parse().ok()?,
            day.trim().parse().ok()?,
        )?;
        Some(DueDate(date))
    }

    /// Parse the form input value (`YYYY-MM-DD`).
    pub fn parse_input(s: &str) -> Option<Self> {
        NaiveDate::parse_from_str(s.trim(), INPUT_FORMAT).ok().map(DueDate)
    }

    /// Render for the form's date input.
    pub fn to_input(&self) -> String {
        self.0.format(INPUT_FORMAT).to_string()
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DISPLAY_FORMAT))
    }
}

impl FromStr for DueDate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DueDate::parse_display(s).ok_or_else(|| format!("invalid due date '{s}', expected MM/DD/YYYY"))
    }
}

impl Serialize for DueDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DueDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        // Older records may already hold the input form.
        DueDate::parse_display(&raw)
            .or_else(|| DueDate::parse_input(&raw))
            .ok_or_else(|| serde::de::Error::custom(format!("invalid due date '{raw}'")))
    }
}

/// Today's date for the board header, e.g. `Sunday, Oct 19, 2026`.
pub fn today_banner() -> String {
    format_banner(Local::now().date_naive())
}

/// Format a date the way the header shows it.
pub fn format_banner(date: NaiveDate) -> String {
    date.format("%A, %b %-d, %Y").to_string()
}
