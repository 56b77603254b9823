// File: ./src/model/day.rs
//! Turns one daily note into the checked/unchecked task lists for its date.
use crate::model::line::classify;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

pub const DEFAULT_NOTE_SUFFIX: &str = ".md";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern is valid"));

/// Raw content of one note as handed over by whoever read it from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFileContent {
    /// File name (`2025-08-01.md`) or bare stem (`2025-08-01`).
    pub identity: String,
    pub lines: Vec<String>,
}

impl DateFileContent {
    pub fn new(identity: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            identity: identity.into(),
            lines,
        }
    }

    /// Build from a whole file body, splitting on `\n` and `\r\n`.
    pub fn from_text(identity: impl Into<String>, text: &str) -> Self {
        Self::new(identity, text.lines().map(str::to_string).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TasksForDate {
    pub date: NaiveDate,
    pub unchecked_tasks: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checked_tasks: Vec<String>,
}

impl TasksForDate {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            unchecked_tasks: Vec::new(),
            checked_tasks: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("cannot derive a date from note '{0}': expected YYYY-MM-DD")]
    InvalidIdentity(String),
}

/// What to do with a note whose name is not a valid date.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IdentityPolicy {
    /// Abort the whole run.
    Strict,
    /// Skip the one note and keep going.
    #[default]
    Lenient,
}

/// Resolve a note identity to its calendar date.
///
/// The suffix is stripped when present. What remains must look exactly like
/// `YYYY-MM-DD`; chrono alone would also accept `2025-8-1`.
pub fn resolve_date(identity: &str, suffix: &str) -> Result<NaiveDate, ParseError> {
    let stem = identity.strip_suffix(suffix).unwrap_or(identity);
    if !ISO_DATE.is_match(stem) {
        return Err(ParseError::InvalidIdentity(identity.to_string()));
    }
    NaiveDate::parse_from_str(stem, DATE_FORMAT)
        .map_err(|_| ParseError::InvalidIdentity(identity.to_string()))
}

/// Parse one note using the default `.md` suffix.
pub fn parse(note: &DateFileContent) -> Result<TasksForDate, ParseError> {
    parse_with_suffix(note, DEFAULT_NOTE_SUFFIX)
}

pub fn parse_with_suffix(note: &DateFileContent, suffix: &str) -> Result<TasksForDate, ParseError> {
    let date = resolve_date(&note.identity, suffix)?;
    let mut tasks = TasksForDate::new(date);

    for line in &note.lines {
        match classify(line) {
            Some(t) if t.is_checked() => tasks.checked_tasks.push(t.text),
            Some(t) => tasks.unchecked_tasks.push(t.text),
            None => {}
        }
    }

    Ok(tasks)
}

/// Parse every note, applying `policy` to notes whose identity is not a date.
/// Output order follows input order.
pub fn parse_all(
    notes: &[DateFileContent],
    suffix: &str,
    policy: IdentityPolicy,
) -> Result<Vec<TasksForDate>, ParseError> {
    let mut parsed = Vec::with_capacity(notes.len());
    for note in notes {
        match parse_with_suffix(note, suffix) {
            Ok(tasks) => parsed.push(tasks),
            Err(e) => match policy {
                IdentityPolicy::Strict => return Err(e),
                IdentityPolicy::Lenient => {
                    log::warn!("Skipping note: {}", e);
                }
            },
        }
    }
    Ok(parsed)
}

/// Order parsed notes most recent first, which is what the aggregator expects.
pub fn sort_newest_first(days: &mut [TasksForDate]) {
    days.sort_by(|a, b| b.date.cmp(&a.date));
}
