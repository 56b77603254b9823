/*
 * src/notes.rs
 *
 * Daily-note collection and the rollup run built on top of it.
 *
 * The model layer never touches the filesystem. This module finds the
 * `YYYY-MM-DD<suffix>` notes anywhere under a directory, reads them, and drives
 * parse -> aggregate -> render over the result.
 */

use crate::config::Config;
use crate::model::{
    AggregateOptions, DateFileContent, IdentityPolicy, TasksForDate, aggregate_with, day,
    render_with, sort_newest_first,
};
use anyhow::Result;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// True for `YYYY-MM-DD` immediately followed by `suffix` and nothing else.
///
/// Only the shape is checked. `2025-13-40.md` passes here and is left to the
/// identity policy when parsed.
pub fn is_daily_note(file_name: &str, suffix: &str) -> bool {
    file_name
        .strip_suffix(suffix)
        .is_some_and(|stem| day::ISO_DATE.is_match(stem))
}

/// List the daily notes anywhere under `dir`, most recent first.
///
/// Only the file name is matched, so `Daily/2025/08/2025-08-01.md` counts.
/// The note for `exclude` is left out when given. Entries that cannot be
/// visited are logged and skipped.
pub fn scan(dir: &Path, suffix: &str, exclude: Option<NaiveDate>) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(anyhow::anyhow!("Notes directory not found: {:?}", dir));
    }
    let excluded_name = exclude.map(|d| format!("{}{}", d.format(day::DATE_FORMAT), suffix));

    let mut found: Vec<(String, PathBuf)> = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                log::warn!("Skipping unreadable entry under {:?}: {}", dir, e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if !is_daily_note(&name, suffix) {
            continue;
        }
        if excluded_name.as_deref() == Some(name.as_str()) {
            log::debug!("Skipping today's note {:?}", entry.path());
            continue;
        }
        found.push((name, entry.into_path()));
    }

    // Names are zero-padded ISO dates, so lexical order is date order.
    // Same-named notes in different folders keep a stable path order.
    found.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    Ok(found.into_iter().map(|(_, p)| p).collect())
}

/// Read notes into `DateFileContent`. Unreadable files are logged and skipped.
pub fn read_notes(paths: &[PathBuf]) -> Vec<DateFileContent> {
    let mut notes = Vec::with_capacity(paths.len());
    for path in paths {
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
            continue;
        };
        match fs::read_to_string(path) {
            Ok(content) => notes.push(DateFileContent::from_text(name, &content)),
            Err(e) => log::error!("Failed reading {:?}: {}", path, e),
        }
    }
    notes
}

/// Result of one rollup, with the notice a user should see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollupOutcome {
    NoNotes,
    NoReadableNotes,
    NoTasks,
    Tasks {
        output: String,
        task_count: usize,
        days: Vec<TasksForDate>,
    },
}

impl RollupOutcome {
    /// Notice for the user. `inserted` says whether the block was written
    /// into a note or only printed.
    pub fn message(&self, suffix: &str, inserted: bool) -> String {
        match self {
            RollupOutcome::NoNotes => {
                format!("No daily notes matching YYYY-MM-DD{} found.", suffix)
            }
            RollupOutcome::NoReadableNotes => "No readable daily notes found.".to_string(),
            RollupOutcome::NoTasks => "No unchecked tasks found in daily notes.".to_string(),
            RollupOutcome::Tasks { task_count, .. } => format!(
                "{} {} unchecked task{}.",
                if inserted { "Inserted" } else { "Found" },
                task_count,
                if *task_count == 1 { "" } else { "s" }
            ),
        }
    }

    pub fn task_count(&self) -> usize {
        match self {
            RollupOutcome::Tasks { task_count, .. } => *task_count,
            _ => 0,
        }
    }
}

/// One configured rollup over a notes directory.
#[derive(Debug, Clone)]
pub struct Rollup {
    pub notes_dir: PathBuf,
    pub suffix: String,
    pub include_today: bool,
    pub identity_policy: IdentityPolicy,
    pub options: AggregateOptions,
}

impl Rollup {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            notes_dir: cfg.notes_dir.clone().unwrap_or_else(|| PathBuf::from(".")),
            suffix: cfg.note_suffix.clone(),
            include_today: cfg.include_today,
            identity_policy: cfg.identity_policy,
            options: cfg.aggregate,
        }
    }

    /// Run the full pipeline. `today` decides which note is left out when
    /// `include_today` is off.
    pub fn run(&self, today: NaiveDate) -> Result<RollupOutcome> {
        let exclude = (!self.include_today).then_some(today);
        let paths = scan(&self.notes_dir, &self.suffix, exclude)?;
        if paths.is_empty() {
            return Ok(RollupOutcome::NoNotes);
        }

        let notes = read_notes(&paths);
        if notes.is_empty() {
            return Ok(RollupOutcome::NoReadableNotes);
        }
        log::info!("Read {} daily notes from {:?}", notes.len(), self.notes_dir);

        Ok(self.run_on(&notes)?)
    }

    /// The pure part of `run`, over notes already in memory.
    pub fn run_on(&self, notes: &[DateFileContent]) -> Result<RollupOutcome, day::ParseError> {
        let mut days = day::parse_all(notes, &self.suffix, self.identity_policy)?;
        sort_newest_first(&mut days);

        let result = aggregate_with(&days, &self.options);
        if result.is_empty() {
            return Ok(RollupOutcome::NoTasks);
        }

        Ok(RollupOutcome::Tasks {
            output: render_with(&result, &self.options),
            task_count: result.task_count(),
            days: result.into_days(),
        })
    }
}
