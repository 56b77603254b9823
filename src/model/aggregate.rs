// File: ./src/model/aggregate.rs
//! Cross-date aggregation of parsed daily notes.
//!
//! The input must be ordered most recent first (see
//! [`sort_newest_first`](crate::model::day::sort_newest_first)). Two passes run
//! over it:
//!
//! 1. Suppression, newest to oldest. A task checked on some date hides every
//!    unchecked occurrence of the same text on that date's older neighbours.
//!    Checks only travel backwards in time: an unchecked task listed on the
//!    same date as its check is evaluated before the check is recorded.
//! 2. Dedupe. Among the survivors each text is kept once. With
//!    [`DedupePolicy::OldestWins`] the walk goes oldest to newest, so a task is
//!    attributed to the date it has been open since.
//!
//! Every call allocates its own sets; nothing is cached between calls.
use crate::model::day::TasksForDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use strum::{Display, EnumString};

fn default_true() -> bool {
    true
}

/// Which occurrence of a never-checked task survives deduplication.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum DedupePolicy {
    /// Keep the earliest date the task appears on.
    #[default]
    OldestWins,
    /// Keep the most recent date the task appears on.
    NewestWins,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateOptions {
    #[serde(default = "default_true")]
    pub dedupe: bool,
    #[serde(default)]
    pub sort_alphabetically: bool,
    #[serde(default = "default_true")]
    pub group_by_date: bool,
    #[serde(default = "default_true")]
    pub override_with_newer_checked: bool,
    #[serde(default = "default_true")]
    pub reverse_chronological: bool,
    #[serde(default)]
    pub dedupe_policy: DedupePolicy,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            dedupe: true,
            sort_alphabetically: false,
            group_by_date: true,
            override_with_newer_checked: true,
            reverse_chronological: true,
            dedupe_policy: DedupePolicy::OldestWins,
        }
    }
}

/// Surviving open tasks, one record per date. `checked_tasks` is always empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregated {
    days: Vec<TasksForDate>,
}

impl Aggregated {
    pub fn days(&self) -> &[TasksForDate] {
        &self.days
    }

    pub fn into_days(self) -> Vec<TasksForDate> {
        self.days
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn task_count(&self) -> usize {
        self.days.iter().map(|d| d.unchecked_tasks.len()).sum()
    }

    /// All surviving task texts in presentation order.
    pub fn tasks(&self) -> impl Iterator<Item = &str> {
        self.days
            .iter()
            .flat_map(|d| d.unchecked_tasks.iter().map(String::as_str))
    }
}

/// Aggregate with default options.
pub fn aggregate(newest_first: &[TasksForDate]) -> Aggregated {
    aggregate_with(newest_first, &AggregateOptions::default())
}

pub fn aggregate_with(newest_first: &[TasksForDate], opts: &AggregateOptions) -> Aggregated {
    let open = suppress_checked(newest_first, opts.override_with_newer_checked);

    let mut days = if opts.dedupe {
        dedupe(open, opts.dedupe_policy)
    } else {
        open
    };

    if opts.sort_alphabetically {
        for day in &mut days {
            day.unchecked_tasks.sort();
        }
    }

    if opts.reverse_chronological {
        days.sort_by(|a, b| b.date.cmp(&a.date));
    } else {
        days.sort_by(|a, b| a.date.cmp(&b.date));
    }

    log::debug!(
        "Aggregated {} notes into {} dates",
        newest_first.len(),
        days.len()
    );

    Aggregated { days }
}

// Pass 1. Output stays newest first, dates left without tasks are dropped.
fn suppress_checked(newest_first: &[TasksForDate], enabled: bool) -> Vec<TasksForDate> {
    let mut checked_ever: HashSet<&str> = HashSet::new();
    let mut out = Vec::with_capacity(newest_first.len());

    for day in newest_first {
        let kept: Vec<String> = day
            .unchecked_tasks
            .iter()
            .filter(|t| !checked_ever.contains(t.as_str()))
            .cloned()
            .collect();

        if enabled {
            checked_ever.extend(day.checked_tasks.iter().map(String::as_str));
        }

        if !kept.is_empty() {
            out.push(TasksForDate {
                date: day.date,
                unchecked_tasks: kept,
                checked_tasks: Vec::new(),
            });
        }
    }

    out
}

// Pass 2. Takes pass 1 output (newest first) and returns it in the same order.
fn dedupe(newest_first: Vec<TasksForDate>, policy: DedupePolicy) -> Vec<TasksForDate> {
    let mut ordered = newest_first;
    if policy == DedupePolicy::OldestWins {
        ordered.reverse();
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(ordered.len());

    for mut day in ordered {
        day.unchecked_tasks.retain(|t| seen.insert(t.clone()));
        if !day.unchecked_tasks.is_empty() {
            out.push(day);
        }
    }

    if policy == DedupePolicy::OldestWins {
        out.reverse();
    }
    out
}
