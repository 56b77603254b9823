// File: ./src/model/render.rs
//! Serializes aggregated tasks back into markdown.
use crate::model::aggregate::{AggregateOptions, Aggregated};
use crate::model::day::{DATE_FORMAT, TasksForDate};

fn push_task(out: &mut String, text: &str) {
    out.push_str("- [ ] ");
    out.push_str(text);
    out.push('\n');
}

/// One `YYYY-MM-DD` heading per date, its tasks, then a blank line.
/// Input order is preserved.
pub fn render(days: &[TasksForDate]) -> String {
    let mut out = String::new();
    for day in days {
        out.push_str(&day.date.format(DATE_FORMAT).to_string());
        out.push('\n');
        for task in &day.unchecked_tasks {
            push_task(&mut out, task);
        }
        out.push('\n');
    }
    out
}

/// All tasks as a single list without date headings.
pub fn render_flat(days: &[TasksForDate]) -> String {
    let tasks: Vec<&str> = days
        .iter()
        .flat_map(|d| d.unchecked_tasks.iter().map(String::as_str))
        .collect();
    render_task_list(&tasks)
}

fn render_task_list(tasks: &[&str]) -> String {
    if tasks.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    for task in tasks {
        push_task(&mut out, task);
    }
    out.push('\n');
    out
}

/// Render according to `group_by_date`. A flat list is sorted as a whole when
/// `sort_alphabetically` is set, since per-date sorting no longer applies.
pub fn render_with(result: &Aggregated, opts: &AggregateOptions) -> String {
    if opts.group_by_date {
        return render(result.days());
    }

    let mut tasks: Vec<&str> = result.tasks().collect();
    if opts.sort_alphabetically {
        tasks.sort_unstable();
    }
    render_task_list(&tasks)
}
