// File: ./src/model/line.rs
//! Recognizes markdown checkbox lines and extracts their normalized text.
use once_cell::sync::Lazy;
use regex::Regex;

// Optional indent/quote/dash run, one bullet, a checkbox, then the task text.
static TASK_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\t >-]*[-*+]\s+\[([ xX])\]\s+(.*)$").expect("task line pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskState {
    Checked,
    Unchecked,
}

/// A single classified task line.
///
/// `text` is the content after the checkbox, trimmed. It is the identity of the
/// task for every override and dedupe decision made later on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskLine {
    pub state: TaskState,
    pub text: String,
}

impl TaskLine {
    pub fn is_checked(&self) -> bool {
        self.state == TaskState::Checked
    }
}

/// Classify one line of a note. Returns `None` for anything that is not a task,
/// including a checkbox with nothing but whitespace after it.
pub fn classify(line: &str) -> Option<TaskLine> {
    let caps = TASK_LINE.captures(line)?;
    let text = caps.get(2)?.as_str().trim();
    if text.is_empty() {
        return None;
    }

    let state = match caps.get(1)?.as_str() {
        " " => TaskState::Unchecked,
        _ => TaskState::Checked,
    };

    Some(TaskLine {
        state,
        text: text.to_string(),
    })
}

/// Normalized text of a task line regardless of its check state.
pub fn normalize_task_text(line: &str) -> Option<String> {
    classify(line).map(|t| t.text)
}
