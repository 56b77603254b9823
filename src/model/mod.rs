// File: ./src/model/mod.rs
pub mod aggregate;
pub mod day;
pub mod line;
pub mod render;

pub use aggregate::{AggregateOptions, Aggregated, DedupePolicy, aggregate, aggregate_with};
pub use day::{
    DateFileContent, IdentityPolicy, ParseError, TasksForDate, parse, parse_all,
    sort_newest_first,
};
pub use line::{TaskLine, TaskState, classify, normalize_task_text};
pub use render::{render, render_flat, render_with};
