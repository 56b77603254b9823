// Tests for the cross-date override and dedupe rules.
use agg_daily_tasks::model::{
    AggregateOptions, DateFileContent, DedupePolicy, TasksForDate, aggregate, aggregate_with,
    parse, render, render_with,
};
use chrono::NaiveDate;

fn lines(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

fn day(d: u32, unchecked: &[&str], checked: &[&str]) -> TasksForDate {
    TasksForDate {
        date: NaiveDate::from_ymd_opt(2025, 8, d).unwrap(),
        unchecked_tasks: lines(unchecked),
        checked_tasks: lines(checked),
    }
}

fn dates(days: &[TasksForDate]) -> Vec<String> {
    days.iter().map(|d| d.date.to_string()).collect()
}

/// Eggs and bananas over two days, newest first.
fn eggs_and_bananas() -> Vec<TasksForDate> {
    let first = DateFileContent::new(
        "2025-08-01",
        lines(&["- [ ] Buy eggs", "not a task", "- [ ] Buy bananas"]),
    );
    let second = DateFileContent::new(
        "2025-08-02",
        lines(&["- [x] Buy eggs", "not a task", "- [ ] Buy bananas"]),
    );
    vec![parse(&second).unwrap(), parse(&first).unwrap()]
}

/// Five days exercising every interaction between checks and repeats.
fn week() -> Vec<TasksForDate> {
    vec![
        day(5, &["A"], &["B"]),
        day(4, &["B", "C"], &[]),
        day(3, &["C", "D"], &["D"]),
        day(2, &["D", "E"], &[]),
        day(1, &["A", "E", "F"], &["C"]),
    ]
}

#[test]
fn test_basic_case_newest_wins() {
    let opts = AggregateOptions {
        dedupe_policy: DedupePolicy::NewestWins,
        ..Default::default()
    };
    let result = aggregate_with(&eggs_and_bananas(), &opts);

    assert_eq!(result.days().len(), 1);
    assert_eq!(dates(result.days()), vec!["2025-08-02"]);
    assert_eq!(result.days()[0].unchecked_tasks, vec!["Buy bananas"]);
    assert_eq!(render(result.days()), "2025-08-02\n- [ ] Buy bananas\n\n");
}

#[test]
fn test_basic_case_oldest_wins() {
    let result = aggregate(&eggs_and_bananas());

    // "Buy eggs" is checked on 08-02, so its 08-01 occurrence is gone.
    // "Buy bananas" was never checked and has been open since 08-01.
    assert_eq!(render(result.days()), "2025-08-01\n- [ ] Buy bananas\n\n");
    assert_eq!(result.task_count(), 1);
}

#[test]
fn test_empty_input() {
    let result = aggregate(&[]);
    assert!(result.is_empty());
    assert_eq!(render(result.days()), "");
}

#[test]
fn test_week_oldest_wins() {
    let result = aggregate(&week());

    assert_eq!(dates(result.days()), vec!["2025-08-03", "2025-08-01"]);
    assert_eq!(result.days()[0].unchecked_tasks, vec!["C", "D"]);
    assert_eq!(result.days()[1].unchecked_tasks, vec!["A", "E", "F"]);
    assert_eq!(result.task_count(), 5);
}

#[test]
fn test_week_newest_wins() {
    let opts = AggregateOptions {
        dedupe_policy: DedupePolicy::NewestWins,
        ..Default::default()
    };
    let result = aggregate_with(&week(), &opts);

    let tasks: Vec<_> = result.tasks().collect();
    assert_eq!(tasks, vec!["A", "C", "D", "E", "F"]);
    assert_eq!(result.days().len(), 5);
}

#[test]
fn test_suppression_law() {
    // B is checked on 08-05 and open on 08-04: must not survive.
    let result = aggregate(&week());
    assert!(result.tasks().all(|t| t != "B"));
}

#[test]
fn test_check_on_older_date_does_not_suppress() {
    // C is checked on 08-01 only, which is older than where it is open.
    let result = aggregate(&week());
    assert!(result.tasks().any(|t| t == "C"));
}

#[test]
fn test_fully_checked_task_never_emitted() {
    let input = vec![day(3, &[], &["X"]), day(2, &["X"], &["X"]), day(1, &["X"], &[])];
    let result = aggregate(&input);
    assert!(result.is_empty());
}

#[test]
fn test_single_occurrence_keeps_its_date() {
    let input = vec![day(9, &["other"], &[]), day(4, &["lonely"], &[])];
    let result = aggregate(&input);
    let lonely = result
        .days()
        .iter()
        .find(|d| d.unchecked_tasks.contains(&"lonely".to_string()))
        .unwrap();
    assert_eq!(lonely.date.to_string(), "2025-08-04");
}

#[test]
fn test_override_disabled() {
    let opts = AggregateOptions {
        override_with_newer_checked: false,
        ..Default::default()
    };
    let result = aggregate_with(&eggs_and_bananas(), &opts);

    assert_eq!(dates(result.days()), vec!["2025-08-01"]);
    assert_eq!(
        result.days()[0].unchecked_tasks,
        vec!["Buy eggs", "Buy bananas"]
    );
}

#[test]
fn test_dedupe_disabled() {
    let opts = AggregateOptions {
        dedupe: false,
        ..Default::default()
    };
    let result = aggregate_with(&eggs_and_bananas(), &opts);

    assert_eq!(dates(result.days()), vec!["2025-08-02", "2025-08-01"]);
    assert_eq!(result.task_count(), 2);
}

#[test]
fn test_sort_alphabetically() {
    let input = vec![day(2, &["pears", "apples", "milk"], &[])];
    let opts = AggregateOptions {
        sort_alphabetically: true,
        ..Default::default()
    };
    let result = aggregate_with(&input, &opts);
    assert_eq!(
        result.days()[0].unchecked_tasks,
        vec!["apples", "milk", "pears"]
    );

    // Off by default: file order is kept
    let result = aggregate(&input);
    assert_eq!(
        result.days()[0].unchecked_tasks,
        vec!["pears", "apples", "milk"]
    );
}

#[test]
fn test_chronological_order() {
    let input = vec![day(3, &["c"], &[]), day(2, &["b"], &[]), day(1, &["a"], &[])];
    let opts = AggregateOptions {
        reverse_chronological: false,
        ..Default::default()
    };
    let result = aggregate_with(&input, &opts);
    assert_eq!(
        dates(result.days()),
        vec!["2025-08-01", "2025-08-02", "2025-08-03"]
    );
}

#[test]
fn test_group_by_date_off_renders_flat() {
    let input = vec![day(3, &["c", "a"], &[]), day(1, &["b"], &[])];
    let opts = AggregateOptions {
        group_by_date: false,
        ..Default::default()
    };
    let result = aggregate_with(&input, &opts);
    assert_eq!(render_with(&result, &opts), "- [ ] c\n- [ ] a\n- [ ] b\n\n");

    let sorted = AggregateOptions {
        sort_alphabetically: true,
        ..opts
    };
    let result = aggregate_with(&input, &sorted);
    assert_eq!(
        render_with(&result, &sorted),
        "- [ ] a\n- [ ] b\n- [ ] c\n\n"
    );
}

#[test]
fn test_group_by_date_on_renders_headings() {
    let opts = AggregateOptions::default();
    let result = aggregate_with(&week(), &opts);
    assert_eq!(
        render_with(&result, &opts),
        "2025-08-03\n- [ ] C\n- [ ] D\n\n2025-08-01\n- [ ] A\n- [ ] E\n- [ ] F\n\n"
    );
}

#[test]
fn test_normalized_text_is_identity() {
    let newer = DateFileContent::new("2025-08-02.md", lines(&["  * [X]   Call mom  "]));
    let older = DateFileContent::new("2025-08-01.md", lines(&["> - [ ] Call mom"]));
    let input = vec![parse(&newer).unwrap(), parse(&older).unwrap()];
    assert!(aggregate(&input).is_empty());
}

#[test]
fn test_idempotent_output() {
    let input = week();
    let first = render(aggregate(&input).days());
    let second = render(aggregate(&input).days());
    assert_eq!(first, second);
}

#[test]
fn test_independent_calls_on_threads() {
    use std::sync::{Arc, Barrier};
    use std::thread;

    let expected_week = render(aggregate(&week()).days());
    let expected_basic = render(aggregate(&eggs_and_bananas()).days());

    let barrier = Arc::new(Barrier::new(8));
    let mut handles = vec![];
    for i in 0..8 {
        let b = barrier.clone();
        handles.push(thread::spawn(move || {
            b.wait();
            let input = if i % 2 == 0 { week() } else { eggs_and_bananas() };
            (i, render(aggregate(&input).days()))
        }));
    }

    for h in handles {
        let (i, out) = h.join().unwrap();
        if i % 2 == 0 {
            assert_eq!(out, expected_week);
        } else {
            assert_eq!(out, expected_basic);
        }
    }
}
