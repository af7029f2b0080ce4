//! Recurrence rollover through the repository: completing a recurring
//! task advances its due date and keeps it open.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use tasklens_core::{RecurrenceKind, RecurrenceSpec, Task, TaskDb};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.from_utc_datetime(
        &NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(h, min, 0).unwrap()),
    )
}

fn recurring(title: &str, due: DateTime<Utc>, kind: RecurrenceKind, interval: u32) -> Task {
    let mut task = Task::new(title);
    task.due_at = Some(due);
    task.due_has_time = true;
    task.recurrence = Some(RecurrenceSpec::new(kind, interval));
    task
}

#[test]
fn monthly_rollover_clips_across_month_ends() {
    let db = TaskDb::open_memory().unwrap();
    let task = recurring("pay rent", at(2024, 1, 31, 9, 0), RecurrenceKind::Monthly, 1);
    db.insert(&task).unwrap();

    // Jan 31 → Feb 29 (leap year), clipped.
    let next = db.complete_task(&task.id, at(2024, 1, 31, 10, 0)).unwrap();
    assert_eq!(next, Some(at(2024, 2, 29, 9, 0)));

    // Feb 29 → Mar 29; the clipped day is what rolls forward.
    let next = db.complete_task(&task.id, at(2024, 2, 29, 10, 0)).unwrap();
    assert_eq!(next, Some(at(2024, 3, 29, 9, 0)));

    let loaded = db.get(&task.id).unwrap();
    assert!(!loaded.completed);
    assert_eq!(loaded.due_at, Some(at(2024, 3, 29, 9, 0)));
}

#[test]
fn weekly_rollover_preserves_weekday_and_time() {
    let db = TaskDb::open_memory().unwrap();
    // 2024-03-12 is a Tuesday.
    let task = recurring("water plants", at(2024, 3, 12, 18, 30), RecurrenceKind::Weekly, 1);
    db.insert(&task).unwrap();

    let next = db
        .complete_task(&task.id, at(2024, 3, 12, 19, 0))
        .unwrap()
        .unwrap();
    assert_eq!(next, at(2024, 3, 19, 18, 30));
    assert_eq!(next.format("%A").to_string(), "Tuesday");
}

#[test]
fn daily_interval_rollover() {
    let db = TaskDb::open_memory().unwrap();
    let task = recurring("take medication", at(2024, 3, 14, 8, 0), RecurrenceKind::Daily, 3);
    db.insert(&task).unwrap();

    let next = db.complete_task(&task.id, at(2024, 3, 14, 8, 5)).unwrap();
    assert_eq!(next, Some(at(2024, 3, 17, 8, 0)));
}

#[test]
fn undated_recurring_task_rolls_from_completion_time() {
    let db = TaskDb::open_memory().unwrap();
    let mut task = Task::new("review inbox");
    task.recurrence = Some(RecurrenceSpec::new(RecurrenceKind::Daily, 1));
    db.insert(&task).unwrap();

    let now = at(2024, 3, 14, 16, 0);
    let next = db.complete_task(&task.id, now).unwrap();
    assert_eq!(next, Some(at(2024, 3, 15, 16, 0)));
}

#[test]
fn completing_twice_keeps_advancing() {
    let db = TaskDb::open_memory().unwrap();
    let task = recurring("standup notes", at(2024, 3, 11, 9, 0), RecurrenceKind::Weekly, 2);
    db.insert(&task).unwrap();

    db.complete_task(&task.id, at(2024, 3, 11, 9, 30)).unwrap();
    let next = db.complete_task(&task.id, at(2024, 3, 25, 9, 30)).unwrap();
    assert_eq!(next, Some(at(2024, 4, 8, 9, 0)));
}
