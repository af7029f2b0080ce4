//! Task management commands for CLI.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use clap::Subcommand;
use tasklens_core::{RecurrenceSpec, Task, TaskCategory, TaskDb, TaskFilter, TaskPriority};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Add {
        /// Task title
        title: String,
        /// Due date: RFC 3339 instant or YYYY-MM-DD for date-only
        #[arg(long)]
        due: Option<String>,
        /// Priority: low, medium, high, urgent (default: medium)
        #[arg(long)]
        priority: Option<String>,
        /// Category: household, work, health, finance, family, personal
        #[arg(long)]
        category: Option<String>,
        /// Recurrence: daily, weekly, monthly, optionally with an
        /// interval ("weekly:2")
        #[arg(long)]
        recur: Option<String>,
    },
    /// List tasks
    List {
        /// Include completed tasks
        #[arg(long)]
        all: bool,
        /// Filter by category
        #[arg(long)]
        category: Option<String>,
    },
    /// Get task details
    Get {
        /// Task ID
        id: String,
    },
    /// Update a task
    Update {
        /// Task ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New due date (RFC 3339 or YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        /// Remove the due date
        #[arg(long)]
        clear_due: bool,
        /// New priority
        #[arg(long)]
        priority: Option<String>,
        /// New category
        #[arg(long)]
        category: Option<String>,
        /// New recurrence ("none" to stop repeating)
        #[arg(long)]
        recur: Option<String>,
    },
    /// Complete a task's current occurrence
    Complete {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
}

/// Parse a due argument: a full RFC 3339 instant, or a bare date which
/// becomes a date-only due (midnight UTC, no explicit time).
fn parse_due(raw: &str) -> Result<(DateTime<Utc>, bool), Box<dyn std::error::Error>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok((instant.with_timezone(&Utc), true));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let midnight = Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).ok_or("invalid date")?);
        return Ok((midnight, false));
    }
    Err(format!("invalid due date: {raw} (expected RFC 3339 or YYYY-MM-DD)").into())
}

fn parse_priority(raw: &str) -> Result<TaskPriority, Box<dyn std::error::Error>> {
    TaskPriority::from_label(raw).ok_or_else(|| format!("unknown priority: {raw}").into())
}

fn parse_category(raw: &str) -> Result<TaskCategory, Box<dyn std::error::Error>> {
    TaskCategory::from_label(raw).ok_or_else(|| format!("unknown category: {raw}").into())
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = TaskDb::open_default()?;

    match action {
        TaskAction::Add {
            title,
            due,
            priority,
            category,
            recur,
        } => {
            let mut task = Task::new(title);
            if let Some(raw) = due {
                let (instant, has_time) = parse_due(&raw)?;
                task.due_at = Some(instant);
                task.due_has_time = has_time;
            }
            if let Some(raw) = priority {
                task.priority = parse_priority(&raw)?;
            }
            if let Some(raw) = category {
                task.category = parse_category(&raw)?;
            }
            if let Some(raw) = recur {
                task.recurrence = Some(RecurrenceSpec::parse(&raw)?);
            }
            db.insert(&task)?;
            println!("Task created: {}", task.id);
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::List { all, category } => {
            let filter = TaskFilter {
                include_completed: all,
                category: category.as_deref().map(parse_category).transpose()?,
                due_before: None,
            };
            let tasks = db.list(&filter)?;
            println!("{}", serde_json::to_string_pretty(&tasks)?);
        }
        TaskAction::Get { id } => {
            let task = db.get(&id)?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Update {
            id,
            title,
            due,
            clear_due,
            priority,
            category,
            recur,
        } => {
            let mut task = db.get(&id)?;
            if let Some(t) = title {
                task.title = t;
            }
            if clear_due {
                task.due_at = None;
                task.due_has_time = false;
            } else if let Some(raw) = due {
                let (instant, has_time) = parse_due(&raw)?;
                task.due_at = Some(instant);
                task.due_has_time = has_time;
            }
            if let Some(raw) = priority {
                task.priority = parse_priority(&raw)?;
            }
            if let Some(raw) = category {
                task.category = parse_category(&raw)?;
            }
            if let Some(raw) = recur {
                task.recurrence = if raw.eq_ignore_ascii_case("none") {
                    None
                } else {
                    Some(RecurrenceSpec::parse(&raw)?)
                };
            }
            db.update(&task)?;
            println!("Task updated:");
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Complete { id } => match db.complete_task(&id, Utc::now())? {
            Some(next) => println!("Task rolled forward, next due: {}", next.to_rfc3339()),
            None => println!("Task completed: {id}"),
        },
        TaskAction::Delete { id } => {
            db.delete(&id)?;
            println!("Task deleted: {id}");
        }
    }
    Ok(())
}
