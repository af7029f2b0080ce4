//! Task types: extraction candidates and the persisted task entity.
//!
//! [`TaskCandidate`] is what the extraction engine produces — scored but
//! not yet persisted, with no identity. [`Task`] is the stored entity the
//! repository owns; it gains an id, timestamps, and an optional recurrence
//! spec when a user confirms a candidate.

pub mod recurrence;

pub use recurrence::{next_occurrence, next_occurrence_date, RecurrenceKind, RecurrenceSpec};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category inferred from lexical cues in the source text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Household,
    Work,
    Health,
    Finance,
    Family,
    Personal,
    /// No category keyword matched
    None,
}

impl Default for TaskCategory {
    fn default() -> Self {
        TaskCategory::None
    }
}

impl TaskCategory {
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Household => "household",
            Self::Work => "work",
            Self::Health => "health",
            Self::Finance => "finance",
            Self::Family => "family",
            Self::Personal => "personal",
            Self::None => "none",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "household" => Some(Self::Household),
            "work" => Some(Self::Work),
            "health" => Some(Self::Health),
            "finance" => Some(Self::Finance),
            "family" => Some(Self::Family),
            "personal" => Some(Self::Personal),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Task priority.
///
/// Defaults to `Medium`; extraction only escalates (urgent markers,
/// imminent deadlines). `Low` is never auto-assigned by the engine and
/// exists for user edits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}

impl TaskPriority {
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" | "med" => Some(Self::Medium),
            "high" => Some(Self::High),
            "urgent" => Some(Self::Urgent),
            _ => None,
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Raw signals a candidate's confidence was derived from.
///
/// Recorded on every candidate so the final score is reproducible from
/// the candidate alone — the scorer combines these, it never re-derives
/// them from text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SignalBreakdown {
    /// Actionability score from the lexical classifier (-0.6 to 0.9)
    pub actionability: f64,
    /// Resolution confidence of the temporal expression (0.0 if none found)
    pub temporal: f64,
    /// Whether a category keyword matched
    pub category_matched: bool,
    /// Whether the title is non-trivial (>2 tokens or contains a known verb)
    pub title_quality: bool,
    /// Whether the temporal expression was deadline-tagged ("by", "due")
    pub deadline: bool,
}

/// A fully extracted, scored, but not-yet-persisted task.
///
/// Immutable output of the extraction pipeline; identity and storage
/// lifecycle are assigned by the repository once the user confirms it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskCandidate {
    /// Normalized title, non-empty, stripped of request filler
    pub title: String,
    /// Inferred category
    pub category: TaskCategory,
    /// Inferred priority
    pub priority: TaskPriority,
    /// Resolved due instant, if a temporal phrase was found
    pub due_at: Option<DateTime<Utc>>,
    /// Whether the due instant carries an explicit time of day
    /// (false = date-only task, `due_at` is midnight UTC of that date)
    pub due_has_time: bool,
    /// Final confidence in [0, 1]
    pub confidence: f64,
    /// Signals the confidence was computed from
    pub signals: SignalBreakdown,
}

/// A persisted task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: String,
    /// Task title
    pub title: String,
    /// Category
    pub category: TaskCategory,
    /// Priority
    pub priority: TaskPriority,
    /// Due instant (None for undated tasks)
    pub due_at: Option<DateTime<Utc>>,
    /// Whether `due_at` carries an explicit time of day
    pub due_has_time: bool,
    /// Whether the current occurrence is completed
    pub completed: bool,
    /// Extraction confidence, if the task came from the extraction engine
    pub confidence: Option<f64>,
    /// Source label ("chat", "voice", "share"), if extracted
    pub source: Option<String>,
    /// Recurrence spec for repeating tasks
    pub recurrence: Option<RecurrenceSpec>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
    /// Completion timestamp (None if not completed)
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a new task with default values.
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Task {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            category: TaskCategory::None,
            priority: TaskPriority::Medium,
            due_at: None,
            due_has_time: false,
            completed: false,
            confidence: None,
            source: None,
            recurrence: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    /// Promote a user-confirmed extraction candidate to a persisted task.
    pub fn from_candidate(candidate: &TaskCandidate, source: Option<&str>) -> Self {
        let mut task = Task::new(candidate.title.clone());
        task.category = candidate.category;
        task.priority = candidate.priority;
        task.due_at = candidate.due_at;
        task.due_has_time = candidate.due_has_time;
        task.confidence = Some(candidate.confidence);
        task.source = source.map(|s| s.to_string());
        task
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_label_roundtrip() {
        for cat in [
            TaskCategory::Household,
            TaskCategory::Work,
            TaskCategory::Health,
            TaskCategory::Finance,
            TaskCategory::Family,
            TaskCategory::Personal,
            TaskCategory::None,
        ] {
            assert_eq!(TaskCategory::from_label(cat.as_label()), Some(cat));
        }
    }

    #[test]
    fn priority_ordering() {
        assert!(TaskPriority::Urgent > TaskPriority::High);
        assert!(TaskPriority::High > TaskPriority::Medium);
        assert!(TaskPriority::Medium > TaskPriority::Low);
        assert_eq!(TaskPriority::default(), TaskPriority::Medium);
    }

    #[test]
    fn task_from_candidate_copies_fields() {
        let candidate = TaskCandidate {
            title: "Buy milk".to_string(),
            category: TaskCategory::Household,
            priority: TaskPriority::Medium,
            due_at: Some(Utc::now()),
            due_has_time: false,
            confidence: 0.91,
            signals: SignalBreakdown {
                actionability: 0.9,
                temporal: 0.8,
                category_matched: true,
                title_quality: true,
                deadline: false,
            },
        };

        let task = Task::from_candidate(&candidate, Some("chat"));
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.category, TaskCategory::Household);
        assert_eq!(task.confidence, Some(0.91));
        assert_eq!(task.source.as_deref(), Some("chat"));
        assert!(!task.completed);
        assert!(task.recurrence.is_none());
    }

    #[test]
    fn task_serialization() {
        let task = Task::new("Water the plants");
        let json = serde_json::to_string(&task).unwrap();
        let decoded: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.title, "Water the plants");
        assert_eq!(decoded.priority, TaskPriority::Medium);
    }
}
