//! # Tasklens Core Library
//!
//! This library provides the core business logic for the Tasklens task
//! tracker. It implements a CLI-first philosophy where all operations are
//! available via a standalone CLI binary, with any GUI shell being a thin
//! layer over the same core library.
//!
//! ## Architecture
//!
//! - **Extraction Engine**: Deterministic natural-language task extraction,
//!   turning free text (chat messages, shared notes, voice transcripts)
//!   into scored task candidates
//! - **Recurrence**: Rollover calculation for repeating tasks, including
//!   month-end and leap-year clipping
//! - **Storage**: SQLite-based task repository and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`ExtractionEngine`]: Segmenter → entity extractor → confidence scorer
//! - [`RawMessage`]: Immutable extraction input (text + reference instant)
//! - [`TaskCandidate`]: Scored, not-yet-persisted extraction output
//! - [`TaskDb`]: Task persistence with recurrence rollover on completion
//! - [`Config`]: Application configuration management

pub mod error;
pub mod extract;
pub mod message;
pub mod storage;
pub mod task;

pub use error::{ConfigError, CoreError, DatabaseError, RecurrenceError};
pub use extract::{extract_tasks, ExtractionEngine, ScorerWeights};
pub use message::{MessageSource, RawMessage};
pub use storage::{Config, TaskDb, TaskFilter};
pub use task::{
    next_occurrence, RecurrenceKind, RecurrenceSpec, Task, TaskCandidate, TaskCategory,
    TaskPriority,
};
