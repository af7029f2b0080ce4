mod config;
pub mod task_db;

pub use config::{Config, ExtractionConfig};
pub use task_db::{TaskDb, TaskFilter};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/tasklens[-dev]/` based on TASKLENS_ENV.
///
/// Set TASKLENS_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("TASKLENS_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("tasklens-dev")
    } else {
        base_dir.join("tasklens")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
