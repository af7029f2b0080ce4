//! Extraction command: free-form text in, scored candidates out.

use chrono::{DateTime, Utc};
use clap::Args;
use tasklens_core::{Config, ExtractionEngine, MessageSource, RawMessage, Task, TaskDb};

#[derive(Args)]
pub struct ExtractArgs {
    /// Text to extract tasks from
    pub text: String,
    /// Reference instant for resolving relative dates (RFC 3339, default: now)
    #[arg(long)]
    pub at: Option<String>,
    /// Message source: chat, voice, or share (default: chat)
    #[arg(long)]
    pub source: Option<String>,
    /// Save accepted candidates to the task database
    #[arg(long)]
    pub save: bool,
}

pub fn run(args: ExtractArgs) -> Result<(), Box<dyn std::error::Error>> {
    let reference = match &args.at {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map_err(|e| format!("invalid --at timestamp '{raw}': {e}"))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let config = Config::load_or_default();
    let source_label = args
        .source
        .unwrap_or_else(|| config.extraction.default_source.clone());
    let source = MessageSource::from_label(&source_label)
        .ok_or_else(|| format!("unknown source: {source_label}"))?;

    let message = RawMessage::new(&args.text, reference).with_source(source);
    let engine = ExtractionEngine::with_weights(config.scorer_weights());
    let candidates = engine.extract(&message);

    println!("{}", serde_json::to_string_pretty(&candidates)?);

    if args.save {
        let db = TaskDb::open_default()?;
        for candidate in &candidates {
            let task = Task::from_candidate(candidate, Some(source.as_label()));
            db.insert(&task)?;
            eprintln!("saved: {} ({})", task.id, task.title);
        }
    }
    Ok(())
}
