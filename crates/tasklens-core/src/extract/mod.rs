//! Deterministic task extraction from free-form text.
//!
//! The pipeline runs in fixed stages: segmentation, lexical
//! classification, temporal resolution, entity assembly, scoring. Every
//! stage is pure — the same message and reference instant always produce
//! the same candidates, in segment order.

pub mod entity;
pub mod lexicon;
pub mod score;
pub mod segment;
pub mod temporal;

pub use score::ScorerWeights;

use crate::message::RawMessage;
use crate::task::TaskCandidate;

/// Extraction pipeline with configurable scorer weights.
pub struct ExtractionEngine {
    weights: ScorerWeights,
}

impl Default for ExtractionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionEngine {
    pub fn new() -> Self {
        Self {
            weights: ScorerWeights::default(),
        }
    }

    pub fn with_weights(weights: ScorerWeights) -> Self {
        Self { weights }
    }

    /// Extract accepted task candidates from a message.
    ///
    /// Candidates come back in the order their segments appear in the
    /// input; each segment is judged on its own, so repeated titles from
    /// different segments all survive.
    pub fn extract(&self, message: &RawMessage) -> Vec<TaskCandidate> {
        let mut candidates: Vec<TaskCandidate> = Vec::new();
        for seg in segment::segment(&message.text) {
            for draft in entity::drafts_from_segment(&seg.text, message.reference) {
                if !self.weights.accepts(&draft) {
                    continue;
                }
                let confidence = self.weights.confidence(&draft);
                candidates.push(TaskCandidate {
                    title: draft.title,
                    category: draft.category,
                    priority: draft.priority,
                    due_at: draft.due_at,
                    due_has_time: draft.due_has_time,
                    confidence,
                    signals: draft.signals,
                });
            }
        }
        candidates
    }
}

/// Extract with default weights.
pub fn extract_tasks(message: &RawMessage) -> Vec<TaskCandidate> {
    ExtractionEngine::new().extract(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

    fn reference() -> DateTime<Utc> {
        Utc.from_utc_datetime(
            &NaiveDate::from_ymd_opt(2024, 3, 14)
                .unwrap()
                .and_time(NaiveTime::from_hms_opt(10, 0, 0).unwrap()),
        )
    }

    fn message(text: &str) -> RawMessage {
        RawMessage::new(text, reference())
    }

    #[test]
    fn multi_segment_message_yields_ordered_candidates() {
        let candidates =
            extract_tasks(&message("Buy milk today. Call the dentist and pay rent."));
        let titles: Vec<&str> = candidates.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Buy milk", "Call the dentist", "Pay rent"]);
    }

    #[test]
    fn questions_are_filtered_out() {
        assert!(extract_tasks(&message("What time is the meeting tomorrow?")).is_empty());
    }

    #[test]
    fn non_actionable_chatter_is_filtered_out() {
        assert!(extract_tasks(&message("the weather was nice yesterday")).is_empty());
        assert!(extract_tasks(&message("")).is_empty());
    }

    #[test]
    fn repeated_titles_keep_their_own_segments() {
        let candidates = extract_tasks(&message("Buy milk today. Buy milk tomorrow."));
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].title, "Buy milk");
        assert_eq!(candidates[1].title, "Buy milk");
        // Same title, but each keeps its own segment's due date.
        assert_ne!(candidates[0].due_at, candidates[1].due_at);
    }

    #[test]
    fn extraction_is_deterministic() {
        let msg = message("Can you please book a table for friday and buy a gift");
        let first = extract_tasks(&msg);
        let second = extract_tasks(&msg);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.title, b.title);
            assert_eq!(a.confidence, b.confidence);
            assert_eq!(a.due_at, b.due_at);
        }
    }

    #[test]
    fn custom_weights_change_acceptance() {
        let strict = ExtractionEngine::with_weights(ScorerWeights {
            threshold: 0.95,
            ..Default::default()
        });
        // Verb + title quality alone score 0.5, below the strict bar.
        assert!(strict.extract(&message("check the mail")).is_empty());
        assert!(!extract_tasks(&message("check the mail tomorrow")).is_empty());
    }
}
