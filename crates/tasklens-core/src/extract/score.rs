//! Confidence scoring for task drafts.
//!
//! The score is a weighted sum of the draft's recorded signals, so the
//! same draft always scores the same — no text is re-examined here. The
//! raw sum decides acceptance against the threshold; the stored
//! confidence is the sum clamped to [0, 1].

use serde::{Deserialize, Serialize};

use super::entity::TaskDraft;

/// Weights for the confidence scorer. Overridable from the config file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScorerWeights {
    /// Weight on the actionability signal
    #[serde(default = "default_actionability")]
    pub actionability: f64,
    /// Weight on the temporal resolution confidence
    #[serde(default = "default_temporal")]
    pub temporal: f64,
    /// Bonus weight when a category keyword matched
    #[serde(default = "default_category")]
    pub category: f64,
    /// Bonus weight when the title is non-trivial
    #[serde(default = "default_title")]
    pub title: f64,
    /// Minimum raw score for a draft to be accepted
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_actionability() -> f64 {
    0.5
}
fn default_temporal() -> f64 {
    0.2
}
fn default_category() -> f64 {
    0.15
}
fn default_title() -> f64 {
    0.15
}
fn default_threshold() -> f64 {
    0.4
}

impl Default for ScorerWeights {
    fn default() -> Self {
        Self {
            actionability: default_actionability(),
            temporal: default_temporal(),
            category: default_category(),
            title: default_title(),
            threshold: default_threshold(),
        }
    }
}

impl ScorerWeights {
    /// Raw weighted sum, unclamped. Negative actionability (questions)
    /// can pull it below zero.
    pub fn raw_score(&self, draft: &TaskDraft) -> f64 {
        let s = &draft.signals;
        self.actionability * s.actionability
            + self.temporal * s.temporal
            + self.category * f64::from(u8::from(s.category_matched))
            + self.title * f64::from(u8::from(s.title_quality))
    }

    /// Stored confidence: the raw score clamped to [0, 1].
    pub fn confidence(&self, draft: &TaskDraft) -> f64 {
        self.raw_score(draft).clamp(0.0, 1.0)
    }

    /// Whether the draft clears the acceptance threshold.
    pub fn accepts(&self, draft: &TaskDraft) -> bool {
        self.raw_score(draft) >= self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{SignalBreakdown, TaskCategory, TaskPriority};

    fn draft(signals: SignalBreakdown) -> TaskDraft {
        TaskDraft {
            title: "Buy milk".to_string(),
            category: TaskCategory::Household,
            priority: TaskPriority::Medium,
            due_at: None,
            due_has_time: false,
            signals,
        }
    }

    #[test]
    fn strong_request_scores_high() {
        let d = draft(SignalBreakdown {
            actionability: 0.9,
            temporal: 0.8,
            category_matched: true,
            title_quality: true,
            deadline: false,
        });
        let w = ScorerWeights::default();
        let raw = w.raw_score(&d);
        assert!((raw - 0.91).abs() < 1e-9);
        assert!(w.accepts(&d));
        assert_eq!(w.confidence(&d), raw);
    }

    #[test]
    fn question_is_rejected() {
        let d = draft(SignalBreakdown {
            actionability: -0.6,
            temporal: 0.8,
            category_matched: true,
            title_quality: true,
            deadline: false,
        });
        let w = ScorerWeights::default();
        // 0.5*-0.6 + 0.2*0.8 + 0.15 + 0.15 = 0.16
        assert!((w.raw_score(&d) - 0.16).abs() < 1e-9);
        assert!(!w.accepts(&d));
    }

    #[test]
    fn confidence_is_clamped_to_unit_interval() {
        let d = draft(SignalBreakdown {
            actionability: -0.6,
            temporal: 0.0,
            category_matched: false,
            title_quality: false,
            deadline: false,
        });
        let w = ScorerWeights::default();
        assert!(w.raw_score(&d) < 0.0);
        assert_eq!(w.confidence(&d), 0.0);
    }

    #[test]
    fn bare_statement_without_signals_is_rejected() {
        let d = draft(SignalBreakdown {
            actionability: 0.3,
            temporal: 0.0,
            category_matched: false,
            title_quality: true,
            deadline: false,
        });
        let w = ScorerWeights::default();
        // 0.15 + 0.15 = 0.30 < 0.4
        assert!(!w.accepts(&d));
    }

    #[test]
    fn custom_threshold_changes_acceptance() {
        let d = draft(SignalBreakdown {
            actionability: 0.3,
            temporal: 0.0,
            category_matched: false,
            title_quality: true,
            deadline: false,
        });
        let w = ScorerWeights {
            threshold: 0.2,
            ..Default::default()
        };
        assert!(w.accepts(&d));
    }

    #[test]
    fn weights_deserialize_with_defaults() {
        let w: ScorerWeights = toml::from_str("threshold = 0.5").unwrap();
        assert_eq!(w.threshold, 0.5);
        assert_eq!(w.actionability, 0.5);
        assert_eq!(w.temporal, 0.2);
    }
}
