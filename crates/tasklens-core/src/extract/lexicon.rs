//! Lexical classifier: curated keyword tables for actionability,
//! category, and priority signals.
//!
//! Tables are static and immutable — built into the binary, never mutated
//! at runtime. All matching is case-insensitive and word-bounded.

use crate::task::{TaskCategory, TaskPriority};

/// Base-form verbs that open an imperative clause.
pub const IMPERATIVE_VERBS: &[&str] = &[
    "book", "buy", "call", "cancel", "check", "clean", "email", "finish", "fix", "get",
    "order", "pay", "pick", "plan", "renew", "review", "schedule", "send", "submit",
    "take", "write",
];

/// Request phrases, longest first so prefix matching is greedy.
const REQUEST_PHRASES: &[&str] = &[
    "can you please",
    "could you please",
    "don't forget to",
    "dont forget to",
    "remind me to",
    "make sure to",
    "we need to",
    "i need to",
    "remind me",
    "could you",
    "would you",
    "can you",
    "need to",
    "please",
];

/// Interrogative openers that mark a question rather than a request.
const QUESTION_WORDS: &[&str] = &[
    "what", "when", "where", "which", "who", "why", "how", "did", "does", "do", "is", "are",
];

/// Markers that escalate priority to urgent.
const URGENCY_MARKERS: &[&str] = &["urgent", "asap"];

const HOUSEHOLD: &[&str] = &[
    "buy", "grocery", "groceries", "clean", "cleaning", "fix", "laundry", "dishes",
    "vacuum", "trash", "repair",
];
const WORK: &[&str] = &[
    "meeting", "client", "report", "project", "presentation", "deadline", "standup",
    "boss", "interview", "slides", "email",
];
const HEALTH: &[&str] = &[
    "doctor", "dentist", "appointment", "prescription", "pharmacy", "gym", "workout",
    "checkup", "medication", "vitamins",
];
const FINANCE: &[&str] = &[
    "bill", "bills", "pay", "bank", "tax", "taxes", "insurance", "rent", "invoice",
    "budget", "loan",
];
const FAMILY: &[&str] = &[
    "mom", "dad", "kids", "birthday", "school", "grandma", "grandpa", "sister",
    "brother", "anniversary", "daughter", "son",
];
const PERSONAL: &[&str] = &[
    "haircut", "gift", "journal", "meditate", "hobby", "friend", "friends", "read",
];

const CATEGORY_TABLES: &[(TaskCategory, &[&str])] = &[
    (TaskCategory::Household, HOUSEHOLD),
    (TaskCategory::Work, WORK),
    (TaskCategory::Health, HEALTH),
    (TaskCategory::Finance, FINANCE),
    (TaskCategory::Family, FAMILY),
    (TaskCategory::Personal, PERSONAL),
];

/// Lexical evidence that a segment requests an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionabilitySignal {
    /// "can you", "please", "remind me to", ...
    RequestPhrase,
    /// Leading base-form verb from the closed verb list
    ImperativeVerb,
    /// Interrogative opener or trailing "?"
    QuestionMarker,
    /// No signal found
    None,
}

impl ActionabilitySignal {
    /// Score contribution for the confidence scorer.
    pub fn score(&self) -> f64 {
        match self {
            Self::RequestPhrase => 0.9,
            Self::ImperativeVerb => 0.7,
            Self::QuestionMarker => -0.6,
            Self::None => 0.3,
        }
    }
}

/// Split text into words with their byte offsets.
///
/// A word is a run of alphanumeric characters plus internal apostrophes
/// and colons (so "don't" and "10:30" stay whole); leading/trailing
/// punctuation is excluded from the word.
pub fn words_with_offsets(text: &str) -> Vec<(usize, &str)> {
    let mut words = Vec::new();
    let mut start: Option<usize> = None;
    for (i, ch) in text.char_indices() {
        let is_word = ch.is_alphanumeric() || ch == '\'' || ch == ':';
        match (start, is_word) {
            (None, true) => start = Some(i),
            (Some(s), false) => {
                words.push((s, trim_word(&text[s..i])));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        words.push((s, trim_word(&text[s..])));
    }
    words.retain(|(_, w)| !w.is_empty());
    words
}

fn trim_word(word: &str) -> &str {
    word.trim_matches(|c| c == ':' || c == '\'')
}

/// Whether a word is in the imperative verb table.
pub fn is_verb(word: &str) -> bool {
    IMPERATIVE_VERBS
        .iter()
        .any(|v| v.eq_ignore_ascii_case(word))
}

/// Strip a leading urgency marker ("URGENT:", "asap -") from the text.
pub fn strip_urgency_prefix(text: &str) -> &str {
    let trimmed = text.trim_start();
    for marker in URGENCY_MARKERS {
        let matched = trimmed
            .get(..marker.len())
            .map_or(false, |head| head.eq_ignore_ascii_case(marker))
            && trimmed[marker.len()..]
                .chars()
                .next()
                .map_or(true, |c| !c.is_alphanumeric());
        if matched {
            let rest = &trimmed[marker.len()..];
            let rest = rest.trim_start_matches(|c: char| c == ':' || c == '-' || c == '!');
            return rest.trim_start();
        }
    }
    trimmed
}

/// Find the request phrase at the start of the text, if any.
pub fn leading_request_phrase(text: &str) -> Option<&'static str> {
    let trimmed = text.trim_start();
    REQUEST_PHRASES.iter().copied().find(|phrase| {
        trimmed
            .get(..phrase.len())
            .map_or(false, |head| head.eq_ignore_ascii_case(phrase))
            && trimmed[phrase.len()..]
                .chars()
                .next()
                .map_or(true, |c| !c.is_alphanumeric())
    })
}

/// Classify a segment's actionability.
///
/// Question markers win over everything (a trailing "?" suppresses
/// acceptance even when a temporal phrase is present); request phrases
/// beat leading verbs since they subsume them ("can you call...").
pub fn actionability(text: &str) -> ActionabilitySignal {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return ActionabilitySignal::None;
    }
    if trimmed.ends_with('?') {
        return ActionabilitySignal::QuestionMarker;
    }
    let words = words_with_offsets(trimmed);
    let first = match words.first() {
        Some((_, w)) => *w,
        None => return ActionabilitySignal::None,
    };
    if leading_request_phrase(trimmed).is_some() || contains_word(trimmed, "please") {
        return ActionabilitySignal::RequestPhrase;
    }
    if QUESTION_WORDS.iter().any(|q| q.eq_ignore_ascii_case(first)) {
        return ActionabilitySignal::QuestionMarker;
    }
    if is_verb(first) {
        return ActionabilitySignal::ImperativeVerb;
    }
    ActionabilitySignal::None
}

fn contains_word(text: &str, word: &str) -> bool {
    words_with_offsets(text)
        .iter()
        .any(|(_, w)| w.eq_ignore_ascii_case(word))
}

/// Find the category whose keyword appears earliest in the segment.
///
/// Returns the category and the byte offset of the matched keyword.
/// When two categories hit at the same offset the table order above
/// breaks the tie.
pub fn category_hint(text: &str) -> Option<(TaskCategory, usize)> {
    let words = words_with_offsets(text);
    let mut best: Option<(TaskCategory, usize)> = None;
    for (category, table) in CATEGORY_TABLES {
        let hit = words
            .iter()
            .find(|(_, w)| table.iter().any(|k| k.eq_ignore_ascii_case(w)))
            .map(|(offset, _)| *offset);
        if let Some(offset) = hit {
            match best {
                Some((_, best_offset)) if best_offset <= offset => {}
                _ => best = Some((*category, offset)),
            }
        }
    }
    best
}

/// Whether the text contains an urgency marker.
pub fn has_urgency_marker(text: &str) -> bool {
    words_with_offsets(text)
        .iter()
        .any(|(_, w)| URGENCY_MARKERS.iter().any(|m| m.eq_ignore_ascii_case(w)))
}

/// Infer priority from lexical markers and deadline proximity.
///
/// Urgency markers dominate; a deadline-tagged date within 24h of the
/// reference escalates to high; everything else stays at the medium
/// default (low is never auto-assigned).
pub fn priority_signal(text: &str, deadline_within_24h: bool) -> TaskPriority {
    if has_urgency_marker(text) {
        TaskPriority::Urgent
    } else if deadline_within_24h {
        TaskPriority::High
    } else {
        TaskPriority::Medium
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_phrase_detected() {
        assert_eq!(
            actionability("Can you remind me to buy groceries"),
            ActionabilitySignal::RequestPhrase
        );
        assert_eq!(
            actionability("Please send the report"),
            ActionabilitySignal::RequestPhrase
        );
        assert_eq!(
            actionability("We need to buy milk"),
            ActionabilitySignal::RequestPhrase
        );
    }

    #[test]
    fn leading_verb_detected() {
        assert_eq!(
            actionability("Buy groceries tomorrow"),
            ActionabilitySignal::ImperativeVerb
        );
        assert_eq!(
            actionability("submit the tax forms"),
            ActionabilitySignal::ImperativeVerb
        );
    }

    #[test]
    fn questions_are_negative() {
        assert_eq!(
            actionability("What time is the meeting tomorrow?"),
            ActionabilitySignal::QuestionMarker
        );
        // Interrogative opener without a question mark still counts
        assert_eq!(
            actionability("when is the dentist appointment"),
            ActionabilitySignal::QuestionMarker
        );
        assert!(ActionabilitySignal::QuestionMarker.score() < 0.0);
    }

    #[test]
    fn no_signal_scores_low() {
        assert_eq!(
            actionability("the weather was nice yesterday"),
            ActionabilitySignal::None
        );
        assert_eq!(ActionabilitySignal::None.score(), 0.3);
    }

    #[test]
    fn category_earliest_offset_wins() {
        // "pay" (finance) appears before "cleaning" (household)
        let (cat, _) = category_hint("pay for the cleaning service").unwrap();
        assert_eq!(cat, crate::task::TaskCategory::Finance);

        let (cat, _) = category_hint("buy groceries").unwrap();
        assert_eq!(cat, crate::task::TaskCategory::Household);

        assert!(category_hint("do the thing").is_none());
    }

    #[test]
    fn category_tables_cover_spec_examples() {
        use crate::task::TaskCategory;
        assert_eq!(category_hint("tax documents").unwrap().0, TaskCategory::Finance);
        assert_eq!(category_hint("dentist visit").unwrap().0, TaskCategory::Health);
        assert_eq!(category_hint("mom's birthday").unwrap().0, TaskCategory::Family);
        assert_eq!(category_hint("client presentation").unwrap().0, TaskCategory::Work);
    }

    #[test]
    fn urgency_prefix_stripped() {
        assert_eq!(
            strip_urgency_prefix("URGENT: Submit tax documents"),
            "Submit tax documents"
        );
        assert_eq!(strip_urgency_prefix("asap - call the bank"), "call the bank");
        assert_eq!(strip_urgency_prefix("no marker here"), "no marker here");
    }

    #[test]
    fn urgency_prefix_needs_a_word_boundary() {
        // "Urgently" is not the marker "urgent" and must stay intact.
        assert_eq!(
            strip_urgency_prefix("Urgently pay the bills"),
            "Urgently pay the bills"
        );
        assert_eq!(strip_urgency_prefix("asaproll the dough"), "asaproll the dough");
        assert!(!has_urgency_marker("Urgently pay the bills"));
    }

    #[test]
    fn priority_escalation() {
        use crate::task::TaskPriority;
        assert_eq!(priority_signal("URGENT: pay rent", false), TaskPriority::Urgent);
        assert_eq!(priority_signal("finish slides", true), TaskPriority::High);
        assert_eq!(priority_signal("finish slides", false), TaskPriority::Medium);
    }

    #[test]
    fn words_keep_clock_times_whole() {
        let words = words_with_offsets("meet at 10:30 tomorrow");
        let texts: Vec<&str> = words.iter().map(|(_, w)| *w).collect();
        assert_eq!(texts, vec!["meet", "at", "10:30", "tomorrow"]);
    }
}
