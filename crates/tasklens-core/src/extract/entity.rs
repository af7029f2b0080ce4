//! Entity extraction: turn a segment into one or more task drafts.
//!
//! A draft carries a normalized title, inferred category and priority, a
//! resolved due point, and the raw signals the scorer combines. One
//! segment usually yields one draft; an imperative verb distributing over
//! a comma list ("buy milk, bread, and eggs") yields one draft per object.

use chrono::{DateTime, Duration, Utc};

use super::{lexicon, temporal};
use crate::task::{SignalBreakdown, TaskCategory, TaskPriority};

/// An unscored candidate assembled from one segment.
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub title: String,
    pub category: TaskCategory,
    pub priority: TaskPriority,
    pub due_at: Option<DateTime<Utc>>,
    pub due_has_time: bool,
    pub signals: SignalBreakdown,
}

/// Extract drafts from a cleaned segment.
///
/// Returns an empty vector when nothing usable remains after stripping
/// (e.g. the segment was only a temporal phrase).
pub fn drafts_from_segment(text: &str, reference: DateTime<Utc>) -> Vec<TaskDraft> {
    let stripped = lexicon::strip_urgency_prefix(text);
    if stripped.is_empty() {
        return Vec::new();
    }

    let actionability = lexicon::actionability(stripped);
    let matches = temporal::find_expressions(stripped);
    let combined = temporal::combine(&matches, reference);

    let mut title = stripped.to_string();
    if let Some(c) = &combined {
        title = remove_spans(&title, &c.spans);
    }
    if let Some(phrase) = lexicon::leading_request_phrase(&title) {
        title = title.trim_start()[phrase.len()..].to_string();
    }
    let title = cleanup_title(&title);
    if title.is_empty() {
        return Vec::new();
    }

    let (due_at, due_has_time, temporal_confidence, deadline) = match &combined {
        Some(c) => (
            Some(c.resolved.instant()),
            c.resolved.has_time(),
            c.confidence,
            c.is_deadline,
        ),
        None => (None, false, 0.0, false),
    };

    let deadline_soon = deadline
        && due_at.map_or(false, |due| {
            let delta = due - reference;
            delta >= Duration::zero() && delta <= Duration::hours(24)
        });
    // Urgency markers live in the unstripped text.
    let priority = lexicon::priority_signal(text, deadline_soon);

    let category_hit = lexicon::category_hint(stripped);
    let category = category_hit.map_or(TaskCategory::None, |(c, _)| c);

    let titles = distribute_comma_objects(&title);
    titles
        .into_iter()
        .map(|t| {
            let t = capitalize(&t);
            let quality = title_quality(&t);
            TaskDraft {
                title: t,
                category,
                priority,
                due_at,
                due_has_time,
                signals: SignalBreakdown {
                    actionability: actionability.score(),
                    temporal: temporal_confidence,
                    category_matched: category_hit.is_some(),
                    title_quality: quality,
                    deadline,
                },
            }
        })
        .collect()
}

/// Remove byte spans from the text, rightmost first so earlier offsets
/// stay valid.
fn remove_spans(text: &str, spans: &[(usize, usize)]) -> String {
    let mut sorted: Vec<(usize, usize)> = spans.to_vec();
    sorted.sort_unstable();
    let mut out = text.to_string();
    for &(start, end) in sorted.iter().rev() {
        if start < end && end <= out.len() {
            out.replace_range(start..end, " ");
        }
    }
    out
}

/// Normalize a title: collapse whitespace, drop dangling prepositions
/// and edge punctuation.
fn cleanup_title(raw: &str) -> String {
    let mut words: Vec<&str> = raw.split_whitespace().collect();

    const DANGLING: &[&str] = &["on", "at", "by", "due", "before", "until", "for", "in", "to"];
    while let Some(last) = words.last() {
        let bare = last.trim_matches(|c: char| !c.is_alphanumeric());
        if bare.is_empty() || DANGLING.iter().any(|d| d.eq_ignore_ascii_case(bare)) {
            words.pop();
        } else {
            break;
        }
    }

    words
        .join(" ")
        .trim_matches(|c: char| {
            c.is_whitespace() || matches!(c, ',' | '.' | ';' | ':' | '!' | '?' | '-')
        })
        .to_string()
}

/// Split "buy milk, bread, and eggs" into one title per object.
///
/// Applies only when a known verb heads the title and every comma-separated
/// object is a short noun phrase (1-4 words, no verb of its own). Anything
/// else returns the title unchanged.
fn distribute_comma_objects(title: &str) -> Vec<String> {
    let words: Vec<&str> = title.split_whitespace().collect();
    let first = match words.first() {
        Some(w) => *w,
        None => return vec![title.to_string()],
    };
    if !lexicon::is_verb(first) || !title.contains(',') {
        return vec![title.to_string()];
    }

    // Particle verbs keep their particle in the head ("pick up").
    let head_len = if first.eq_ignore_ascii_case("pick")
        && words.get(1).map_or(false, |w| w.eq_ignore_ascii_case("up"))
    {
        2
    } else {
        1
    };
    let head = words[..head_len].join(" ");
    let rest = words[head_len..].join(" ");

    let objects: Vec<String> = rest
        .split(',')
        .map(|part| {
            let part = part.trim();
            let part = part.strip_prefix("and ").unwrap_or(part);
            let part = part.strip_prefix("& ").unwrap_or(part);
            part.trim().to_string()
        })
        .filter(|p| !p.is_empty())
        .collect();

    let all_simple = objects.len() >= 2
        && objects.iter().all(|obj| {
            let n = obj.split_whitespace().count();
            (1..=4).contains(&n) && !obj.split_whitespace().any(lexicon::is_verb)
        });
    if !all_simple {
        return vec![title.to_string()];
    }

    objects
        .into_iter()
        .map(|obj| format!("{head} {obj}"))
        .collect()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// A title is non-trivial when it has more than two tokens or contains a
/// known verb.
fn title_quality(title: &str) -> bool {
    let words: Vec<&str> = title.split_whitespace().collect();
    words.len() > 2 || words.iter().any(|w| lexicon::is_verb(w))
}
