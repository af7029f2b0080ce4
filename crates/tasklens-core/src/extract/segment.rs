//! Input segmentation.
//!
//! Splits raw text into candidate task units: explicit list markers first
//! (numbered/bulleted lines, embedded newlines), then sentence-terminal
//! punctuation, then coordinating conjunctions that open an imperative
//! clause. Segment spans tile the trimmed input without gaps, so the
//! original text is always reconstructible from them.

use super::lexicon;

/// A contiguous substring of the input identified as one candidate task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Cleaned content: list markers, leading conjunctions, and
    /// surrounding whitespace removed
    pub text: String,
    /// Byte offset of the span start in the original input
    pub start: usize,
    /// Byte offset one past the span end in the original input
    pub end: usize,
}

/// Split input into ordered segments.
///
/// Non-empty input always yields at least one segment; empty or
/// whitespace-only input yields none. Deterministic; no failure mode.
pub fn segment(text: &str) -> Vec<Segment> {
    let trim_start = text.len() - text.trim_start().len();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    let trim_end = trim_start + trimmed.len();

    // Content starts, relative to `trimmed`, of every unit after the first.
    let mut splits = list_marker_splits(trimmed);
    if splits.is_empty() {
        splits = sentence_splits(trimmed);
        let mut clause_splits = Vec::new();
        let bounds = unit_bounds(&splits, trimmed.len());
        for (unit_start, unit_end) in bounds {
            for s in conjunction_splits(&trimmed[unit_start..unit_end]) {
                clause_splits.push(unit_start + s);
            }
        }
        splits.extend(clause_splits);
        splits.sort_unstable();
        splits.dedup();
    }

    let mut segments = Vec::new();
    for (unit_start, unit_end) in unit_bounds(&splits, trimmed.len()) {
        let raw = &trimmed[unit_start..unit_end];
        let cleaned = clean_unit(raw);
        if cleaned.is_empty() {
            continue;
        }
        segments.push(Segment {
            text: cleaned,
            start: trim_start + unit_start,
            end: trim_start + unit_end,
        });
    }

    // A split that produced only empty units collapses to the whole input.
    if segments.is_empty() {
        return vec![Segment {
            text: trimmed.to_string(),
            start: trim_start,
            end: trim_end,
        }];
    }

    // Spans must tile the trimmed input: stretch each segment to the
    // start of the next, and the endpoints to the trim boundaries
    // (skipped whitespace-only units would otherwise leave gaps).
    segments[0].start = trim_start;
    for i in 0..segments.len() {
        segments[i].end = if i + 1 < segments.len() {
            segments[i + 1].start
        } else {
            trim_end
        };
    }

    segments
}

/// Expand sorted split offsets into (start, end) unit ranges tiling
/// `[0, len)`.
fn unit_bounds(splits: &[usize], len: usize) -> Vec<(usize, usize)> {
    let mut bounds = Vec::with_capacity(splits.len() + 1);
    let mut start = 0;
    for &s in splits {
        if s > start && s < len {
            bounds.push((start, s));
            start = s;
        }
    }
    bounds.push((start, len));
    bounds
}

/// Split points from explicit list structure: embedded newlines and
/// inline numbered markers ("1. buy milk 2. call mom").
fn list_marker_splits(text: &str) -> Vec<usize> {
    let mut splits: Vec<usize> = text
        .char_indices()
        .filter(|(_, c)| *c == '\n')
        .map(|(i, _)| i + 1)
        .collect();

    if splits.is_empty() {
        // Inline numbered markers: split before each "N." / "N)" token
        // after the first.
        let markers: Vec<usize> = lexicon::words_with_offsets(text)
            .iter()
            .filter(|(offset, w)| {
                w.chars().all(|c| c.is_ascii_digit())
                    && followed_by_marker_punct(text, offset + w.len())
                    && at_token_start(text, *offset)
            })
            .map(|(offset, _)| *offset)
            .collect();
        if markers.len() >= 2 && markers[0] == 0 {
            splits = markers[1..].to_vec();
        }
    }
    splits
}

fn followed_by_marker_punct(text: &str, at: usize) -> bool {
    matches!(text[at..].chars().next(), Some('.') | Some(')'))
}

fn at_token_start(text: &str, offset: usize) -> bool {
    offset == 0
        || text[..offset]
            .chars()
            .next_back()
            .map_or(true, |c| c.is_whitespace())
}

/// Split points after sentence-terminal punctuation followed by whitespace.
fn sentence_splits(text: &str) -> Vec<usize> {
    let mut splits = Vec::new();
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?' | ';') {
            if let Some((next_i, next_c)) = chars.peek().copied() {
                if next_c.is_whitespace() {
                    // Don't split decimals like "1.5"
                    let prev_digit = text[..i]
                        .chars()
                        .next_back()
                        .map_or(false, |p| p.is_ascii_digit());
                    let follows_digit = text[next_i..]
                        .trim_start()
                        .chars()
                        .next()
                        .map_or(false, |n| n.is_ascii_digit());
                    if !(c == '.' && prev_digit && follows_digit) {
                        splits.push(i + c.len_utf8());
                    }
                }
            }
        }
    }
    splits
}

/// Split before a coordinating conjunction ("and", "also") whose next
/// token is a base-form verb from the lexicon.
fn conjunction_splits(text: &str) -> Vec<usize> {
    let words = lexicon::words_with_offsets(text);
    let mut splits = Vec::new();
    for window in words.windows(2) {
        let (offset, word) = window[0];
        let (_, next) = window[1];
        let is_conjunction =
            word.eq_ignore_ascii_case("and") || word.eq_ignore_ascii_case("also");
        if is_conjunction && offset > 0 && lexicon::is_verb(next) {
            splits.push(offset);
        }
    }
    splits
}

/// Strip a list marker, leading conjunction, and surrounding whitespace
/// from a unit's raw text.
fn clean_unit(raw: &str) -> String {
    let mut s = raw.trim();

    // Bullet markers
    s = s
        .trim_start_matches(|c: char| c == '-' || c == '*' || c == '•' || c == '>')
        .trim_start();

    // Numbered markers: digits followed by '.' or ')'
    let digits: usize = s.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &s[digits..];
        if rest.starts_with('.') || rest.starts_with(')') {
            s = rest[1..].trim_start();
        }
    }

    // Leading conjunction left over from a clause split
    for conj in ["and ", "also ", "And ", "Also "] {
        if let Some(rest) = s.strip_prefix(conj) {
            s = rest.trim_start();
            break;
        }
    }
    s = s.trim_start_matches(',').trim_start();

    s.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_no_segments() {
        assert!(segment("").is_empty());
        assert!(segment("   \n  ").is_empty());
    }

    #[test]
    fn single_sentence_is_one_segment() {
        let segs = segment("Buy groceries tomorrow");
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].text, "Buy groceries tomorrow");
    }

    #[test]
    fn newlines_split_into_lines() {
        let segs = segment("- buy milk\n- call mom\n- pay rent");
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[0].text, "buy milk");
        assert_eq!(segs[1].text, "call mom");
        assert_eq!(segs[2].text, "pay rent");
    }

    #[test]
    fn numbered_markers_split_inline() {
        let segs = segment("1. buy milk 2. call the dentist");
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].text, "buy milk");
        assert_eq!(segs[1].text, "call the dentist");
    }

    #[test]
    fn sentences_split_on_terminal_punctuation() {
        let segs = segment("Buy milk today. Call mom about the party.");
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].text, "Buy milk today.");
        assert_eq!(segs[1].text, "Call mom about the party.");
    }

    #[test]
    fn conjunction_before_verb_splits() {
        let segs = segment("Buy milk and call the dentist");
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].text, "Buy milk");
        assert_eq!(segs[1].text, "call the dentist");
    }

    #[test]
    fn conjunction_before_noun_does_not_split() {
        let segs = segment("We need to buy milk, bread, and eggs today");
        assert_eq!(segs.len(), 1);
    }

    #[test]
    fn spans_tile_the_trimmed_input() {
        let input = "  Buy milk today. Call mom and fix the sink!  ";
        let trimmed = input.trim();
        let segs = segment(input);
        assert!(segs.len() >= 2);
        let rebuilt: String = segs.iter().map(|s| &input[s.start..s.end]).collect();
        assert_eq!(rebuilt, trimmed);
        for pair in segs.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn whitespace_only_lines_are_skipped() {
        let segs = segment("buy milk\n\n   \ncall mom");
        assert_eq!(segs.len(), 2);
    }
}
