//! Temporal expression recognition and resolution.
//!
//! Finds date/time phrases in a segment and resolves them against a
//! reference instant. Recognition is table-driven and deterministic:
//! explicit clock times, relative day words ("today", "tomorrow"), named
//! weekdays (with "next" overrides), deadline markers ("by", "due"), and
//! coarse windows ("this evening", "this week"). Unparseable text simply
//! yields no expression — never an error.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};

use super::lexicon::words_with_offsets;

/// Coarse windows with no exact time implied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    Morning,
    Afternoon,
    Evening,
    Tonight,
    ThisWeek,
    Weekend,
}

/// A recognized date/time phrase, prior to resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TemporalExpression {
    /// Explicit month/day (year optional; inferred forward from the
    /// reference when absent)
    Absolute {
        month: u32,
        day: u32,
        year: Option<i32>,
        time: Option<NaiveTime>,
    },
    /// "today" (0) / "tomorrow" (+1) relative to the reference date
    RelativeDay {
        offset_days: i64,
        time: Option<NaiveTime>,
    },
    /// Named weekday; `next_week` skips the coming occurrence
    NamedWeekday {
        weekday: Weekday,
        time: Option<NaiveTime>,
        next_week: bool,
    },
    /// Bare clock time with no date component
    TimeOfDay { time: NaiveTime },
    /// Coarse window, resolved with lower confidence
    Window { kind: WindowKind },
}

/// A match within a segment: expression, span, and resolution confidence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemporalMatch {
    pub expr: TemporalExpression,
    /// Byte span of the matched phrase within the searched text
    pub start: usize,
    pub end: usize,
    /// Resolution confidence in [0, 1]
    pub confidence: f64,
    /// Whether the phrase was deadline-tagged ("by Friday", "due Friday")
    pub is_deadline: bool,
}

/// A resolved due point: a concrete date, optionally with a time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedInstant {
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
}

impl ResolvedInstant {
    /// Concrete instant; date-only resolutions use midnight UTC.
    pub fn instant(&self) -> DateTime<Utc> {
        let time = self.time.unwrap_or(NaiveTime::MIN);
        Utc.from_utc_datetime(&self.date.and_time(time))
    }

    pub fn has_time(&self) -> bool {
        self.time.is_some()
    }
}

const WEEKDAY_NAMES: &[(&str, Weekday)] = &[
    ("monday", Weekday::Mon),
    ("mon", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("tue", Weekday::Tue),
    ("tues", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("wed", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("thu", Weekday::Thu),
    ("thurs", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("fri", Weekday::Fri),
    ("saturday", Weekday::Sat),
    ("sat", Weekday::Sat),
    ("sunday", Weekday::Sun),
    ("sun", Weekday::Sun),
];

const MONTH_NAMES: &[(&str, u32)] = &[
    ("january", 1),
    ("jan", 1),
    ("february", 2),
    ("feb", 2),
    ("march", 3),
    ("mar", 3),
    ("april", 4),
    ("apr", 4),
    ("may", 5),
    ("june", 6),
    ("jun", 6),
    ("july", 7),
    ("jul", 7),
    ("august", 8),
    ("aug", 8),
    ("september", 9),
    ("sep", 9),
    ("sept", 9),
    ("october", 10),
    ("oct", 10),
    ("november", 11),
    ("nov", 11),
    ("december", 12),
    ("dec", 12),
];

fn weekday_from_word(word: &str) -> Option<Weekday> {
    WEEKDAY_NAMES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(word))
        .map(|(_, wd)| *wd)
}

fn month_from_word(word: &str) -> Option<u32> {
    MONTH_NAMES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(word))
        .map(|(_, m)| *m)
}

/// Strip an ordinal suffix ("21st" → "21").
fn strip_ordinal(word: &str) -> &str {
    for suffix in ["st", "nd", "rd", "th"] {
        if let Some(rest) = word.strip_suffix(suffix) {
            if !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()) {
                return rest;
            }
        }
    }
    word
}

fn parse_day_number(word: &str) -> Option<u32> {
    let digits = strip_ordinal(word);
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let day: u32 = digits.parse().ok()?;
    (1..=31).contains(&day).then_some(day)
}

/// Whether the month/day pair names a real calendar date. Without a year,
/// a leap year is assumed so "february 29" stays recognizable.
fn day_exists_in_month(month: u32, day: u32, year: Option<i32>) -> bool {
    NaiveDate::from_ymd_opt(year.unwrap_or(2000), month, day).is_some()
}

/// Parse a clock time starting at word index `i`.
///
/// Returns the time, the number of words consumed, and the end offset of
/// the last consumed word.
fn parse_time_at(words: &[(usize, &str)], i: usize) -> Option<(NaiveTime, usize, usize)> {
    let (offset, word) = *words.get(i)?;
    let end = offset + word.len();
    let lower = word.to_ascii_lowercase();

    if lower == "noon" {
        return NaiveTime::from_hms_opt(12, 0, 0).map(|t| (t, 1, end));
    }
    if lower == "midnight" {
        return NaiveTime::from_hms_opt(0, 0, 0).map(|t| (t, 1, end));
    }

    // Glued meridiem: "3pm", "10am"
    for (suffix, pm) in [("am", false), ("pm", true)] {
        if let Some(hour_str) = lower.strip_suffix(suffix) {
            if !hour_str.is_empty() && hour_str.chars().all(|c| c.is_ascii_digit()) {
                let hour: u32 = hour_str.parse().ok()?;
                return meridiem_time(hour, 0, pm).map(|t| (t, 1, end));
            }
        }
    }

    // "10:30" / "10:30 pm" / "15:00"
    if let Some((h_str, m_str)) = lower.split_once(':') {
        let hour: u32 = h_str.parse().ok()?;
        let minute: u32 = m_str.parse().ok()?;
        if minute >= 60 {
            return None;
        }
        if let Some((next_off, next)) = words.get(i + 1).copied() {
            let next_lower = next.to_ascii_lowercase();
            if next_lower == "am" || next_lower == "pm" {
                let t = meridiem_time(hour, minute, next_lower == "pm")?;
                return Some((t, 2, next_off + next.len()));
            }
        }
        return NaiveTime::from_hms_opt(hour, minute, 0).map(|t| (t, 1, end));
    }

    // "3 pm"
    if lower.chars().all(|c| c.is_ascii_digit()) {
        let (next_off, next) = words.get(i + 1).copied()?;
        let next_lower = next.to_ascii_lowercase();
        if next_lower == "am" || next_lower == "pm" {
            let hour: u32 = lower.parse().ok()?;
            let t = meridiem_time(hour, 0, next_lower == "pm")?;
            return Some((t, 2, next_off + next.len()));
        }
    }

    None
}

fn meridiem_time(hour: u32, minute: u32, pm: bool) -> Option<NaiveTime> {
    if !(1..=12).contains(&hour) {
        return None;
    }
    let hour24 = match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    };
    NaiveTime::from_hms_opt(hour24, minute, 0)
}

/// Look ahead for a time phrase immediately after a date phrase,
/// optionally skipping "at".
fn fused_time(words: &[(usize, &str)], i: usize) -> Option<(NaiveTime, usize, usize)> {
    if let Some((_, w)) = words.get(i) {
        if w.eq_ignore_ascii_case("at") {
            return parse_time_at(words, i + 1).map(|(t, n, end)| (t, n + 1, end));
        }
    }
    parse_time_at(words, i)
}

struct RawMatch {
    expr: TemporalExpression,
    start: usize,
    end: usize,
    confidence: f64,
    next_index: usize,
}

/// Try every recognizer at word index `i`, most specific first.
fn match_at(words: &[(usize, &str)], i: usize) -> Option<RawMatch> {
    let (offset, word) = *words.get(i)?;
    let end = offset + word.len();
    let lower = word.to_ascii_lowercase();

    // "next <weekday>"
    if lower == "next" {
        if let Some((wd_off, wd_word)) = words.get(i + 1).copied() {
            if let Some(weekday) = weekday_from_word(wd_word) {
                let wd_end = wd_off + wd_word.len();
                let (time, consumed, t_end) = match fused_time(words, i + 2) {
                    Some((t, n, e)) => (Some(t), n, e),
                    None => (None, 0, wd_end),
                };
                return Some(RawMatch {
                    expr: TemporalExpression::NamedWeekday {
                        weekday,
                        time,
                        next_week: true,
                    },
                    start: offset,
                    end: t_end,
                    confidence: if time.is_some() { 0.95 } else { 0.8 },
                    next_index: i + 2 + consumed,
                });
            }
        }
    }

    // Relative day words
    let day_offset = match lower.as_str() {
        "today" => Some(0),
        "tomorrow" | "tmrw" => Some(1),
        _ => None,
    };
    if let Some(offset_days) = day_offset {
        let (time, consumed, t_end) = match fused_time(words, i + 1) {
            Some((t, n, e)) => (Some(t), n, e),
            None => (None, 0, end),
        };
        return Some(RawMatch {
            expr: TemporalExpression::RelativeDay { offset_days, time },
            start: offset,
            end: t_end,
            confidence: 0.8,
            next_index: i + 1 + consumed,
        });
    }

    // Named weekday
    if let Some(weekday) = weekday_from_word(word) {
        let (time, consumed, t_end) = match fused_time(words, i + 1) {
            Some((t, n, e)) => (Some(t), n, e),
            None => (None, 0, end),
        };
        return Some(RawMatch {
            expr: TemporalExpression::NamedWeekday {
                weekday,
                time,
                next_week: false,
            },
            start: offset,
            end: t_end,
            confidence: if time.is_some() { 0.95 } else { 0.8 },
            next_index: i + 1 + consumed,
        });
    }

    // Absolute "march 21 [2025]" / "21 march"
    if let Some(month) = month_from_word(word) {
        if let Some((d_off, d_word)) = words.get(i + 1).copied() {
            if let Some(day) = parse_day_number(d_word) {
                let mut end_off = d_off + d_word.len();
                let mut next = i + 2;
                let mut year = None;
                if let Some((y_off, y_word)) = words.get(next).copied() {
                    if y_word.len() == 4 && y_word.chars().all(|c| c.is_ascii_digit()) {
                        year = y_word.parse().ok();
                        end_off = y_off + y_word.len();
                        next += 1;
                    }
                }
                if day_exists_in_month(month, day, year) {
                    let (time, consumed, t_end) = match fused_time(words, next) {
                        Some((t, n, e)) => (Some(t), n, e),
                        None => (None, 0, end_off),
                    };
                    return Some(RawMatch {
                        expr: TemporalExpression::Absolute {
                            month,
                            day,
                            year,
                            time,
                        },
                        start: offset,
                        end: t_end,
                        confidence: if time.is_some() { 0.95 } else { 0.8 },
                        next_index: next + consumed,
                    });
                }
            }
        }
    }
    if let Some(day) = parse_day_number(word) {
        if let Some((m_off, m_word)) = words.get(i + 1).copied() {
            if let Some(month) = month_from_word(m_word) {
                if day_exists_in_month(month, day, None) {
                    let m_end = m_off + m_word.len();
                    let (time, consumed, t_end) = match fused_time(words, i + 2) {
                        Some((t, n, e)) => (Some(t), n, e),
                        None => (None, 0, m_end),
                    };
                    return Some(RawMatch {
                        expr: TemporalExpression::Absolute {
                            month,
                            day,
                            year: None,
                            time,
                        },
                        start: offset,
                        end: t_end,
                        confidence: if time.is_some() { 0.95 } else { 0.8 },
                        next_index: i + 2 + consumed,
                    });
                }
            }
        }
    }

    // Coarse windows
    if lower == "tonight" {
        return Some(RawMatch {
            expr: TemporalExpression::Window {
                kind: WindowKind::Tonight,
            },
            start: offset,
            end,
            confidence: 0.5,
            next_index: i + 1,
        });
    }
    if lower == "this" {
        if let Some((w_off, w_word)) = words.get(i + 1).copied() {
            let kind = match w_word.to_ascii_lowercase().as_str() {
                "morning" => Some(WindowKind::Morning),
                "afternoon" => Some(WindowKind::Afternoon),
                "evening" => Some(WindowKind::Evening),
                "week" => Some(WindowKind::ThisWeek),
                "weekend" => Some(WindowKind::Weekend),
                _ => None,
            };
            if let Some(kind) = kind {
                return Some(RawMatch {
                    expr: TemporalExpression::Window { kind },
                    start: offset,
                    end: w_off + w_word.len(),
                    confidence: 0.5,
                    next_index: i + 2,
                });
            }
        }
    }

    // Bare clock time
    if let Some((time, consumed, t_end)) = parse_time_at(words, i) {
        return Some(RawMatch {
            expr: TemporalExpression::TimeOfDay { time },
            start: offset,
            end: t_end,
            confidence: 0.8,
            next_index: i + consumed,
        });
    }

    None
}

/// Find all temporal expressions in the text, in order of appearance.
pub fn find_expressions(text: &str) -> Vec<TemporalMatch> {
    let words = words_with_offsets(text);
    let mut matches = Vec::new();
    let mut i = 0;
    while i < words.len() {
        // Deadline markers: "by X", "due X", "due by X", "before X"
        let (_, word) = words[i];
        let lower = word.to_ascii_lowercase();
        let (is_deadline, parse_from) = match lower.as_str() {
            "by" | "before" => (true, i + 1),
            "due" => {
                let skip = words
                    .get(i + 1)
                    .map_or(false, |(_, w)| w.eq_ignore_ascii_case("by"));
                (true, if skip { i + 2 } else { i + 1 })
            }
            _ => (false, i),
        };

        if let Some(raw) = match_at(&words, parse_from) {
            let start = if is_deadline { words[i].0 } else { raw.start };
            matches.push(TemporalMatch {
                expr: raw.expr,
                start,
                end: raw.end,
                confidence: raw.confidence,
                is_deadline,
            });
            i = raw.next_index;
            continue;
        }
        i += 1;
    }
    matches
}

/// Resolve an expression against a reference instant.
pub fn resolve(expr: &TemporalExpression, reference: DateTime<Utc>) -> ResolvedInstant {
    let ref_date = reference.date_naive();
    match expr {
        TemporalExpression::RelativeDay { offset_days, time } => ResolvedInstant {
            date: ref_date + Duration::days(*offset_days),
            time: *time,
        },
        TemporalExpression::NamedWeekday {
            weekday,
            time,
            next_week,
        } => {
            let current = ref_date.weekday().num_days_from_monday();
            let target = weekday.num_days_from_monday();
            // Strictly after the reference date: same weekday means +7.
            let mut ahead = (target + 7 - current) % 7;
            if ahead == 0 {
                ahead = 7;
            }
            if *next_week {
                ahead += 7;
            }
            ResolvedInstant {
                date: ref_date + Duration::days(ahead as i64),
                time: *time,
            }
        }
        TemporalExpression::Absolute {
            month,
            day,
            year,
            time,
        } => {
            let date = match year {
                Some(y) => NaiveDate::from_ymd_opt(*y, *month, *day),
                None => {
                    // Nearest occurrence on or after the reference date.
                    // Scanning several years covers Feb 29, which skips
                    // non-leap years.
                    (ref_date.year()..=ref_date.year() + 8)
                        .filter_map(|y| NaiveDate::from_ymd_opt(y, *month, *day))
                        .find(|d| *d >= ref_date)
                }
            };
            ResolvedInstant {
                date: date.unwrap_or(ref_date),
                time: *time,
            }
        }
        TemporalExpression::TimeOfDay { time } => ResolvedInstant {
            date: ref_date,
            time: Some(*time),
        },
        TemporalExpression::Window { kind } => resolve_window(*kind, ref_date),
    }
}

fn resolve_window(kind: WindowKind, ref_date: NaiveDate) -> ResolvedInstant {
    let coarse_time = |h| NaiveTime::from_hms_opt(h, 0, 0);
    match kind {
        WindowKind::Morning => ResolvedInstant {
            date: ref_date,
            time: coarse_time(9),
        },
        WindowKind::Afternoon => ResolvedInstant {
            date: ref_date,
            time: coarse_time(15),
        },
        WindowKind::Evening => ResolvedInstant {
            date: ref_date,
            time: coarse_time(18),
        },
        WindowKind::Tonight => ResolvedInstant {
            date: ref_date,
            time: coarse_time(20),
        },
        WindowKind::ThisWeek => {
            // End of the ISO week, date-only.
            let to_sunday = 6 - ref_date.weekday().num_days_from_monday();
            ResolvedInstant {
                date: ref_date + Duration::days(to_sunday as i64),
                time: None,
            }
        }
        WindowKind::Weekend => {
            let to_saturday =
                (Weekday::Sat.num_days_from_monday() + 7 - ref_date.weekday().num_days_from_monday()) % 7;
            ResolvedInstant {
                date: ref_date + Duration::days(to_saturday as i64),
                time: None,
            }
        }
    }
}

/// A date and time combined from all expressions found in one segment.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedTemporal {
    pub resolved: ResolvedInstant,
    pub confidence: f64,
    pub is_deadline: bool,
    /// Spans of the consumed phrases, for title stripping
    pub spans: Vec<(usize, usize)>,
}

/// Merge the matches in a segment into a single due point.
///
/// The first date-bearing expression wins; a separate bare clock time in
/// the same segment supplies the time component when the date expression
/// lacks one.
pub fn combine(matches: &[TemporalMatch], reference: DateTime<Utc>) -> Option<CombinedTemporal> {
    let primary = matches
        .iter()
        .find(|m| !matches!(m.expr, TemporalExpression::TimeOfDay { .. }));
    let time_match = matches
        .iter()
        .find(|m| matches!(m.expr, TemporalExpression::TimeOfDay { .. }));

    match (primary, time_match) {
        (None, None) => None,
        (None, Some(t)) => Some(CombinedTemporal {
            resolved: resolve(&t.expr, reference),
            confidence: t.confidence,
            is_deadline: t.is_deadline,
            spans: vec![(t.start, t.end)],
        }),
        (Some(p), time_match) => {
            let mut resolved = resolve(&p.expr, reference);
            let mut spans = vec![(p.start, p.end)];
            let mut merged_time = false;
            let mut is_deadline = p.is_deadline;
            if resolved.time.is_none() {
                if let Some(t) = time_match {
                    if let TemporalExpression::TimeOfDay { time } = t.expr {
                        resolved.time = Some(time);
                        spans.push((t.start, t.end));
                        merged_time = true;
                        is_deadline = is_deadline || t.is_deadline;
                    }
                }
            }
            let confidence = combined_confidence(&p.expr, resolved.has_time(), merged_time);
            Some(CombinedTemporal {
                resolved,
                confidence,
                is_deadline,
                spans,
            })
        }
    }
}

fn combined_confidence(primary: &TemporalExpression, has_time: bool, merged_time: bool) -> f64 {
    match primary {
        TemporalExpression::Window { .. } => {
            if merged_time {
                0.8
            } else {
                0.5
            }
        }
        TemporalExpression::NamedWeekday { .. } | TemporalExpression::Absolute { .. } => {
            if has_time {
                0.95
            } else {
                0.8
            }
        }
        _ => 0.8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> DateTime<Utc> {
        // Thursday 2024-03-14, 10:00 UTC
        Utc.from_utc_datetime(
            &NaiveDate::from_ymd_opt(2024, 3, 14)
                .unwrap()
                .and_time(NaiveTime::from_hms_opt(10, 0, 0).unwrap()),
        )
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn finds_relative_day_words() {
        let matches = find_expressions("buy milk tomorrow");
        assert_eq!(matches.len(), 1);
        assert_eq!(
            matches[0].expr,
            TemporalExpression::RelativeDay {
                offset_days: 1,
                time: None
            }
        );
        assert_eq!(matches[0].confidence, 0.8);
    }

    #[test]
    fn fuses_day_word_with_time() {
        let matches = find_expressions("submit documents by tomorrow noon");
        assert_eq!(matches.len(), 1);
        assert!(matches[0].is_deadline);
        assert_eq!(
            matches[0].expr,
            TemporalExpression::RelativeDay {
                offset_days: 1,
                time: Some(time(12, 0))
            }
        );
        // Span covers "by tomorrow noon"
        let text = "submit documents by tomorrow noon";
        assert_eq!(&text[matches[0].start..matches[0].end], "by tomorrow noon");
    }

    #[test]
    fn weekday_resolution_is_strictly_future() {
        // Reference is Thursday; "Thursday" means next week's Thursday.
        let resolved = resolve(
            &TemporalExpression::NamedWeekday {
                weekday: Weekday::Thu,
                time: None,
                next_week: false,
            },
            reference(),
        );
        assert_eq!(resolved.date, date(2024, 3, 21));

        // "Friday" is the very next day.
        let resolved = resolve(
            &TemporalExpression::NamedWeekday {
                weekday: Weekday::Fri,
                time: None,
                next_week: false,
            },
            reference(),
        );
        assert_eq!(resolved.date, date(2024, 3, 15));
    }

    #[test]
    fn next_weekday_skips_one_occurrence() {
        let matches = find_expressions("call the bank next friday");
        assert_eq!(matches.len(), 1);
        let resolved = resolve(&matches[0].expr, reference());
        // Nearest Friday is Mar 15; "next" pushes to Mar 22.
        assert_eq!(resolved.date, date(2024, 3, 22));
    }

    #[test]
    fn weekday_with_time_is_highest_confidence() {
        let matches = find_expressions("dentist on tuesday at 3 pm");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].confidence, 0.95);
        let resolved = resolve(&matches[0].expr, reference());
        assert_eq!(resolved.date, date(2024, 3, 19));
        assert_eq!(resolved.time, Some(time(15, 0)));
    }

    #[test]
    fn clock_time_variants() {
        for (input, expected) in [
            ("at 3pm", time(15, 0)),
            ("at 10:30 am", time(10, 30)),
            ("at 15:45", time(15, 45)),
            ("at noon", time(12, 0)),
            ("at midnight", time(0, 0)),
            ("at 12pm", time(12, 0)),
            ("at 12am", time(0, 0)),
        ] {
            let matches = find_expressions(input);
            assert_eq!(matches.len(), 1, "no match for {input:?}");
            assert_eq!(
                matches[0].expr,
                TemporalExpression::TimeOfDay { time: expected },
                "wrong time for {input:?}"
            );
        }
    }

    #[test]
    fn deadline_marker_tags_match() {
        let matches = find_expressions("finish the report by friday");
        assert_eq!(matches.len(), 1);
        assert!(matches[0].is_deadline);

        let matches = find_expressions("rent due friday");
        assert_eq!(matches.len(), 1);
        assert!(matches[0].is_deadline);
    }

    #[test]
    fn windows_have_low_confidence() {
        let matches = find_expressions("clean the garage this weekend");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].confidence, 0.5);
        let resolved = resolve(&matches[0].expr, reference());
        // Thursday Mar 14 → Saturday Mar 16, date-only.
        assert_eq!(resolved.date, date(2024, 3, 16));
        assert!(!resolved.has_time());
    }

    #[test]
    fn absolute_date_rolls_forward() {
        let matches = find_expressions("renew passport on january 5");
        assert_eq!(matches.len(), 1);
        let resolved = resolve(&matches[0].expr, reference());
        // Jan 5 already passed in 2024 relative to Mar 14.
        assert_eq!(resolved.date, date(2025, 1, 5));
    }

    #[test]
    fn unparseable_text_yields_nothing() {
        assert!(find_expressions("buy milk and bread").is_empty());
        assert!(find_expressions("").is_empty());
    }

    #[test]
    fn impossible_dates_are_not_recognized() {
        assert!(find_expressions("pay rent on february 30").is_empty());
        assert!(find_expressions("june 31").is_empty());
        assert!(find_expressions("april 31 2025").is_empty());
    }

    #[test]
    fn leap_day_without_year_resolves_to_next_leap_year() {
        let matches = find_expressions("renew the lease on february 29");
        assert_eq!(matches.len(), 1);
        // Reference is 2024-03-14; Feb 29 2024 already passed, and 2025
        // through 2027 have no Feb 29.
        let resolved = resolve(&matches[0].expr, reference());
        assert_eq!(resolved.date, date(2028, 2, 29));
    }

    #[test]
    fn combine_merges_separate_date_and_time() {
        let matches = find_expressions("at 3 pm call the office tomorrow");
        let combined = combine(&matches, reference()).unwrap();
        assert_eq!(combined.resolved.date, date(2024, 3, 15));
        assert_eq!(combined.resolved.time, Some(time(15, 0)));
        assert_eq!(combined.spans.len(), 2);
    }

    #[test]
    fn combine_with_no_matches_is_none() {
        assert!(combine(&[], reference()).is_none());
    }
}
