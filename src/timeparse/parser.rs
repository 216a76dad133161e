//! Natural language date/time parsing.
//!
//! Turns a phrase describing one point in time into an absolute instant in
//! the configured timezone. Recognized shapes:
//! - Relative words: `today`, `tomorrow`
//! - Weekdays: `monday`, `next friday`, `this tue`
//! - Month + day: `june 5`, `5 june`, `march 15th`
//! - Bare month: `june` (resolves to the 1st)
//! - Bare day of month: `5`, `21st`
//! - ISO dates: `2026-09-01`
//! - Times: `15:00`, `3:30pm`, `9am`, `noon`, `midnight`
//! - Combinations joined with `at`/`on` filler: `tomorrow at 3 pm`
//!
//! Incomplete dates always resolve forward: a weekday means its nearest
//! future occurrence and a bare time that already passed today means
//! tomorrow.

use std::ops::Range;
use std::sync::OnceLock;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use regex::Regex;
use thiserror::Error;

/// The input contained no recognizable temporal expression. This is a
/// normal outcome for free-form chat input, not an exceptional one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no recognizable date or time in {input:?}")]
pub struct ParseFailure {
    pub input: String,
}

pub struct TimeParser {
    tz: Tz,
}

struct TimePatterns {
    // 3:30pm, 3:30 pm
    time_12h: Regex,
    // 9am, 12 pm
    time_12h_bare: Regex,
    // noon, midnight
    time_word: Regex,
    // 15:00
    time_24h: Regex,
    // 2026-09-01
    iso_date: Regex,
    // 15 dec, 15th december
    day_month: Regex,
    // dec 15, december 15th
    month_day: Regex,
    // december
    bare_month: Regex,
    // 15, 21st
    bare_day: Regex,
}

const MONTHS: &str = "jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec";

impl TimePatterns {
    fn new() -> Self {
        Self {
            time_12h: Regex::new(r"\b(\d{1,2}):(\d{2})\s*(am|pm)\b").unwrap(),
            time_12h_bare: Regex::new(r"\b(\d{1,2})\s*(am|pm)\b").unwrap(),
            time_word: Regex::new(r"\b(noon|midnight)\b").unwrap(),
            time_24h: Regex::new(r"\b(\d{1,2}):(\d{2})\b").unwrap(),
            iso_date: Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").unwrap(),
            day_month: Regex::new(&format!(
                r"^(\d{{1,2}})(?:st|nd|rd|th)?\s+({MONTHS})[a-z]*$"
            ))
            .unwrap(),
            month_day: Regex::new(&format!(
                r"^({MONTHS})[a-z]*\s+(\d{{1,2}})(?:st|nd|rd|th)?$"
            ))
            .unwrap(),
            bare_month: Regex::new(&format!(r"^({MONTHS})[a-z]*$")).unwrap(),
            bare_day: Regex::new(r"^(\d{1,2})(?:st|nd|rd|th)?$").unwrap(),
        }
    }
}

fn patterns() -> &'static TimePatterns {
    static PATTERNS: OnceLock<TimePatterns> = OnceLock::new();
    PATTERNS.get_or_init(TimePatterns::new)
}

impl TimeParser {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Parse `text` relative to the current wall clock in the configured
    /// timezone.
    pub fn parse(&self, text: &str) -> Result<DateTime<Tz>, ParseFailure> {
        self.parse_at(text, Utc::now().with_timezone(&self.tz))
    }

    /// Parse `text` relative to an explicit reference instant. Everything
    /// funnels through here so tests can pin the clock.
    pub fn parse_at(&self, text: &str, now: DateTime<Tz>) -> Result<DateTime<Tz>, ParseFailure> {
        let fail = || ParseFailure {
            input: text.trim().to_string(),
        };

        let cleaned = text.trim().to_lowercase();
        if cleaned.is_empty() {
            return Err(fail());
        }

        // Pull the time-of-day out first (it can appear anywhere), then
        // read what remains as the date part.
        let (time, rest) = match find_time(&cleaned) {
            Some((time, span)) => {
                let rest = format!("{} {}", &cleaned[..span.start], &cleaned[span.end..]);
                (Some(time), rest)
            }
            None => (None, cleaned.clone()),
        };
        let rest = strip_filler(&rest);

        let today = now.date_naive();
        let date = if rest.is_empty() {
            None
        } else {
            // Leftover text that isn't a date means the phrase as a whole
            // wasn't understood.
            match parse_date_part(&rest, today) {
                Some(date) => Some(date),
                None => return Err(fail()),
            }
        };

        let resolved = match (date, time) {
            (Some(date), Some(time)) => self.localize(date.and_time(time)),
            (Some(date), None) => self.localize(date.and_time(NaiveTime::MIN)),
            (None, Some(time)) => match self.localize(today.and_time(time)) {
                // A bare time that already passed today refers to tomorrow.
                Some(candidate) if candidate > now => Some(candidate),
                _ => self.localize((today + Duration::days(1)).and_time(time)),
            },
            (None, None) => None,
        };

        match resolved {
            Some(instant) => {
                tracing::debug!("parsed {:?} to {}", text.trim(), instant);
                Ok(instant)
            }
            None => Err(fail()),
        }
    }

    fn localize(&self, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
        self.tz.from_local_datetime(&naive).earliest()
    }
}

/// Find the first time-of-day expression in `text`, returning the parsed
/// time and the byte span it occupied.
fn find_time(text: &str) -> Option<(NaiveTime, Range<usize>)> {
    let patterns = patterns();

    if let Some(caps) = patterns.time_12h.captures(text) {
        let hour: u32 = caps[1].parse().ok()?;
        let minute: u32 = caps[2].parse().ok()?;
        let time = twelve_hour(hour, minute, &caps[3])?;
        return Some((time, caps.get(0)?.range()));
    }

    if let Some(caps) = patterns.time_12h_bare.captures(text) {
        let hour: u32 = caps[1].parse().ok()?;
        let time = twelve_hour(hour, 0, &caps[2])?;
        return Some((time, caps.get(0)?.range()));
    }

    if let Some(found) = patterns.time_word.find(text) {
        let time = if found.as_str() == "noon" {
            NaiveTime::from_hms_opt(12, 0, 0)?
        } else {
            NaiveTime::MIN
        };
        return Some((time, found.range()));
    }

    if let Some(caps) = patterns.time_24h.captures(text) {
        let hour: u32 = caps[1].parse().ok()?;
        let minute: u32 = caps[2].parse().ok()?;
        if hour < 24 && minute < 60 {
            return Some((NaiveTime::from_hms_opt(hour, minute, 0)?, caps.get(0)?.range()));
        }
    }

    None
}

fn twelve_hour(hour: u32, minute: u32, meridiem: &str) -> Option<NaiveTime> {
    if !(1..=12).contains(&hour) || minute >= 60 {
        return None;
    }
    let hour = match (meridiem, hour) {
        ("pm", h) if h != 12 => h + 12,
        ("am", 12) => 0,
        (_, h) => h,
    };
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Drop connective filler so "tomorrow at 3 pm" reduces to "tomorrow" once
/// the time is removed.
fn strip_filler(text: &str) -> String {
    text.split_whitespace()
        .map(|token| token.trim_matches(|c: char| c == ',' || c == '.'))
        .filter(|token| !token.is_empty() && !matches!(*token, "at" | "on" | "the"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_date_part(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let patterns = patterns();

    match text {
        "today" => return Some(today),
        "tomorrow" => return Some(today + Duration::days(1)),
        _ => {}
    }

    let (next_week, day_text) = if let Some(rest) = text.strip_prefix("next ") {
        (true, rest)
    } else if let Some(rest) = text.strip_prefix("this ") {
        (false, rest)
    } else {
        (false, text)
    };
    if let Some(weekday) = weekday_from_name(day_text) {
        let current = today.weekday().num_days_from_monday() as i64;
        let target = weekday.num_days_from_monday() as i64;
        // Nearest future occurrence, never today or in the past.
        let mut offset = target - current;
        if offset <= 0 {
            offset += 7;
        }
        if next_week {
            offset += 7;
        }
        return Some(today + Duration::days(offset));
    }

    if let Some(caps) = patterns.iso_date.captures(text) {
        return NaiveDate::from_ymd_opt(
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
            caps[3].parse().ok()?,
        );
    }

    if let Some(caps) = patterns.day_month.captures(text) {
        let day: u32 = caps[1].parse().ok()?;
        return next_occurrence(today, month_number(&caps[2])?, day);
    }

    if let Some(caps) = patterns.month_day.captures(text) {
        let day: u32 = caps[2].parse().ok()?;
        return next_occurrence(today, month_number(&caps[1])?, day);
    }

    // A month on its own resolves to its first day.
    if let Some(caps) = patterns.bare_month.captures(text) {
        return next_occurrence(today, month_number(&caps[1])?, 1);
    }

    // A bare number reads as a day of the current month, rolling forward
    // when that day has already passed.
    if let Some(caps) = patterns.bare_day.captures(text) {
        let day: u32 = caps[1].parse().ok()?;
        if !(1..=31).contains(&day) {
            return None;
        }
        let mut year = today.year();
        let mut month = today.month();
        for _ in 0..13 {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                if date >= today {
                    return Some(date);
                }
            }
            month += 1;
            if month > 12 {
                month = 1;
                year += 1;
            }
        }
        return None;
    }

    None
}

/// The next calendar date with the given month and day, starting from
/// `today` and looking at most one year ahead.
fn next_occurrence(today: NaiveDate, month: u32, day: u32) -> Option<NaiveDate> {
    match NaiveDate::from_ymd_opt(today.year(), month, day) {
        Some(date) if date >= today => Some(date),
        _ => NaiveDate::from_ymd_opt(today.year() + 1, month, day),
    }
}

fn month_number(name: &str) -> Option<u32> {
    match name {
        "jan" => Some(1),
        "feb" => Some(2),
        "mar" => Some(3),
        "apr" => Some(4),
        "may" => Some(5),
        "jun" => Some(6),
        "jul" => Some(7),
        "aug" => Some(8),
        "sep" => Some(9),
        "oct" => Some(10),
        "nov" => Some(11),
        "dec" => Some(12),
        _ => None,
    }
}

fn weekday_from_name(name: &str) -> Option<Weekday> {
    match name.trim() {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" | "tues" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" | "thur" | "thurs" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tz() -> Tz {
        "Asia/Kolkata".parse().unwrap()
    }

    // Friday morning.
    fn now() -> DateTime<Tz> {
        tz().with_ymd_and_hms(2026, 6, 5, 9, 0, 0).unwrap()
    }

    fn parse(text: &str) -> DateTime<Tz> {
        TimeParser::new(tz()).parse_at(text, now()).unwrap()
    }

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Tz> {
        tz().with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn parses_tomorrow_at_3_pm() {
        assert_eq!(parse("tomorrow at 3 PM"), at(2026, 6, 6, 15, 0));
    }

    #[test]
    fn parses_bare_time_in_the_future_as_today() {
        assert_eq!(parse("3 pm"), at(2026, 6, 5, 15, 0));
        assert_eq!(parse("15:00"), at(2026, 6, 5, 15, 0));
    }

    #[test]
    fn bumps_past_bare_time_to_the_next_day() {
        assert_eq!(parse("8 am"), at(2026, 6, 6, 8, 0));
    }

    #[test]
    fn parses_weekday_as_nearest_future_occurrence() {
        assert_eq!(parse("monday"), at(2026, 6, 8, 0, 0));
        assert_eq!(parse("monday at 2 pm"), at(2026, 6, 8, 14, 0));
        // The reference instant is a Friday; a plain "friday" never means
        // today.
        assert_eq!(parse("friday"), at(2026, 6, 12, 0, 0));
        assert_eq!(parse("next monday"), at(2026, 6, 15, 0, 0));
    }

    #[test]
    fn parses_month_day_preferring_the_future() {
        assert_eq!(parse("june 20"), at(2026, 6, 20, 0, 0));
        assert_eq!(parse("15th june at 10:30 am"), at(2026, 6, 15, 10, 30));
        // June 1 already passed, so "june" rolls to next year.
        assert_eq!(parse("june"), at(2027, 6, 1, 0, 0));
    }

    #[test]
    fn parses_bare_day_of_month() {
        assert_eq!(parse("20"), at(2026, 6, 20, 0, 0));
        // The 2nd has passed this month.
        assert_eq!(parse("2"), at(2026, 7, 2, 0, 0));
    }

    #[test]
    fn parses_iso_date_with_time() {
        assert_eq!(parse("2026-09-01 at 10:30"), at(2026, 9, 1, 10, 30));
    }

    #[test]
    fn parses_noon_and_midnight() {
        assert_eq!(parse("tomorrow at noon"), at(2026, 6, 6, 12, 0));
        assert_eq!(parse("midnight"), at(2026, 6, 6, 0, 0));
    }

    #[test]
    fn twelve_hour_boundaries() {
        assert_eq!(parse("today at 12 pm"), at(2026, 6, 5, 12, 0));
        assert_eq!(parse("tomorrow at 12 am"), at(2026, 6, 6, 0, 0));
    }

    #[test]
    fn rejects_text_with_no_temporal_expression() {
        let parser = TimeParser::new(tz());
        assert!(parser.parse_at("asdfghjkl", now()).is_err());
        assert!(parser.parse_at("", now()).is_err());
        assert!(parser.parse_at("lunch with sam", now()).is_err());
    }

    #[test]
    fn result_is_in_the_configured_timezone() {
        use chrono::Offset;

        let parsed = parse("tomorrow at 3 pm");
        assert_eq!(parsed.offset().fix().local_minus_utc(), 5 * 3600 + 1800);
    }
}
