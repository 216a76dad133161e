//! Extracting a bookable time window from a chat message.
//!
//! Messages come in two shapes: an explicit range ("between 2 pm and 4 pm")
//! or a single point ("tomorrow at 3 PM") which gets a default one hour
//! duration.

use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;

use super::parser::{ParseFailure, TimeParser};

/// A half-open interval [start, end) in the configured timezone.
/// `end > start` always holds after extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl TimeWindow {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionFailure {
    #[error("no usable time in {input:?}: {source}")]
    Unparseable {
        input: String,
        #[source]
        source: ParseFailure,
    },
    #[error("incomplete time range in {input:?}")]
    IncompleteRange { input: String },
}

/// How the message as a whole should be read.
enum Shape {
    Range,
    Single,
}

/// First-pass keyword classifier. Deliberately not a grammar; swapping in
/// a real one only requires replacing this function.
fn classify(text: &str) -> Shape {
    if text.contains("between") && (text.contains("and") || text.contains('-')) {
        Shape::Range
    } else {
        Shape::Single
    }
}

pub struct RangeExtractor {
    parser: TimeParser,
    tz: Tz,
}

impl RangeExtractor {
    pub fn new(tz: Tz) -> Self {
        Self {
            parser: TimeParser::new(tz),
            tz,
        }
    }

    /// Extract a time window relative to the current wall clock.
    pub fn extract(&self, text: &str) -> Result<TimeWindow, ExtractionFailure> {
        self.extract_at(text, Utc::now().with_timezone(&self.tz))
    }

    /// Extract a time window relative to an explicit reference instant.
    pub fn extract_at(
        &self,
        text: &str,
        now: DateTime<Tz>,
    ) -> Result<TimeWindow, ExtractionFailure> {
        let normalized = text.trim().to_lowercase();

        let window = match classify(&normalized) {
            Shape::Range => self.extract_between(&normalized, now)?,
            Shape::Single => {
                let start = self.parse_fragment(&normalized, now)?;
                finalize(start, start + Duration::hours(1))
            }
        };

        tracing::debug!("extracted window {} to {}", window.start, window.end);
        Ok(window)
    }

    fn extract_between(
        &self,
        text: &str,
        now: DateTime<Tz>,
    ) -> Result<TimeWindow, ExtractionFailure> {
        let rest = match text.split_once("between") {
            Some((_, rest)) => rest.trim(),
            None => {
                return Err(ExtractionFailure::IncompleteRange {
                    input: text.to_string(),
                });
            }
        };

        // Split on " and " when present, otherwise on the FIRST hyphen.
        // Known limitation: compact ranges like "3-4pm" and dates with
        // embedded hyphens confuse the hyphen split.
        let (start_text, end_text) = if let Some(parts) = rest.split_once(" and ") {
            parts
        } else if let Some(parts) = rest.split_once('-') {
            parts
        } else {
            return Err(ExtractionFailure::IncompleteRange {
                input: text.to_string(),
            });
        };

        let start = self.parse_fragment(start_text.trim(), now)?;
        let mut end = self.parse_fragment(end_text.trim(), now)?;

        // The two fragments can land on different implicit dates (e.g.
        // "between 2 and 3 pm"). When the end's clock time is earlier than
        // the start's, pull the end back onto the start's date. This is a
        // narrow heuristic, not a general date-carry rule.
        if end.date_naive() != start.date_naive() && end.time() < start.time() {
            if let Some(redated) = self
                .tz
                .from_local_datetime(&start.date_naive().and_time(end.time()))
                .earliest()
            {
                end = redated;
            }
        }

        Ok(finalize(start, end))
    }

    fn parse_fragment(
        &self,
        fragment: &str,
        now: DateTime<Tz>,
    ) -> Result<DateTime<Tz>, ExtractionFailure> {
        self.parser
            .parse_at(fragment, now)
            .map_err(|source| ExtractionFailure::Unparseable {
                input: fragment.to_string(),
                source,
            })
    }
}

/// An inverted or empty window self-heals to one hour rather than failing.
fn finalize(start: DateTime<Tz>, end: DateTime<Tz>) -> TimeWindow {
    let end = if end <= start {
        tracing::warn!("end time is not after start time, adjusting to one hour");
        start + Duration::hours(1)
    } else {
        end
    };
    TimeWindow { start, end }
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

    fn extract(text: &str) -> TimeWindow {
        RangeExtractor::new(tz()).extract_at(text, now()).unwrap()
    }

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Tz> {
        tz().with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn single_point_gets_one_hour_duration() {
        let window = extract("tomorrow at 3 PM");
        assert_eq!(window.start, at(2026, 6, 6, 15, 0));
        assert_eq!(window.end, at(2026, 6, 6, 16, 0));
        assert_eq!(window.duration(), Duration::hours(1));
    }

    #[test]
    fn between_with_and_splits_into_two_fragments() {
        let window = extract("between 2 pm and 3 pm today");
        assert_eq!(window.start, at(2026, 6, 5, 14, 0));
        assert_eq!(window.end, at(2026, 6, 5, 15, 0));
    }

    #[test]
    fn between_with_hyphen_splits_on_first_hyphen() {
        let window = extract("between 10 am - 11:30 am");
        assert_eq!(window.start, at(2026, 6, 5, 10, 0));
        assert_eq!(window.end, at(2026, 6, 5, 11, 30));
    }

    #[test]
    fn inverted_range_self_heals_to_one_hour() {
        let window = extract("between 3 pm and 2 pm today");
        assert_eq!(window.start, at(2026, 6, 5, 15, 0));
        assert_eq!(window.end, at(2026, 6, 5, 16, 0));
    }

    #[test]
    fn end_on_later_date_with_earlier_clock_time_is_redated() {
        // The end parses to Sunday 1 pm; since its clock time is earlier
        // than the start's it is pulled back onto Saturday, and the now
        // inverted window heals to one hour.
        let window = extract("between saturday at 2 pm and sunday at 1 pm");
        assert_eq!(window.start, at(2026, 6, 6, 14, 0));
        assert_eq!(window.end, at(2026, 6, 6, 15, 0));
    }

    #[test]
    fn healed_window_extracts_the_same_when_rendered_back() {
        // Healing "between 3 pm and 2 pm" yields [3 pm, 4 pm); extracting
        // the rendered corrected range gives the identical window.
        let healed = extract("between 3 pm and 2 pm today");
        let rerendered = extract("between 3 pm and 4 pm today");
        assert_eq!(healed, rerendered);
    }

    #[test]
    fn no_temporal_expression_is_a_failure() {
        let extractor = RangeExtractor::new(tz());
        assert!(extractor.extract_at("asdfghjkl", now()).is_err());
        assert!(extractor.extract_at("book me a room", now()).is_err());
    }

    #[test]
    fn range_with_unparseable_fragment_is_a_failure() {
        let extractor = RangeExtractor::new(tz());
        let result = extractor.extract_at("between lunch and 3 pm", now());
        assert!(matches!(
            result,
            Err(ExtractionFailure::Unparseable { .. })
        ));
    }
}
