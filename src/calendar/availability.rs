//! Conflict detection between a candidate window and existing events.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;

use super::event::{EventTime, ExistingEvent};
use crate::timeparse::TimeWindow;

/// Outcome of an availability check. On conflict, carries the label of the
/// first blocking event in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Free,
    Busy { summary: String },
}

impl Availability {
    pub fn is_free(&self) -> bool {
        matches!(self, Availability::Free)
    }
}

/// Walk the fetched events in order and report the first one whose span
/// overlaps the candidate window under the half-open rule: [a, b) and
/// [c, d) overlap iff a < d and b > c, so touching endpoints don't count.
///
/// O(n) over the fetched set; the provider is only asked for events near
/// the window, so n stays small.
pub fn check(events: &[ExistingEvent], window: &TimeWindow, tz: Tz) -> Availability {
    for event in events {
        let (Some(start), Some(end)) = (
            resolve(&event.start, tz, false),
            resolve(&event.end, tz, true),
        ) else {
            tracing::warn!("skipping event with unusable start or end: {:?}", event.summary);
            continue;
        };

        if window.start < end && window.end > start {
            let summary = event
                .summary
                .clone()
                .unwrap_or_else(|| "Untitled".to_string());
            tracing::warn!("conflict found with event: {}", summary);
            return Availability::Busy { summary };
        }
    }

    Availability::Free
}

/// Resolve a provider start/end record to an instant in the configured
/// timezone. All-day events span [00:00:00, 23:59:59] of their date.
fn resolve(time: &EventTime, tz: Tz, end_of_day: bool) -> Option<DateTime<Tz>> {
    if let Some(timestamp) = &time.date_time {
        return DateTime::parse_from_rfc3339(timestamp)
            .ok()
            .map(|parsed| parsed.with_timezone(&tz));
    }

    if let Some(date) = &time.date {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
        let time_of_day = if end_of_day {
            NaiveTime::from_hms_opt(23, 59, 59)?
        } else {
            NaiveTime::MIN
        };
        return tz.from_local_datetime(&date.and_time(time_of_day)).earliest();
    }

    None
}
