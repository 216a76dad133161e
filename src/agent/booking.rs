//! The booking pipeline: extract a time window, check availability, book
//! the slot, and turn every outcome into a user-facing reply.
//!
//! This is the failure boundary for a request. `handle` always returns a
//! message; parse failures, conflicts, and provider errors all terminate
//! here instead of propagating to the transport layer.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::calendar::{self, Availability, CalendarApi, CalendarError};
use crate::timeparse::RangeExtractor;

const REPHRASE_MSG: &str = "Sorry, I couldn't understand the time you mentioned. \
    Please try again with a more specific time like 'tomorrow at 3 PM' or 'Monday at 2 PM'.";

const UNAVAILABLE_MSG: &str =
    "Sorry, that time slot is not available. Please suggest another time.";

fn backend_error_msg(err: &CalendarError) -> String {
    format!("Server encountered an error: {err}. Please try again later.")
}

pub struct BookingAgent<C> {
    extractor: RangeExtractor,
    calendar: C,
    tz: Tz,
}

impl<C: CalendarApi> BookingAgent<C> {
    pub fn new(tz: Tz, calendar: C) -> Self {
        Self {
            extractor: RangeExtractor::new(tz),
            calendar,
            tz,
        }
    }

    /// Process one chat message and return the reply to show the user.
    pub async fn handle(&self, user_text: &str) -> String {
        self.handle_at(user_text, Utc::now().with_timezone(&self.tz))
            .await
    }

    /// Same as `handle` but with an explicit reference instant for the
    /// time parser, so tests can pin the clock.
    pub async fn handle_at(&self, user_text: &str, now: DateTime<Tz>) -> String {
        tracing::info!("user input received: {user_text}");

        let window = match self.extractor.extract_at(user_text, now) {
            Ok(window) => window,
            Err(err) => {
                tracing::warn!("time parsing error: {err}");
                return REPHRASE_MSG.to_string();
            }
        };
        tracing::info!("parsed time range: {} to {}", window.start, window.end);

        let events = match self.calendar.list_events(window.start, window.end).await {
            Ok(events) => events,
            Err(err) => {
                tracing::error!("calendar lookup failed: {err}");
                return backend_error_msg(&err);
            }
        };

        match calendar::check(&events, &window, self.tz) {
            Availability::Busy { summary } => {
                tracing::warn!("slot not available, blocked by {summary:?}");
                UNAVAILABLE_MSG.to_string()
            }
            Availability::Free => {
                let summary = event_summary(now);
                match self
                    .calendar
                    .create_event(&summary, window.start, window.end)
                    .await
                {
                    Ok(_) => {
                        tracing::info!("booking confirmed");
                        format!(
                            "Your meeting has been successfully booked for {}!",
                            window.start.format("%B %d, %Y at %I:%M %p")
                        )
                    }
                    Err(err) => {
                        tracing::error!("booking failed: {err}");
                        backend_error_msg(&err)
                    }
                }
            }
        }
    }
}

/// Label for a newly booked event, e.g. "Meeting - 06/05".
fn event_summary(now: DateTime<Tz>) -> String {
    format!("Meeting - {}", now.format("%m/%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn event_summary_carries_the_current_date() {
        let tz: Tz = "Asia/Kolkata".parse().unwrap();
        let now = tz.with_ymd_and_hms(2026, 6, 5, 9, 0, 0).unwrap();
        assert_eq!(event_summary(now), "Meeting - 06/05");
    }
}
