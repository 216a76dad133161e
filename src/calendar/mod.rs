//! Calendar domain model: provider event records, the availability check,
//! and the seam the booking agent talks to a provider through.

pub mod availability;
mod event;

pub use availability::{Availability, check};
pub use event::{EventTime, ExistingEvent};

use async_trait::async_trait;
use chrono::DateTime;
use chrono_tz::Tz;
use thiserror::Error;

/// The read or write call to the calendar provider failed.
#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("calendar request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("calendar API returned {status}: {body}")]
    Api { status: u16, body: String },
}

/// The two collaborator operations the booking agent needs from a
/// calendar provider.
#[async_trait]
pub trait CalendarApi: Send + Sync {
    /// List events overlapping [from, to).
    async fn list_events(
        &self,
        from: DateTime<Tz>,
        to: DateTime<Tz>,
    ) -> Result<Vec<ExistingEvent>, CalendarError>;

    /// Create an event spanning [from, to).
    async fn create_event(
        &self,
        summary: &str,
        from: DateTime<Tz>,
        to: DateTime<Tz>,
    ) -> Result<ExistingEvent, CalendarError>;
}
