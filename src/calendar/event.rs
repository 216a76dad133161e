use serde::{Deserialize, Serialize};

/// Start or end of a provider event: either a full timestamp or a
/// date-only marker for all-day events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventTime {
    #[serde(rename = "dateTime", skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "timeZone", skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl EventTime {
    pub fn timestamp(value: &str) -> Self {
        Self {
            date_time: Some(value.to_string()),
            ..Self::default()
        }
    }

    pub fn all_day(value: &str) -> Self {
        Self {
            date: Some(value.to_string()),
            ..Self::default()
        }
    }
}

/// An event already on the calendar, as returned by the provider.
/// Fetched fresh per request and never cached.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExistingEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub start: EventTime,
    #[serde(default)]
    pub end: EventTime,
}
