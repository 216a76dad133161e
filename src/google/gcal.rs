//! Google Calendar v3 REST client for listing and inserting events.
//!
//! Uses API key access against a single configured calendar. The base URL
//! is injectable so tests can point the client at a mock server.

use async_trait::async_trait;
use chrono::DateTime;
use chrono_tz::Tz;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::calendar::{CalendarApi, CalendarError, EventTime, ExistingEvent};
use crate::core::AppConfig;

#[derive(Debug, Deserialize)]
struct ListEventsResponse {
    #[serde(default)]
    items: Vec<ExistingEvent>,
}

#[derive(Debug, Serialize)]
struct CreateEventRequest<'a> {
    summary: &'a str,
    start: EventTime,
    end: EventTime,
}

#[derive(Clone)]
pub struct GcalClient {
    http: Client,
    base_url: String,
    api_key: String,
    calendar_id: String,
}

impl GcalClient {
    pub fn new(base_url: &str, api_key: &str, calendar_id: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            calendar_id: calendar_id.to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.gcal_api_url,
            &config.google_api_key,
            &config.calendar_id,
        )
    }

    fn events_url(&self) -> String {
        format!("{}/calendars/{}/events", self.base_url, self.calendar_id)
    }
}

#[async_trait]
impl CalendarApi for GcalClient {
    async fn list_events(
        &self,
        from: DateTime<Tz>,
        to: DateTime<Tz>,
    ) -> Result<Vec<ExistingEvent>, CalendarError> {
        let resp = self
            .http
            .get(self.events_url())
            .query(&[
                ("timeMin", from.to_rfc3339()),
                ("timeMax", to.to_rfc3339()),
                ("singleEvents", "true".to_string()),
                ("orderBy", "startTime".to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CalendarError::Api {
                status: status.as_u16(),
                body: resp.text().await.unwrap_or_default(),
            });
        }

        let events = resp.json::<ListEventsResponse>().await?.items;
        tracing::info!("calendar events fetched: {} events found", events.len());
        Ok(events)
    }

    async fn create_event(
        &self,
        summary: &str,
        from: DateTime<Tz>,
        to: DateTime<Tz>,
    ) -> Result<ExistingEvent, CalendarError> {
        let tz_name = from.timezone().name();
        let body = CreateEventRequest {
            summary,
            start: EventTime {
                date_time: Some(from.to_rfc3339()),
                date: None,
                time_zone: Some(tz_name.to_string()),
            },
            end: EventTime {
                date_time: Some(to.to_rfc3339()),
                date: None,
                time_zone: Some(tz_name.to_string()),
            },
        };

        let resp = self
            .http
            .post(self.events_url())
            .query(&[("key", self.api_key.clone())])
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CalendarError::Api {
                status: status.as_u16(),
                body: resp.text().await.unwrap_or_default(),
            });
        }

        let created = resp.json::<ExistingEvent>().await?;
        tracing::info!("created calendar event {:?}", created.summary);
        Ok(created)
    }
}
