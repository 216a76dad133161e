use std::env;

use chrono_tz::Tz;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// The single timezone every parsed time is attached to.
    pub timezone: Tz,
    pub calendar_id: String,
    pub google_api_key: String,
    pub gcal_api_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let timezone = env::var("BOOKBOT_TIMEZONE")
            .unwrap_or_else(|_| "Asia/Kolkata".to_string())
            .parse::<Tz>()
            .expect("Invalid BOOKBOT_TIMEZONE");
        let calendar_id =
            env::var("BOOKBOT_CALENDAR_ID").expect("Missing env var BOOKBOT_CALENDAR_ID");
        let google_api_key =
            env::var("BOOKBOT_GOOGLE_API_KEY").expect("Missing env var BOOKBOT_GOOGLE_API_KEY");
        let gcal_api_url = env::var("BOOKBOT_GCAL_API_URL")
            .unwrap_or_else(|_| "https://www.googleapis.com/calendar/v3".to_string());

        Self {
            timezone,
            calendar_id,
            google_api_key,
            gcal_api_url,
        }
    }
}
