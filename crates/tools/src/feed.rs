//! Daily weather feed.
//!
//! Pulls 30-day forecasts from a QWeather-style API once per day and
//! upserts them into `weather_data`. A city is refreshed only when its
//! newest stored `update_time` is more than a day old (or missing), so
//! restarting the server does not hammer the API.

use std::sync::Arc;

use chrono::{DateTime, Duration, Local, NaiveDateTime, Utc};
use serde::Deserialize;
use tracing::{info, warn};
use wayfarer_common::{Result, WayfarerError};

use crate::db::{Database, WeatherDay};

const DEFAULT_BASE_URL: &str = "https://devapi.qweather.com";

#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub api_key: String,
    pub base_url: String,
    /// City name → QWeather location code.
    pub cities: Vec<(String, String)>,
    /// Local hour of day at which the daily refresh runs.
    pub refresh_hour: u32,
}

impl FeedConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            cities: vec![
                ("Beijing".to_string(), "101010100".to_string()),
                ("Shanghai".to_string(), "101020100".to_string()),
                ("Guangzhou".to_string(), "101280101".to_string()),
                ("Shenzhen".to_string(), "101280601".to_string()),
            ],
            refresh_hour: 1,
        }
    }
}

/// 30-day forecast payload, camelCase on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastPayload {
    pub code: String,
    #[serde(rename = "updateTime", default)]
    pub update_time: Option<String>,
    #[serde(default)]
    pub daily: Vec<DailyForecast>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecast {
    pub fx_date: String,
    #[serde(default)]
    pub sunrise: Option<String>,
    #[serde(default)]
    pub sunset: Option<String>,
    #[serde(default)]
    pub moonrise: Option<String>,
    #[serde(default)]
    pub moonset: Option<String>,
    #[serde(default)]
    pub moon_phase: Option<String>,
    #[serde(default)]
    pub moon_phase_icon: Option<String>,
    #[serde(default)]
    pub temp_max: Option<String>,
    #[serde(default)]
    pub temp_min: Option<String>,
    #[serde(default)]
    pub icon_day: Option<String>,
    #[serde(default)]
    pub text_day: Option<String>,
    #[serde(default)]
    pub icon_night: Option<String>,
    #[serde(default)]
    pub text_night: Option<String>,
    #[serde(default)]
    pub wind360_day: Option<String>,
    #[serde(default)]
    pub wind_dir_day: Option<String>,
    #[serde(default)]
    pub wind_scale_day: Option<String>,
    #[serde(default)]
    pub wind_speed_day: Option<String>,
    #[serde(default)]
    pub wind360_night: Option<String>,
    #[serde(default)]
    pub wind_dir_night: Option<String>,
    #[serde(default)]
    pub wind_scale_night: Option<String>,
    #[serde(default)]
    pub wind_speed_night: Option<String>,
    #[serde(default)]
    pub precip: Option<String>,
    #[serde(default)]
    pub uv_index: Option<String>,
    #[serde(default)]
    pub humidity: Option<String>,
    #[serde(default)]
    pub pressure: Option<String>,
    #[serde(default)]
    pub vis: Option<String>,
    #[serde(default)]
    pub cloud: Option<String>,
}

/// A city needs a refresh when it has no data or the newest row is more
/// than a day old.
pub fn should_refresh(latest: Option<DateTime<Utc>>, now: DateTime<Utc>, force: bool) -> bool {
    if force {
        return true;
    }
    match latest {
        None => true,
        Some(latest) => now - latest > Duration::days(1),
    }
}

/// Time until the next occurrence of `hour`:00 local.
pub fn duration_until_hour(now: NaiveDateTime, hour: u32) -> Duration {
    let mut target = now
        .date()
        .and_hms_opt(hour, 0, 0)
        .unwrap_or_else(|| now.date().and_hms_opt(0, 0, 0).unwrap());
    if target <= now {
        target = target + Duration::days(1);
    }
    target - now
}

pub struct WeatherFeed {
    config: FeedConfig,
    http_client: reqwest::Client,
    db: Arc<Database>,
}

impl WeatherFeed {
    pub fn new(config: FeedConfig, db: Arc<Database>) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
            db,
        }
    }

    /// Fetch the 30-day forecast for one location code.
    pub async fn fetch_city(&self, location: &str) -> Result<ForecastPayload> {
        let url = format!(
            "{}/v7/weather/30d?location={}",
            self.config.base_url, location
        );

        let response = self
            .http_client
            .get(&url)
            .header("X-QW-Api-Key", &self.config.api_key)
            .send()
            .await
            .map_err(|e| WayfarerError::Tool(format!("forecast request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WayfarerError::Tool(format!(
                "forecast API error {status} for location {location}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| WayfarerError::Tool(format!("invalid forecast payload: {e}")))
    }

    /// Upsert one city's forecast days. Returns the number of rows written.
    pub fn store(&self, city: &str, payload: &ForecastPayload) -> Result<usize> {
        if payload.code != "200" {
            return Err(WayfarerError::Tool(format!(
                "forecast payload for {city} has code {}",
                payload.code
            )));
        }

        let update_time = payload
            .update_time
            .as_deref()
            .and_then(parse_update_time)
            .map(|dt| dt.to_rfc3339());

        let mut written = 0;
        for day in &payload.daily {
            let row = WeatherDay {
                city: city.to_string(),
                fx_date: day.fx_date.clone(),
                sunrise: day.sunrise.clone(),
                sunset: day.sunset.clone(),
                moonrise: day.moonrise.clone(),
                moonset: day.moonset.clone(),
                moon_phase: day.moon_phase.clone(),
                moon_phase_icon: day.moon_phase_icon.clone(),
                temp_max: parse_i64(&day.temp_max),
                temp_min: parse_i64(&day.temp_min),
                icon_day: day.icon_day.clone(),
                text_day: day.text_day.clone(),
                icon_night: day.icon_night.clone(),
                text_night: day.text_night.clone(),
                wind360_day: parse_i64(&day.wind360_day),
                wind_dir_day: day.wind_dir_day.clone(),
                wind_scale_day: day.wind_scale_day.clone(),
                wind_speed_day: parse_i64(&day.wind_speed_day),
                wind360_night: parse_i64(&day.wind360_night),
                wind_dir_night: day.wind_dir_night.clone(),
                wind_scale_night: day.wind_scale_night.clone(),
                wind_speed_night: parse_i64(&day.wind_speed_night),
                precip: parse_f64(&day.precip),
                uv_index: parse_i64(&day.uv_index),
                humidity: parse_i64(&day.humidity),
                pressure: parse_i64(&day.pressure),
                vis: parse_i64(&day.vis),
                cloud: parse_i64(&day.cloud),
                update_time: update_time.clone(),
            };
            self.db.upsert_weather_day(&row)?;
            written += 1;
        }

        info!(city, rows = written, "Stored forecast days");
        Ok(written)
    }

    /// Refresh every configured city that is stale.
    pub async fn refresh_all(&self, force: bool) -> Result<usize> {
        let now = Utc::now();
        let mut total = 0;

        for (city, location) in &self.config.cities {
            let latest = self.db.latest_weather_update(city)?;
            if !should_refresh(latest, now, force) {
                info!(city, ?latest, "Forecast up to date, skipping");
                continue;
            }

            info!(city, location, "Refreshing forecast");
            match self.fetch_city(location).await {
                Ok(payload) => match self.store(city, &payload) {
                    Ok(written) => total += written,
                    Err(e) => warn!(city, error = %e, "Failed to store forecast"),
                },
                Err(e) => warn!(city, error = %e, "Failed to fetch forecast"),
            }
        }

        Ok(total)
    }

    /// Run forever: sleep until the configured local hour, refresh, repeat.
    pub async fn run_daily(self) {
        loop {
            let wait = duration_until_hour(Local::now().naive_local(), self.config.refresh_hour);
            let secs = wait.num_seconds().max(0) as u64;
            info!(
                refresh_hour = self.config.refresh_hour,
                sleep_secs = secs,
                "Weather feed sleeping until next refresh"
            );
            tokio::time::sleep(std::time::Duration::from_secs(secs)).await;

            if let Err(e) = self.refresh_all(false).await {
                warn!(error = %e, "Daily weather refresh failed");
            }
        }
    }
}

fn parse_update_time(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M%z"))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn parse_i64(value: &Option<String>) -> Option<i64> {
    value.as_deref().and_then(|v| v.parse().ok())
}

fn parse_f64(value: &Option<String>) -> Option<f64> {
    value.as_deref().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    const SAMPLE_PAYLOAD: &str = r#"{
        "code": "200",
        "updateTime": "2025-08-06T18:35+08:00",
        "daily": [
            {
                "fxDate": "2025-08-07",
                "sunrise": "05:21", "sunset": "19:25",
                "moonPhase": "Waxing gibbous", "moonPhaseIcon": "803",
                "tempMax": "31", "tempMin": "22",
                "iconDay": "101", "textDay": "Cloudy",
                "iconNight": "151", "textNight": "Partly cloudy",
                "wind360Day": "45", "windDirDay": "NE", "windScaleDay": "1-3", "windSpeedDay": "12",
                "wind360Night": "90", "windDirNight": "E", "windScaleNight": "1-3", "windSpeedNight": "8",
                "precip": "0.0", "uvIndex": "7", "humidity": "62",
                "pressure": "1002", "vis": "25", "cloud": "40"
            },
            {
                "fxDate": "2025-08-08",
                "tempMax": "33", "tempMin": "23",
                "textDay": "Sunny", "textNight": "Clear",
                "windDirDay": "S", "precip": "0.0", "humidity": "55"
            }
        ]
    }"#;

    #[test]
    fn payload_parses_camel_case_fields() {
        let payload: ForecastPayload = serde_json::from_str(SAMPLE_PAYLOAD).unwrap();
        assert_eq!(payload.code, "200");
        assert_eq!(payload.daily.len(), 2);
        assert_eq!(payload.daily[0].fx_date, "2025-08-07");
        assert_eq!(payload.daily[0].temp_max.as_deref(), Some("31"));
        assert_eq!(payload.daily[0].wind360_day.as_deref(), Some("45"));
        assert_eq!(payload.daily[1].moon_phase, None);
    }

    #[test]
    fn store_writes_typed_rows() {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let feed = WeatherFeed::new(FeedConfig::new("test-key"), db.clone());
        let payload: ForecastPayload = serde_json::from_str(SAMPLE_PAYLOAD).unwrap();

        let written = feed.store("Beijing", &payload).unwrap();
        assert_eq!(written, 2);

        let rows = db
            .select_rows(
                "SELECT fx_date, temp_max, precip, update_time FROM weather_data \
                 WHERE city = 'Beijing' ORDER BY fx_date",
            )
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["temp_max"], 31);
        assert_eq!(rows[0]["precip"], 0.0);
        // updateTime without seconds still normalizes to RFC 3339
        assert!(rows[0]["update_time"].as_str().unwrap().starts_with("2025-08-06T10:35:00"));

        // Storing again replaces rather than duplicates
        feed.store("Beijing", &payload).unwrap();
        let rows = db
            .select_rows("SELECT id FROM weather_data WHERE city = 'Beijing'")
            .unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn store_rejects_error_payload() {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let feed = WeatherFeed::new(FeedConfig::new("test-key"), db);
        let payload: ForecastPayload =
            serde_json::from_str(r#"{"code": "402", "daily": []}"#).unwrap();
        assert!(feed.store("Beijing", &payload).is_err());
    }

    #[test]
    fn staleness_check() {
        let now = Utc.with_ymd_and_hms(2025, 8, 7, 12, 0, 0).unwrap();

        assert!(should_refresh(None, now, false));
        assert!(should_refresh(
            Some(now - Duration::days(2)),
            now,
            false
        ));
        assert!(!should_refresh(
            Some(now - Duration::hours(6)),
            now,
            false
        ));
        assert!(should_refresh(
            Some(now - Duration::hours(6)),
            now,
            true
        ));
    }

    #[test]
    fn next_refresh_is_today_or_tomorrow() {
        let morning = NaiveDate::from_ymd_opt(2025, 8, 7)
            .unwrap()
            .and_hms_opt(0, 30, 0)
            .unwrap();
        assert_eq!(duration_until_hour(morning, 1), Duration::minutes(30));

        let evening = NaiveDate::from_ymd_opt(2025, 8, 7)
            .unwrap()
            .and_hms_opt(23, 0, 0)
            .unwrap();
        assert_eq!(duration_until_hour(evening, 1), Duration::hours(2));
    }
}
