//! SQLite storage for the tool servers.
//!
//! One connection, used serially behind a mutex. All lookups run through
//! [`Database::select_rows`], which admits SELECT statements only and
//! renders rows as column-keyed JSON objects so they can travel in the
//! tool envelope unchanged.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection};
use serde_json::{Map, Value};
use tracing::info;
use wayfarer_common::{QueryOutcome, Result, WayfarerError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS weather_data (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    city TEXT NOT NULL,
    fx_date TEXT NOT NULL,
    sunrise TEXT,
    sunset TEXT,
    moonrise TEXT,
    moonset TEXT,
    moon_phase TEXT,
    moon_phase_icon TEXT,
    temp_max INTEGER,
    temp_min INTEGER,
    icon_day TEXT,
    text_day TEXT,
    icon_night TEXT,
    text_night TEXT,
    wind360_day INTEGER,
    wind_dir_day TEXT,
    wind_scale_day TEXT,
    wind_speed_day INTEGER,
    wind360_night INTEGER,
    wind_dir_night TEXT,
    wind_scale_night TEXT,
    wind_speed_night INTEGER,
    precip REAL,
    uv_index INTEGER,
    humidity INTEGER,
    pressure INTEGER,
    vis INTEGER,
    cloud INTEGER,
    update_time TEXT,
    UNIQUE (city, fx_date)
);

CREATE TABLE IF NOT EXISTS train_tickets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    departure_city TEXT NOT NULL,
    arrival_city TEXT NOT NULL,
    departure_time TEXT NOT NULL,
    arrival_time TEXT NOT NULL,
    train_number TEXT NOT NULL,
    seat_type TEXT NOT NULL,
    total_seats INTEGER NOT NULL,
    remaining_seats INTEGER NOT NULL,
    price REAL NOT NULL,
    created_at TEXT DEFAULT CURRENT_TIMESTAMP,
    UNIQUE (departure_time, train_number)
);

CREATE TABLE IF NOT EXISTS flight_tickets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    departure_city TEXT NOT NULL,
    arrival_city TEXT NOT NULL,
    departure_time TEXT NOT NULL,
    arrival_time TEXT NOT NULL,
    flight_number TEXT NOT NULL,
    cabin_type TEXT NOT NULL,
    total_seats INTEGER NOT NULL,
    remaining_seats INTEGER NOT NULL,
    price REAL NOT NULL,
    created_at TEXT DEFAULT CURRENT_TIMESTAMP,
    UNIQUE (departure_time, flight_number)
);

CREATE TABLE IF NOT EXISTS concert_tickets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    artist TEXT NOT NULL,
    city TEXT NOT NULL,
    venue TEXT NOT NULL,
    start_time TEXT NOT NULL,
    end_time TEXT NOT NULL,
    ticket_type TEXT NOT NULL,
    total_seats INTEGER NOT NULL,
    remaining_seats INTEGER NOT NULL,
    price REAL NOT NULL,
    created_at TEXT DEFAULT CURRENT_TIMESTAMP,
    UNIQUE (start_time, artist, ticket_type)
);
"#;

/// One day of forecast data, keyed by (city, fx_date).
#[derive(Debug, Clone, Default)]
pub struct WeatherDay {
    pub city: String,
    pub fx_date: String,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub moonrise: Option<String>,
    pub moonset: Option<String>,
    pub moon_phase: Option<String>,
    pub moon_phase_icon: Option<String>,
    pub temp_max: Option<i64>,
    pub temp_min: Option<i64>,
    pub icon_day: Option<String>,
    pub text_day: Option<String>,
    pub icon_night: Option<String>,
    pub text_night: Option<String>,
    pub wind360_day: Option<i64>,
    pub wind_dir_day: Option<String>,
    pub wind_scale_day: Option<String>,
    pub wind_speed_day: Option<i64>,
    pub wind360_night: Option<i64>,
    pub wind_dir_night: Option<String>,
    pub wind_scale_night: Option<String>,
    pub wind_speed_night: Option<i64>,
    pub precip: Option<f64>,
    pub uv_index: Option<i64>,
    pub humidity: Option<i64>,
    pub pressure: Option<i64>,
    pub vis: Option<i64>,
    pub cloud: Option<i64>,
    pub update_time: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TrainTicket {
    pub departure_city: String,
    pub arrival_city: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub train_number: String,
    pub seat_type: String,
    pub total_seats: i64,
    pub remaining_seats: i64,
    pub price: f64,
}

#[derive(Debug, Clone)]
pub struct FlightTicket {
    pub departure_city: String,
    pub arrival_city: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub flight_number: String,
    pub cabin_type: String,
    pub total_seats: i64,
    pub remaining_seats: i64,
    pub price: f64,
}

#[derive(Debug, Clone)]
pub struct ConcertTicket {
    pub artist: String,
    pub city: String,
    pub venue: String,
    pub start_time: String,
    pub end_time: String,
    pub ticket_type: String,
    pub total_seats: i64,
    pub remaining_seats: i64,
    pub price: f64,
}

pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (creating if needed) the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)
            .map_err(|e| WayfarerError::Database(format!("failed to open {}: {e}", path.display())))?;
        conn.execute_batch(SCHEMA)
            .map_err(|e| WayfarerError::Database(format!("schema init failed: {e}")))?;
        info!(path = %path.display(), "Database opened");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory database for tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| WayfarerError::Database(e.to_string()))?;
        conn.execute_batch(SCHEMA)
            .map_err(|e| WayfarerError::Database(format!("schema init failed: {e}")))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run a SELECT and return each row as a column-keyed JSON object.
    ///
    /// Anything that is not a SELECT is rejected: the lookup tools are
    /// read-only and the SQL arrives from an LLM.
    pub fn select_rows(&self, sql: &str) -> Result<Vec<Value>> {
        if !sql.trim_start().to_lowercase().starts_with("select") {
            return Err(WayfarerError::Database(
                "only SELECT statements are allowed".into(),
            ));
        }

        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| WayfarerError::Database(e.to_string()))?;
        let column_names: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(|c| c.to_string())
            .collect();

        let mut rows = stmt
            .query([])
            .map_err(|e| WayfarerError::Database(e.to_string()))?;
        let mut out = Vec::new();
        while let Some(row) = rows
            .next()
            .map_err(|e| WayfarerError::Database(e.to_string()))?
        {
            let mut obj = Map::new();
            for (i, name) in column_names.iter().enumerate() {
                let value = match row
                    .get_ref(i)
                    .map_err(|e| WayfarerError::Database(e.to_string()))?
                {
                    ValueRef::Null => Value::Null,
                    ValueRef::Integer(n) => Value::from(n),
                    ValueRef::Real(f) => Value::from(f),
                    ValueRef::Text(t) => Value::from(String::from_utf8_lossy(t).into_owned()),
                    ValueRef::Blob(_) => Value::Null,
                };
                obj.insert(name.clone(), value);
            }
            out.push(Value::Object(obj));
        }
        Ok(out)
    }

    /// Run a SELECT and fold the result into the tool envelope.
    pub fn query_envelope(&self, sql: &str, no_data_message: &str) -> QueryOutcome {
        match self.select_rows(sql) {
            Ok(rows) if rows.is_empty() => QueryOutcome::no_data(no_data_message),
            Ok(rows) => QueryOutcome::success(rows),
            Err(e) => QueryOutcome::error(e.to_string()),
        }
    }

    /// Insert or update one forecast day, keyed by (city, fx_date).
    pub fn upsert_weather_day(&self, day: &WeatherDay) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO weather_data (
                city, fx_date, sunrise, sunset, moonrise, moonset, moon_phase, moon_phase_icon,
                temp_max, temp_min, icon_day, text_day, icon_night, text_night,
                wind360_day, wind_dir_day, wind_scale_day, wind_speed_day,
                wind360_night, wind_dir_night, wind_scale_night, wind_speed_night,
                precip, uv_index, humidity, pressure, vis, cloud, update_time
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14,
                       ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28, ?29)
             ON CONFLICT (city, fx_date) DO UPDATE SET
                sunrise = excluded.sunrise, sunset = excluded.sunset,
                moonrise = excluded.moonrise, moonset = excluded.moonset,
                moon_phase = excluded.moon_phase, moon_phase_icon = excluded.moon_phase_icon,
                temp_max = excluded.temp_max, temp_min = excluded.temp_min,
                icon_day = excluded.icon_day, text_day = excluded.text_day,
                icon_night = excluded.icon_night, text_night = excluded.text_night,
                wind360_day = excluded.wind360_day, wind_dir_day = excluded.wind_dir_day,
                wind_scale_day = excluded.wind_scale_day, wind_speed_day = excluded.wind_speed_day,
                wind360_night = excluded.wind360_night, wind_dir_night = excluded.wind_dir_night,
                wind_scale_night = excluded.wind_scale_night, wind_speed_night = excluded.wind_speed_night,
                precip = excluded.precip, uv_index = excluded.uv_index,
                humidity = excluded.humidity, pressure = excluded.pressure,
                vis = excluded.vis, cloud = excluded.cloud, update_time = excluded.update_time",
            params![
                day.city,
                day.fx_date,
                day.sunrise,
                day.sunset,
                day.moonrise,
                day.moonset,
                day.moon_phase,
                day.moon_phase_icon,
                day.temp_max,
                day.temp_min,
                day.icon_day,
                day.text_day,
                day.icon_night,
                day.text_night,
                day.wind360_day,
                day.wind_dir_day,
                day.wind_scale_day,
                day.wind_speed_day,
                day.wind360_night,
                day.wind_dir_night,
                day.wind_scale_night,
                day.wind_speed_night,
                day.precip,
                day.uv_index,
                day.humidity,
                day.pressure,
                day.vis,
                day.cloud,
                day.update_time,
            ],
        )
        .map_err(|e| WayfarerError::Database(e.to_string()))?;
        Ok(())
    }

    /// Newest `update_time` stored for a city, if any.
    pub fn latest_weather_update(&self, city: &str) -> Result<Option<DateTime<Utc>>> {
        let conn = self.conn.lock().unwrap();
        let latest: Option<String> = conn
            .query_row(
                "SELECT MAX(update_time) FROM weather_data WHERE city = ?1",
                [city],
                |row| row.get(0),
            )
            .map_err(|e| WayfarerError::Database(e.to_string()))?;

        Ok(latest
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.with_timezone(&Utc)))
    }

    pub fn insert_train_ticket(&self, ticket: &TrainTicket) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO train_tickets
                (departure_city, arrival_city, departure_time, arrival_time,
                 train_number, seat_type, total_seats, remaining_seats, price)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                ticket.departure_city,
                ticket.arrival_city,
                ticket.departure_time,
                ticket.arrival_time,
                ticket.train_number,
                ticket.seat_type,
                ticket.total_seats,
                ticket.remaining_seats,
                ticket.price,
            ],
        )
        .map_err(|e| WayfarerError::Database(e.to_string()))?;
        Ok(())
    }

    pub fn insert_flight_ticket(&self, ticket: &FlightTicket) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO flight_tickets
                (departure_city, arrival_city, departure_time, arrival_time,
                 flight_number, cabin_type, total_seats, remaining_seats, price)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                ticket.departure_city,
                ticket.arrival_city,
                ticket.departure_time,
                ticket.arrival_time,
                ticket.flight_number,
                ticket.cabin_type,
                ticket.total_seats,
                ticket.remaining_seats,
                ticket.price,
            ],
        )
        .map_err(|e| WayfarerError::Database(e.to_string()))?;
        Ok(())
    }

    pub fn insert_concert_ticket(&self, ticket: &ConcertTicket) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO concert_tickets
                (artist, city, venue, start_time, end_time,
                 ticket_type, total_seats, remaining_seats, price)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                ticket.artist,
                ticket.city,
                ticket.venue,
                ticket.start_time,
                ticket.end_time,
                ticket.ticket_type,
                ticket.total_seats,
                ticket.remaining_seats,
                ticket.price,
            ],
        )
        .map_err(|e| WayfarerError::Database(e.to_string()))?;
        Ok(())
    }
}
