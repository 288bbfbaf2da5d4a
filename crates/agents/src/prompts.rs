//! Prompt templates for the agent servers.
//!
//! Templates carry `{placeholder}` slots filled by the builder functions;
//! JSON braces inside the templates are literal, so substitution is done
//! with plain replacement rather than `format!`.

use wayfarer_tools::ToolDescriptor;

/// Schema text shown to the SQL generator for weather queries.
pub const WEATHER_SCHEMA: &str = r#"
CREATE TABLE weather_data (
    id INTEGER PRIMARY KEY,
    city TEXT NOT NULL,            -- city name, e.g. 'Beijing'
    fx_date TEXT NOT NULL,         -- forecast date, e.g. '2025-07-30'
    sunrise TEXT, sunset TEXT,
    moonrise TEXT, moonset TEXT,
    moon_phase TEXT, moon_phase_icon TEXT,
    temp_max INTEGER,              -- daily high, Celsius
    temp_min INTEGER,              -- daily low, Celsius
    icon_day TEXT, text_day TEXT,  -- daytime conditions description
    icon_night TEXT, text_night TEXT,
    wind360_day INTEGER, wind_dir_day TEXT, wind_scale_day TEXT, wind_speed_day INTEGER,
    wind360_night INTEGER, wind_dir_night TEXT, wind_scale_night TEXT, wind_speed_night INTEGER,
    precip REAL,                   -- precipitation, mm
    uv_index INTEGER,
    humidity INTEGER,              -- relative humidity, percent
    pressure INTEGER, vis INTEGER, cloud INTEGER,
    update_time TEXT,
    UNIQUE (city, fx_date)
);
"#;

/// Schema text shown to the SQL generator for ticket queries.
pub const TICKET_SCHEMA: &str = r#"
CREATE TABLE train_tickets (
    id INTEGER PRIMARY KEY,
    departure_city TEXT NOT NULL,  -- e.g. 'Beijing'
    arrival_city TEXT NOT NULL,    -- e.g. 'Shanghai'
    departure_time TEXT NOT NULL,  -- e.g. '2025-08-12 07:00:00'
    arrival_time TEXT NOT NULL,
    train_number TEXT NOT NULL,    -- e.g. 'G1001'
    seat_type TEXT NOT NULL,       -- e.g. 'second class'
    total_seats INTEGER NOT NULL,
    remaining_seats INTEGER NOT NULL,
    price REAL NOT NULL,
    UNIQUE (departure_time, train_number)
);

CREATE TABLE flight_tickets (
    id INTEGER PRIMARY KEY,
    departure_city TEXT NOT NULL,
    arrival_city TEXT NOT NULL,
    departure_time TEXT NOT NULL,
    arrival_time TEXT NOT NULL,
    flight_number TEXT NOT NULL,   -- e.g. 'CA1234'
    cabin_type TEXT NOT NULL,      -- e.g. 'economy'
    total_seats INTEGER NOT NULL,
    remaining_seats INTEGER NOT NULL,
    price REAL NOT NULL,
    UNIQUE (departure_time, flight_number)
);

CREATE TABLE concert_tickets (
    id INTEGER PRIMARY KEY,
    artist TEXT NOT NULL,          -- e.g. 'Dao Lang'
    city TEXT NOT NULL,
    venue TEXT NOT NULL,           -- e.g. 'Workers'' Stadium'
    start_time TEXT NOT NULL,      -- e.g. '2025-08-23 19:00:00'
    end_time TEXT NOT NULL,
    ticket_type TEXT NOT NULL,     -- e.g. 'stand'
    total_seats INTEGER NOT NULL,
    remaining_seats INTEGER NOT NULL,
    price REAL NOT NULL,
    UNIQUE (start_time, artist, ticket_type)
);
"#;

const WEATHER_SQL_TEMPLATE: &str = r#"System: You are a weather SQL generator. Extract the key facts from the conversation (which ends with the user's question) and produce a SELECT statement over the weather_data table.
- A weather lookup needs at least a city and a date. If the conversation is missing required details, ask for them by replying with a JSON object as shown in the examples. If everything needed is present, reply with the bare SQL only.
- If the user asks something unrelated to weather, reply as the last two examples do.

Examples:
- Conversation: user: Beijing 2025-07-30
  Output: SELECT city, fx_date, temp_max, temp_min, text_day, text_night, humidity, wind_dir_day, precip FROM weather_data WHERE city = 'Beijing' AND fx_date = '2025-07-30'
- Conversation: user: Shanghai weather for the next 3 days
  Output: SELECT city, fx_date, temp_max, temp_min, text_day, text_night, humidity, wind_dir_day, precip FROM weather_data WHERE city = 'Shanghai' AND fx_date BETWEEN '2025-07-30' AND '2025-08-01' ORDER BY fx_date
- Conversation: user: weather in Beijing
  Output: {"status": "input_required", "message": "Please provide the date you want, e.g. '2025-07-30'."}
- Conversation: user: today
  agent: Which city?
  user: Beijing
  Output: SELECT city, fx_date, temp_max, temp_min, text_day, text_night, humidity, wind_dir_day, precip FROM weather_data WHERE city = 'Beijing' AND fx_date = '2025-07-30'
- Conversation: user: hello
  Output: {"status": "input_required", "message": "Please provide a city and a date, e.g. 'Beijing 2025-07-30'."}
- Conversation: user: anything good to eat today
  Output: {"status": "input_required", "message": "Please ask a weather question including a city and a date."}

weather_data schema: {schema}
Conversation: {conversation}
Current date: {current_date}
"#;

const TICKET_SQL_TEMPLATE: &str = r#"System: You are a ticket SQL generator. From the conversation (which ends with the user's question), extract the user's intent and the key facts, then generate a SELECT statement over the train_tickets, flight_tickets or concert_tickets table.
1. Classify the intent as one of three kinds (train, flight, concert) and output the line {"type": "train/flight/concert"}. If the intent cannot be classified, reply as the last example does.
2. Generate the SELECT for the matching table, selecting only these columns:
- train_tickets: id, departure_city, arrival_city, departure_time, arrival_time, train_number, seat_type, price, remaining_seats
- flight_tickets: id, departure_city, arrival_city, departure_time, arrival_time, flight_number, cabin_type, price, remaining_seats
- concert_tickets: id, artist, city, venue, start_time, end_time, ticket_type, price, remaining_seats
3. If required details are missing, output {"status": "input_required", "message": "Please provide the ticket kind (train, flight or concert) and the required details such as city and date."} as shown below. The required details per kind are:
- train/flight: departure_city, arrival_city and date, or the train/flight number
- concert: city, artist and date
4. Output exactly two lines (type line then SQL) or the single JSON line. No other text.

Examples:
- Conversation: user: train tickets Beijing to Shanghai 2025-07-31 hard sleeper
  Output:
{"type": "train"}
SELECT id, departure_city, arrival_city, departure_time, arrival_time, train_number, seat_type, price, remaining_seats FROM train_tickets WHERE departure_city = 'Beijing' AND arrival_city = 'Shanghai' AND DATE(departure_time) = '2025-07-31' AND seat_type = 'hard sleeper'
- Conversation: user: flights Shanghai to Guangzhou 2025-09-11 first class
  Output:
{"type": "flight"}
SELECT id, departure_city, arrival_city, departure_time, arrival_time, flight_number, cabin_type, price, remaining_seats FROM flight_tickets WHERE departure_city = 'Shanghai' AND arrival_city = 'Guangzhou' AND DATE(departure_time) = '2025-09-11' AND cabin_type = 'first class'
- Conversation: user: Dao Lang concert in Beijing 2025-08-23 stand
  Output:
{"type": "concert"}
SELECT id, artist, city, venue, start_time, end_time, ticket_type, price, remaining_seats FROM concert_tickets WHERE city = 'Beijing' AND artist = 'Dao Lang' AND DATE(start_time) = '2025-08-23' AND ticket_type = 'stand'
- Conversation: user: train tickets
  Output:
{"status": "input_required", "message": "Please provide the ticket kind (train, flight or concert) and the required details such as city and date."}
- Conversation: user: hello
  Output:
{"status": "input_required", "message": "Please provide the ticket kind (train, flight or concert) and the required details such as city and date."}

Table schemas: {schema}
Conversation: {conversation}
Current date: {current_date}
"#;

const ORDER_SYSTEM_TEMPLATE: &str = r#"You are a ticket booking assistant. You complete train, flight and concert ticket orders by calling booking tools.

Available tools:
{tools}

Rules:
- To call a tool, reply with exactly one JSON object and nothing else: {"tool": "<name>", "arguments": {"key": "value", ...}}.
- Work out which parameters the tool needs and extract them from the user's request and the availability information. Never invent parameter values.
- If a required parameter cannot be found, reply with {"status": "input_required", "message": "<your question to the user>"} instead of calling a tool.
- After a tool result arrives, reply with a short plain-text confirmation for the user.
"#;

/// Build the weather SQL-generation prompt.
pub fn weather_sql_prompt(conversation: &str, current_date: &str) -> String {
    WEATHER_SQL_TEMPLATE
        .replace("{schema}", WEATHER_SCHEMA)
        .replace("{conversation}", conversation)
        .replace("{current_date}", current_date)
}

/// Build the ticket SQL-generation prompt.
pub fn ticket_sql_prompt(conversation: &str, current_date: &str) -> String {
    TICKET_SQL_TEMPLATE
        .replace("{schema}", TICKET_SCHEMA)
        .replace("{conversation}", conversation)
        .replace("{current_date}", current_date)
}

/// Build the order agent's system prompt from the live tool descriptors.
pub fn order_system_prompt(tools: &[ToolDescriptor]) -> String {
    let tool_lines = tools
        .iter()
        .map(|t| format!("- {}: {}", t.name, t.description))
        .collect::<Vec<_>>()
        .join("\n");
    ORDER_SYSTEM_TEMPLATE.replace("{tools}", &tool_lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_prompt_fills_slots() {
        let prompt = weather_sql_prompt("user: Beijing tomorrow", "2025-08-07");
        assert!(prompt.contains("user: Beijing tomorrow"));
        assert!(prompt.contains("Current date: 2025-08-07"));
        assert!(prompt.contains("CREATE TABLE weather_data"));
        assert!(!prompt.contains("{conversation}"));
    }

    #[test]
    fn ticket_prompt_lists_all_three_tables() {
        let prompt = ticket_sql_prompt("user: trains to Shanghai", "2025-08-07");
        assert!(prompt.contains("train_tickets"));
        assert!(prompt.contains("flight_tickets"));
        assert!(prompt.contains("concert_tickets"));
        assert!(prompt.contains(r#"{"type": "train"}"#));
    }

    #[test]
    fn order_prompt_embeds_tool_descriptors() {
        let tools = vec![ToolDescriptor {
            name: "order_train".into(),
            description: "Book train tickets".into(),
        }];
        let prompt = order_system_prompt(&tools);
        assert!(prompt.contains("- order_train: Book train tickets"));
        assert!(!prompt.contains("{tools}"));
    }
}
