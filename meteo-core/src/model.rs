use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One autocomplete suggestion as returned by `/cities/autocomplete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitySuggestion {
    pub name: String,
}

/// Current conditions block of a weather report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_2m: f64,
    pub relative_humidity_2m: f64,
    pub wind_speed_10m: f64,
    pub weather_code: u16,
}

/// Hourly forecast as parallel, index-aligned arrays.
///
/// Timestamps stay raw strings and are parsed at render time; the arrays
/// individually default to empty so a payload missing one of them still
/// deserializes and degrades row by row instead of rejecting the report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HourlyForecast {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature: Vec<f64>,
    #[serde(default)]
    pub weather_code: Vec<u16>,
}

/// One display row of the hourly forecast.
///
/// Cells are `None` when the backing array is shorter than `time` or the
/// timestamp does not parse; renderers show blanks for those.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyRow {
    pub time: Option<NaiveDateTime>,
    pub temperature: Option<f64>,
    pub weather_code: Option<u16>,
}

impl HourlyForecast {
    /// Number of rows, driven by the `time` array.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Iterate rows in array order, one per entry of `time`.
    pub fn rows(&self) -> impl Iterator<Item = HourlyRow> + '_ {
        self.time.iter().enumerate().map(|(i, raw)| HourlyRow {
            time: parse_timestamp(raw),
            temperature: self.temperature.get(i).copied(),
            weather_code: self.weather_code.get(i).copied(),
        })
    }
}

/// Full weather report returned by a successful `/search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    pub country: String,
    pub current: CurrentConditions,
    #[serde(default)]
    pub hourly: HourlyForecast,
}

/// One entry of the popular-searches list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStat {
    pub city: String,
    pub count: u64,
}

/// Envelope of the `/stats` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub stats: Vec<SearchStat>,
}

/// Parse an hourly timestamp, with or without seconds.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}
