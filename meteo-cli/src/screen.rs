//! Terminal rendition of the search view.
//!
//! The terminal is append-only, so "hiding" a panel is a state change rather
//! than an erase: the suggestion list and stats are kept in memory for the
//! prompt layer, and the weather/error/loading panels are printed when shown.

use std::sync::Mutex;

use chrono::Timelike;
use meteo_core::model::HourlyRow;
use meteo_core::{CitySuggestion, SearchStat, Screen, WeatherReport, codes};

#[derive(Debug, Default)]
pub struct TerminalScreen {
    input: Mutex<String>,
    suggestions: Mutex<Vec<String>>,
    stats: Mutex<Vec<SearchStat>>,
}

impl TerminalScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suggestion rows currently live, for the autocompleting prompt.
    pub fn visible_suggestions(&self) -> Vec<String> {
        self.suggestions.lock().expect("screen lock").clone()
    }

    /// Last rendered popular-searches list, for the picker.
    pub fn stats_snapshot(&self) -> Vec<SearchStat> {
        self.stats.lock().expect("screen lock").clone()
    }
}

impl Screen for TerminalScreen {
    fn set_input(&self, text: &str) {
        *self.input.lock().expect("screen lock") = text.to_string();
    }

    fn show_suggestions(&self, cities: &[CitySuggestion]) {
        *self.suggestions.lock().expect("screen lock") =
            cities.iter().map(|c| c.name.clone()).collect();
    }

    fn hide_suggestions(&self) {
        self.suggestions.lock().expect("screen lock").clear();
    }

    fn set_loading(&self, visible: bool) {
        if visible {
            println!("Загрузка...");
        }
    }

    fn show_error(&self, message: &str) {
        println!("Ошибка: {message}");
    }

    fn hide_error(&self) {
        // Append-only output; the previous error simply scrolls away.
    }

    fn show_weather(&self, report: &WeatherReport) {
        println!();
        for line in format_weather(report) {
            println!("{line}");
        }
        println!();
    }

    fn hide_weather(&self) {
        // Append-only output, nothing to erase.
    }

    fn show_stats(&self, stats: &[SearchStat]) {
        *self.stats.lock().expect("screen lock") = stats.to_vec();

        if stats.is_empty() {
            return;
        }
        println!("Популярные запросы:");
        for stat in stats {
            println!("  {} ({})", stat.city, stat.count);
        }
    }
}

/// Render a full report as display lines: header, current conditions, then
/// one line per hourly row in array order.
pub fn format_weather(report: &WeatherReport) -> Vec<String> {
    let mut lines = vec![
        format_header(report),
        format!(
            "{}  {}",
            format_temperature(report.current.temperature_2m),
            codes::description(report.current.weather_code)
        ),
        format_humidity(report.current.relative_humidity_2m),
        format_wind(report.current.wind_speed_10m),
    ];

    if !report.hourly.is_empty() {
        lines.push("Прогноз по часам:".to_string());
        lines.extend(report.hourly.rows().map(|row| format_hourly_row(&row)));
    }

    lines
}

pub fn format_header(report: &WeatherReport) -> String {
    format!("{}, {}", report.city, report.country)
}

/// Temperature rounded to the nearest whole degree.
pub fn format_temperature(celsius: f64) -> String {
    format!("{}°C", celsius.round() as i64)
}

/// Humidity with the raw backend value.
pub fn format_humidity(percent: f64) -> String {
    format!("Влажность: {percent}%")
}

/// Wind speed with the raw backend value.
pub fn format_wind(kmh: f64) -> String {
    format!("Ветер: {kmh} км/ч")
}

/// One hourly forecast line. Missing cells render as blanks, an out-of-table
/// or missing code renders as the fallback description.
pub fn format_hourly_row(row: &HourlyRow) -> String {
    let hour = row
        .time
        .map_or_else(|| "--:--".to_string(), |t| format!("{}:00", t.hour()));

    let temperature = row
        .temperature
        .map_or_else(|| "--".to_string(), format_temperature);

    let description = row
        .weather_code
        .map_or(codes::UNKNOWN_CONDITION, codes::description);

    format!("{hour}  {temperature}  {description}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use meteo_core::{CurrentConditions, HourlyForecast};

    fn report() -> WeatherReport {
        WeatherReport {
            city: "Paris".into(),
            country: "France".into(),
            current: CurrentConditions {
                temperature_2m: 18.6,
                relative_humidity_2m: 55.0,
                wind_speed_10m: 12.0,
                weather_code: 2,
            },
            hourly: HourlyForecast {
                time: vec!["2024-01-01T10:00:00".into()],
                temperature: vec![19.2],
                weather_code: vec![1],
            },
        }
    }

    #[test]
    fn header_joins_city_and_country() {
        assert_eq!(format_header(&report()), "Paris, France");
    }

    #[test]
    fn temperature_rounds_to_nearest_degree() {
        assert_eq!(format_temperature(18.6), "19°C");
        assert_eq!(format_temperature(19.2), "19°C");
        assert_eq!(format_temperature(-3.5), "-4°C");
        assert_eq!(format_temperature(0.0), "0°C");
    }

    #[test]
    fn humidity_and_wind_print_raw_values() {
        assert_eq!(format_humidity(55.0), "Влажность: 55%");
        assert_eq!(format_wind(12.0), "Ветер: 12 км/ч");
        assert_eq!(format_wind(12.5), "Ветер: 12.5 км/ч");
    }

    #[test]
    fn full_report_renders_expected_lines() {
        let lines = format_weather(&report());

        assert_eq!(
            lines,
            vec![
                "Paris, France",
                "19°C  Переменная облачность",
                "Влажность: 55%",
                "Ветер: 12 км/ч",
                "Прогноз по часам:",
                "10:00  19°C  Преимущественно ясно",
            ]
        );
    }

    #[test]
    fn hour_is_not_zero_padded() {
        let hourly = HourlyForecast {
            time: vec!["2024-01-01T09:00".into()],
            temperature: vec![5.0],
            weather_code: vec![0],
        };
        let row = hourly.rows().next().expect("one row");

        assert_eq!(format_hourly_row(&row), "9:00  5°C  Ясно");
    }

    #[test]
    fn out_of_table_code_renders_fallback_everywhere() {
        let mut rep = report();
        rep.current.weather_code = 999;
        rep.hourly.weather_code = vec![999];

        let lines = format_weather(&rep);
        assert_eq!(lines[1], "19°C  Неизвестно");
        assert_eq!(lines[5], "10:00  19°C  Неизвестно");
    }

    #[test]
    fn missing_cells_render_blanks_not_errors() {
        let hourly = HourlyForecast {
            time: vec!["garbage".into()],
            temperature: vec![],
            weather_code: vec![],
        };
        let row = hourly.rows().next().expect("one row");

        assert_eq!(format_hourly_row(&row), "--:--  --  Неизвестно");
    }

    #[test]
    fn report_without_hourly_omits_the_forecast_section() {
        let mut rep = report();
        rep.hourly = HourlyForecast::default();

        let lines = format_weather(&rep);
        assert_eq!(lines.len(), 4);
        assert!(!lines.iter().any(|l| l.contains("Прогноз")));
    }

    #[test]
    fn screen_keeps_suggestions_until_hidden() {
        let screen = TerminalScreen::new();
        screen.show_suggestions(&[
            CitySuggestion { name: "Paris".into() },
            CitySuggestion { name: "Parma".into() },
        ]);

        assert_eq!(screen.visible_suggestions(), vec!["Paris", "Parma"]);

        screen.hide_suggestions();
        assert!(screen.visible_suggestions().is_empty());
    }

    #[test]
    fn screen_keeps_the_last_stats_for_the_picker() {
        let screen = TerminalScreen::new();
        screen.show_stats(&[SearchStat { city: "Paris".into(), count: 3 }]);
        screen.show_stats(&[SearchStat { city: "Kyiv".into(), count: 1 }]);

        let snapshot = screen.stats_snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].city, "Kyiv");
    }
}
