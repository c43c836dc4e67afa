//! Core library for the `meteo` city weather search client.
//!
//! This crate defines:
//! - Configuration handling
//! - Domain models (suggestions, weather reports, search stats)
//! - The weather-code description table
//! - The backend HTTP client behind the [`Backend`] trait
//! - The [`SearchController`] driving autocomplete, search and stats
//!
//! It is used by `meteo-cli`, but can also be reused by other frontends.

pub mod backend;
pub mod codes;
pub mod config;
pub mod controller;
pub mod model;
pub mod screen;

pub use backend::{Backend, BackendError, HttpBackend, SEARCH_FAILED_FALLBACK};
pub use config::Config;
pub use controller::SearchController;
pub use model::{
    CitySuggestion, CurrentConditions, HourlyForecast, HourlyRow, SearchStat, WeatherReport,
};
pub use screen::Screen;
