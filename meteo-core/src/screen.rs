use crate::model::{CitySuggestion, SearchStat, WeatherReport};

/// Render target of the search controller.
///
/// One method per panel toggle of the search view: text input, suggestion
/// dropdown, loading indicator, error panel, weather result panel and the
/// popular-searches panel. Implementations own their presentation state and
/// may be called from spawned tasks, so methods take `&self` and mutation
/// goes through interior mutability.
pub trait Screen: Send + Sync {
    /// Replace the contents of the search input.
    fn set_input(&self, text: &str);

    /// Replace the suggestion list and make it visible.
    fn show_suggestions(&self, cities: &[CitySuggestion]);

    /// Hide the suggestion list.
    fn hide_suggestions(&self);

    /// Toggle the loading indicator.
    fn set_loading(&self, visible: bool);

    /// Show the error panel with the given message.
    fn show_error(&self, message: &str);

    /// Hide the error panel.
    fn hide_error(&self);

    /// Replace the weather result panel and make it visible.
    fn show_weather(&self, report: &WeatherReport);

    /// Hide the weather result panel.
    fn hide_weather(&self);

    /// Replace the popular-searches panel, in the given order.
    fn show_stats(&self, stats: &[SearchStat]);
}

impl<S: Screen + ?Sized> Screen for std::sync::Arc<S> {
    fn set_input(&self, text: &str) {
        (**self).set_input(text);
    }

    fn show_suggestions(&self, cities: &[CitySuggestion]) {
        (**self).show_suggestions(cities);
    }

    fn hide_suggestions(&self) {
        (**self).hide_suggestions();
    }

    fn set_loading(&self, visible: bool) {
        (**self).set_loading(visible);
    }

    fn show_error(&self, message: &str) {
        (**self).show_error(message);
    }

    fn hide_error(&self) {
        (**self).hide_error();
    }

    fn show_weather(&self, report: &WeatherReport) {
        (**self).show_weather(report);
    }

    fn hide_weather(&self) {
        (**self).hide_weather();
    }

    fn show_stats(&self, stats: &[SearchStat]) {
        (**self).show_stats(stats);
    }
}
