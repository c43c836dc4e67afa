use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::backend::Backend;
use crate::screen::Screen;

/// Orchestrates autocomplete, search and the popular-searches panel.
///
/// The controller owns no state beyond its collaborators and the handle of
/// the pending debounce timer. It is a cheap clonable handle over shared
/// inner state, so spawned timer tasks and the prompt layer can hold it
/// concurrently.
///
/// All screen updates are applied in the order responses arrive; there is no
/// fencing of late autocomplete responses against newer ones.
#[derive(Debug)]
pub struct SearchController<B, S> {
    shared: Arc<Shared<B, S>>,
}

#[derive(Debug)]
struct Shared<B, S> {
    backend: B,
    screen: S,
    debounce: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<B, S> Clone for SearchController<B, S> {
    fn clone(&self) -> Self {
        Self { shared: Arc::clone(&self.shared) }
    }
}

impl<B, S> SearchController<B, S>
where
    B: Backend + 'static,
    S: Screen + 'static,
{
    pub fn new(backend: B, screen: S, debounce: Duration) -> Self {
        Self {
            shared: Arc::new(Shared {
                backend,
                screen,
                debounce,
                pending: Mutex::new(None),
            }),
        }
    }

    /// The render target, for layers that also read presentation state.
    pub fn screen(&self) -> &S {
        &self.shared.screen
    }

    /// React to a keystroke in the search input.
    ///
    /// Cancels the pending debounce timer, if any. Queries shorter than two
    /// characters after trimming hide the suggestion list without fetching;
    /// anything longer arms a fresh timer, so only the final query of a
    /// typing burst ever reaches the backend.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn input_changed(&self, raw: &str) {
        let mut pending = self.lock_pending();
        if let Some(timer) = pending.take() {
            timer.abort();
        }

        let query = raw.trim().to_string();
        if query.chars().count() < 2 {
            self.shared.screen.hide_suggestions();
            return;
        }

        let shared = Arc::clone(&self.shared);
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(shared.debounce).await;
            shared.fetch_suggestions(&query).await;
        }));
    }

    /// A suggestion row was chosen: adopt it as the input and search.
    pub async fn select_suggestion(&self, name: &str) {
        self.shared.screen.set_input(name);
        self.shared.screen.hide_suggestions();
        self.search_city(name).await;
    }

    /// The input was submitted (Enter). Empty input is ignored.
    pub async fn submit(&self, raw: &str) {
        let city = raw.trim();
        if city.is_empty() {
            return;
        }

        self.shared.screen.hide_suggestions();
        self.search_city(city).await;
    }

    /// Focus left the search area: hide the suggestion list, search nothing.
    pub fn dismiss_suggestions(&self) {
        self.shared.screen.hide_suggestions();
    }

    /// A popular-searches row was chosen: adopt it as the input and search.
    pub async fn select_stat(&self, city: &str) {
        self.shared.screen.set_input(city);
        self.search_city(city).await;
    }

    /// Run a search and render its outcome.
    ///
    /// The loading indicator is visible exactly for the duration of the
    /// backend call; it is cleared on every exit path. A successful search
    /// also refreshes the popular-searches panel.
    pub async fn search_city(&self, city: &str) {
        let shared = &self.shared;

        shared.screen.set_loading(true);
        shared.screen.hide_error();
        shared.screen.hide_weather();

        match shared.backend.search(city).await {
            Ok(report) => {
                shared.screen.show_weather(&report);
                self.load_search_stats().await;
            }
            Err(err) => shared.screen.show_error(&err.to_string()),
        }

        shared.screen.set_loading(false);
    }

    /// Refresh the popular-searches panel.
    ///
    /// Failures are logged and leave the panel as it was; stats are a
    /// best-effort feature.
    pub async fn load_search_stats(&self) {
        match self.shared.backend.stats().await {
            Ok(stats) => self.shared.screen.show_stats(&stats),
            Err(err) => warn!(error = %err, "failed to load search stats"),
        }
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        // The lock only guards the timer handle and is never held across an
        // await point, so a poisoned lock can safely be taken over.
        self.shared
            .pending
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<B, S> Shared<B, S>
where
    B: Backend,
    S: Screen,
{
    async fn fetch_suggestions(&self, query: &str) {
        match self.backend.autocomplete(query).await {
            Ok(cities) if cities.is_empty() => self.screen.hide_suggestions(),
            Ok(cities) => self.screen.show_suggestions(&cities),
            // The list stays in whatever state it was in; autocomplete is a
            // best-effort feature.
            Err(err) => warn!(error = %err, query = %query, "autocomplete request failed"),
        }
    }
}

impl<B, S> Drop for Shared<B, S> {
    fn drop(&mut self) {
        if let Ok(mut pending) = self.pending.lock()
            && let Some(timer) = pending.take()
        {
            timer.abort();
        }
    }
}
