//! Interactive search session.
//!
//! The prompt layer is blocking (inquire drives the terminal itself), so
//! prompts run under `spawn_blocking` while the controller's debounce timer
//! and fetches live on the async runtime. Each keystroke inside the prompt
//! feeds the controller; the suggestion list the prompt displays is whatever
//! the controller last rendered to the screen.

use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use inquire::autocompletion::{Autocomplete, Replacement};
use inquire::{CustomUserError, InquireError, Select, Text};
use meteo_core::{HttpBackend, SearchController, SearchStat};
use tokio::runtime::Handle;

use crate::screen::TerminalScreen;

pub type Controller = SearchController<HttpBackend, Arc<TerminalScreen>>;

/// Bridges inquire's per-keystroke callback to the controller.
#[derive(Clone)]
struct CitySuggester {
    controller: Controller,
    runtime: Handle,
}

impl Autocomplete for CitySuggester {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        // The debounce timer is spawned from the prompt thread, so enter the
        // runtime for the duration of the call.
        let _guard = self.runtime.enter();
        self.controller.input_changed(input);

        Ok(self.controller.screen().visible_suggestions())
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        Ok(highlighted_suggestion)
    }
}

struct StatOption(SearchStat);

impl fmt::Display for StatOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0.city, self.0.count)
    }
}

/// Run the interactive session until the user interrupts it.
pub async fn run(controller: Controller) -> Result<()> {
    controller.load_search_stats().await;

    println!("Поиск погоды по городу. Enter - поиск, Esc - популярные запросы, Ctrl-C - выход.");

    let runtime = Handle::current();

    loop {
        let suggester = CitySuggester {
            controller: controller.clone(),
            runtime: runtime.clone(),
        };

        let submitted = tokio::task::spawn_blocking(move || {
            Text::new("Город:")
                .with_autocomplete(suggester)
                .with_help_message("начните вводить название, минимум 2 буквы")
                .prompt()
        })
        .await?;

        match submitted {
            Ok(city) => controller.submit(&city).await,
            Err(InquireError::OperationCanceled) => {
                controller.dismiss_suggestions();
                offer_popular(&controller).await?;
            }
            Err(InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

/// The popular-searches panel as a picker; choosing a row re-runs the search.
async fn offer_popular(controller: &Controller) -> Result<()> {
    let stats = controller.screen().stats_snapshot();
    if stats.is_empty() {
        return Ok(());
    }

    let options: Vec<StatOption> = stats.into_iter().map(StatOption).collect();

    let choice = tokio::task::spawn_blocking(move || {
        Select::new("Популярные запросы:", options).prompt()
    })
    .await?;

    match choice {
        Ok(stat) => controller.select_stat(&stat.0.city).await,
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {}
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
