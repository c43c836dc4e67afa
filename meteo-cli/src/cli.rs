use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use meteo_core::{Config, HttpBackend, SearchController};

use crate::screen::TerminalScreen;
use crate::session;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "meteo", version, about = "City weather search client")]
pub struct Cli {
    /// Backend base URL, overriding the configured one for this run.
    #[arg(long)]
    pub backend_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the backend base URL in the config file.
    Configure {
        /// Backend base URL, e.g. "http://127.0.0.1:8000".
        backend_url: String,
    },

    /// Search a city once, print the result and exit.
    Search {
        /// City name.
        city: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure { backend_url }) => {
                let mut config = Config::load()?;
                config.backend_url = backend_url;
                config.save()?;

                println!("Saved backend URL to {}", Config::config_file_path()?.display());
                Ok(())
            }
            Some(Command::Search { city }) => {
                let controller = build_controller(self.backend_url)?;
                controller.submit(&city).await;
                Ok(())
            }
            None => {
                let controller = build_controller(self.backend_url)?;
                session::run(controller).await
            }
        }
    }
}

fn build_controller(override_url: Option<String>) -> anyhow::Result<session::Controller> {
    let config = Config::load()?;
    let backend_url = override_url.unwrap_or_else(|| config.backend_url.clone());

    let backend = HttpBackend::with_timeout(backend_url, config.request_timeout())
        .context("Failed to initialize the HTTP client")?;
    let screen = Arc::new(TerminalScreen::new());

    Ok(SearchController::new(backend, screen, config.debounce()))
}
