use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::{fmt::Debug, time::Duration};
use thiserror::Error;
use tracing::debug;

use crate::model::{CitySuggestion, SearchStat, StatsResponse, WeatherReport};

/// Error panel text when a failed search carries no usable `error` field.
pub const SEARCH_FAILED_FALLBACK: &str = "Не удалось получить данные о погоде";

/// Errors from the weather search backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Sending the request or reading the response failed.
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not the expected JSON.
    #[error("failed to decode backend response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The backend rejected a search. `message` is the server-supplied
    /// reason, already falling back to [`SEARCH_FAILED_FALLBACK`], and is
    /// what gets surfaced to the user verbatim.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
}

/// The three endpoints the client consumes.
#[async_trait]
pub trait Backend: Send + Sync + Debug {
    async fn autocomplete(&self, query: &str) -> Result<Vec<CitySuggestion>, BackendError>;

    async fn search(&self, city: &str) -> Result<WeatherReport, BackendError>;

    async fn stats(&self) -> Result<Vec<SearchStat>, BackendError>;
}

#[async_trait]
impl<B: Backend + ?Sized> Backend for std::sync::Arc<B> {
    async fn autocomplete(&self, query: &str) -> Result<Vec<CitySuggestion>, BackendError> {
        (**self).autocomplete(query).await
    }

    async fn search(&self, city: &str) -> Result<WeatherReport, BackendError> {
        (**self).search(city).await
    }

    async fn stats(&self) -> Result<Vec<SearchStat>, BackendError> {
        (**self).stats().await
    }
}

/// HTTP implementation over the real backend.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    http: Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Result<Self, BackendError> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[async_trait]
impl Backend for HttpBackend {
    async fn autocomplete(&self, query: &str) -> Result<Vec<CitySuggestion>, BackendError> {
        let url = format!("{}/cities/autocomplete", self.base_url);
        debug!(url = %url, query = %query, "fetching city suggestions");

        let res = self.http.get(&url).query(&[("q", query)]).send().await?;
        let body = res.text().await?;

        // The endpoint answers with a JSON array on every path; the status is
        // not inspected, a non-array body just fails to decode.
        Ok(serde_json::from_str(&body)?)
    }

    async fn search(&self, city: &str) -> Result<WeatherReport, BackendError> {
        let url = format!("{}/search", self.base_url);
        debug!(url = %url, city = %city, "searching city");

        let res = self.http.post(&url).form(&[("city", city)]).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|parsed| parsed.error)
                .unwrap_or_else(|| SEARCH_FAILED_FALLBACK.to_string());

            return Err(BackendError::Rejected { status, message });
        }

        Ok(serde_json::from_str(&body)?)
    }

    async fn stats(&self) -> Result<Vec<SearchStat>, BackendError> {
        let url = format!("{}/stats", self.base_url);
        debug!(url = %url, "fetching search stats");

        let res = self.http.get(&url).send().await?;
        let body = res.text().await?;

        let parsed: StatsResponse = serde_json::from_str(&body)?;
        Ok(parsed.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let backend = HttpBackend::new("http://localhost:8000/").expect("client must build");
        assert_eq!(backend.base_url, "http://localhost:8000");
    }

    #[test]
    fn rejected_error_displays_server_message() {
        let err = BackendError::Rejected {
            status: StatusCode::NOT_FOUND,
            message: "Город не найден".to_string(),
        };
        assert_eq!(err.to_string(), "Город не найден");
    }
}
