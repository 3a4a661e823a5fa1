use std::fmt;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{Credits, ListResponse, MovieDetail};

pub const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w185";
const LANGUAGE: &str = "en-US";
const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Result of a catalog request.
///
/// Transport and HTTP failures never escape as errors; they come back as
/// `Failed` so callers can tell "the call failed" apart from "zero results".
#[derive(Debug, Clone)]
pub enum FetchOutcome<T> {
    Loaded(T),
    Empty,
    Failed(FetchFailure),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchFailure {
    pub path: String,
    pub status: Option<u16>,
    pub reason: String,
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} returned {}: {}", self.path, status, self.reason),
            None => write!(f, "{} failed: {}", self.path, self.reason),
        }
    }
}

impl<T> FetchOutcome<T> {
    pub fn is_failed(&self) -> bool {
        matches!(self, FetchOutcome::Failed(_))
    }

    /// `Empty` becomes `Ok(None)`, `Failed` becomes [`Error::ExternalApi`]
    pub fn into_result(self) -> Result<Option<T>> {
        match self {
            FetchOutcome::Loaded(value) => Ok(Some(value)),
            FetchOutcome::Empty => Ok(None),
            FetchOutcome::Failed(failure) => Err(Error::ExternalApi(failure.to_string())),
        }
    }
}

/// A decoded catalog response that knows whether it carries anything
pub trait CatalogPayload: DeserializeOwned {
    fn is_empty(&self) -> bool {
        false
    }
}

impl CatalogPayload for ListResponse {
    fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl CatalogPayload for Credits {
    fn is_empty(&self) -> bool {
        self.cast.is_empty() && self.crew.is_empty()
    }
}

impl CatalogPayload for MovieDetail {}

/// Read-only client for the TMDB v3 API, authenticated with a v4 bearer token
pub struct TmdbClient {
    client: reqwest::Client,
    base_url: String,
}

impl TmdbClient {
    pub fn new(token: &str) -> Result<Self> {
        Self::with_base_url(token, TMDB_BASE_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_base_url(
            &config.tmdb_token,
            &config.tmdb_base_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn with_base_url(token: &str, base_url: &str, timeout: Duration) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
            .map_err(|_| Error::Configuration("TMDB token contains invalid characters".into()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, auth);

        // Redirects are not followed; a 3xx is reported like any other failure
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET `endpoint` (path plus query) relative to the base URL
    pub async fn fetch<T: CatalogPayload>(&self, endpoint: &str) -> FetchOutcome<T> {
        let path = if endpoint.starts_with('/') {
            endpoint.to_string()
        } else {
            format!("/{}", endpoint)
        };
        let url = format!("{}{}", self.base_url, path);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("TMDB request failed for {}: {}", path, e);
                return FetchOutcome::Failed(FetchFailure {
                    path,
                    status: e.status().map(|s| s.as_u16()),
                    reason: e.to_string(),
                });
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("TMDB API error for {}: {}", path, status);
            return FetchOutcome::Failed(FetchFailure {
                path,
                status: Some(status.as_u16()),
                reason: status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string(),
            });
        }

        debug!("TMDB {} {}", status.as_u16(), path);

        match response.json::<T>().await {
            Ok(payload) if payload.is_empty() => FetchOutcome::Empty,
            Ok(payload) => FetchOutcome::Loaded(payload),
            Err(e) => {
                warn!("TMDB response for {} could not be decoded: {}", path, e);
                FetchOutcome::Failed(FetchFailure {
                    path,
                    status: Some(status.as_u16()),
                    reason: e.to_string(),
                })
            }
        }
    }

    pub async fn now_playing(&self) -> FetchOutcome<ListResponse> {
        self.fetch(&format!("/movie/now_playing?language={}&page=1", LANGUAGE))
            .await
    }

    pub async fn popular(&self) -> FetchOutcome<ListResponse> {
        self.fetch(&format!("/movie/popular?language={}&page=1", LANGUAGE))
            .await
    }

    pub async fn upcoming(&self) -> FetchOutcome<ListResponse> {
        self.fetch(&format!("/movie/upcoming?language={}&page=1", LANGUAGE))
            .await
    }

    pub async fn movie_details(&self, id: i64) -> FetchOutcome<MovieDetail> {
        self.fetch(&format!("/movie/{}?language={}", id, LANGUAGE))
            .await
    }

    pub async fn movie_credits(&self, id: i64) -> FetchOutcome<Credits> {
        self.fetch(&format!("/movie/{}/credits", id)).await
    }

    pub async fn movie_recommendations(&self, id: i64) -> FetchOutcome<ListResponse> {
        self.fetch(&format!(
            "/movie/{}/recommendations?language={}&page=1",
            id, LANGUAGE
        ))
        .await
    }

    /// Free-text search, adult titles excluded
    pub async fn search_movies(&self, query: &str) -> FetchOutcome<ListResponse> {
        self.fetch(&format!(
            "/search/movie?query={}&include_adult=false&language={}&page=1",
            urlencoding::encode(query),
            LANGUAGE
        ))
        .await
    }

    /// Details, credits and recommendations in one round trip
    pub async fn movie_details_full(&self, id: i64) -> FetchOutcome<MovieDetail> {
        self.fetch(&format!(
            "/movie/{}?language={}&append_to_response=credits,recommendations",
            id, LANGUAGE
        ))
        .await
    }
}

/// Full image URL for a poster, backdrop or profile path.
/// `None` means the caller should show a placeholder.
pub fn image_url(path: Option<&str>) -> Option<String> {
    path.filter(|p| !p.is_empty())
        .map(|p| format!("{}{}", IMAGE_BASE_URL, p))
}
