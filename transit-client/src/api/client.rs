//! Transit backend HTTP client.
//!
//! Provides async methods for the route catalog and per-route schedules.
//! Requests are not retried; callers decide how to surface failures.

use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{RouteId, RouteItem};

use super::error::ApiError;
use super::types::{AllRoutesResponse, RouteSchedule, ScheduleResponse};

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Longest body excerpt kept in error values.
const BODY_EXCERPT_CHARS: usize = 500;

/// Configuration for the transit API client.
#[derive(Debug, Clone)]
pub struct TransitApiConfig {
    /// Base URL of the backend, e.g. `https://transit.example.com/api`
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TransitApiConfig {
    /// Create a new config for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Transit backend API client.
#[derive(Debug, Clone)]
pub struct TransitApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl TransitApiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TransitApiConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| ApiError::InvalidUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl {
                url: config.base_url,
                reason: "URL cannot be a base".to_string(),
            });
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Fetch every route with its stops and shape.
    pub async fn all_routes(&self) -> Result<Vec<RouteItem>, ApiError> {
        let url = self.endpoint(&["all-routes", "details"]);
        let response: AllRoutesResponse = self.get_json(url).await?;
        debug!(routes = response.routes.len(), "fetched route catalog");
        Ok(response.routes)
    }

    /// Fetch today's trips for a route.
    ///
    /// A body carrying an `error` field is reported as [`ApiError::Backend`];
    /// an empty schedule is a successful [`RouteSchedule::NoService`].
    pub async fn route_schedule(&self, route_id: &RouteId) -> Result<RouteSchedule, ApiError> {
        let url = self.endpoint(&["routes", route_id.as_str(), "schedule"]);
        let response: ScheduleResponse = self.get_json(url).await?;
        response.into_schedule().map_err(ApiError::Backend)
    }

    /// Join path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        debug!(%url, "GET");
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: body.chars().take(BODY_EXCERPT_CHARS).collect(),
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| ApiError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(BODY_EXCERPT_CHARS).collect()),
        })
    }
}
