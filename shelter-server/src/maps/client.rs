//! Maps web services HTTP client.
//!
//! Provides async methods for the three services the locator needs: place
//! text search, the distance matrix and directions. Handles authentication,
//! HTTP and payload status checks, and conversion to domain types.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::{Geocoordinate, Shelter};
use crate::locator::{DistanceMatrix, PlaceQuery};

use super::convert::{convert_matrix, convert_places, convert_routes};
use super::error::MapsError;
use super::types::{
    DirectionsResponse, DistanceMatrixResponse, PlacesResponse, STATUS_OK, STATUS_ZERO_RESULTS,
};

/// Default base URL for the maps web services.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Default per-request deadline in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Travel mode for every distance and route request.
const TRAVEL_MODE: &str = "walking";

/// Features routes must avoid.
const AVOID: &str = "highways";

/// Configuration for the maps client.
#[derive(Debug, Clone)]
pub struct MapsConfig {
    /// API key, sent as the `key` request parameter
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MapsConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Maps web services client.
///
/// Every request carries the configured timeout; an expired deadline is
/// reported as an HTTP error like any other transport failure.
#[derive(Debug, Clone)]
pub struct MapsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl MapsClient {
    /// Create a new maps client with the given configuration.
    pub fn new(config: MapsConfig) -> Result<Self, MapsError> {
        if config.timeout_secs == 0 {
            return Err(MapsError::Config("timeout must be at least one second".into()));
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    /// Search for places matching `query` within its radius.
    ///
    /// `ZERO_RESULTS` is returned as an empty list.
    pub async fn fetch_places(&self, query: &PlaceQuery<'_>) -> Result<Vec<Shelter>, MapsError> {
        let mut params = vec![
            ("query", query.query.to_string()),
            ("location", query.origin.to_string()),
            ("radius", query.radius_meters.to_string()),
            ("language", query.language.to_string()),
        ];
        // The service treats the parameter's presence as the filter.
        if query.open_now {
            params.push(("opennow", "true".to_string()));
        }

        let response: PlacesResponse = self.get_json("place/textsearch", &params).await?;
        check_status("place/textsearch", &response.status, response.error_message)?;

        Ok(convert_places(response.results))
    }

    /// Walking distances from `origin` to every destination in one request.
    pub async fn fetch_distance_matrix(
        &self,
        origin: Geocoordinate,
        destinations: &[Geocoordinate],
    ) -> Result<DistanceMatrix, MapsError> {
        let destinations = destinations
            .iter()
            .map(Geocoordinate::to_string)
            .collect::<Vec<_>>()
            .join("|");

        let params = [
            ("origins", origin.to_string()),
            ("destinations", destinations),
            ("mode", TRAVEL_MODE.to_string()),
            ("avoid", AVOID.to_string()),
            ("units", "metric".to_string()),
        ];

        let response: DistanceMatrixResponse = self.get_json("distancematrix", &params).await?;
        check_status("distancematrix", &response.status, response.error_message.clone())?;

        Ok(convert_matrix(response))
    }

    /// Walking routes from `origin` to `destination` as encoded polylines.
    ///
    /// `ZERO_RESULTS` is returned as an empty list.
    pub async fn fetch_directions(
        &self,
        origin: Geocoordinate,
        destination: Geocoordinate,
    ) -> Result<Vec<String>, MapsError> {
        let params = [
            ("origin", origin.to_string()),
            ("destination", destination.to_string()),
            ("mode", TRAVEL_MODE.to_string()),
            ("avoid", AVOID.to_string()),
        ];

        let response: DirectionsResponse = self.get_json("directions", &params).await?;
        check_status("directions", &response.status, response.error_message.clone())?;

        Ok(convert_routes(response))
    }

    /// GET `{base}/{endpoint}/json` with the API key appended.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        params: &[(&str, String)],
    ) -> Result<T, MapsError> {
        let url = format!("{}/{}/json", self.base_url, endpoint);
        debug!(endpoint, "maps request");

        let response = self
            .http
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .inspect_err(|e| warn!(endpoint, error = %e, "maps request failed"))?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(MapsError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MapsError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MapsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| MapsError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

/// Map a payload status to an error. `OK` and `ZERO_RESULTS` both succeed.
fn check_status(
    endpoint: &'static str,
    status: &str,
    message: Option<String>,
) -> Result<(), MapsError> {
    match status {
        STATUS_OK | STATUS_ZERO_RESULTS => Ok(()),
        "REQUEST_DENIED" => Err(MapsError::Unauthorized),
        "OVER_QUERY_LIMIT" | "OVER_DAILY_LIMIT" => Err(MapsError::RateLimited),
        other => {
            warn!(endpoint, status = other, message = ?message, "maps service error");
            Err(MapsError::Status {
                endpoint,
                status: other.to_string(),
                message,
            })
        }
    }
}
