//! Expanding-radius place search.
//!
//! Queries the place search with a growing radius until it returns at least
//! one shelter or the radius reaches the configured cap. The first
//! non-empty radius wins: its results are returned as-is and no wider
//! search is attempted.

use std::future::Future;

use tracing::{debug, info};

use crate::domain::{Geocoordinate, Shelter};

use super::config::{SearchConfig, degrees_to_meters};
use super::error::LocatorError;

/// One place search request.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceQuery<'a> {
    pub origin: Geocoordinate,
    pub radius_meters: u32,
    pub query: &'a str,
    pub language: &'a str,
    pub open_now: bool,
}

/// Trait for point-of-interest search.
///
/// An empty result is a valid answer, not an error.
pub trait PlacesProvider {
    fn search_places(
        &self,
        query: &PlaceQuery<'_>,
    ) -> impl Future<Output = Result<Vec<Shelter>, LocatorError>> + Send;
}

/// Result of an expanding-radius search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Shelters found at the first non-empty radius; empty if none.
    pub shelters: Vec<Shelter>,

    /// Radius of the last search issued (degrees). The start radius if no
    /// search was issued.
    pub radius_degrees: f64,

    /// Number of place searches issued.
    pub attempts: u32,
}

impl SearchOutcome {
    pub fn is_empty(&self) -> bool {
        self.shelters.is_empty()
    }
}

/// Expanding-radius search controller.
pub struct RadiusSearch<'a, P: PlacesProvider> {
    provider: &'a P,
    config: &'a SearchConfig,
}

impl<'a, P: PlacesProvider> RadiusSearch<'a, P> {
    pub fn new(provider: &'a P, config: &'a SearchConfig) -> Self {
        Self { provider, config }
    }

    /// Search around `origin`, widening until something is found.
    ///
    /// Returns an empty outcome, not an error, when the radius cap is
    /// reached without results. Provider failures end the search
    /// immediately.
    pub async fn run(&self, origin: Geocoordinate) -> Result<SearchOutcome, LocatorError> {
        self.config.validate()?;

        let mut attempts = 0;
        let mut last_radius = self.config.start_radius_degrees;

        loop {
            let radius = self.config.radius_for_attempt(attempts);
            if radius >= self.config.max_radius_degrees {
                info!(
                    %origin,
                    radius = last_radius,
                    attempts,
                    "no shelters found before reaching radius cap"
                );
                return Ok(SearchOutcome {
                    shelters: Vec::new(),
                    radius_degrees: last_radius,
                    attempts,
                });
            }

            let query = PlaceQuery {
                origin,
                radius_meters: degrees_to_meters(radius),
                query: &self.config.query,
                language: &self.config.language,
                open_now: self.config.open_now,
            };
            let shelters = self.provider.search_places(&query).await?;
            attempts += 1;
            last_radius = radius;

            if !shelters.is_empty() {
                info!(
                    %origin,
                    radius,
                    attempts,
                    found = shelters.len(),
                    "shelters found"
                );
                return Ok(SearchOutcome {
                    shelters,
                    radius_degrees: radius,
                    attempts,
                });
            }

            debug!(
                radius,
                meters = query.radius_meters,
                "no shelters, expanding search radius"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::config::InvalidSearchConfig;
    use crate::locator::mock::{MockMaps, coord, shelter};

    fn origin() -> Geocoordinate {
        coord(32.0868, 34.7897)
    }

    #[tokio::test]
    async fn first_non_empty_radius_wins() {
        // Nothing within 6.5 km, two shelters from then on
        let maps = MockMaps::new().with_places_from(
            6_500,
            vec![shelter("A", 32.1, 34.8), shelter("B", 32.2, 34.9)],
        );
        let config = SearchConfig::default();

        let outcome = RadiusSearch::new(&maps, &config).run(origin()).await.unwrap();

        assert_eq!(outcome.shelters.len(), 2);
        assert_eq!(outcome.attempts, 3);
        assert_eq!(maps.place_radii(), vec![5550, 6105, 6660]);
        assert!((outcome.radius_degrees - 0.06).abs() < 1e-12);
    }

    #[tokio::test]
    async fn immediate_hit_issues_one_request() {
        let maps = MockMaps::new().with_places_from(0, vec![shelter("A", 32.1, 34.8)]);
        let config = SearchConfig::default();

        let outcome = RadiusSearch::new(&maps, &config).run(origin()).await.unwrap();

        assert_eq!(outcome.attempts, 1);
        assert_eq!(maps.place_calls(), 1);
        assert_eq!(outcome.radius_degrees, 0.05);
    }

    #[tokio::test]
    async fn exhausted_search_is_empty_not_error() {
        let maps = MockMaps::new();
        let config = SearchConfig::default();

        let outcome = RadiusSearch::new(&maps, &config).run(origin()).await.unwrap();

        assert!(outcome.is_empty());
        assert_eq!(outcome.attempts, 90);
        assert!(outcome.attempts <= config.max_attempts());
        assert!(outcome.radius_degrees < config.max_radius_degrees);
    }

    #[tokio::test]
    async fn radii_strictly_increase() {
        let maps = MockMaps::new();
        let config = SearchConfig::new(0.01, 0.003, 0.05);

        RadiusSearch::new(&maps, &config).run(origin()).await.unwrap();

        let radii = maps.place_radii();
        assert!(!radii.is_empty());
        assert!(radii.windows(2).all(|w| w[0] < w[1]));
        assert!(radii.len() as u32 <= config.max_attempts());
    }

    #[tokio::test]
    async fn start_at_cap_issues_no_requests() {
        let maps = MockMaps::new();
        let config = SearchConfig::new(0.5, 0.005, 0.5);

        let outcome = RadiusSearch::new(&maps, &config).run(origin()).await.unwrap();

        assert!(outcome.is_empty());
        assert_eq!(outcome.attempts, 0);
        assert_eq!(maps.place_calls(), 0);
    }

    #[tokio::test]
    async fn passes_query_settings() {
        let maps = MockMaps::new().with_places_from(0, vec![shelter("A", 32.1, 34.8)]);
        let config = SearchConfig::default().with_query("miklat").with_language("en");

        RadiusSearch::new(&maps, &config).run(origin()).await.unwrap();

        let queries = maps.place_queries();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].query, "miklat");
        assert_eq!(queries[0].language, "en");
        assert!(queries[0].open_now);
        assert_eq!(queries[0].origin, origin());
    }

    #[tokio::test]
    async fn provider_failure_stops_search() {
        let maps = MockMaps::new().with_places_error("OVER_QUERY_LIMIT");
        let config = SearchConfig::default();

        let result = RadiusSearch::new(&maps, &config).run(origin()).await;

        assert!(matches!(result, Err(LocatorError::Oracle(_))));
        assert_eq!(maps.place_calls(), 1);
    }

    #[tokio::test]
    async fn invalid_config_is_rejected_before_searching() {
        let maps = MockMaps::new();
        let config = SearchConfig::new(0.05, 0.0, 0.5);

        let result = RadiusSearch::new(&maps, &config).run(origin()).await;

        assert_eq!(
            result,
            Err(LocatorError::InvalidConfig(InvalidSearchConfig::Step(0.0)))
        );
        assert_eq!(maps.place_calls(), 0);
    }

    #[tokio::test]
    async fn step_too_small_to_grow_radius_is_rejected() {
        let maps = MockMaps::new();
        let config = SearchConfig::new(0.05, 1e-18, 0.5);

        let result = RadiusSearch::new(&maps, &config).run(origin()).await;

        assert_eq!(
            result,
            Err(LocatorError::InvalidConfig(InvalidSearchConfig::Step(1e-18)))
        );
        assert_eq!(maps.place_calls(), 0);
    }
}
