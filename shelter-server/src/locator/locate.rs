//! Locate-and-navigate orchestration.
//!
//! Runs the three stages strictly in sequence: expanding-radius search,
//! distance ranking, then route resolution to the closest shelter. A stage
//! failure stops the run and is reported with the stage that failed. The
//! only retrying anywhere is the search's own radius widening.

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::{Geocoordinate, RankingResult, RoutePath, Shelter};

use super::config::{InvalidSearchConfig, SearchConfig};
use super::error::{LocateError, LocatorError, Stage};
use super::rank::{DistanceOracle, DistanceRanker};
use super::route::{RouteProvider, RouteResolver};
use super::search::{PlacesProvider, RadiusSearch};

/// State of one completed locate run.
///
/// Each call to [`ShelterLocator::locate`] builds a fresh session; nothing is
/// carried over between runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchSession {
    pub origin: Geocoordinate,

    /// Radius at which the shelters were found (degrees).
    pub radius_degrees: f64,

    /// Number of place searches it took.
    pub search_attempts: u32,

    pub shelters: Vec<Shelter>,
    pub ranking: RankingResult,

    /// Route from the origin to the closest shelter.
    pub route: RoutePath,
}

impl SearchSession {
    /// The shelter the route leads to.
    pub fn closest(&self) -> &Shelter {
        &self.shelters[self.ranking.closest_index]
    }
}

/// Result of a locate run that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum LocateOutcome {
    /// The search reached its radius cap without finding anything.
    NotFound {
        origin: Geocoordinate,
        radius_degrees: f64,
        attempts: u32,
    },

    /// Shelters were found, ranked and routed to.
    Found(Box<SearchSession>),
}

impl LocateOutcome {
    pub fn session(&self) -> Option<&SearchSession> {
        match self {
            LocateOutcome::Found(session) => Some(session.as_ref()),
            LocateOutcome::NotFound { .. } => None,
        }
    }
}

/// Nearest-shelter locator.
///
/// Owns the maps provider and a validated search configuration.
pub struct ShelterLocator<P> {
    provider: P,
    config: SearchConfig,
}

impl<P> ShelterLocator<P> {
    /// Create a locator, rejecting configurations that cannot terminate.
    pub fn new(provider: P, config: SearchConfig) -> Result<Self, InvalidSearchConfig> {
        config.validate()?;
        Ok(Self { provider, config })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P> ShelterLocator<P>
where
    P: PlacesProvider + DistanceOracle + RouteProvider,
{
    /// Find, rank and route to the nearest shelter around `origin`.
    ///
    /// Finding nothing is `Ok(LocateOutcome::NotFound)`; the distance oracle
    /// and routing service are not called in that case.
    pub async fn locate(&self, origin: Geocoordinate) -> Result<LocateOutcome, LocateError> {
        let search = RadiusSearch::new(&self.provider, &self.config)
            .run(origin)
            .await
            .map_err(|e| stage_failed(Stage::Search, e))?;

        if search.is_empty() {
            return Ok(LocateOutcome::NotFound {
                origin,
                radius_degrees: search.radius_degrees,
                attempts: search.attempts,
            });
        }

        let coordinates: Vec<Geocoordinate> =
            search.shelters.iter().map(|s| s.coordinate).collect();
        let ranking = DistanceRanker::new(&self.provider)
            .rank(origin, &coordinates)
            .await
            .map_err(|e| stage_failed(Stage::Rank, e))?;

        let destination = coordinates[ranking.closest_index];
        let route = RouteResolver::new(&self.provider)
            .resolve(origin, destination)
            .await
            .map_err(|e| stage_failed(Stage::Route, e))?;

        let session = SearchSession {
            origin,
            radius_degrees: search.radius_degrees,
            search_attempts: search.attempts,
            shelters: search.shelters,
            ranking,
            route,
        };
        info!(
            %origin,
            shelter = %session.closest().name,
            distance = %session.ranking.closest().distance_text,
            "navigating to closest shelter"
        );

        Ok(LocateOutcome::Found(Box::new(session)))
    }

    /// Route from `origin` to a destination the user picked, skipping
    /// search and ranking.
    pub async fn navigate_to(
        &self,
        origin: Geocoordinate,
        destination: Geocoordinate,
    ) -> Result<RoutePath, LocateError> {
        RouteResolver::new(&self.provider)
            .resolve(origin, destination)
            .await
            .map_err(|e| stage_failed(Stage::Route, e))
    }
}

fn stage_failed(stage: Stage, source: LocatorError) -> LocateError {
    warn!(%stage, error = %source, "locate stage failed");
    LocateError::new(stage, source)
}
