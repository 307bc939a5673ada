//! Nearest-shelter locator.
//!
//! This module implements the core algorithm that answers: "where is the
//! closest shelter I can walk to, and how do I get there?"
//!
//! A run widens a place search until shelters turn up, ranks them with one
//! batched distance request, and decodes the walking route to the closest.
//! External services sit behind the [`PlacesProvider`], [`DistanceOracle`]
//! and [`RouteProvider`] traits so the algorithm can be tested without a
//! network.

mod config;
mod error;
mod locate;
mod rank;
mod route;
mod search;

#[cfg(test)]
pub(crate) mod mock;

pub use config::{
    InvalidSearchConfig, MAX_SEARCH_ATTEMPTS, METERS_PER_DEGREE, SearchConfig, degrees_to_meters,
};
pub use error::{LocateError, LocatorError, Stage};
pub use locate::{LocateOutcome, SearchSession, ShelterLocator};
pub use rank::{DistanceMatrix, DistanceOracle, DistanceRanker, MatrixElement, rank_matrix};
pub use route::{RouteProvider, RouteResolver};
pub use search::{PlaceQuery, PlacesProvider, RadiusSearch, SearchOutcome};
