//! Core domain types for the shelter locator.
//!
//! This module contains pure data types with no I/O dependencies.
//! All types enforce their invariants at construction time.

mod coordinate;
mod error;
mod ranking;
mod route;
mod shelter;

pub use coordinate::Geocoordinate;
pub use error::DomainError;
pub use ranking::{DistanceEstimate, RankingResult};
pub use route::RoutePath;
pub use shelter::{BusinessStatus, Shelter};
