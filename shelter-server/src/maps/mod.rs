//! Maps web services client.
//!
//! This module provides an HTTP client for the place search, distance
//! matrix and directions services, and implements the locator's provider
//! traits on top of it.
//!
//! Key characteristics of these services:
//! - Authentication is an API key passed as the `key` query parameter
//! - A request can succeed at the HTTP level and still fail in the payload:
//!   every response carries a `status` field that must be `OK` or
//!   `ZERO_RESULTS`
//! - Distance matrix elements carry their own per-pair status

mod client;
mod convert;
mod error;
mod provider;
mod types;

pub use client::{DEFAULT_BASE_URL, MapsClient, MapsConfig};
pub use error::MapsError;
pub use types::{
    DirectionsResponse, DistanceMatrixResponse, MatrixElementDto, PlaceResult, PlacesResponse,
};
