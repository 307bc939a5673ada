//! Scripted in-memory maps provider for locator tests.
//!
//! Implements all three provider traits and records every call so tests can
//! assert which stages ran and with what arguments.

use std::sync::Mutex;

use crate::domain::{Geocoordinate, Shelter};

use super::error::LocatorError;
use super::rank::{DistanceMatrix, DistanceOracle, MatrixElement};
use super::route::RouteProvider;
use super::search::{PlaceQuery, PlacesProvider};

pub fn coord(lat: f64, lng: f64) -> Geocoordinate {
    Geocoordinate::new(lat, lng).unwrap()
}

pub fn shelter(name: &str, lat: f64, lng: f64) -> Shelter {
    Shelter::new(coord(lat, lng), name, format!("{name} street"))
}

/// An OK matrix element for `meters`.
pub fn element(meters: u64) -> MatrixElement {
    MatrixElement {
        status: "OK".to_string(),
        distance_meters: Some(meters),
        distance_text: Some(format!("{meters} m")),
        duration_seconds: Some(meters * 3 / 4),
        duration_text: Some(format!("{} mins", meters / 80)),
    }
}

/// A place search as the mock saw it.
#[derive(Debug, Clone)]
pub struct RecordedQuery {
    pub origin: Geocoordinate,
    pub radius_meters: u32,
    pub query: String,
    pub language: String,
    pub open_now: bool,
}

#[derive(Default)]
pub struct MockMaps {
    /// Shelters returned once the radius reaches this many meters.
    places: Option<(u32, Vec<Shelter>)>,
    places_error: Option<String>,
    matrix: Option<Result<DistanceMatrix, String>>,
    routes: Option<Result<Vec<String>, String>>,

    place_queries: Mutex<Vec<RecordedQuery>>,
    matrix_calls: Mutex<Vec<(Geocoordinate, Vec<Geocoordinate>)>>,
    route_calls: Mutex<Vec<(Geocoordinate, Geocoordinate)>>,
}

impl MockMaps {
    /// A provider that finds nothing and has no matrix or routes.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_places_from(mut self, min_radius_meters: u32, shelters: Vec<Shelter>) -> Self {
        self.places = Some((min_radius_meters, shelters));
        self
    }

    pub fn with_places_error(mut self, message: &str) -> Self {
        self.places_error = Some(message.to_string());
        self
    }

    pub fn with_distances(mut self, meters: &[u64]) -> Self {
        let elements = meters.iter().map(|m| element(*m)).collect();
        self.matrix = Some(Ok(DistanceMatrix {
            origin_address: Some("Kikar HaMedina".to_string()),
            destination_addresses: meters.iter().map(|m| format!("Shelter at {m}")).collect(),
            elements,
        }));
        self
    }

    pub fn with_matrix(mut self, matrix: DistanceMatrix) -> Self {
        self.matrix = Some(Ok(matrix));
        self
    }

    pub fn with_matrix_error(mut self, message: &str) -> Self {
        self.matrix = Some(Err(message.to_string()));
        self
    }

    pub fn with_routes(mut self, encoded: &[&str]) -> Self {
        self.routes = Some(Ok(encoded.iter().map(|s| s.to_string()).collect()));
        self
    }

    pub fn with_routes_error(mut self, message: &str) -> Self {
        self.routes = Some(Err(message.to_string()));
        self
    }

    pub fn place_calls(&self) -> usize {
        self.place_queries.lock().unwrap().len()
    }

    pub fn place_queries(&self) -> Vec<RecordedQuery> {
        self.place_queries.lock().unwrap().clone()
    }

    pub fn place_radii(&self) -> Vec<u32> {
        self.place_queries().iter().map(|q| q.radius_meters).collect()
    }

    pub fn matrix_calls(&self) -> Vec<(Geocoordinate, Vec<Geocoordinate>)> {
        self.matrix_calls.lock().unwrap().clone()
    }

    pub fn route_calls(&self) -> Vec<(Geocoordinate, Geocoordinate)> {
        self.route_calls.lock().unwrap().clone()
    }
}

impl PlacesProvider for MockMaps {
    async fn search_places(&self, query: &PlaceQuery<'_>) -> Result<Vec<Shelter>, LocatorError> {
        self.place_queries.lock().unwrap().push(RecordedQuery {
            origin: query.origin,
            radius_meters: query.radius_meters,
            query: query.query.to_string(),
            language: query.language.to_string(),
            open_now: query.open_now,
        });

        if let Some(message) = &self.places_error {
            return Err(LocatorError::Oracle(message.clone()));
        }

        match &self.places {
            Some((min_radius, shelters)) if query.radius_meters >= *min_radius => {
                Ok(shelters.clone())
            }
            _ => Ok(Vec::new()),
        }
    }
}

impl DistanceOracle for MockMaps {
    async fn distance_matrix(
        &self,
        origin: Geocoordinate,
        destinations: &[Geocoordinate],
    ) -> Result<DistanceMatrix, LocatorError> {
        self.matrix_calls
            .lock()
            .unwrap()
            .push((origin, destinations.to_vec()));

        match &self.matrix {
            Some(Ok(matrix)) => Ok(matrix.clone()),
            Some(Err(message)) => Err(LocatorError::Oracle(message.clone())),
            None => Err(LocatorError::Oracle("no matrix scripted".to_string())),
        }
    }
}

impl RouteProvider for MockMaps {
    async fn directions(
        &self,
        origin: Geocoordinate,
        destination: Geocoordinate,
    ) -> Result<Vec<String>, LocatorError> {
        self.route_calls.lock().unwrap().push((origin, destination));

        match &self.routes {
            Some(Ok(routes)) => Ok(routes.clone()),
            Some(Err(message)) => Err(LocatorError::Oracle(message.clone())),
            None => Ok(Vec::new()),
        }
    }
}
