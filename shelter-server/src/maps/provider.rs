//! Locator provider implementations backed by the maps client.

use crate::domain::{Geocoordinate, Shelter};
use crate::locator::{
    DistanceMatrix, DistanceOracle, LocatorError, PlaceQuery, PlacesProvider, RouteProvider,
};

use super::client::MapsClient;

impl PlacesProvider for MapsClient {
    async fn search_places(&self, query: &PlaceQuery<'_>) -> Result<Vec<Shelter>, LocatorError> {
        Ok(self.fetch_places(query).await?)
    }
}

impl DistanceOracle for MapsClient {
    async fn distance_matrix(
        &self,
        origin: Geocoordinate,
        destinations: &[Geocoordinate],
    ) -> Result<DistanceMatrix, LocatorError> {
        Ok(self.fetch_distance_matrix(origin, destinations).await?)
    }
}

impl RouteProvider for MapsClient {
    async fn directions(
        &self,
        origin: Geocoordinate,
        destination: Geocoordinate,
    ) -> Result<Vec<String>, LocatorError> {
        Ok(self.fetch_directions(origin, destination).await?)
    }
}
