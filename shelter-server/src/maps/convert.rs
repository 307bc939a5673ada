//! Conversion from maps DTOs to domain types.

use tracing::warn;

use crate::domain::{BusinessStatus, Geocoordinate, Shelter};
use crate::locator::{DistanceMatrix, MatrixElement};

use super::types::{DirectionsResponse, DistanceMatrixResponse, MatrixElementDto, PlaceResult};

/// Convert place search hits to shelters.
///
/// Hits with out-of-range coordinates are dropped with a warning; the rest
/// of the response is still usable.
pub fn convert_places(results: Vec<PlaceResult>) -> Vec<Shelter> {
    results.into_iter().filter_map(convert_place).collect()
}

fn convert_place(place: PlaceResult) -> Option<Shelter> {
    let location = place.geometry.location;
    let coordinate = match Geocoordinate::new(location.lat, location.lng) {
        Ok(c) => c,
        Err(e) => {
            warn!(name = ?place.name, error = %e, "skipping place with invalid location");
            return None;
        }
    };

    let (open_now, opening_hours) = match place.opening_hours {
        Some(hours) => (hours.open_now, hours.weekday_text),
        None => (None, Vec::new()),
    };

    Some(Shelter {
        coordinate,
        name: place.name.unwrap_or_default(),
        address: place.formatted_address.unwrap_or_default(),
        business_status: BusinessStatus::parse(place.business_status.as_deref()),
        opening_hours,
        open_now,
    })
}

/// Convert a distance matrix response to the locator's single-origin form.
///
/// Only the first row is used since requests have exactly one origin. A
/// response without rows converts to an empty matrix, which the ranker
/// rejects as incomplete.
pub fn convert_matrix(response: DistanceMatrixResponse) -> DistanceMatrix {
    let elements = response
        .rows
        .into_iter()
        .next()
        .map(|row| row.elements.into_iter().map(convert_element).collect())
        .unwrap_or_default();

    DistanceMatrix {
        origin_address: response.origin_addresses.into_iter().next(),
        destination_addresses: response.destination_addresses,
        elements,
    }
}

fn convert_element(element: MatrixElementDto) -> MatrixElement {
    let (distance_meters, distance_text) = match element.distance {
        Some(d) => (d.value, d.text),
        None => (None, None),
    };
    let (duration_seconds, duration_text) = match element.duration {
        Some(d) => (d.value, d.text),
        None => (None, None),
    };

    MatrixElement {
        status: element.status,
        distance_meters,
        distance_text,
        duration_seconds,
        duration_text,
    }
}

/// Extract the encoded overview polylines, best route first.
pub fn convert_routes(response: DirectionsResponse) -> Vec<String> {
    response
        .routes
        .into_iter()
        .map(|route| route.overview_polyline.points)
        .collect()
}
