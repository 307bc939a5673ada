//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{BusinessStatus, DistanceEstimate, Geocoordinate, RoutePath, Shelter};
use crate::locator::{LocateOutcome, SearchSession, degrees_to_meters};
use crate::polyline;

/// Shown when the search gives up without finding anything.
pub const NOT_FOUND_MESSAGE: &str = "No shelters found nearby.";

/// Request to locate the nearest shelter.
#[derive(Debug, Deserialize)]
pub struct LocateRequest {
    pub lat: f64,
    pub lng: f64,

    /// Client session id; a newer request with the same id replaces this one
    pub session: Option<String>,
}

/// Request for a walking route between two points.
#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub from_lat: f64,
    pub from_lng: f64,
    pub to_lat: f64,
    pub to_lng: f64,
}

/// Whether a locate run found anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocateStatus {
    Found,
    NotFound,
}

/// Response to a locate request.
#[derive(Debug, Serialize)]
pub struct LocateResponse {
    pub status: LocateStatus,

    /// Human-readable summary
    pub message: String,

    pub origin: Geocoordinate,

    /// Radius of the last search (meters)
    pub radius_meters: u32,

    pub search_attempts: u32,

    /// Origin address as resolved by the distance service
    pub origin_address: Option<String>,

    /// Index into `shelters` of the closest one
    pub closest_index: Option<usize>,

    pub shelters: Vec<ShelterResult>,

    /// Walking route to the closest shelter
    pub route: Option<RouteResponse>,
}

impl LocateResponse {
    pub fn from_outcome(outcome: &LocateOutcome) -> Self {
        match outcome {
            LocateOutcome::NotFound {
                origin,
                radius_degrees,
                attempts,
            } => Self {
                status: LocateStatus::NotFound,
                message: NOT_FOUND_MESSAGE.to_string(),
                origin: *origin,
                radius_meters: degrees_to_meters(*radius_degrees),
                search_attempts: *attempts,
                origin_address: None,
                closest_index: None,
                shelters: Vec::new(),
                route: None,
            },
            LocateOutcome::Found(session) => Self::from_session(session),
        }
    }

    fn from_session(session: &SearchSession) -> Self {
        let closest_index = session.ranking.closest_index;
        let shelters = session
            .shelters
            .iter()
            .enumerate()
            .map(|(i, shelter)| {
                ShelterResult::new(
                    shelter,
                    session.ranking.estimate_for(i),
                    i == closest_index,
                )
            })
            .collect();

        Self {
            status: LocateStatus::Found,
            message: found_message(session),
            origin: session.origin,
            radius_meters: degrees_to_meters(session.radius_degrees),
            search_attempts: session.search_attempts,
            origin_address: session.ranking.origin_address.clone(),
            closest_index: Some(closest_index),
            shelters,
            route: Some(RouteResponse::new(
                session.origin,
                session.closest().coordinate,
                &session.route,
            )),
        }
    }
}

/// "Nearest shelter: {name}, {distance} ({duration} walk)"
pub fn found_message(session: &SearchSession) -> String {
    let estimate = session.ranking.closest();
    format!(
        "Nearest shelter: {}, {} ({} walk)",
        session.closest().name,
        estimate.distance_text,
        estimate.duration_text
    )
}

/// A shelter in locate results.
#[derive(Debug, Serialize)]
pub struct ShelterResult {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub business_status: BusinessStatus,
    pub open_now: Option<bool>,
    pub opening_hours: Vec<String>,

    /// Walking distance from the origin (meters)
    pub distance_meters: Option<u64>,
    pub distance_text: Option<String>,
    pub duration_text: Option<String>,
    pub is_closest: bool,
}

impl ShelterResult {
    pub fn new(shelter: &Shelter, estimate: Option<&DistanceEstimate>, is_closest: bool) -> Self {
        Self {
            name: shelter.name.clone(),
            address: shelter.address.clone(),
            latitude: shelter.coordinate.latitude(),
            longitude: shelter.coordinate.longitude(),
            business_status: shelter.business_status,
            open_now: shelter.open_now,
            opening_hours: shelter.opening_hours.clone(),
            distance_meters: estimate.map(|e| e.distance_meters),
            distance_text: estimate.map(|e| e.distance_text.clone()),
            duration_text: estimate.map(|e| e.duration_text.clone()),
            is_closest,
        }
    }
}

/// A walking route.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub origin: Geocoordinate,
    pub destination: Geocoordinate,

    /// Decoded route points, origin end first
    pub points: RoutePath,

    /// The same points in encoded polyline form, for map widgets
    pub polyline: String,
}

impl RouteResponse {
    pub fn new(origin: Geocoordinate, destination: Geocoordinate, route: &RoutePath) -> Self {
        Self {
            origin,
            destination,
            polyline: polyline::encode(route.points()),
            points: route.clone(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
