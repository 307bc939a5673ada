//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::{BusinessStatus, Geocoordinate};

use super::dto::{LocateResponse, LocateStatus, ShelterResult};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the locate form, centred on `center`.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub center_lat: f64,
    pub center_lng: f64,
}

impl IndexTemplate {
    pub fn new(center: Geocoordinate) -> Self {
        Self {
            center_lat: center.latitude(),
            center_lng: center.longitude(),
        }
    }
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Locate results fragment.
#[derive(Template)]
#[template(path = "shelter_list.html")]
pub struct ShelterListTemplate {
    pub found: bool,
    pub message: String,
    pub origin_address: Option<String>,
    pub radius_meters: u32,
    pub shelters: Vec<ShelterView>,
    pub route_points: usize,
}

impl ShelterListTemplate {
    pub fn from_response(response: &LocateResponse) -> Self {
        let mut shelters: Vec<ShelterView> =
            response.shelters.iter().map(ShelterView::from_result).collect();
        // Closest first, the rest by walking distance.
        shelters.sort_by_key(|s| (!s.is_closest, s.distance_meters.unwrap_or(u64::MAX)));

        Self {
            found: response.status == LocateStatus::Found,
            message: response.message.clone(),
            origin_address: response.origin_address.clone(),
            radius_meters: response.radius_meters,
            shelters,
            route_points: response.route.as_ref().map_or(0, |r| r.points.len()),
        }
    }
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Shelter view model for templates.
#[derive(Debug, Clone)]
pub struct ShelterView {
    pub name: String,
    pub address: String,
    pub status: String,
    pub is_operational: bool,
    pub open_now: Option<bool>,
    pub opening_hours: Vec<String>,
    pub distance_meters: Option<u64>,
    pub distance_text: Option<String>,
    pub duration_text: Option<String>,
    pub is_closest: bool,
    pub latitude: f64,
    pub longitude: f64,
}

impl ShelterView {
    pub fn from_result(result: &ShelterResult) -> Self {
        Self {
            name: result.name.clone(),
            address: result.address.clone(),
            status: status_label(result.business_status).to_string(),
            is_operational: result.business_status == BusinessStatus::Operational,
            open_now: result.open_now,
            opening_hours: result.opening_hours.clone(),
            distance_meters: result.distance_meters,
            distance_text: result.distance_text.clone(),
            duration_text: result.duration_text.clone(),
            is_closest: result.is_closest,
            latitude: result.latitude,
            longitude: result.longitude,
        }
    }

    /// "Open now", "Closed now", or empty when unknown.
    pub fn open_label(&self) -> &'static str {
        match self.open_now {
            Some(true) => "Open now",
            Some(false) => "Closed now",
            None => "",
        }
    }
}

fn status_label(status: BusinessStatus) -> &'static str {
    match status {
        BusinessStatus::Operational => "Operational",
        BusinessStatus::ClosedTemporarily => "Temporarily closed",
        BusinessStatus::ClosedPermanently => "Permanently closed",
        BusinessStatus::Unknown => "Status unknown",
    }
}
