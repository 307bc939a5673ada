//! Maps web service response DTOs.
//!
//! These types map directly to the Places text search, Distance Matrix and
//! Directions JSON responses. They use `Option` and `#[serde(default)]`
//! liberally because the services omit fields rather than sending nulls.

use serde::Deserialize;

/// Top-level status for a successful request.
pub const STATUS_OK: &str = "OK";

/// Top-level status for a successful request with nothing to return.
pub const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

/// A latitude/longitude pair as the services send it.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

// ============================================================================
// Place search
// ============================================================================

/// Response from `place/textsearch/json`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlacesResponse {
    pub status: String,

    #[serde(default)]
    pub results: Vec<PlaceResult>,

    /// Human-readable detail for non-OK statuses.
    pub error_message: Option<String>,
}

/// A single place search hit.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceResult {
    pub geometry: Geometry,
    pub name: Option<String>,
    pub business_status: Option<String>,
    pub formatted_address: Option<String>,
    pub opening_hours: Option<OpeningHours>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpeningHours {
    pub open_now: Option<bool>,

    /// One display line per day of the week.
    #[serde(default)]
    pub weekday_text: Vec<String>,
}

// ============================================================================
// Distance matrix
// ============================================================================

/// Response from `distancematrix/json`.
#[derive(Debug, Clone, Deserialize)]
pub struct DistanceMatrixResponse {
    pub status: String,

    #[serde(default)]
    pub origin_addresses: Vec<String>,

    #[serde(default)]
    pub destination_addresses: Vec<String>,

    /// One row per origin.
    #[serde(default)]
    pub rows: Vec<MatrixRow>,

    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatrixRow {
    /// One element per destination, in request order.
    #[serde(default)]
    pub elements: Vec<MatrixElementDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatrixElementDto {
    pub status: String,
    pub distance: Option<TextValue>,
    pub duration: Option<TextValue>,
}

/// A display string paired with its numeric value (meters or seconds).
#[derive(Debug, Clone, Deserialize)]
pub struct TextValue {
    pub text: Option<String>,
    pub value: Option<u64>,
}

// ============================================================================
// Directions
// ============================================================================

/// Response from `directions/json`.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    pub status: String,

    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,

    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsRoute {
    pub overview_polyline: EncodedPolyline,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EncodedPolyline {
    pub points: String,
}
