//! Shelter records discovered by place search.

use std::fmt;

use serde::Serialize;

use super::Geocoordinate;

/// Operating state reported by the place search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusinessStatus {
    Operational,
    ClosedTemporarily,
    ClosedPermanently,
    #[default]
    Unknown,
}

impl BusinessStatus {
    /// Parse the wire value. Anything unrecognised, or absent, is `Unknown`.
    pub fn parse(s: Option<&str>) -> Self {
        match s {
            Some("OPERATIONAL") => BusinessStatus::Operational,
            Some("CLOSED_TEMPORARILY") => BusinessStatus::ClosedTemporarily,
            Some("CLOSED_PERMANENTLY") => BusinessStatus::ClosedPermanently,
            _ => BusinessStatus::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessStatus::Operational => "OPERATIONAL",
            BusinessStatus::ClosedTemporarily => "CLOSED_TEMPORARILY",
            BusinessStatus::ClosedPermanently => "CLOSED_PERMANENTLY",
            BusinessStatus::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for BusinessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate shelter.
///
/// Immutable once built from a search result. A new search replaces the
/// whole set rather than updating individual shelters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shelter {
    pub coordinate: Geocoordinate,
    pub name: String,
    pub address: String,
    pub business_status: BusinessStatus,
    /// Day-indexed display strings, e.g. "Monday: Open 24 hours".
    pub opening_hours: Vec<String>,
    /// Whether the place reported itself open at search time.
    pub open_now: Option<bool>,
}

impl Shelter {
    /// Create a shelter with no status or opening hours information.
    pub fn new(
        coordinate: Geocoordinate,
        name: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            coordinate,
            name: name.into(),
            address: address.into(),
            business_status: BusinessStatus::Unknown,
            opening_hours: Vec::new(),
            open_now: None,
        }
    }

    /// Opening hours joined one day per line, for display.
    pub fn opening_hours_text(&self) -> String {
        self.opening_hours.join("\n")
    }
}
