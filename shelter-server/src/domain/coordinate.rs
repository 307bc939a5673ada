//! Geographic coordinate type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// A validated latitude/longitude pair in decimal degrees.
///
/// Latitude is always within [-90, 90] and longitude within [-180, 180].
/// Any `Geocoordinate` value is valid by construction, including ones
/// produced by deserialization.
///
/// # Examples
///
/// ```
/// use shelter_server::domain::Geocoordinate;
///
/// let kikar = Geocoordinate::new(32.0868, 34.7897).unwrap();
/// assert_eq!(kikar.to_string(), "32.0868,34.7897");
///
/// assert!(Geocoordinate::new(91.0, 0.0).is_err());
/// assert!(Geocoordinate::new(0.0, -180.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Geocoordinate {
    latitude: f64,
    longitude: f64,
}

/// Unvalidated wire form, checked via `TryFrom` on deserialization.
#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Geocoordinate {
    type Error = DomainError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Geocoordinate::new(raw.latitude, raw.longitude)
    }
}

impl Geocoordinate {
    /// Create a coordinate, rejecting out-of-range or non-finite values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Whether two coordinates agree on both axes within `tolerance` degrees.
    pub fn approx_eq(&self, other: &Geocoordinate, tolerance: f64) -> bool {
        (self.latitude - other.latitude).abs() <= tolerance
            && (self.longitude - other.longitude).abs() <= tolerance
    }
}

/// Formats as `lat,lng`, the form the maps services take as a parameter.
impl fmt::Display for Geocoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Parses the `lat,lng` form produced by `Display`.
impl FromStr for Geocoordinate {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || DomainError::MalformedCoordinate(s.to_string());
        let (lat, lng) = s.split_once(',').ok_or_else(malformed)?;
        let lat: f64 = lat.trim().parse().map_err(|_| malformed())?;
        let lng: f64 = lng.trim().parse().map_err(|_| malformed())?;
        Geocoordinate::new(lat, lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds() {
        assert!(Geocoordinate::new(90.0, 180.0).is_ok());
        assert!(Geocoordinate::new(-90.0, -180.0).is_ok());
        assert!(Geocoordinate::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(
            Geocoordinate::new(90.0001, 0.0),
            Err(DomainError::InvalidLatitude(90.0001))
        );
        assert_eq!(
            Geocoordinate::new(0.0, 180.0001),
            Err(DomainError::InvalidLongitude(180.0001))
        );
    }

    #[test]
    fn rejects_non_finite() {
        assert!(Geocoordinate::new(f64::NAN, 0.0).is_err());
        assert!(Geocoordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn display_is_query_form() {
        let c = Geocoordinate::new(38.5, -120.2).unwrap();
        assert_eq!(c.to_string(), "38.5,-120.2");
    }

    #[test]
    fn parse_pair() {
        let c: Geocoordinate = "32.0868, 34.7897".parse().unwrap();
        assert_eq!(c, Geocoordinate::new(32.0868, 34.7897).unwrap());

        assert!(matches!(
            "32.0868".parse::<Geocoordinate>(),
            Err(DomainError::MalformedCoordinate(_))
        ));
        assert!(matches!(
            "north,east".parse::<Geocoordinate>(),
            Err(DomainError::MalformedCoordinate(_))
        ));
        assert_eq!(
            "95,10".parse::<Geocoordinate>(),
            Err(DomainError::InvalidLatitude(95.0))
        );
    }

    #[test]
    fn deserialize_validates() {
        let ok: Geocoordinate =
            serde_json::from_str(r#"{"latitude": 32.1, "longitude": 34.8}"#).unwrap();
        assert_eq!(ok.latitude(), 32.1);

        let bad: Result<Geocoordinate, _> =
            serde_json::from_str(r#"{"latitude": 132.1, "longitude": 34.8}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn approx_eq_tolerance() {
        let a = Geocoordinate::new(10.0, 20.0).unwrap();
        let b = Geocoordinate::new(10.000001, 19.999999).unwrap();
        assert!(a.approx_eq(&b, 1e-5));
        assert!(!a.approx_eq(&b, 1e-7));
    }
}
