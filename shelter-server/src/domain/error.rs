//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! They are distinct from API/IO errors.

/// Domain-level validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Latitude outside [-90, 90] or not finite
    #[error("invalid latitude {0}: must be within [-90, 90]")]
    InvalidLatitude(f64),

    /// Longitude outside [-180, 180] or not finite
    #[error("invalid longitude {0}: must be within [-180, 180]")]
    InvalidLongitude(f64),

    /// Text that is not a `lat,lng` pair
    #[error("malformed coordinate {0:?}: expected \"lat,lng\"")]
    MalformedCoordinate(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::InvalidLatitude(91.5);
        assert_eq!(err.to_string(), "invalid latitude 91.5: must be within [-90, 90]");

        let err = DomainError::InvalidLongitude(-200.0);
        assert_eq!(
            err.to_string(),
            "invalid longitude -200: must be within [-180, 180]"
        );

        let err = DomainError::MalformedCoordinate("north".into());
        assert_eq!(err.to_string(), r#"malformed coordinate "north": expected "lat,lng""#);
    }
}
