//! Search configuration for the shelter locator.

/// Meters per degree, the fixed approximation used to turn a search radius
/// in degrees into the meters the place search expects.
pub const METERS_PER_DEGREE: f64 = 111_000.0;

/// Most place searches a single run may be configured to issue.
pub const MAX_SEARCH_ATTEMPTS: u32 = 10_000;

/// Error returned when a search configuration cannot terminate or is
/// otherwise unusable.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidSearchConfig {
    #[error("start radius must be positive and finite, got {0}")]
    StartRadius(f64),

    #[error("radius step must be positive and finite, got {0}")]
    Step(f64),

    #[error("maximum radius must be finite, got {0}")]
    MaxRadius(f64),

    #[error("search query must not be empty")]
    EmptyQuery,

    #[error("radius step {step} needs more than {limit} searches to reach the cap")]
    TooManyAttempts { step: f64, limit: u32 },
}

/// Configuration parameters for the expanding-radius search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Radius of the first search attempt (degrees).
    pub start_radius_degrees: f64,

    /// How much the radius grows after an empty result (degrees).
    pub step_degrees: f64,

    /// The search gives up once the radius reaches this (degrees).
    pub max_radius_degrees: f64,

    /// Free-text place query.
    pub query: String,

    /// Language code for localized place names and addresses.
    pub language: String,

    /// Only return places reported as currently open.
    pub open_now: bool,
}

impl SearchConfig {
    /// Create a configuration with the given radius schedule and the
    /// default query settings.
    pub fn new(start_radius_degrees: f64, step_degrees: f64, max_radius_degrees: f64) -> Self {
        Self {
            start_radius_degrees,
            step_degrees,
            max_radius_degrees,
            ..Self::default()
        }
    }

    /// Set the place query.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Set the result language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set whether to filter to open places.
    pub fn with_open_now(mut self, open_now: bool) -> Self {
        self.open_now = open_now;
        self
    }

    /// Check the radius schedule terminates.
    ///
    /// Each step must grow the radius, and the cap must be reachable within
    /// [`MAX_SEARCH_ATTEMPTS`] searches.
    pub fn validate(&self) -> Result<(), InvalidSearchConfig> {
        if !self.start_radius_degrees.is_finite() || self.start_radius_degrees <= 0.0 {
            return Err(InvalidSearchConfig::StartRadius(self.start_radius_degrees));
        }
        if !self.step_degrees.is_finite()
            || self.step_degrees <= 0.0
            || self.start_radius_degrees + self.step_degrees <= self.start_radius_degrees
        {
            return Err(InvalidSearchConfig::Step(self.step_degrees));
        }
        if !self.max_radius_degrees.is_finite() {
            return Err(InvalidSearchConfig::MaxRadius(self.max_radius_degrees));
        }
        if self.max_attempts() > MAX_SEARCH_ATTEMPTS {
            return Err(InvalidSearchConfig::TooManyAttempts {
                step: self.step_degrees,
                limit: MAX_SEARCH_ATTEMPTS,
            });
        }
        if self.query.trim().is_empty() {
            return Err(InvalidSearchConfig::EmptyQuery);
        }
        Ok(())
    }

    /// Radius of the given zero-based attempt (degrees).
    ///
    /// Computed from the attempt number rather than by repeated addition,
    /// so the sequence is strictly increasing without accumulated drift.
    pub fn radius_for_attempt(&self, attempt: u32) -> f64 {
        self.start_radius_degrees + f64::from(attempt) * self.step_degrees
    }

    /// Upper bound on the number of place searches one run can issue.
    pub fn max_attempts(&self) -> u32 {
        let span = self.max_radius_degrees - self.start_radius_degrees;
        if span <= 0.0 {
            return 0;
        }
        // The cast saturates; the increment must too.
        ((span / self.step_degrees).ceil() as u32).saturating_add(1)
    }
}

/// Convert a radius in degrees to whole meters.
pub fn degrees_to_meters(degrees: f64) -> u32 {
    (degrees * METERS_PER_DEGREE).round() as u32
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            start_radius_degrees: 0.05, // ~5.5 km
            step_degrees: 0.005,        // ~550 m
            max_radius_degrees: 0.5,    // ~55 km
            query: "bomb shelter".to_string(),
            language: "iw".to_string(),
            open_now: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SearchConfig::default();

        assert_eq!(config.start_radius_degrees, 0.05);
        assert_eq!(config.step_degrees, 0.005);
        assert_eq!(config.max_radius_degrees, 0.5);
        assert_eq!(config.query, "bomb shelter");
        assert_eq!(config.language, "iw");
        assert!(config.open_now);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn custom_config() {
        let config = SearchConfig::new(0.1, 0.01, 0.2)
            .with_query("miklat")
            .with_language("en")
            .with_open_now(false);

        assert_eq!(config.start_radius_degrees, 0.1);
        assert_eq!(config.step_degrees, 0.01);
        assert_eq!(config.max_radius_degrees, 0.2);
        assert_eq!(config.query, "miklat");
        assert_eq!(config.language, "en");
        assert!(!config.open_now);
    }

    #[test]
    fn validate_rejects_non_terminating_step() {
        assert_eq!(
            SearchConfig::new(0.05, 0.0, 0.5).validate(),
            Err(InvalidSearchConfig::Step(0.0))
        );
        assert_eq!(
            SearchConfig::new(0.05, -0.01, 0.5).validate(),
            Err(InvalidSearchConfig::Step(-0.01))
        );
        assert!(SearchConfig::new(0.05, f64::NAN, 0.5).validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_radii_and_query() {
        assert_eq!(
            SearchConfig::new(0.0, 0.01, 0.5).validate(),
            Err(InvalidSearchConfig::StartRadius(0.0))
        );
        assert!(
            SearchConfig::new(0.05, 0.01, f64::INFINITY)
                .validate()
                .is_err()
        );
        assert_eq!(
            SearchConfig::default().with_query("  ").validate(),
            Err(InvalidSearchConfig::EmptyQuery)
        );
    }

    #[test]
    fn radius_schedule() {
        let config = SearchConfig::default();
        assert_eq!(config.radius_for_attempt(0), 0.05);
        assert!((config.radius_for_attempt(10) - 0.1).abs() < 1e-12);
        assert_eq!(config.max_attempts(), 91);
    }

    #[test]
    fn validate_rejects_step_that_does_not_grow_radius() {
        assert_eq!(
            SearchConfig::new(0.05, 1e-18, 0.5).validate(),
            Err(InvalidSearchConfig::Step(1e-18))
        );
    }

    #[test]
    fn validate_rejects_unbounded_attempts() {
        let config = SearchConfig::new(0.05, 1e-12, 0.5);
        assert_eq!(
            config.validate(),
            Err(InvalidSearchConfig::TooManyAttempts {
                step: 1e-12,
                limit: MAX_SEARCH_ATTEMPTS,
            })
        );
        assert_eq!(config.max_attempts(), u32::MAX);

        let config = SearchConfig::new(0.05, 0.45 / 9_000.0, 0.5);
        assert!(config.validate().is_ok());
        assert!(config.max_attempts() <= MAX_SEARCH_ATTEMPTS);
    }

    #[test]
    fn max_attempts_when_start_exceeds_cap() {
        assert_eq!(SearchConfig::new(0.5, 0.01, 0.5).max_attempts(), 0);
        assert_eq!(SearchConfig::new(0.6, 0.01, 0.5).max_attempts(), 0);
    }

    #[test]
    fn degrees_to_meters_rounds() {
        assert_eq!(degrees_to_meters(0.05), 5550);
        assert_eq!(degrees_to_meters(0.055), 6105);
        assert_eq!(degrees_to_meters(0.5), 55_500);
    }
}
