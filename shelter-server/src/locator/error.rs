//! Locator error types.

use std::fmt;

use crate::domain::Geocoordinate;

use super::config::InvalidSearchConfig;

/// Failure of a single locator stage.
///
/// "No shelters nearby" is not an error: the search reports it as an empty
/// result and `locate` as `LocateOutcome::NotFound`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocatorError {
    /// Ranking was asked to rank nothing
    #[error("no candidate shelters to rank")]
    NoCandidates,

    /// An external service failed or returned something unusable
    #[error("external service error: {0}")]
    Oracle(String),

    /// The routing service found no route
    #[error("no route found to {destination}")]
    RouteNotFound { destination: Geocoordinate },

    /// The search configuration cannot terminate
    #[error("invalid search configuration: {0}")]
    InvalidConfig(#[from] InvalidSearchConfig),
}

impl LocatorError {
    /// Whether retrying the same request later might succeed.
    ///
    /// Service failures and missing routes may be transient. An empty
    /// candidate list or a bad configuration will fail the same way again.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            LocatorError::Oracle(_) | LocatorError::RouteNotFound { .. }
        )
    }
}

/// Which stage of a locate run failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Search,
    Rank,
    Route,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Search => "search",
            Stage::Rank => "rank",
            Stage::Route => "route",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A locate run stopped at `stage` because of `source`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{stage} stage failed: {source}")]
pub struct LocateError {
    pub stage: Stage,
    #[source]
    pub source: LocatorError,
}

impl LocateError {
    pub fn new(stage: Stage, source: LocatorError) -> Self {
        Self { stage, source }
    }

    pub fn is_transient(&self) -> bool {
        self.source.is_transient()
    }
}
