//! Application state for the web layer.

use std::sync::Arc;

use crate::domain::Geocoordinate;
use crate::locator::ShelterLocator;
use crate::maps::MapsClient;

use super::session::SessionRegistry;

/// Shared application state.
///
/// Cheap to clone; handlers receive their own copy per request.
#[derive(Clone)]
pub struct AppState {
    /// Locator backed by the maps web services
    pub locator: Arc<ShelterLocator<MapsClient>>,

    /// In-flight locate runs, keyed by client session id
    pub sessions: SessionRegistry,

    /// Where the index page's map opens
    pub default_center: Geocoordinate,
}

impl AppState {
    /// Create a new app state.
    pub fn new(locator: ShelterLocator<MapsClient>, default_center: Geocoordinate) -> Self {
        Self {
            locator: Arc::new(locator),
            sessions: SessionRegistry::new(),
            default_center,
        }
    }
}
