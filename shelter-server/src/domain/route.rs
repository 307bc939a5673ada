//! Decoded travel routes.

use serde::Serialize;

use super::Geocoordinate;

/// An ordered path from origin to destination.
///
/// Points are in traversal order. The path may be empty when the routing
/// service returned a route without geometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RoutePath(Vec<Geocoordinate>);

impl RoutePath {
    pub fn new(points: Vec<Geocoordinate>) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[Geocoordinate] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn start(&self) -> Option<&Geocoordinate> {
        self.0.first()
    }

    pub fn end(&self) -> Option<&Geocoordinate> {
        self.0.last()
    }
}

impl From<Vec<Geocoordinate>> for RoutePath {
    fn from(points: Vec<Geocoordinate>) -> Self {
        Self(points)
    }
}
