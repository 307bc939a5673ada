//! Route resolution to a single destination.

use std::future::Future;

use tracing::info;

use crate::domain::{Geocoordinate, RoutePath};
use crate::polyline;

use super::error::LocatorError;

/// Trait for walking directions.
pub trait RouteProvider {
    /// Fetch routes from `origin` to `destination`.
    ///
    /// Returns each route's overview path as an encoded polyline, best
    /// route first. An empty list means no route exists.
    fn directions(
        &self,
        origin: Geocoordinate,
        destination: Geocoordinate,
    ) -> impl Future<Output = Result<Vec<String>, LocatorError>> + Send;
}

/// Resolves and decodes the route to a chosen destination.
pub struct RouteResolver<'a, R: RouteProvider> {
    provider: &'a R,
}

impl<'a, R: RouteProvider> RouteResolver<'a, R> {
    pub fn new(provider: &'a R) -> Self {
        Self { provider }
    }

    /// Resolve the first route from `origin` to `destination`.
    pub async fn resolve(
        &self,
        origin: Geocoordinate,
        destination: Geocoordinate,
    ) -> Result<RoutePath, LocatorError> {
        let routes = self.provider.directions(origin, destination).await?;

        let encoded = routes
            .into_iter()
            .next()
            .ok_or(LocatorError::RouteNotFound { destination })?;

        let points = polyline::decode(&encoded)
            .map_err(|e| LocatorError::Oracle(format!("undecodable route polyline: {e}")))?;

        info!(%origin, %destination, points = points.len(), "route resolved");
        Ok(RoutePath::new(points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::mock::{MockMaps, coord};

    #[tokio::test]
    async fn decodes_first_route() {
        let maps = MockMaps::new().with_routes(&["_p~iF~ps|U_ulLnnqC_mqNvxq`@", "??"]);
        let origin = coord(38.5, -120.2);
        let destination = coord(43.252, -126.453);

        let path = RouteResolver::new(&maps)
            .resolve(origin, destination)
            .await
            .unwrap();

        assert_eq!(path.len(), 3);
        assert!(path.start().unwrap().approx_eq(&origin, 1e-5));
        assert!(path.end().unwrap().approx_eq(&destination, 1e-5));
        assert_eq!(maps.route_calls(), vec![(origin, destination)]);
    }

    #[tokio::test]
    async fn zero_routes_is_route_not_found() {
        let maps = MockMaps::new().with_routes(&[]);
        let destination = coord(32.1, 34.8);

        let result = RouteResolver::new(&maps)
            .resolve(coord(32.0, 34.7), destination)
            .await;

        assert_eq!(result, Err(LocatorError::RouteNotFound { destination }));
    }

    #[tokio::test]
    async fn empty_polyline_is_empty_path() {
        let maps = MockMaps::new().with_routes(&[""]);

        let path = RouteResolver::new(&maps)
            .resolve(coord(32.0, 34.7), coord(32.1, 34.8))
            .await
            .unwrap();

        assert!(path.is_empty());
    }

    #[tokio::test]
    async fn malformed_polyline_is_oracle_error() {
        let maps = MockMaps::new().with_routes(&["_p~i"]);

        let result = RouteResolver::new(&maps)
            .resolve(coord(32.0, 34.7), coord(32.1, 34.8))
            .await;

        assert!(matches!(result, Err(LocatorError::Oracle(_))));
    }

    #[tokio::test]
    async fn provider_failure_propagates() {
        let maps = MockMaps::new().with_routes_error("timed out");

        let result = RouteResolver::new(&maps)
            .resolve(coord(32.0, 34.7), coord(32.1, 34.8))
            .await;

        assert_eq!(result, Err(LocatorError::Oracle("timed out".into())));
    }
}
