//! Distance ranking of candidate shelters.
//!
//! All candidates go to the distance oracle in a single batched request.
//! The response must cover every candidate, in order, with a usable
//! distance. A partial answer is rejected outright, since ranking only the
//! candidates that came back could pick the wrong "closest" shelter.

use std::future::Future;

use tracing::{debug, info};

use crate::domain::{DistanceEstimate, Geocoordinate, RankingResult};

use super::error::LocatorError;

/// Element status the oracle uses for a usable origin/destination pair.
const ELEMENT_OK: &str = "OK";

/// One origin/destination cell of a distance matrix.
///
/// Fields are optional because the oracle omits them for pairs it could not
/// resolve. [`rank_matrix`] decides what is acceptable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatrixElement {
    pub status: String,
    pub distance_meters: Option<u64>,
    pub distance_text: Option<String>,
    pub duration_seconds: Option<u64>,
    pub duration_text: Option<String>,
}

/// A single-origin distance matrix, elements in destination order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DistanceMatrix {
    pub origin_address: Option<String>,
    pub destination_addresses: Vec<String>,
    pub elements: Vec<MatrixElement>,
}

/// Trait for travel-distance estimation.
pub trait DistanceOracle {
    /// Estimate travel from `origin` to each destination in one request.
    fn distance_matrix(
        &self,
        origin: Geocoordinate,
        destinations: &[Geocoordinate],
    ) -> impl Future<Output = Result<DistanceMatrix, LocatorError>> + Send;
}

/// Ranks candidates by travel distance from an origin.
pub struct DistanceRanker<'a, O: DistanceOracle> {
    oracle: &'a O,
}

impl<'a, O: DistanceOracle> DistanceRanker<'a, O> {
    pub fn new(oracle: &'a O) -> Self {
        Self { oracle }
    }

    /// Rank `candidates` by distance from `origin`.
    ///
    /// Fails with `NoCandidates` on an empty list (without calling the
    /// oracle) and with `Oracle` if the response is incomplete.
    pub async fn rank(
        &self,
        origin: Geocoordinate,
        candidates: &[Geocoordinate],
    ) -> Result<RankingResult, LocatorError> {
        if candidates.is_empty() {
            return Err(LocatorError::NoCandidates);
        }

        let matrix = self.oracle.distance_matrix(origin, candidates).await?;
        let ranking = rank_matrix(matrix, candidates.len())?;

        let closest = ranking.closest();
        info!(
            candidates = candidates.len(),
            closest = ranking.closest_index,
            distance = %closest.distance_text,
            duration = %closest.duration_text,
            "ranked shelters"
        );
        Ok(ranking)
    }
}

/// Turn an oracle response into a ranking over `expected` candidates.
///
/// The closest candidate is the leftmost one with the smallest distance.
pub fn rank_matrix(
    matrix: DistanceMatrix,
    expected: usize,
) -> Result<RankingResult, LocatorError> {
    if expected == 0 {
        return Err(LocatorError::NoCandidates);
    }
    if matrix.elements.len() != expected {
        return Err(LocatorError::Oracle(format!(
            "distance matrix has {} elements for {} destinations",
            matrix.elements.len(),
            expected
        )));
    }

    let mut destination_addresses = matrix.destination_addresses.into_iter();
    let mut estimates = Vec::with_capacity(expected);
    let mut closest: Option<(usize, u64)> = None;

    for (index, element) in matrix.elements.into_iter().enumerate() {
        let destination_address = destination_addresses.next();
        let estimate = estimate_from_element(index, element, destination_address)?;

        debug!(
            index,
            to = estimate.destination_address.as_deref().unwrap_or("?"),
            distance = %estimate.distance_text,
            duration = %estimate.duration_text,
            "distance estimate"
        );

        // Strictly less: ties keep the earlier index.
        if closest.is_none_or(|(_, best)| estimate.distance_meters < best) {
            closest = Some((index, estimate.distance_meters));
        }
        estimates.push(estimate);
    }

    let (closest_index, _) = closest.ok_or(LocatorError::NoCandidates)?;

    Ok(RankingResult {
        estimates,
        closest_index,
        origin_address: matrix.origin_address,
    })
}

fn estimate_from_element(
    index: usize,
    element: MatrixElement,
    destination_address: Option<String>,
) -> Result<DistanceEstimate, LocatorError> {
    if element.status != ELEMENT_OK {
        return Err(LocatorError::Oracle(format!(
            "distance element {index} has status {}",
            element.status
        )));
    }

    let missing =
        |field: &str| LocatorError::Oracle(format!("distance element {index} has no {field}"));

    Ok(DistanceEstimate {
        shelter_index: index,
        distance_meters: element.distance_meters.ok_or_else(|| missing("distance"))?,
        distance_text: element.distance_text.ok_or_else(|| missing("distance text"))?,
        duration_text: element.duration_text.ok_or_else(|| missing("duration"))?,
        duration_seconds: element.duration_seconds,
        destination_address,
    })
}
