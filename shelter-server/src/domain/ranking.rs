//! Distance estimates and ranking results.

use serde::Serialize;

/// Travel estimate from the origin to one candidate shelter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistanceEstimate {
    /// Index of the candidate in the ranked input.
    pub shelter_index: usize,
    pub distance_meters: u64,
    /// Display form of the distance, e.g. "1.2 km".
    pub distance_text: String,
    /// Display form of the travel time, e.g. "15 mins".
    pub duration_text: String,
    pub duration_seconds: Option<u64>,
    /// Address the distance oracle resolved the destination to.
    pub destination_address: Option<String>,
}

/// Outcome of ranking candidates by travel distance.
///
/// `estimates` is in input order and `closest_index` always points at the
/// leftmost estimate with the smallest `distance_meters`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingResult {
    pub estimates: Vec<DistanceEstimate>,
    pub closest_index: usize,
    /// Address the distance oracle resolved the origin to.
    pub origin_address: Option<String>,
}

impl RankingResult {
    /// The estimate for the closest candidate.
    pub fn closest(&self) -> &DistanceEstimate {
        &self.estimates[self.closest_index]
    }

    /// Estimate for a given candidate index.
    pub fn estimate_for(&self, shelter_index: usize) -> Option<&DistanceEstimate> {
        self.estimates
            .iter()
            .find(|e| e.shelter_index == shelter_index)
    }
}
