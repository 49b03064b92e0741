//! Nearest-candidate selection over positioned values.

use crate::geo::{GeoPosition, Positioned};

/// Error returned when a nearest-candidate query has nothing to pick from.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no geographic candidates to select from")]
pub struct NoCandidates;

/// Pair every candidate with its distance from `origin`, closest first.
///
/// The sort is stable, so candidates at identical distances keep their
/// input order.
pub fn distance_sorted<T: Positioned>(
    origin: GeoPosition,
    candidates: Vec<T>,
) -> Vec<(f64, T)> {
    let mut sorted: Vec<(f64, T)> = candidates
        .into_iter()
        .map(|candidate| (origin.distance_to(&candidate.position()), candidate))
        .collect();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0));
    sorted
}

/// Keep at most `limit` candidates within `radius_m` metres.
///
/// `sorted` must be closest-first, as produced by [`distance_sorted`].
pub fn closest_within_radius<T: Positioned>(
    sorted: Vec<(f64, T)>,
    limit: usize,
    radius_m: f64,
) -> Vec<T> {
    sorted
        .into_iter()
        .take_while(|(distance, _)| *distance <= radius_m)
        .take(limit)
        .map(|(_, candidate)| candidate)
        .collect()
}

/// Like [`closest_within_radius`], but when the radius is empty fall back
/// to the single closest candidate, however far away it is.
///
/// Fails only when there are no candidates at all.
pub fn closest_within_radius_or_nearest<T: Positioned>(
    sorted: Vec<(f64, T)>,
    limit: usize,
    radius_m: f64,
) -> Result<Vec<T>, NoCandidates> {
    if sorted.is_empty() {
        return Err(NoCandidates);
    }
    let in_range = sorted
        .iter()
        .take_while(|(distance, _)| *distance <= radius_m)
        .count();
    let keep = if in_range == 0 { 1 } else { in_range.min(limit) };
    Ok(sorted
        .into_iter()
        .take(keep)
        .map(|(_, candidate)| candidate)
        .collect())
}
