//! Greedy farthest-point initial centroids.
//!
//! Centroid 0 is fixed to point 0. Each further centroid is the point
//! maximizing its minimum distance to the centroids chosen so far, found by
//! a parallel max-reduction: workers scan their blocks for a local candidate
//! and merge candidates through [`SharedMax`].
//!
//! The same reduction also locates the farthest outlier when a cluster goes
//! empty during an iteration (see the engine's empty-cluster policy).

use std::ops::Range;
use std::sync::Mutex;

use crate::point::Point;

/// Shared best `(squared distance, point index)` candidate.
///
/// Distance and index must be read, compared, and written together, so the
/// pair lives behind a single lock rather than an encoded atomic. A worker's
/// candidate replaces the stored pair only when its distance is strictly
/// greater, so the winning distance is the true global maximum; among tied
/// indices the final comparison order decides.
pub(crate) struct SharedMax {
    best: Mutex<(f32, usize)>,
}

impl SharedMax {
    pub(crate) fn new() -> Self {
        Self {
            best: Mutex::new((f32::NEG_INFINITY, 0)),
        }
    }

    /// Offer a candidate; keeps the stored pair unless `distance` beats it.
    pub(crate) fn offer(&self, distance: f32, index: usize) {
        let mut best = self.best.lock().unwrap_or_else(|e| e.into_inner());
        if distance > best.0 {
            *best = (distance, index);
        }
    }

    /// Consume the merged result after the phase barrier has closed.
    pub(crate) fn take(self) -> (f32, usize) {
        self.best.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

/// One seeding-round worker: find the point in `range` with the maximum
/// minimum distance to the centroids chosen so far, then merge it into the
/// shared candidate.
pub(crate) fn seed_block(
    points: &[Point],
    chosen: &[Point],
    range: Range<usize>,
    best: &SharedMax,
) {
    let mut candidate_distance = f32::NEG_INFINITY;
    let mut candidate = 0;
    for i in range.clone() {
        let mut min_distance = f32::INFINITY;
        for centroid in chosen {
            let distance = points[i].squared_distance(centroid);
            if distance < min_distance {
                min_distance = distance;
            }
        }
        if min_distance > candidate_distance {
            candidate_distance = min_distance;
            candidate = i;
        }
    }
    if !range.is_empty() {
        best.offer(candidate_distance, candidate);
    }
}

/// Empty-cluster recovery worker: find the point in `range` farthest from
/// its own assigned centroid, skipping indices already consumed by an
/// earlier re-seed in the same phase.
pub(crate) fn outlier_block(
    points: &[Point],
    assignments: &[usize],
    centroids: &[Point],
    taken: &[usize],
    range: Range<usize>,
    best: &SharedMax,
) {
    for i in range {
        if taken.contains(&i) {
            continue;
        }
        let distance = points[i].squared_distance(&centroids[assignments[i]]);
        best.offer(distance, i);
    }
}
