//! Centroid recomputation: per-block partial sums merged under a lock.
//!
//! Each worker first accumulates a private sum matrix and count vector over
//! its block, then folds them into the shared accumulator inside a short
//! critical section. Sums and counts are commutative, so workers may merge
//! in any order.

use std::ops::Range;
use std::sync::Mutex;

use ndarray::Array2;

use crate::point::Point;

/// Per-iteration scratch state: a `k x dimension` coordinate-sum matrix and
/// a `k`-length count vector.
///
/// A fresh accumulator is created for every reduction phase and read by the
/// orchestrator only after the phase's barrier closes.
#[derive(Debug)]
pub(crate) struct Accumulator {
    pub(crate) sums: Array2<f32>,
    pub(crate) counts: Vec<usize>,
}

impl Accumulator {
    pub(crate) fn new(k: usize, dimension: usize) -> Self {
        Self {
            sums: Array2::zeros((k, dimension)),
            counts: vec![0; k],
        }
    }

    /// Fold another accumulator's partials into this one.
    fn merge(&mut self, other: &Accumulator) {
        self.sums += &other.sums;
        for (total, partial) in self.counts.iter_mut().zip(&other.counts) {
            *total += partial;
        }
    }
}

/// Accumulate one block's partial sums and counts, then merge them into the
/// shared accumulator.
///
/// The assignment array is immutable for the whole phase; the lock is held
/// only for the merge step.
pub(crate) fn reduce_block(
    points: &[Point],
    assignments: &[usize],
    range: Range<usize>,
    k: usize,
    dimension: usize,
    shared: &Mutex<Accumulator>,
) {
    let mut local = Accumulator::new(k, dimension);
    for i in range {
        let cluster = assignments[i];
        for (j, coord) in points[i].coords().iter().enumerate() {
            local.sums[[cluster, j]] += coord;
        }
        local.counts[cluster] += 1;
    }

    let mut acc = shared.lock().unwrap_or_else(|e| e.into_inner());
    acc.merge(&local);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(coords: &[[f32; 2]]) -> Vec<Point> {
        coords.iter().map(|c| Point::new(c.to_vec())).collect()
    }

    #[test]
    fn test_single_block_sums_and_counts() {
        let data = points(&[[1.0, 2.0], [3.0, 4.0], [10.0, 10.0]]);
        let assignments = vec![0, 0, 1];
        let shared = Mutex::new(Accumulator::new(2, 2));

        reduce_block(&data, &assignments, 0..3, 2, 2, &shared);

        let acc = shared.into_inner().unwrap();
        assert_eq!(acc.counts, vec![2, 1]);
        assert_eq!(acc.sums[[0, 0]], 4.0);
        assert_eq!(acc.sums[[0, 1]], 6.0);
        assert_eq!(acc.sums[[1, 0]], 10.0);
        assert_eq!(acc.sums[[1, 1]], 10.0);
    }

    #[test]
    fn test_disjoint_blocks_merge_to_full_totals() {
        let data = points(&[[1.0, 0.0], [2.0, 0.0], [3.0, 0.0], [4.0, 0.0]]);
        let assignments = vec![0, 1, 0, 1];
        let shared = Mutex::new(Accumulator::new(2, 2));

        // Same partition the engine would use with two workers.
        reduce_block(&data, &assignments, 0..2, 2, 2, &shared);
        reduce_block(&data, &assignments, 2..4, 2, 2, &shared);

        let acc = shared.into_inner().unwrap();
        assert_eq!(acc.counts.iter().sum::<usize>(), data.len());
        assert_eq!(acc.counts, vec![2, 2]);
        assert_eq!(acc.sums[[0, 0]], 4.0);
        assert_eq!(acc.sums[[1, 0]], 6.0);
    }

    #[test]
    fn test_empty_range_contributes_nothing() {
        let data = points(&[[1.0, 1.0]]);
        let assignments = vec![0];
        let shared = Mutex::new(Accumulator::new(1, 2));

        reduce_block(&data, &assignments, 1..1, 1, 2, &shared);

        let acc = shared.into_inner().unwrap();
        assert_eq!(acc.counts, vec![0]);
        assert_eq!(acc.sums[[0, 0]], 0.0);
    }
}
