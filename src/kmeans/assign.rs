//! Nearest-centroid assignment phase.
//!
//! Each worker owns one block of the shared assignment array. Blocks are
//! disjoint and centroids are read-only for the whole phase, so no locking
//! is needed.

use crate::point::Point;

/// Assign every point in a block to its nearest centroid.
///
/// `points` and `out` are the same block of the input and of the shared
/// assignment array. Comparison is strictly-less on squared Euclidean
/// distance, so the first centroid in index order wins ties.
pub(crate) fn assign_block(points: &[Point], centroids: &[Point], out: &mut [usize]) {
    debug_assert_eq!(points.len(), out.len());
    for (point, slot) in points.iter().zip(out.iter_mut()) {
        let mut nearest = 0;
        let mut min_distance = f32::INFINITY;
        for (c, centroid) in centroids.iter().enumerate() {
            let distance = point.squared_distance(centroid);
            if distance < min_distance {
                min_distance = distance;
                nearest = c;
            }
        }
        *slot = nearest;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(coords: &[[f32; 2]]) -> Vec<Point> {
        coords.iter().map(|c| Point::new(c.to_vec())).collect()
    }

    #[test]
    fn test_assigns_nearest_centroid() {
        let data = points(&[[0.0, 0.0], [1.0, 0.0], [10.0, 10.0], [11.0, 10.0]]);
        let centroids = points(&[[0.5, 0.0], [10.5, 10.0]]);
        let mut out = vec![0; 4];

        assign_block(&data, &centroids, &mut out);
        assert_eq!(out, vec![0, 0, 1, 1]);
    }

    #[test]
    fn test_first_centroid_wins_ties() {
        // Point equidistant from both centroids.
        let data = points(&[[5.0, 0.0]]);
        let centroids = points(&[[0.0, 0.0], [10.0, 0.0]]);
        let mut out = vec![usize::MAX; 1];

        assign_block(&data, &centroids, &mut out);
        assert_eq!(out, vec![0]);
    }

    #[test]
    fn test_duplicate_centroids_resolve_to_lowest_index() {
        let data = points(&[[3.0, 3.0]]);
        let centroids = points(&[[1.0, 1.0], [1.0, 1.0], [1.0, 1.0]]);
        let mut out = vec![usize::MAX; 1];

        assign_block(&data, &centroids, &mut out);
        assert_eq!(out, vec![0]);
    }

    #[test]
    fn test_empty_block_is_a_no_op() {
        let centroids = points(&[[0.0, 0.0]]);
        let mut out: Vec<usize> = Vec::new();
        assign_block(&[], &centroids, &mut out);
        assert!(out.is_empty());
    }
}
