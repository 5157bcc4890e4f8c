//! Convergence test on centroid movement.

use crate::point::Point;

/// Maximum per-coordinate centroid movement still considered "unchanged".
pub const TOLERANCE: f32 = 0.005;

/// True when every coordinate of every centroid moved by at most `tolerance`.
///
/// A single coordinate exceeding the tolerance on any centroid forces
/// another iteration.
pub(crate) fn converged(old: &[Point], new: &[Point], tolerance: f32) -> bool {
    old.iter().zip(new).all(|(a, b)| {
        a.coords()
            .iter()
            .zip(b.coords())
            .all(|(x, y)| (x - y).abs() <= tolerance)
    })
}
