//! Point, domain, and cluster value types.
//!
//! These are the narrow collaborators of the clustering engine: simple value
//! holders with coordinate access and Euclidean distance. All validation
//! happens at construction ([`PointSet::new`]) so the engine's hot loops
//! never re-check dimensions.

use crate::error::{Error, Result};

/// An immutable point with a fixed number of floating-point coordinates.
///
/// Centroids have the same shape and are represented with the same type;
/// the engine replaces them wholesale between iterations rather than
/// mutating them in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    coords: Vec<f32>,
}

impl Point {
    /// Create a point from its coordinates.
    pub fn new(coords: Vec<f32>) -> Self {
        Self { coords }
    }

    /// Number of coordinates.
    pub fn dimension(&self) -> usize {
        self.coords.len()
    }

    /// Coordinate slice.
    pub fn coords(&self) -> &[f32] {
        &self.coords
    }

    /// Squared Euclidean distance to another point of the same dimension.
    pub fn squared_distance(&self, other: &Point) -> f32 {
        debug_assert_eq!(self.coords.len(), other.coords.len());
        self.coords
            .iter()
            .zip(&other.coords)
            .map(|(a, b)| (a - b) * (a - b))
            .sum()
    }

    /// Euclidean distance to another point of the same dimension.
    pub fn distance(&self, other: &Point) -> f32 {
        self.squared_distance(other).sqrt()
    }
}

impl From<Vec<f32>> for Point {
    fn from(coords: Vec<f32>) -> Self {
        Point::new(coords)
    }
}

/// Axis-aligned bounds the points of a [`PointSet`] were drawn from.
///
/// Carried through to the output clusters as an opaque handle; the engine
/// never inspects the bounds themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct Domain {
    bounds: Vec<(f32, f32)>,
}

impl Domain {
    /// Create a domain from per-axis `(min, max)` bounds.
    pub fn new(bounds: Vec<(f32, f32)>) -> Self {
        Self { bounds }
    }

    /// Number of axes.
    pub fn dimension(&self) -> usize {
        self.bounds.len()
    }

    /// Per-axis `(min, max)` bounds.
    pub fn bounds(&self) -> &[(f32, f32)] {
        &self.bounds
    }
}

/// An ordered collection of points sharing one dimension, plus the domain
/// they belong to.
#[derive(Debug, Clone)]
pub struct PointSet {
    domain: Domain,
    points: Vec<Point>,
}

impl PointSet {
    /// Create a point set, checking that every point matches the domain's
    /// dimension.
    pub fn new(domain: Domain, points: Vec<Point>) -> Result<Self> {
        let expected = domain.dimension();
        for point in &points {
            if point.dimension() != expected {
                return Err(Error::DimensionMismatch {
                    expected,
                    found: point.dimension(),
                });
            }
        }
        Ok(Self { domain, points })
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the set holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The points, in insertion order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The originating domain.
    pub fn domain(&self) -> &Domain {
        &self.domain
    }
}

/// One output partition: the points assigned to a cluster plus the domain
/// they came from.
#[derive(Debug, Clone)]
pub struct Cluster {
    domain: Domain,
    points: Vec<Point>,
}

impl Cluster {
    pub(crate) fn new(domain: Domain, points: Vec<Point>) -> Self {
        Self { domain, points }
    }

    /// The points assigned to this cluster, in original input order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The domain the clustered points belong to.
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Number of points in the cluster.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the cluster received no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squared_distance() {
        let a = Point::new(vec![0.0, 0.0]);
        let b = Point::new(vec![3.0, 4.0]);
        assert_eq!(a.squared_distance(&b), 25.0);
        assert_eq!(a.distance(&b), 5.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Point::new(vec![1.0, -2.0, 0.5]);
        let b = Point::new(vec![-1.0, 3.0, 2.5]);
        assert_eq!(a.squared_distance(&b), b.squared_distance(&a));
    }

    #[test]
    fn test_point_set_accepts_uniform_dimension() {
        let domain = Domain::new(vec![(0.0, 10.0), (0.0, 10.0)]);
        let set = PointSet::new(
            domain,
            vec![Point::new(vec![1.0, 2.0]), Point::new(vec![3.0, 4.0])],
        )
        .unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.domain().dimension(), 2);
    }

    #[test]
    fn test_point_set_rejects_mixed_dimension() {
        let domain = Domain::new(vec![(0.0, 10.0), (0.0, 10.0)]);
        let result = PointSet::new(
            domain,
            vec![Point::new(vec![1.0, 2.0]), Point::new(vec![3.0])],
        );
        assert_eq!(
            result.unwrap_err(),
            crate::Error::DimensionMismatch {
                expected: 2,
                found: 1
            }
        );
    }
}
