//! Parallel Lloyd's-algorithm clustering.
//!
//! Partitions a point set into k clusters by minimizing **within-cluster sum
//! of squares** (WCSS), alternating two phases until the centroids stop
//! moving:
//!
//! 1. **Assign**: each point goes to its nearest centroid
//! 2. **Update**: each centroid becomes the mean of its assigned points
//!
//! **Why it converges**: WCSS decreases monotonically at every step and is
//! bounded below by 0.
//!
//! # Parallel structure
//!
//! Both phases run on a fixed pool of worker threads, built once per run.
//! The index range `[0, n)` is split into one contiguous block per worker;
//! each phase is a synchronous fork-join round over those blocks:
//!
//! - **Assignment** writes to disjoint slices of the shared assignment
//!   array — no locks, the partition guarantees no overlap.
//! - **Reduction** accumulates private per-block sums and counts, then
//!   merges them into a shared accumulator inside a short critical section.
//! - **Seeding** (greedy farthest-point) is itself a parallel max-reduction
//!   over the blocks, repeated k-1 times; the best `(distance, index)`
//!   candidate pair is guarded by a single lock so compare-and-replace is
//!   atomic as a unit.
//!
//! Centroids handed to a phase are an immutable snapshot; the orchestrator
//! swaps in the next snapshot only after the phase's barrier has closed.
//!
//! # Seeding
//!
//! The default strategy is deterministic farthest-point initialization:
//! centroid 0 is point 0, and each subsequent centroid is the point with the
//! maximum minimum distance to the centroids chosen so far. Random
//! initialization is available via [`Init::Random`] for callers that prefer
//! the classical behavior.
//!
//! # Usage
//!
//! ```rust
//! use lloyd::{Domain, ParallelKmeans, Point, PointSet};
//!
//! let domain = Domain::new(vec![(0.0, 20.0), (0.0, 20.0)]);
//! let points = vec![
//!     Point::new(vec![0.0, 0.0]),
//!     Point::new(vec![1.0, 0.0]),
//!     Point::new(vec![10.0, 10.0]),
//!     Point::new(vec![11.0, 10.0]),
//! ];
//! let data = PointSet::new(domain, points).unwrap();
//!
//! let clusters = ParallelKmeans::new(2).fit(&data).unwrap();
//! assert_eq!(clusters.len(), 2);
//! assert_eq!(clusters[0].len() + clusters[1].len(), 4);
//! ```

mod assign;
mod converge;
mod engine;
mod reduce;
mod seed;

pub use converge::TOLERANCE;
pub use engine::{Init, ParallelKmeans, DEFAULT_MAX_ITER};
