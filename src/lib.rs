//! # lloyd
//!
//! Multi-threaded Lloyd's-algorithm (k-means) clustering over sets of
//! fixed-dimension points.
//!
//! The engine runs every phase — farthest-point seeding, nearest-centroid
//! assignment, and centroid recomputation — as fork-join rounds over a fixed
//! worker pool, with deterministic block partitioning and lock-guarded
//! merges where workers must share state. See the [`kmeans`] module for the
//! concurrency model.

pub mod error;
pub mod kmeans;
pub mod point;

mod partition;

pub use error::{Error, Result};
pub use kmeans::{Init, ParallelKmeans, DEFAULT_MAX_ITER, TOLERANCE};
pub use point::{Cluster, Domain, Point, PointSet};
