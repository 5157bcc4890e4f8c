//! The clustering orchestrator.
//!
//! Owns a fixed-size worker pool for the whole run and drives the fork-join
//! loop: seed once, then assign, reduce, and check convergence until the
//! centroids stop moving. Every phase submits one task per partition block
//! and blocks on the pool until all of them finish; no phase overlaps the
//! next.
//!
//! Workers holding a reference to "current centroids" always see an
//! immutable snapshot: each iteration builds a fresh centroid vector and the
//! orchestrator swaps it in only after the phase barrier has closed. A panic
//! inside any worker task is caught at the barrier and aborts the whole run
//! with [`Error::WorkerPanic`] instead of continuing on partial results.

use std::ops::Range;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Mutex;

use log::{debug, warn};
use rand::prelude::*;
use rayon::ThreadPool;

use super::assign::assign_block;
use super::converge::{converged, TOLERANCE};
use super::reduce::{reduce_block, Accumulator};
use super::seed::{outlier_block, seed_block, SharedMax};
use crate::error::{Error, Result};
use crate::partition;
use crate::point::{Cluster, Point, PointSet};

/// Default iteration cap. The classical formulation iterates until the
/// tolerance test passes with no upper bound; the cap turns a pathological
/// oscillation into a [`Error::ConvergenceFailure`] instead of a hang.
pub const DEFAULT_MAX_ITER: usize = 500;

/// Initial-centroid selection strategy.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Init {
    /// Deterministic greedy farthest-point seeding: centroid 0 is point 0,
    /// each further centroid maximizes its minimum distance to those already
    /// chosen. No randomness involved.
    #[default]
    FarthestFirst,
    /// `k` points drawn uniformly at random, with replacement. Duplicate
    /// draws collapse clusters; the empty-cluster policy recovers them.
    Random {
        /// Seed for reproducible draws; `None` uses the thread RNG.
        seed: Option<u64>,
    },
}

/// Multi-threaded Lloyd's-algorithm clusterer.
///
/// Configuration follows the builder pattern; [`ParallelKmeans::fit`] runs
/// the engine against a [`PointSet`] and materializes the final clusters.
#[derive(Debug, Clone)]
pub struct ParallelKmeans {
    /// Number of clusters.
    k: usize,
    /// Worker count; defaults to available parallelism plus one.
    threads: Option<usize>,
    /// Per-coordinate convergence tolerance.
    tolerance: f32,
    /// Iteration cap.
    max_iter: usize,
    /// Seeding strategy.
    init: Init,
}

impl ParallelKmeans {
    /// Create a clusterer for `k` clusters with default settings.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            threads: None,
            tolerance: TOLERANCE,
            max_iter: DEFAULT_MAX_ITER,
            init: Init::FarthestFirst,
        }
    }

    /// Set the worker-pool size.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Set the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the maximum number of iterations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the initial-centroid selection strategy.
    pub fn with_init(mut self, init: Init) -> Self {
        self.init = init;
        self
    }

    /// Number of clusters this instance produces.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Cluster the point set.
    ///
    /// Returns exactly `k` clusters in centroid-index order; within each
    /// cluster, points keep their original input order.
    pub fn fit(&self, data: &PointSet) -> Result<Vec<Cluster>> {
        if self.k == 0 {
            return Err(Error::InvalidParameter {
                name: "k",
                message: "must be at least 1",
            });
        }
        if let Some(0) = self.threads {
            return Err(Error::InvalidParameter {
                name: "threads",
                message: "must be at least 1",
            });
        }
        if data.is_empty() {
            return Err(Error::EmptyInput);
        }

        let points = data.points();
        let n = points.len();
        if self.k > n {
            return Err(Error::InvalidClusterCount {
                requested: self.k,
                n_points: n,
            });
        }

        // Trivial path: one cluster holding every point, no workers started.
        if self.k == 1 {
            return Ok(vec![Cluster::new(data.domain().clone(), points.to_vec())]);
        }

        let threads = self.threads.unwrap_or_else(default_threads);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| Error::ThreadPool(e.to_string()))?;

        // One partition per run, reused by every phase.
        let blocks = partition::blocks(n, threads);
        let block_size = partition::block_size(n, threads);
        let dimension = points[0].dimension();

        let mut centroids = self.initial_centroids(&pool, points, &blocks)?;
        let mut assignments = vec![0usize; n];

        let mut converged_at = None;
        for iteration in 1..=self.max_iter {
            debug!(
                "iteration {iteration}: assigning {n} points to {} centroids on {threads} workers",
                self.k
            );
            self.assign_phase(&pool, points, &centroids, block_size, &mut assignments)?;

            let acc = self.reduce_phase(&pool, points, &assignments, &blocks, dimension)?;
            debug_assert_eq!(acc.counts.iter().sum::<usize>(), n);

            let new_centroids =
                self.next_centroids(&pool, points, &assignments, &blocks, &centroids, acc)?;

            if converged(&centroids, &new_centroids, self.tolerance) {
                converged_at = Some(iteration);
                break;
            }
            centroids = new_centroids;
        }

        let Some(iterations) = converged_at else {
            return Err(Error::ConvergenceFailure {
                iterations: self.max_iter,
            });
        };
        debug!("k-means converged after {iterations} iteration(s), k={}", self.k);

        // Walk the final assignment once and group points by cluster index.
        let mut grouped: Vec<Vec<Point>> = vec![Vec::new(); self.k];
        for (point, &cluster) in points.iter().zip(&assignments) {
            grouped[cluster].push(point.clone());
        }
        Ok(grouped
            .into_iter()
            .map(|members| Cluster::new(data.domain().clone(), members))
            .collect())
    }

    /// Pick the initial centroid snapshot.
    ///
    /// When the point count equals `k` the points themselves are the
    /// centroids and the greedy loop is skipped entirely.
    fn initial_centroids(
        &self,
        pool: &ThreadPool,
        points: &[Point],
        blocks: &[Range<usize>],
    ) -> Result<Vec<Point>> {
        if points.len() == self.k {
            return Ok(points.to_vec());
        }

        match self.init {
            Init::Random { seed } => {
                let mut rng: Box<dyn RngCore> = match seed {
                    Some(s) => Box::new(StdRng::seed_from_u64(s)),
                    None => Box::new(rand::rng()),
                };
                Ok((0..self.k)
                    .map(|_| points[rng.random_range(0..points.len())].clone())
                    .collect())
            }
            Init::FarthestFirst => {
                let mut centroids = vec![points[0].clone()];
                for _ in 1..self.k {
                    let best = SharedMax::new();
                    run_phase(|| {
                        pool.scope(|s| {
                            for range in blocks {
                                let range = range.clone();
                                let chosen = &centroids;
                                let best = &best;
                                s.spawn(move |_| seed_block(points, chosen, range, best));
                            }
                        });
                    })?;
                    let (_, index) = best.take();
                    centroids.push(points[index].clone());
                }
                Ok(centroids)
            }
        }
    }

    /// Fork-join round recomputing the nearest centroid for every point.
    ///
    /// The assignment array is chunked by the partition's block size into
    /// disjoint per-worker slices, so workers write without locks; the
    /// centroid snapshot is read-only for the whole phase.
    fn assign_phase(
        &self,
        pool: &ThreadPool,
        points: &[Point],
        centroids: &[Point],
        block_size: usize,
        assignments: &mut [usize],
    ) -> Result<()> {
        run_phase(|| {
            pool.scope(|s| {
                for (block_points, block_out) in points
                    .chunks(block_size)
                    .zip(assignments.chunks_mut(block_size))
                {
                    s.spawn(move |_| assign_block(block_points, centroids, block_out));
                }
            });
        })
    }

    /// Fork-join round accumulating per-cluster coordinate sums and counts
    /// into a fresh, iteration-scoped accumulator.
    fn reduce_phase(
        &self,
        pool: &ThreadPool,
        points: &[Point],
        assignments: &[usize],
        blocks: &[Range<usize>],
        dimension: usize,
    ) -> Result<Accumulator> {
        let shared = Mutex::new(Accumulator::new(self.k, dimension));
        run_phase(|| {
            pool.scope(|s| {
                for range in blocks {
                    let range = range.clone();
                    let shared = &shared;
                    s.spawn(move |_| {
                        reduce_block(points, assignments, range, self.k, dimension, shared)
                    });
                }
            });
        })?;
        Ok(shared.into_inner().unwrap_or_else(|e| e.into_inner()))
    }

    /// Divide the accumulated sums by the counts to produce the next
    /// centroid snapshot, re-seeding any cluster that received no points.
    ///
    /// An empty cluster's centroid becomes the farthest current outlier: the
    /// point with the maximum squared distance to its assigned cluster's new
    /// centroid. Outliers consumed by one re-seed are excluded from the
    /// next, so several empty clusters land on distinct points. The
    /// re-seeded centroid has moved far from its predecessor, which keeps
    /// the iteration loop running.
    fn next_centroids(
        &self,
        pool: &ThreadPool,
        points: &[Point],
        assignments: &[usize],
        blocks: &[Range<usize>],
        old: &[Point],
        acc: Accumulator,
    ) -> Result<Vec<Point>> {
        let dimension = acc.sums.ncols();
        let mut centroids = Vec::with_capacity(self.k);
        let mut empty = Vec::new();
        for c in 0..self.k {
            if acc.counts[c] == 0 {
                // Placeholder until re-seeded below; never read by outlier
                // workers because no point is assigned to an empty cluster.
                empty.push(c);
                centroids.push(old[c].clone());
                continue;
            }
            let coords = (0..dimension)
                .map(|j| acc.sums[[c, j]] / acc.counts[c] as f32)
                .collect();
            centroids.push(Point::new(coords));
        }

        let mut taken = Vec::new();
        for c in empty {
            warn!("cluster {c} received no points; re-seeding to farthest outlier");
            let best = SharedMax::new();
            run_phase(|| {
                pool.scope(|s| {
                    for range in blocks {
                        let range = range.clone();
                        let centroids = &centroids;
                        let taken = &taken;
                        let best = &best;
                        s.spawn(move |_| {
                            outlier_block(points, assignments, centroids, taken, range, best)
                        });
                    }
                });
            })?;
            let (_, index) = best.take();
            centroids[c] = points[index].clone();
            taken.push(index);
        }
        Ok(centroids)
    }
}

/// Run one synchronous fork-join phase, converting a worker panic into a
/// fatal error for the run.
fn run_phase<F: FnOnce()>(phase: F) -> Result<()> {
    catch_unwind(AssertUnwindSafe(phase)).map_err(|_| Error::WorkerPanic)
}

/// The original engine sizes its pool at available parallelism plus one.
fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        + 1
}
