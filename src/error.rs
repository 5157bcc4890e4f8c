use core::fmt;

/// Result alias for `lloyd`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the clustering engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Input point set was empty.
    EmptyInput,

    /// Point dimension does not match the set's dimension.
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Found dimension.
        found: usize,
    },

    /// Invalid number of clusters requested.
    InvalidClusterCount {
        /// Requested count.
        requested: usize,
        /// Number of points available.
        n_points: usize,
    },

    /// Clustering did not converge within the iteration limit.
    ConvergenceFailure {
        /// Number of iterations attempted.
        iterations: usize,
    },

    /// Invalid parameter value.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },

    /// A worker task panicked; the run was aborted.
    WorkerPanic,

    /// The worker pool could not be built.
    ThreadPool(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "empty input provided"),
            Error::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
            Error::InvalidClusterCount {
                requested,
                n_points,
            } => {
                write!(f, "cannot create {requested} clusters from {n_points} points")
            }
            Error::ConvergenceFailure { iterations } => {
                write!(f, "did not converge after {iterations} iterations")
            }
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
            Error::WorkerPanic => write!(f, "a worker task panicked; run aborted"),
            Error::ThreadPool(msg) => write!(f, "failed to build worker pool: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
