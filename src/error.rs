//! Error types for graph construction and ranking.
//!
//! Construction errors (`InvalidGraph`) are raised when the builder sees a
//! malformed edge, never at scoring time. Vector-validation errors
//! (`InvalidSeed`, `MissingNodeWeights`) are raised before the first
//! iteration. `DegenerateGraph` is the only mid-iteration failure, and
//! `ConvergenceFailed` is an expected, recoverable outcome — the caller may
//! retry with a larger budget or looser tolerance.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, RankError>;

/// Everything that can go wrong while building a graph or ranking it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankError {
    /// A malformed edge: non-positive (or NaN) weight, or an endpoint
    /// outside the declared node space.
    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    /// A supplied seed/personalization/dangling vector is degenerate
    /// (zero or non-finite sum).
    #[error("invalid seed vector: {0}")]
    InvalidSeed(String),

    /// A supplied vector does not assign a weight to every node.
    #[error("vector must cover every node; missing nodes {missing:?}")]
    MissingNodeWeights {
        /// Node ids with no assigned weight.
        missing: Vec<u32>,
    },

    /// A normalization step would divide by zero, e.g. an all-zero score
    /// vector on a graph with no edges.
    #[error("degenerate graph: {0}")]
    DegenerateGraph(String),

    /// The iteration budget ran out before the error threshold was met.
    #[error("power iteration failed to converge in {max_iterations} iterations")]
    ConvergenceFailed {
        /// The budget that was exhausted.
        max_iterations: usize,
    },
}
