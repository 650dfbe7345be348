//! HITS (Hyperlink-Induced Topic Search)
//!
//! Computes mutually recursive hub and authority scores: a good hub points
//! at good authorities, a good authority is pointed at by good hubs.
//!
//! One detail is deliberate and differs from some textbook formulations:
//! within a round, the new hub scores are computed from the authority
//! scores of the *same* round, not the previous one. Both vectors are
//! max-normalized every round to keep the iteration numerically stable,
//! and L1-normalized once after convergence so each returned vector sums
//! to 1.0.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::HitsScores;
use crate::error::{RankError, Result};
use crate::graph::csr::CsrGraph;
use crate::power;

/// HITS scorer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hits {
    /// Maximum number of power iterations
    pub max_iterations: usize,
    /// Convergence tolerance (compared against the hub vector's L1 delta
    /// directly, with no node-count scaling)
    pub tolerance: f64,
    /// Optional starting hub vector; uniform if absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    seed: Option<Vec<f64>>,
}

impl Default for Hits {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            tolerance: 1e-6,
            seed: None,
        }
    }
}

impl Hits {
    /// Create a new HITS scorer with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the starting hub vector
    ///
    /// Must assign a value to every node and have a positive sum; it is
    /// L1-normalized before use.
    pub fn with_seed(mut self, seed: Vec<f64>) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Run HITS on a graph
    ///
    /// Returns hub and authority scores, each summing to 1.0. Fails with
    /// [`RankError::DegenerateGraph`] if a round produces an all-zero
    /// vector (e.g. a graph with no edges), and with
    /// [`RankError::ConvergenceFailed`] if the iteration budget runs out.
    pub fn run(&self, graph: &CsrGraph) -> Result<HitsScores> {
        let n = graph.node_count();
        if n == 0 {
            return Ok(HitsScores {
                hubs: vec![],
                authorities: vec![],
                iterations: 0,
                delta: 0.0,
            });
        }

        let initial = self.initial_hubs(n)?;
        let mut authorities = vec![0.0; n];

        let converged = power::iterate(
            initial,
            |hubs_prev| {
                authorities.fill(0.0);
                for node in graph.nodes() {
                    for (target, weight) in graph.neighbors(node) {
                        authorities[target as usize] += hubs_prev[node as usize] * weight;
                    }
                }

                // Same-round coupling: hubs are rebuilt from the authority
                // scores just computed, not the previous round's.
                let mut hubs = vec![0.0; n];
                for node in graph.nodes() {
                    for (target, weight) in graph.neighbors(node) {
                        hubs[node as usize] += authorities[target as usize] * weight;
                    }
                }

                if power::max_normalize_in_place(&mut hubs) == 0.0 {
                    return Err(RankError::DegenerateGraph(
                        "hub scores are all zero".into(),
                    ));
                }
                if power::max_normalize_in_place(&mut authorities) == 0.0 {
                    return Err(RankError::DegenerateGraph(
                        "authority scores are all zero".into(),
                    ));
                }
                Ok(hubs)
            },
            self.max_iterations,
            self.tolerance,
        )?;

        let mut hubs = converged.vector;
        power::l1_normalize_in_place(&mut hubs);
        power::l1_normalize_in_place(&mut authorities);

        debug!(
            iterations = converged.iterations,
            delta = converged.delta,
            "hits converged"
        );

        Ok(HitsScores {
            hubs,
            authorities,
            iterations: converged.iterations,
            delta: converged.delta,
        })
    }

    /// Validate and normalize the starting hub vector.
    fn initial_hubs(&self, n: usize) -> Result<Vec<f64>> {
        match &self.seed {
            None => Ok(vec![1.0 / n as f64; n]),
            Some(seed) => {
                if seed.len() != n {
                    return Err(RankError::InvalidSeed(format!(
                        "seed covers {} nodes, graph has {n}",
                        seed.len()
                    )));
                }
                let mut hubs = seed.clone();
                if power::l1_normalize_in_place(&mut hubs) <= 0.0 {
                    return Err(RankError::InvalidSeed("seed sums to zero".into()));
                }
                Ok(hubs)
            }
        }
    }
}
