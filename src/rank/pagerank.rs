//! PageRank with teleportation, personalization, and dangling-mass
//! redistribution
//!
//! Implements the classic random-surfer model over the right-stochastic
//! view of a weighted directed graph. Mass leaving dangling nodes is
//! redistributed over a dangling-weights distribution (the personalization
//! vector unless overridden), so every round conserves total probability
//! exactly, up to floating-point drift. The returned vector is therefore a
//! probability distribution by construction; no final renormalization pass
//! is applied.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::RankResult;
use crate::error::{RankError, Result};
use crate::graph::csr::CsrGraph;
use crate::graph::stochastic::StochasticView;
use crate::power;

/// PageRank scorer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRank {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Maximum number of power iterations
    pub max_iterations: usize,
    /// Convergence tolerance (compared against the L1 delta scaled by node
    /// count: the error is a sum over the whole node domain, so the
    /// threshold grows with it)
    pub tolerance: f64,
    /// Teleport distribution; uniform if absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    personalization: Option<Vec<f64>>,
    /// Distribution for redistributing dangling-node mass; defaults to the
    /// personalization vector
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dangling: Option<Vec<f64>>,
    /// Optional starting vector; uniform if absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    seed: Option<Vec<f64>>,
}

impl Default for PageRank {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            tolerance: 1e-6,
            personalization: None,
            dangling: None,
            seed: None,
        }
    }
}

impl PageRank {
    /// Create a new PageRank scorer with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
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

    /// Set the personalization vector (teleport bias)
    ///
    /// Must assign a value to every node; it is L1-normalized internally.
    pub fn with_personalization(mut self, personalization: Vec<f64>) -> Self {
        self.personalization = Some(personalization);
        self
    }

    /// Set personalization from a sparse representation
    ///
    /// Takes a list of (node_id, weight) pairs and the total number of
    /// nodes. Nodes not in the list get weight 0.
    pub fn with_sparse_personalization(mut self, biases: &[(u32, f64)], num_nodes: usize) -> Self {
        let mut personalization = vec![0.0; num_nodes];
        for &(node, weight) in biases {
            if (node as usize) < num_nodes {
                personalization[node as usize] = weight;
            }
        }
        self.personalization = Some(personalization);
        self
    }

    /// Set the dangling-mass redistribution vector
    ///
    /// Must assign a value to every node; it is L1-normalized internally.
    pub fn with_dangling(mut self, dangling: Vec<f64>) -> Self {
        self.dangling = Some(dangling);
        self
    }

    /// Set the starting vector
    pub fn with_seed(mut self, seed: Vec<f64>) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Run PageRank on a graph
    ///
    /// Fails with [`RankError::MissingNodeWeights`] if a supplied
    /// personalization or dangling vector does not cover every node, with
    /// [`RankError::InvalidSeed`] if any supplied vector sums to zero, and
    /// with [`RankError::ConvergenceFailed`] if the iteration budget runs
    /// out — a partially converged vector is never returned.
    pub fn run(&self, graph: &CsrGraph) -> Result<RankResult> {
        let n = graph.node_count();
        if n == 0 {
            return Ok(RankResult {
                scores: vec![],
                iterations: 0,
                delta: 0.0,
            });
        }

        let p_vec = validate_distribution(self.personalization.as_deref(), n, "personalization")?;
        let dangling_weights = match &self.dangling {
            None => p_vec.clone(),
            Some(_) => validate_distribution(self.dangling.as_deref(), n, "dangling")?,
        };
        let initial = match &self.seed {
            None => vec![1.0 / n as f64; n],
            Some(_) => validate_distribution(self.seed.as_deref(), n, "seed")?,
        };

        let dangling_nodes = graph.dangling_nodes();
        let view = StochasticView::new(graph);
        let damping = self.damping;

        let converged = power::iterate(
            initial,
            |x_prev| {
                let mut x = vec![0.0; n];
                let dangle_mass: f64 = damping
                    * dangling_nodes
                        .iter()
                        .map(|&d| x_prev[d as usize])
                        .sum::<f64>();

                // Left multiply: x^T = x_prev^T * W over the stochastic view.
                for node in graph.nodes() {
                    let outgoing = damping * x_prev[node as usize];
                    for (target, prob) in view.transitions(node) {
                        x[target as usize] += outgoing * prob;
                    }
                }

                for node in 0..n {
                    x[node] += dangle_mass * dangling_weights[node]
                        + (1.0 - damping) * p_vec[node];
                }
                Ok(x)
            },
            self.max_iterations,
            n as f64 * self.tolerance,
        )?;

        debug!(
            iterations = converged.iterations,
            delta = converged.delta,
            "pagerank converged"
        );

        Ok(RankResult {
            scores: converged.vector,
            iterations: converged.iterations,
            delta: converged.delta,
        })
    }
}

/// Validate a caller-supplied distribution and L1-normalize it.
fn validate_distribution(vector: Option<&[f64]>, n: usize, name: &str) -> Result<Vec<f64>> {
    let Some(vector) = vector else {
        return Ok(vec![1.0 / n as f64; n]);
    };
    if vector.len() != n {
        return Err(RankError::MissingNodeWeights {
            missing: (vector.len().min(n) as u32..n as u32).collect(),
        });
    }
    let mut normalized = vector.to_vec();
    if power::l1_normalize_in_place(&mut normalized) <= 0.0 {
        return Err(RankError::InvalidSeed(format!("{name} vector sums to zero")));
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::GraphBuilder;

    /// Directed 3-cycle: 0 -> 1 -> 2 -> 0.
    fn build_cycle_graph() -> CsrGraph {
        let mut builder = GraphBuilder::new(3);
        builder.add_edge(0, 1, 1.0).unwrap();
        builder.add_edge(1, 2, 1.0).unwrap();
        builder.add_edge(2, 0, 1.0).unwrap();
        builder.build()
    }

    /// 0 -> 1 where node 1 is dangling.
    fn build_dangling_graph() -> CsrGraph {
        let mut builder = GraphBuilder::new(2);
        builder.add_edge(0, 1, 1.0).unwrap();
        builder.build()
    }

    #[test]
    fn test_cycle_converges_to_uniform() {
        let graph = build_cycle_graph();
        let result = PageRank::new().run(&graph).unwrap();

        for score in &result.scores {
            assert!((score - 1.0 / 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_scores_sum_to_one() {
        let mut builder = GraphBuilder::new(4);
        builder.add_edge(0, 1, 2.0).unwrap();
        builder.add_edge(1, 2, 1.0).unwrap();
        builder.add_edge(2, 0, 0.5).unwrap();
        builder.add_edge(0, 3, 1.0).unwrap();
        let graph = builder.build();

        let result = PageRank::new().run(&graph).unwrap();
        assert!((result.scores.iter().sum::<f64>() - 1.0).abs() < 1e-6);
        assert!(result.scores.iter().all(|&s| s >= 0.0));
    }

    #[test]
    fn test_dangling_mass_redistributed() {
        let graph = build_dangling_graph();
        let result = PageRank::new().run(&graph).unwrap();

        // Node 1 collects everything node 0 emits, plus half the dangling
        // and teleport mass; scores still form a distribution.
        assert!((result.scores.iter().sum::<f64>() - 1.0).abs() < 1e-6);
        assert!(result.scores[1] > result.scores[0]);
    }

    #[test]
    fn test_custom_dangling_weights() {
        let graph = build_dangling_graph();
        // Send all dangling mass back to node 0.
        let result = PageRank::new()
            .with_dangling(vec![1.0, 0.0])
            .run(&graph)
            .unwrap();

        assert!((result.scores.iter().sum::<f64>() - 1.0).abs() < 1e-6);

        let default = PageRank::new().run(&graph).unwrap();
        assert!(result.scores[0] > default.scores[0]);
    }

    #[test]
    fn test_single_node_converges_in_one_round() {
        let graph = GraphBuilder::new(1).build();
        let result = PageRank::new().run(&graph).unwrap();

        assert_eq!(result.iterations, 1);
        assert!((result.scores[0] - 1.0).abs() < 1e-12);

        // Damping doesn't matter: teleport and dangling mass both land on
        // the only node.
        let result = PageRank::new().with_damping(0.2).run(&graph).unwrap();
        assert_eq!(result.iterations, 1);
        assert!((result.scores[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_graph() {
        let graph = CsrGraph::default();
        let result = PageRank::new().run(&graph).unwrap();
        assert!(result.scores.is_empty());
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_personalization_biases_scores() {
        let graph = build_cycle_graph();
        let result = PageRank::new()
            .with_personalization(vec![10.0, 1.0, 1.0])
            .run(&graph)
            .unwrap();

        assert!(result.scores[0] > result.scores[1]);
        assert!((result.scores.iter().sum::<f64>() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_sparse_personalization() {
        let graph = build_cycle_graph();
        let sparse = PageRank::new()
            .with_sparse_personalization(&[(2, 5.0)], 3)
            .run(&graph)
            .unwrap();
        let uniform = PageRank::new().run(&graph).unwrap();

        assert!(sparse.scores[2] > uniform.scores[2]);
    }

    #[test]
    fn test_short_personalization_reports_missing_nodes() {
        let graph = build_cycle_graph();
        let result = PageRank::new()
            .with_personalization(vec![1.0, 1.0])
            .run(&graph);

        assert_eq!(
            result.unwrap_err(),
            RankError::MissingNodeWeights { missing: vec![2] }
        );
    }

    #[test]
    fn test_short_dangling_reports_missing_nodes() {
        let graph = build_cycle_graph();
        let result = PageRank::new().with_dangling(vec![1.0]).run(&graph);

        assert_eq!(
            result.unwrap_err(),
            RankError::MissingNodeWeights {
                missing: vec![1, 2]
            }
        );
    }

    #[test]
    fn test_zero_sum_personalization_rejected() {
        let graph = build_cycle_graph();
        let result = PageRank::new()
            .with_personalization(vec![0.0, 0.0, 0.0])
            .run(&graph);
        assert!(matches!(result, Err(RankError::InvalidSeed(_))));
    }

    #[test]
    fn test_seed_converges_to_same_fixed_point() {
        let graph = build_cycle_graph();
        let uniform = PageRank::new().run(&graph).unwrap();
        let seeded = PageRank::new()
            .with_seed(vec![1.0, 0.0, 0.0])
            .run(&graph)
            .unwrap();

        for (a, b) in uniform.scores.iter().zip(&seeded.scores) {
            assert!((a - b).abs() < 1e-5);
        }
    }

    #[test]
    fn test_zero_budget_fails() {
        let graph = build_cycle_graph();
        let result = PageRank::new().with_max_iterations(0).run(&graph);
        assert_eq!(
            result.unwrap_err(),
            RankError::ConvergenceFailed { max_iterations: 0 }
        );
    }

    #[test]
    fn test_budget_exhaustion_is_an_error() {
        let graph = build_cycle_graph();
        let result = PageRank::new()
            .with_max_iterations(2)
            .with_tolerance(0.0)
            .run(&graph);
        assert_eq!(
            result.unwrap_err(),
            RankError::ConvergenceFailed { max_iterations: 2 }
        );
    }

    #[test]
    fn test_weighted_edges_shift_mass() {
        // Node 0 splits 3:1 between nodes 1 and 2.
        let mut builder = GraphBuilder::new(3);
        builder.add_edge(0, 1, 3.0).unwrap();
        builder.add_edge(0, 2, 1.0).unwrap();
        builder.add_edge(1, 0, 1.0).unwrap();
        builder.add_edge(2, 0, 1.0).unwrap();
        let graph = builder.build();

        let result = PageRank::new().run(&graph).unwrap();
        assert!(result.scores[1] > result.scores[2]);
    }

    #[test]
    fn test_config_roundtrips_through_json() {
        let config = PageRank::new()
            .with_damping(0.4)
            .with_personalization(vec![1.0, 2.0]);
        let json = serde_json::to_string(&config).unwrap();
        let back: PageRank = serde_json::from_str(&json).unwrap();
        assert!((back.damping - 0.4).abs() < 1e-12);
        assert_eq!(back.personalization, Some(vec![1.0, 2.0]));
    }
}
