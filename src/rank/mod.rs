//! Ranking algorithms
//!
//! This module provides the HITS and PageRank scorers. Both drive the
//! shared [`power`](crate::power) engine with their own update rule and
//! normalization policy.

pub mod hits;
pub mod pagerank;

pub use hits::Hits;
pub use pagerank::PageRank;

/// Result of a PageRank computation
///
/// Scores are a probability distribution over the node space: non-negative
/// and summing to 1.0. Non-convergence is an error, so a result always
/// means the tolerance was met.
#[derive(Debug, Clone)]
pub struct RankResult {
    /// Scores for each node (indexed by node ID)
    pub scores: Vec<f64>,
    /// Number of iterations performed
    pub iterations: usize,
    /// Final convergence delta
    pub delta: f64,
}

impl RankResult {
    /// Get top N nodes by score
    pub fn top_n(&self, n: usize) -> Vec<(u32, f64)> {
        top_n(&self.scores, n)
    }

    /// Get the score for a specific node
    pub fn score(&self, node: u32) -> f64 {
        self.scores.get(node as usize).copied().unwrap_or(0.0)
    }
}

/// Result of a HITS computation
///
/// Hub and authority scores are each L1-normalized to sum to 1.0.
#[derive(Debug, Clone)]
pub struct HitsScores {
    /// Hub scores for each node (indexed by node ID)
    pub hubs: Vec<f64>,
    /// Authority scores for each node (indexed by node ID)
    pub authorities: Vec<f64>,
    /// Number of iterations performed
    pub iterations: usize,
    /// Final convergence delta (over the hub vector)
    pub delta: f64,
}

impl HitsScores {
    /// Get top N nodes by hub score
    pub fn top_hubs(&self, n: usize) -> Vec<(u32, f64)> {
        top_n(&self.hubs, n)
    }

    /// Get top N nodes by authority score
    pub fn top_authorities(&self, n: usize) -> Vec<(u32, f64)> {
        top_n(&self.authorities, n)
    }
}

fn top_n(scores: &[f64], n: usize) -> Vec<(u32, f64)> {
    let mut indexed: Vec<_> = scores
        .iter()
        .enumerate()
        .map(|(i, &s)| (i as u32, s))
        .collect();
    indexed.sort_by(|a, b| b.1.total_cmp(&a.1));
    indexed.truncate(n);
    indexed
}
