//! Graph builder with efficient edge handling
//!
//! This module provides a mutable graph builder that uses FxHashMap
//! for O(1) edge lookups during construction. The node space is dense
//! (`0..N`) and declared up front; edges are validated as they arrive so
//! scoring never has to.

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::error::{RankError, Result};
use crate::graph::csr::CsrGraph;

/// Edge lists below this size are aggregated sequentially.
const PARALLEL_EDGE_THRESHOLD: usize = 10_000;

/// A mutable graph builder optimized for incremental construction.
///
/// Adding the same ordered pair twice accumulates the weight, so callers
/// with duplicate edges in their source data get pre-aggregation for free.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    /// Adjacency per node: target node ID -> accumulated edge weight.
    adjacency: Vec<FxHashMap<u32, f64>>,
    directed: bool,
}

impl GraphBuilder {
    /// Create a builder over the dense node space `0..num_nodes`.
    pub fn new(num_nodes: usize) -> Self {
        Self {
            adjacency: vec![FxHashMap::default(); num_nodes],
            directed: true,
        }
    }

    /// Mark the graph as undirected.
    ///
    /// Purely informational: the builder never symmetrizes on its own.
    /// Callers with undirected source data must materialize both
    /// directions, e.g. via [`add_edge_symmetric`](Self::add_edge_symmetric).
    pub fn undirected(mut self) -> Self {
        self.directed = false;
        self
    }

    /// Add a weighted edge `from -> to`, accumulating onto any existing
    /// weight for that pair.
    ///
    /// Fails with [`RankError::InvalidGraph`] if the weight is not a
    /// positive finite number or either endpoint is outside the declared
    /// node space.
    pub fn add_edge(&mut self, from: u32, to: u32, weight: f64) -> Result<()> {
        if !(weight > 0.0 && weight.is_finite()) {
            return Err(RankError::InvalidGraph(format!(
                "edge {from} -> {to} has non-positive weight {weight}"
            )));
        }
        let n = self.adjacency.len();
        if from as usize >= n || to as usize >= n {
            return Err(RankError::InvalidGraph(format!(
                "edge {from} -> {to} references a node outside 0..{n}"
            )));
        }
        *self.adjacency[from as usize].entry(to).or_insert(0.0) += weight;
        Ok(())
    }

    /// Add an edge with the default weight of 1.0.
    pub fn add_edge_unweighted(&mut self, from: u32, to: u32) -> Result<()> {
        self.add_edge(from, to, 1.0)
    }

    /// Add both directions of an edge with the same weight.
    ///
    /// Convenience for undirected source data; each direction is validated
    /// and accumulated independently.
    pub fn add_edge_symmetric(&mut self, a: u32, b: u32, weight: f64) -> Result<()> {
        self.add_edge(a, b, weight)?;
        if a != b {
            self.add_edge(b, a, weight)?;
        }
        Ok(())
    }

    /// Build a graph directly from an edge list.
    ///
    /// Large edge lists are aggregated in parallel: chunks are reduced to
    /// partial `(from, to) -> weight` maps on the rayon pool and merged
    /// into a single builder. Accumulation is additive, so the result is
    /// identical to the sequential path.
    pub fn from_edges(num_nodes: usize, edges: &[(u32, u32, f64)]) -> Result<Self> {
        let mut builder = Self::new(num_nodes);

        if edges.len() < PARALLEL_EDGE_THRESHOLD {
            for &(from, to, weight) in edges {
                builder.add_edge(from, to, weight)?;
            }
            return Ok(builder);
        }

        let threads = rayon::current_num_threads().max(1);
        let chunk_size = (edges.len() + threads - 1) / threads;
        let partials: Vec<Result<FxHashMap<(u32, u32), f64>>> = edges
            .par_chunks(chunk_size)
            .map(|chunk| {
                let mut partial = FxHashMap::default();
                for &(from, to, weight) in chunk {
                    if !(weight > 0.0 && weight.is_finite()) {
                        return Err(RankError::InvalidGraph(format!(
                            "edge {from} -> {to} has non-positive weight {weight}"
                        )));
                    }
                    *partial.entry((from, to)).or_insert(0.0) += weight;
                }
                Ok(partial)
            })
            .collect();

        for partial in partials {
            for ((from, to), weight) in partial? {
                builder.add_edge(from, to, weight)?;
            }
        }
        Ok(builder)
    }

    /// Get the number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Get the total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(FxHashMap::len).sum()
    }

    /// Whether the graph was declared directed.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Iterate over each node's adjacency map.
    pub(crate) fn rows(&self) -> impl Iterator<Item = &FxHashMap<u32, f64>> {
        self.adjacency.iter()
    }

    /// Check if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Freeze the builder into an immutable CSR graph.
    pub fn build(self) -> CsrGraph {
        CsrGraph::from_builder(&self)
    }
}
