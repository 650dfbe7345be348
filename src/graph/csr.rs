//! Compressed Sparse Row (CSR) graph representation
//!
//! CSR is optimized for iteration over neighbors, which is exactly what
//! power iteration needs: every round sweeps every node's outgoing edges.

use super::builder::GraphBuilder;

/// A graph in Compressed Sparse Row format
///
/// CSR stores edges contiguously, making iteration over neighbors very fast.
/// The graph is immutable once built; scoring only ever borrows it, so one
/// instance can be shared across concurrent HITS and PageRank calls.
#[derive(Debug, Clone)]
pub struct CsrGraph {
    /// Number of nodes
    num_nodes: usize,
    /// Row pointers: node i's edges are at indices row_ptr[i]..row_ptr[i+1]
    row_ptr: Vec<usize>,
    /// Column indices (target nodes) for each edge
    col_idx: Vec<u32>,
    /// Edge weights
    weights: Vec<f64>,
    /// Out-degree for each node
    out_degree: Vec<u32>,
    /// Total outgoing weight for each node
    total_weight: Vec<f64>,
    directed: bool,
}

impl CsrGraph {
    /// Convert a GraphBuilder into CSR format
    pub fn from_builder(builder: &GraphBuilder) -> Self {
        let num_nodes = builder.node_count();
        let mut row_ptr = Vec::with_capacity(num_nodes + 1);
        let mut col_idx = Vec::new();
        let mut weights = Vec::new();
        let mut out_degree = Vec::with_capacity(num_nodes);
        let mut total_weight = Vec::with_capacity(num_nodes);

        row_ptr.push(0);

        for row in builder.rows() {
            // Collect and sort edges for deterministic iteration
            let mut edges: Vec<_> = row.iter().map(|(&k, &v)| (k, v)).collect();
            edges.sort_by_key(|(k, _)| *k);

            out_degree.push(edges.len() as u32);
            total_weight.push(edges.iter().map(|(_, w)| w).sum());

            for (target, weight) in edges {
                col_idx.push(target);
                weights.push(weight);
            }

            row_ptr.push(col_idx.len());
        }

        Self {
            num_nodes,
            row_ptr,
            col_idx,
            weights,
            out_degree,
            total_weight,
            directed: builder.is_directed(),
        }
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.num_nodes
    }

    /// Iterate over all node ids (restartable)
    pub fn nodes(&self) -> impl Iterator<Item = u32> {
        0..self.num_nodes as u32
    }

    /// Iterate over the outgoing edges of a node as (target, weight) pairs
    pub fn neighbors(&self, node: u32) -> impl Iterator<Item = (u32, f64)> + '_ {
        let start = self.row_ptr[node as usize];
        let end = self.row_ptr[node as usize + 1];
        (start..end).map(move |i| (self.col_idx[i], self.weights[i]))
    }

    /// Get the out-degree of a node
    pub fn degree(&self, node: u32) -> u32 {
        self.out_degree[node as usize]
    }

    /// Get the total outgoing weight of a node
    ///
    /// A sum of 0.0 is the dangling-node signal: the node has no outgoing
    /// edges at all (zero weights cannot enter the graph).
    pub fn out_weight_sum(&self, node: u32) -> f64 {
        self.total_weight[node as usize]
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    /// Whether the graph was declared directed
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Get the total number of directed edges
    pub fn num_edges(&self) -> usize {
        self.col_idx.len()
    }

    /// Find dangling nodes (nodes with no outgoing edges)
    pub fn dangling_nodes(&self) -> Vec<u32> {
        (0..self.num_nodes as u32)
            .filter(|&n| self.out_degree[n as usize] == 0)
            .collect()
    }
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self {
            num_nodes: 0,
            row_ptr: vec![0],
            col_idx: Vec::new(),
            weights: Vec::new(),
            out_degree: Vec::new(),
            total_weight: Vec::new(),
            directed: true,
        }
    }
}
