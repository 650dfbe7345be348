//! Right-stochastic view of a graph
//!
//! Presents each node's outgoing edges as transition probabilities summing
//! to 1.0, without materializing a normalized copy of the graph. For node
//! `n` with out-weight-sum `S > 0`, the edge `(n, m, w)` is viewed as
//! probability `w / S`. Dangling nodes (`S == 0`) have an empty transition
//! set; PageRank redistributes their mass separately.

use super::csr::CsrGraph;

/// A lazy row-normalized view over a [`CsrGraph`].
///
/// Normalization happens per node, on demand, in O(out-degree); nothing is
/// cached or copied, so the view is free to construct for any graph size.
#[derive(Debug, Clone, Copy)]
pub struct StochasticView<'g> {
    graph: &'g CsrGraph,
}

impl<'g> StochasticView<'g> {
    /// Wrap a graph in a stochastic view.
    pub fn new(graph: &'g CsrGraph) -> Self {
        Self { graph }
    }

    /// Iterate over `(target, probability)` pairs for a node's outgoing
    /// edges. Empty for dangling nodes.
    pub fn transitions(&self, node: u32) -> impl Iterator<Item = (u32, f64)> + 'g {
        let sum = self.graph.out_weight_sum(node);
        let graph = self.graph;
        graph
            .neighbors(node)
            .filter(move |_| sum > 0.0)
            .map(move |(target, weight)| (target, weight / sum))
    }

    /// Whether a node has no outgoing edges.
    pub fn is_dangling(&self, node: u32) -> bool {
        self.graph.out_weight_sum(node) == 0.0
    }

    /// The underlying graph.
    pub fn graph(&self) -> &'g CsrGraph {
        self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::GraphBuilder;

    fn weighted_graph() -> CsrGraph {
        let mut builder = GraphBuilder::new(3);
        builder.add_edge(0, 1, 1.0).unwrap();
        builder.add_edge(0, 2, 3.0).unwrap();
        builder.add_edge(1, 0, 2.0).unwrap();
        builder.build()
    }

    #[test]
    fn test_transitions_sum_to_one() {
        let graph = weighted_graph();
        let view = StochasticView::new(&graph);

        for node in graph.nodes().filter(|&n| !view.is_dangling(n)) {
            let sum: f64 = view.transitions(node).map(|(_, p)| p).sum();
            assert!((sum - 1.0).abs() < 1e-12, "node {node} sums to {sum}");
        }
    }

    #[test]
    fn test_transition_proportions() {
        let graph = weighted_graph();
        let view = StochasticView::new(&graph);

        let probs: Vec<_> = view.transitions(0).collect();
        assert_eq!(probs.len(), 2);
        assert!((probs[0].1 - 0.25).abs() < 1e-12); // 1.0 / 4.0
        assert!((probs[1].1 - 0.75).abs() < 1e-12); // 3.0 / 4.0
    }

    #[test]
    fn test_dangling_node_has_no_transitions() {
        let graph = weighted_graph();
        let view = StochasticView::new(&graph);

        assert!(view.is_dangling(2));
        assert_eq!(view.transitions(2).count(), 0);
        assert!(!view.is_dangling(0));
    }

    #[test]
    fn test_view_does_not_mutate_graph() {
        let graph = weighted_graph();
        let view = StochasticView::new(&graph);
        let _ = view.transitions(0).count();

        // Underlying weights are untouched.
        assert!((graph.out_weight_sum(0) - 4.0).abs() < 1e-12);
        assert_eq!(graph.neighbors(0).collect::<Vec<_>>(), vec![(1, 1.0), (2, 3.0)]);
    }
}
