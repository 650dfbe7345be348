//! rapid-graphrank: HITS and PageRank over weighted directed graphs.
//!
//! The crate is organized around a two-phase graph representation and a
//! shared power-iteration engine:
//!
//! - [`graph::builder::GraphBuilder`] — mutable, hash-based adjacency for
//!   incremental edge aggregation.
//! - [`graph::csr::CsrGraph`] — immutable Compressed Sparse Row form,
//!   optimized for the repeated edge sweeps that power iteration performs.
//! - [`graph::stochastic::StochasticView`] — lazy row-normalized view of a
//!   `CsrGraph`, used by PageRank.
//! - [`power`] — the fixed-point loop itself: apply an update closure,
//!   measure the L1 delta, stop on convergence or fail when the iteration
//!   budget runs out.
//! - [`rank::hits::Hits`] and [`rank::pagerank::PageRank`] — the two
//!   scorers, each a small config struct that drives the engine with its
//!   own update rule and normalization policy.
//!
//! # Quick start
//!
//! ```
//! use rapid_graphrank::{GraphBuilder, PageRank};
//!
//! let mut builder = GraphBuilder::new(3);
//! builder.add_edge(0, 1, 1.0).unwrap();
//! builder.add_edge(1, 2, 1.0).unwrap();
//! builder.add_edge(2, 0, 1.0).unwrap();
//! let graph = builder.build();
//!
//! let result = PageRank::new().run(&graph).unwrap();
//! assert!((result.scores.iter().sum::<f64>() - 1.0).abs() < 1e-9);
//! ```
//!
//! Scoring never mutates the graph, so a single [`CsrGraph`] may be shared
//! immutably across concurrent HITS and PageRank calls.
//!
//! [`CsrGraph`]: graph::csr::CsrGraph

pub mod error;
pub mod graph;
pub mod power;
pub mod rank;

pub use error::{RankError, Result};
pub use graph::builder::GraphBuilder;
pub use graph::csr::CsrGraph;
pub use graph::stochastic::StochasticView;
pub use rank::hits::Hits;
pub use rank::pagerank::PageRank;
pub use rank::{HitsScores, RankResult};
