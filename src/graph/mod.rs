//! Graph construction and representation
//!
//! This module provides efficient graph building and storage
//! for the weighted directed graphs the ranking algorithms consume.

pub mod builder;
pub mod csr;
pub mod stochastic;

pub use builder::GraphBuilder;
pub use csr::CsrGraph;
pub use stochastic::StochasticView;
