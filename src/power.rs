//! Power iteration engine
//!
//! The fixed-point loop shared by HITS and PageRank. The engine knows
//! nothing about either algorithm: it applies a caller-supplied update
//! closure, measures the L1 distance between consecutive vectors, and
//! stops when the distance drops below the caller's threshold. Exhausting
//! the iteration budget is an error, never a silently partial result.

use tracing::trace;

use crate::error::{RankError, Result};

/// A converged score vector plus how the engine got there.
#[derive(Debug, Clone)]
pub struct Converged {
    /// The fixed point the iteration settled on.
    pub vector: Vec<f64>,
    /// Rounds performed, including the converging one.
    pub iterations: usize,
    /// L1 distance between the last two vectors.
    pub delta: f64,
}

/// Drive `update` to a fixed point.
///
/// Each round computes `next = update(&current)`, then the L1 error
/// `Σ |next[i] - current[i]|`. The round converges when the error drops
/// below `threshold` — each scorer supplies its own (HITS compares against
/// `tol` directly, PageRank against `node_count * tol`).
///
/// An empty initial vector converges trivially with zero rounds. A budget
/// of `max_iter = 0` on a non-empty vector fails immediately with
/// [`RankError::ConvergenceFailed`]; the error is never checked.
pub fn iterate<F>(initial: Vec<f64>, mut update: F, max_iter: usize, threshold: f64) -> Result<Converged>
where
    F: FnMut(&[f64]) -> Result<Vec<f64>>,
{
    if initial.is_empty() {
        return Ok(Converged {
            vector: initial,
            iterations: 0,
            delta: 0.0,
        });
    }

    let mut current = initial;
    for round in 0..max_iter {
        let next = update(&current)?;
        let delta = l1_distance(&next, &current);
        trace!(round, delta, "power iteration round");

        current = next;
        if delta < threshold {
            return Ok(Converged {
                vector: current,
                iterations: round + 1,
                delta,
            });
        }
    }

    Err(RankError::ConvergenceFailed {
        max_iterations: max_iter,
    })
}

/// L1 distance between two equally sized vectors.
pub fn l1_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}

/// Scale `vector` so its entries sum to 1.0, returning the normalizer.
///
/// A zero (or non-finite) sum leaves the vector untouched and returns it
/// unchanged so the caller can map it to the right error kind — a zero sum
/// means something different for a seed than for a mid-iteration vector.
pub fn l1_normalize_in_place(vector: &mut [f64]) -> f64 {
    let sum: f64 = vector.iter().sum();
    if sum > 0.0 && sum.is_finite() {
        for value in vector.iter_mut() {
            *value /= sum;
        }
    }
    sum
}

/// Scale `vector` so its maximum entry is 1.0, returning the normalizer.
///
/// As with [`l1_normalize_in_place`], a zero maximum is reported, not
/// normalized.
pub fn max_normalize_in_place(vector: &mut [f64]) -> f64 {
    let max = vector.iter().cloned().fold(0.0_f64, f64::max);
    if max > 0.0 && max.is_finite() {
        for value in vector.iter_mut() {
            *value /= max;
        }
    }
    max
}
