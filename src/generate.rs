//! Random instance generation.
//!
//! [`generate_ranked_instance`] builds a benchmark graph whose optimal ranking is known by
//! construction: a hidden permutation `P` is drawn, every `P(a) -> P(b)` with `a < b` becomes
//! an edge, and one closing edge `P(n) -> P(1)` turns the tournament into a graph with a
//! single unavoidable backward edge. `P` therefore keeps `n(n-1)/2` of the `n(n-1)/2 + 1`
//! edges, which is optimal.

use crate::graph::{join, MasProblem, Vertex};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// A generated graph together with its known-optimal ranking.
#[derive(Clone, Debug)]
pub struct RankedInstance {
    /// The graph, labelled `1..=n`.
    pub problem: MasProblem,
    /// An optimal ordering of the labels.
    pub ideal: Vec<Vertex>,
}

impl RankedInstance {
    /// Writes the instance file and the solution file.
    ///
    /// # Errors
    /// Returns an error if either file cannot be created or written.
    pub fn save(&self, instance: impl AsRef<Path>, solution: impl AsRef<Path>) -> io::Result<()> {
        self.problem.save_instance(instance)?;
        save_solution(solution, &self.ideal)
    }
}

/// Generates an `n`-vertex instance with a known optimal ranking.
pub fn generate_ranked_instance<R: Rng>(n: usize, rng: &mut R) -> RankedInstance {
    let mut permutation: Vec<usize> = (0..n).collect();
    permutation.shuffle(rng);

    // position[v] = index of v in the hidden permutation
    let mut position = vec![0usize; n];
    for (k, &v) in permutation.iter().enumerate() {
        position[v] = k;
    }

    let mut adj = vec![vec![0u8; n]; n];
    for i in 0..n {
        for j in 0..n {
            if position[j] > position[i] {
                adj[i][j] = 1;
            }
        }
    }
    if n >= 2 {
        adj[permutation[n - 1]][permutation[0]] = 1;
    }

    let ideal = permutation.iter().map(|&v| v + 1).collect();
    let problem = MasProblem::new(adj);
    info!(n, edges = problem.edge_count(), "generated ranked instance");
    RankedInstance { problem, ideal }
}

/// Generates a graph where each off-diagonal entry is an edge with probability `p`.
///
/// # Panics
/// Panics if `p` is not in `[0, 1]`.
pub fn random_problem<R: Rng>(n: usize, p: f64, rng: &mut R) -> MasProblem {
    let adj = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| u8::from(i != j && rng.random_bool(p)))
                .collect()
        })
        .collect();
    MasProblem::new(adj)
}

/// Writes a ranking as one line of space-separated labels.
///
/// # Errors
/// Returns an error if writing fails.
pub fn write_solution<W: Write>(mut w: W, ranking: &[Vertex]) -> io::Result<()> {
    writeln!(w, "{}", join(ranking, " "))?;
    w.flush()
}

/// Saves a ranking to `path` as a solution file.
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn save_solution(path: impl AsRef<Path>, ranking: &[Vertex]) -> io::Result<()> {
    let f = File::create(path)?;
    write_solution(BufWriter::new(f), ranking)
}
