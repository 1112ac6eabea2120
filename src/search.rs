//! Exhaustive ordering search for the Maximum Acyclic Subgraph problem.
//!
//! The driver enumerates every permutation depth-first: at each level it picks the next
//! vertex from the residual graph (in the residual's vertex order), recurses on the graph
//! with that vertex removed, and scores each completed ordering against the **original**
//! adjacency. Only the current DFS path is materialized, so live memory is O(n³) even
//! though the tree has n! leaves.
//!
//! Ties keep the first ordering found. Because the traversal follows vertex order at every
//! level, the reported ordering is the lexicographically first optimum when vertices are
//! compared by their position in the input.

use crate::error::{GraphError, SearchError};
use crate::graph::{position_index, MasProblem, Vertex};
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::{debug, info, warn};

// ============================================================================
// Configuration
// ============================================================================

/// Search configuration parameters.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Largest graph [`solve`] will accept. The search is O(n! · n²), so this is the
    /// caller-side bound that keeps a run finite in practice.
    pub max_vertices: usize,
    /// Explore the top-level branches on the rayon thread pool.
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_vertices: 10,
            parallel: false,
        }
    }
}

// ============================================================================
// Results
// ============================================================================

/// A best ordering and its forward-edge count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MasSolution {
    /// Vertex identifiers, earliest first.
    pub ordering: Vec<Vertex>,
    /// Number of forward edges under `ordering`.
    pub score: usize,
}

impl MasSolution {
    /// Size of the complementary feedback arc set, given the graph's edge total.
    pub fn feedback_arcs(&self, total_edges: usize) -> usize {
        total_edges.saturating_sub(self.score)
    }
}

/// Counters collected during a search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Recursion nodes visited, leaves included.
    pub nodes: u64,
    /// Complete orderings scored.
    pub leaves: u64,
}

impl SearchStats {
    fn merge(&mut self, other: SearchStats) {
        self.nodes += other.nodes;
        self.leaves += other.leaves;
    }
}

/// Best-so-far accumulator. Owned by one top-level call and threaded down by `&mut`.
#[derive(Debug, Default)]
struct Incumbent {
    best: Option<MasSolution>,
}

impl Incumbent {
    /// The first candidate is always taken; later ones only on a strictly higher score.
    #[inline]
    fn offer(&mut self, ordering: &[Vertex], score: usize) {
        let improves = self.best.as_ref().map_or(true, |b| score > b.score);
        if improves {
            self.best = Some(MasSolution {
                ordering: ordering.to_vec(),
                score,
            });
        }
    }

    fn absorb(&mut self, other: Incumbent) {
        if let Some(b) = other.best {
            self.offer(&b.ordering, b.score);
        }
    }

    fn into_solution(self) -> MasSolution {
        self.best.unwrap_or(MasSolution {
            ordering: Vec::new(),
            score: 0,
        })
    }
}

// ============================================================================
// Depth-first enumeration
// ============================================================================

struct Dfs<'a> {
    original: &'a MasProblem,
    /// Row of each identifier in `original`.
    row_of: HashMap<Vertex, usize>,
    /// Placed vertices, earliest first.
    ordering: Vec<Vertex>,
    /// `rank[row]` is the position of that row's vertex in `ordering`; only the
    /// entries for placed vertices are meaningful.
    rank: Vec<usize>,
    best: Incumbent,
    stats: SearchStats,
}

impl<'a> Dfs<'a> {
    fn new(original: &'a MasProblem) -> Self {
        let n = original.size();
        Self {
            original,
            row_of: position_index(original.vertices()),
            ordering: Vec::with_capacity(n),
            rank: vec![0; n],
            best: Incumbent::default(),
            stats: SearchStats::default(),
        }
    }

    #[inline]
    fn place(&mut self, v: Vertex) -> Result<(), GraphError> {
        let row = *self.row_of.get(&v).ok_or(GraphError::InvalidVertex(v))?;
        self.rank[row] = self.ordering.len();
        self.ordering.push(v);
        Ok(())
    }

    fn descend(&mut self, residual: &MasProblem) -> Result<(), GraphError> {
        self.stats.nodes += 1;

        if residual.is_empty() {
            self.stats.leaves += 1;
            let score = self.original.forward_count_ranked(&self.rank);
            self.best.offer(&self.ordering, score);
            return Ok(());
        }

        for &v in residual.vertices() {
            let next = residual.remove_vertex(v)?;
            self.place(v)?;
            self.descend(&next)?;
            self.ordering.pop();
        }
        Ok(())
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Finds an ordering of `problem`'s vertices with the maximum number of forward edges.
///
/// The input is assumed to satisfy the graph invariants; no validation happens here.
///
/// # Errors
/// Returns a [`GraphError`] only if a graph operation rejects an identifier, which
/// indicates a bug in the driver rather than bad input.
pub fn solve_exhaustive(problem: &MasProblem) -> Result<MasSolution, GraphError> {
    solve_exhaustive_with_stats(problem).map(|(solution, _)| solution)
}

/// Like [`solve_exhaustive`], also returning search counters.
///
/// # Errors
/// See [`solve_exhaustive`].
pub fn solve_exhaustive_with_stats(
    problem: &MasProblem,
) -> Result<(MasSolution, SearchStats), GraphError> {
    let mut dfs = Dfs::new(problem);
    dfs.descend(problem)?;
    let stats = dfs.stats;
    let solution = dfs.best.into_solution();
    debug!(
        n = problem.size(),
        nodes = stats.nodes,
        leaves = stats.leaves,
        score = solution.score,
        "exhaustive search finished"
    );
    Ok((solution, stats))
}

/// Exhaustive search with the top-level branches run in parallel.
///
/// Each branch keeps its own accumulator; branch results are folded in vertex order
/// with the same strict-improvement rule, so the result is identical to
/// [`solve_exhaustive`].
///
/// # Errors
/// See [`solve_exhaustive`].
pub fn solve_exhaustive_parallel(problem: &MasProblem) -> Result<MasSolution, GraphError> {
    solve_exhaustive_parallel_with_stats(problem).map(|(solution, _)| solution)
}

/// Like [`solve_exhaustive_parallel`], also returning counters summed over all branches.
/// The counts equal those of [`solve_exhaustive_with_stats`].
///
/// # Errors
/// See [`solve_exhaustive`].
pub fn solve_exhaustive_parallel_with_stats(
    problem: &MasProblem,
) -> Result<(MasSolution, SearchStats), GraphError> {
    if problem.is_empty() {
        return solve_exhaustive_with_stats(problem);
    }

    let branches: Vec<(Incumbent, SearchStats)> = problem
        .vertices()
        .par_iter()
        .map(|&first| {
            let mut dfs = Dfs::new(problem);
            dfs.place(first)?;
            dfs.descend(&problem.remove_vertex(first)?)?;
            Ok::<_, GraphError>((dfs.best, dfs.stats))
        })
        .collect::<Result<_, GraphError>>()?;

    let mut best = Incumbent::default();
    let mut stats = SearchStats {
        nodes: 1,
        leaves: 0,
    };
    for (branch, branch_stats) in branches {
        best.absorb(branch);
        stats.merge(branch_stats);
    }
    let solution = best.into_solution();
    debug!(
        n = problem.size(),
        branches = problem.size(),
        nodes = stats.nodes,
        leaves = stats.leaves,
        score = solution.score,
        "parallel exhaustive search finished"
    );
    Ok((solution, stats))
}

/// Solves `problem` under `cfg`, refusing graphs above `cfg.max_vertices`.
///
/// # Errors
/// Returns [`SearchError::TooLarge`] if the graph exceeds the configured bound.
pub fn solve(problem: &MasProblem, cfg: &SearchConfig) -> Result<MasSolution, SearchError> {
    let n = problem.size();
    if n > cfg.max_vertices {
        warn!(n, max = cfg.max_vertices, "refusing exhaustive search");
        return Err(SearchError::TooLarge {
            n,
            max: cfg.max_vertices,
        });
    }

    let solution = if cfg.parallel {
        solve_exhaustive_parallel(problem)?
    } else {
        solve_exhaustive(problem)?
    };
    info!(
        n,
        edges = problem.edge_count(),
        score = solution.score,
        "maximum acyclic subgraph found"
    );
    Ok(solution)
}

// ============================================================================
// Tests
// ============================================================================
