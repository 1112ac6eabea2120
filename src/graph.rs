//! Directed graph model for Maximum Acyclic Subgraph search.
//!
//! A [`MasProblem`] is a square `0/1` adjacency matrix plus a positionally aligned
//! sequence of vertex identifiers. Removing vertices returns a new, smaller problem;
//! the receiver is never mutated, so a search can keep the original graph around for
//! scoring while it walks reduced copies.

use crate::error::GraphError;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Vertex identifier. Instances loaded from files use the labels `1..=n`.
pub type Vertex = usize;

// ============================================================================
// Position index
// ============================================================================

/// Maps each identifier in `ordering` to its index in `ordering`.
///
/// `(4, 3, 2, 1)` becomes `{1: 3, 2: 2, 3: 1, 4: 0}`. If `ordering` contains a
/// duplicate, the later position wins and the map is shorter than `ordering`.
pub fn position_index(ordering: &[Vertex]) -> HashMap<Vertex, usize> {
    ordering.iter().enumerate().map(|(i, &v)| (v, i)).collect()
}

// ============================================================================
// MasProblem
// ============================================================================

/// A directed graph stored as an adjacency matrix with labelled rows.
///
/// `adj[i][j] == 1` is an edge from `vertices[i]` to `vertices[j]`.
///
/// Invariants (checked by [`MasProblem::try_new`], `debug_assert!`ed elsewhere):
/// - the matrix is `n x n` with `n == vertices.len()`,
/// - every entry is `0` or `1` and the diagonal is zero,
/// - `vertices` has no duplicates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MasProblem {
    adj: Vec<Vec<u8>>,
    vertices: Vec<Vertex>,
}

impl MasProblem {
    /// Creates a problem with the identity labelling `1..=n`.
    ///
    /// # Panics
    /// Panics in debug builds if the matrix breaks a structural invariant.
    pub fn new(adj: Vec<Vec<u8>>) -> Self {
        let vertices = (1..=adj.len()).collect();
        Self::with_vertices(adj, vertices)
    }

    /// Creates a problem with explicit vertex labels.
    ///
    /// # Panics
    /// Panics in debug builds if the matrix or labels break a structural invariant.
    pub fn with_vertices(adj: Vec<Vec<u8>>, vertices: Vec<Vertex>) -> Self {
        debug_assert_eq!(check_invariants(&adj, &vertices), Ok(()));
        Self { adj, vertices }
    }

    /// Creates a problem after checking every structural invariant.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidMatrix`] if the matrix is not square, has a
    /// non-binary entry, has a self-loop, or the labels contain duplicates.
    pub fn try_new(adj: Vec<Vec<u8>>, vertices: Option<Vec<Vertex>>) -> Result<Self, GraphError> {
        let vertices = vertices.unwrap_or_else(|| (1..=adj.len()).collect());
        check_invariants(&adj, &vertices)?;
        Ok(Self { adj, vertices })
    }

    /// The graph with no vertices.
    pub fn empty() -> Self {
        Self {
            adj: Vec::new(),
            vertices: Vec::new(),
        }
    }

    /// Number of vertices.
    #[inline]
    pub fn size(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` if the graph has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex identifiers in row order.
    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// The adjacency matrix, rows aligned with [`vertices`](Self::vertices).
    #[inline]
    pub fn adjacency(&self) -> &[Vec<u8>] {
        &self.adj
    }

    /// Returns whether the edge `u -> v` exists.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidVertex`] if either identifier is unknown.
    pub fn has_edge(&self, u: Vertex, v: Vertex) -> Result<bool, GraphError> {
        let i = self.row_of(u)?;
        let j = self.row_of(v)?;
        Ok(self.adj[i][j] == 1)
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adj
            .iter()
            .map(|row| row.iter().map(|&x| usize::from(x)).sum::<usize>())
            .sum()
    }

    /// Out-degree of each vertex, in vertex order.
    pub fn row_sums(&self) -> Vec<usize> {
        self.adj
            .iter()
            .map(|row| row.iter().map(|&x| usize::from(x)).sum())
            .collect()
    }

    /// In-degree of each vertex, in vertex order.
    pub fn column_sums(&self) -> Vec<usize> {
        let n = self.size();
        let mut sums = vec![0usize; n];
        for row in &self.adj {
            for (j, &x) in row.iter().enumerate() {
                sums[j] += usize::from(x);
            }
        }
        sums
    }

    // ------------------------------------------------------------------------
    // Removal
    // ------------------------------------------------------------------------

    /// Returns a copy of this problem with `v` and its row and column deleted.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidVertex`] if `v` is not present.
    pub fn remove_vertex(&self, v: Vertex) -> Result<Self, GraphError> {
        self.remove_vertices(&[v])
    }

    /// Returns a copy of this problem with every vertex in `removed` deleted.
    ///
    /// Survivors keep their relative order. Removing every vertex yields the empty
    /// graph. Row positions are resolved once, against the unmodified receiver,
    /// before any row or column is dropped.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidVertex`] for an unknown identifier, or for an
    /// identifier listed twice.
    pub fn remove_vertices(&self, removed: &[Vertex]) -> Result<Self, GraphError> {
        let n = self.size();
        let rows = position_index(&self.vertices);
        let mut keep = vec![true; n];
        for &v in removed {
            let i = *rows.get(&v).ok_or(GraphError::InvalidVertex(v))?;
            if !keep[i] {
                return Err(GraphError::InvalidVertex(v));
            }
            keep[i] = false;
        }

        let survivors: Vec<usize> = (0..n).filter(|&i| keep[i]).collect();
        if survivors.is_empty() {
            return Ok(Self::empty());
        }

        let adj = survivors
            .iter()
            .map(|&i| survivors.iter().map(|&j| self.adj[i][j]).collect())
            .collect();
        let vertices = survivors.iter().map(|&i| self.vertices[i]).collect();
        Ok(Self { adj, vertices })
    }

    // ------------------------------------------------------------------------
    // Scoring
    // ------------------------------------------------------------------------

    /// Counts edges `u -> v` where `u` precedes `v` in `ordering`.
    ///
    /// O(n²): a full scan of the adjacency matrix.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidOrdering`] if `ordering` is not a permutation
    /// of this graph's vertices.
    pub fn forward_edge_count(&self, ordering: &[Vertex]) -> Result<usize, GraphError> {
        let rank = self.rank_rows(ordering)?;
        Ok(self.forward_count_ranked(&rank))
    }

    /// Counts edges pointing backwards under `ordering` (the feedback arc set size).
    ///
    /// # Errors
    /// Same as [`forward_edge_count`](Self::forward_edge_count).
    pub fn backward_edge_count(&self, ordering: &[Vertex]) -> Result<usize, GraphError> {
        Ok(self.edge_count() - self.forward_edge_count(ordering)?)
    }

    /// Translates `ordering` into a per-row rank: `rank[i]` is the position of
    /// `vertices[i]` in `ordering`.
    pub(crate) fn rank_rows(&self, ordering: &[Vertex]) -> Result<Vec<usize>, GraphError> {
        if ordering.len() != self.size() {
            return Err(GraphError::InvalidOrdering {
                reason: format!(
                    "expected {} vertices, got {}",
                    self.size(),
                    ordering.len()
                ),
            });
        }
        let positions = position_index(ordering);
        if positions.len() != ordering.len() {
            return Err(GraphError::InvalidOrdering {
                reason: "duplicate vertex".to_string(),
            });
        }
        self.vertices
            .iter()
            .map(|v| {
                positions.get(v).copied().ok_or_else(|| GraphError::InvalidOrdering {
                    reason: format!("vertex {v} is missing"),
                })
            })
            .collect()
    }

    /// Forward count for a rank vector already aligned with the rows.
    #[inline]
    pub(crate) fn forward_count_ranked(&self, rank: &[usize]) -> usize {
        debug_assert_eq!(rank.len(), self.size());
        let mut total = 0usize;
        for (i, row) in self.adj.iter().enumerate() {
            for (j, &x) in row.iter().enumerate() {
                if x == 1 && rank[i] < rank[j] {
                    total += 1;
                }
            }
        }
        total
    }

    #[inline]
    fn row_of(&self, v: Vertex) -> Result<usize, GraphError> {
        self.vertices
            .iter()
            .position(|&x| x == v)
            .ok_or(GraphError::InvalidVertex(v))
    }

    // ------------------------------------------------------------------------
    // Instance files
    // ------------------------------------------------------------------------

    /// Writes the matrix in instance-file format: `N` on the first line, then `N`
    /// rows of space-separated `0/1` entries. Labels are not written.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_instance<W: Write>(&self, mut w: W) -> io::Result<()> {
        writeln!(w, "{}", self.size())?;
        for row in &self.adj {
            writeln!(w, "{}", join(row, " "))?;
        }
        w.flush()
    }

    /// Saves the matrix to `path` in instance-file format.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or written.
    pub fn save_instance(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let f = File::create(path)?;
        self.write_instance(BufWriter::new(f))
    }
}

impl fmt::Display for MasProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "n = {}", self.size())?;
        writeln!(f, "problem adjacency matrix :")?;
        write!(f, " [")?;
        for (i, row) in self.adj.iter().enumerate() {
            if i > 0 {
                write!(f, "\n  ")?;
            }
            write!(f, "({})", join(row, ", "))?;
        }
        writeln!(f, "]")?;
        write!(f, "vertices : ({})", join(&self.vertices, ", "))
    }
}

/// Renders `items` separated by `sep`.
pub(crate) fn join<T: fmt::Display>(items: &[T], sep: &str) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        out.push_str(&item.to_string());
    }
    out
}

fn check_invariants(adj: &[Vec<u8>], vertices: &[Vertex]) -> Result<(), GraphError> {
    let n = adj.len();
    if vertices.len() != n {
        return Err(GraphError::InvalidMatrix(format!(
            "{} labels for {n} rows",
            vertices.len()
        )));
    }
    for (i, row) in adj.iter().enumerate() {
        if row.len() != n {
            return Err(GraphError::InvalidMatrix(format!(
                "row {i} has length {}, expected {n}",
                row.len()
            )));
        }
        if let Some(j) = row.iter().position(|&x| x > 1) {
            return Err(GraphError::InvalidMatrix(format!(
                "entry ({i}, {j}) is {}, expected 0 or 1",
                row[j]
            )));
        }
        if row[i] != 0 {
            return Err(GraphError::InvalidMatrix(format!("self-loop at row {i}")));
        }
    }
    if position_index(vertices).len() != n {
        return Err(GraphError::InvalidMatrix("duplicate vertex label".to_string()));
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
