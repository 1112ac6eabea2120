//! # Exact Maximum Acyclic Subgraph Solver
//!
//! Ground-truth solver for small instances of the Maximum Acyclic Subgraph (MAS) problem:
//! given a directed graph, find a linear ordering of its vertices that maximizes the number
//! of edges pointing forward. Equivalently, minimize the feedback arc set.
//!
//! This crate provides:
//! - A labelled adjacency-matrix graph ([`graph::MasProblem`]) with value-semantics vertex
//!   removal and forward-edge scoring.
//! - An exhaustive depth-first ordering search ([`search`]), sequential or split across
//!   top-level branches with rayon.
//! - An instance-file validator and loader ([`validate`]).
//! - A benchmark generator producing graphs with a known optimal ranking ([`generate`]).
//!
//! ## Quick Start
//!
//! ```
//! use mas::graph::MasProblem;
//! use mas::search::solve_exhaustive;
//!
//! // 1 -> 2 -> 3 -> 4 -> 1
//! let problem = MasProblem::new(vec![
//!     vec![0, 1, 0, 0],
//!     vec![0, 0, 1, 0],
//!     vec![0, 0, 0, 1],
//!     vec![1, 0, 0, 0],
//! ]);
//!
//! let best = solve_exhaustive(&problem).unwrap();
//! assert_eq!(best.score, 3);
//! assert_eq!(best.ordering, vec![1, 2, 3, 4]);
//! ```
//!
//! ## Validating Instance Files
//!
//! ```
//! use mas::validate::diagnose;
//!
//! assert_eq!(diagnose("2\n0 1\n0 0\n"), "instance ok");
//! assert_eq!(diagnose("3\n0 1 0\n0 1\n0 0 0\n"), "Line 3 must contain N integers.");
//! ```
//!
//! ## Performance Notes
//!
//! - The search visits all n! orderings with no pruning; it is meant for n in the single
//!   digits to low teens. [`search::solve`] enforces a configurable vertex bound.
//! - Each recursion level owns one reduced copy of the graph, so live memory is O(n³).

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::needless_range_loop)] // Often clearer for matrix indexing
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod generate;
pub mod graph;
pub mod search;
pub mod validate;

/// Re-export commonly used types for convenience.
pub mod prelude {
    pub use crate::error::{GraphError, InstanceError, SearchError};
    pub use crate::generate::{generate_ranked_instance, random_problem, RankedInstance};
    pub use crate::graph::{position_index, MasProblem, Vertex};
    pub use crate::search::{
        solve, solve_exhaustive, solve_exhaustive_parallel, MasSolution, SearchConfig,
    };
    pub use crate::validate::{diagnose, validate_instance, validate_instance_file};
}
