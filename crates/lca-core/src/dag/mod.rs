//! Multi-rooted DAG model and set-valued LCA.
//!
//! In a DAG the "lowest common ancestor" of two nodes is a *set*: the
//! sinks of the subgraph induced by their common ancestors. A queried
//! node is never its own ancestor here, unlike the tree model in
//! [`crate::tree`]; a node with no ancestors falls back to `{itself}`.
//!
//! # Sub-modules
//!
//! - [`graph`]: The square boolean [`AdjacencyMatrix`] and its
//!   conversions to and from petgraph.
//! - [`lca`]: Root discovery, ancestor collection, intersection and sink
//!   extraction. ([`find_all_roots`], [`find_lca_dag`])

pub mod graph;
pub mod lca;

pub use graph::{AdjacencyMatrix, NodeId};
pub use lca::{
    ancestors_of, collect_ancestors_on_path, collect_ancestors_reachable, find_all_roots,
    find_lca_dag, find_lca_dag_with, induced_sinks,
};
