//! Dense adjacency-matrix DAG representation.
//!
//! Node identifiers are zero-based indices: node `i` is row and column
//! `i` of the matrix, and `has_edge(i, j)` means `i` is a direct parent
//! of `j`. Each row is a [`FixedBitSet`] of the row node's children.
//!
//! # Invariants
//!
//! - The matrix is square. Constructors enforce this.
//! - The graph is acyclic. This is **not** enforced on construction;
//!   use [`AdjacencyMatrix::find_cycle`] to check before traversal.

use fixedbitset::FixedBitSet;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::error::LcaError;

/// Identifier of a DAG node; also its row/column index.
pub type NodeId = usize;

// ---------------------------------------------------------------------------
// AdjacencyMatrix
// ---------------------------------------------------------------------------

/// A square boolean adjacency matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    rows: Vec<FixedBitSet>,
}

impl AdjacencyMatrix {
    /// A graph of `n` nodes and no edges.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            rows: (0..n).map(|_| FixedBitSet::with_capacity(n)).collect(),
        }
    }

    /// Build from explicit boolean rows.
    ///
    /// # Errors
    ///
    /// Returns [`LcaError::NonSquareMatrix`] if any row length differs
    /// from the number of rows.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, LcaError> {
        let n = rows.len();
        let mut matrix = Self::new(n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(LcaError::NonSquareMatrix {
                    row: i,
                    len: row.len(),
                    expected: n,
                });
            }
            for (j, edge) in row.into_iter().enumerate() {
                matrix.rows[i].set(j, edge);
            }
        }
        Ok(matrix)
    }

    /// Build a graph of `n` nodes from `(parent, child)` pairs.
    ///
    /// Duplicate edges collapse into one.
    ///
    /// # Errors
    ///
    /// Returns [`LcaError::NodeOutOfRange`] if an endpoint is `>= n`.
    pub fn from_edges(n: usize, edges: &[(NodeId, NodeId)]) -> Result<Self, LcaError> {
        let mut matrix = Self::new(n);
        for &(from, to) in edges {
            matrix.add_edge(from, to)?;
        }
        Ok(matrix)
    }

    /// Add the edge `from → to`.
    ///
    /// # Errors
    ///
    /// Returns [`LcaError::NodeOutOfRange`] if an endpoint is out of range.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> Result<(), LcaError> {
        self.check_node(from)?;
        self.check_node(to)?;
        self.rows[from].insert(to);
        Ok(())
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns `true` if `from → to` is an edge. Out-of-range ids have no edges.
    #[must_use]
    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.rows.get(from).is_some_and(|row| row.contains(to))
    }

    /// Direct children of `node`, ascending.
    pub fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.rows.get(node).into_iter().flat_map(FixedBitSet::ones)
    }

    /// Direct parents of `node`, ascending.
    pub fn parents(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter(move |(_, row)| row.contains(node))
            .map(|(i, _)| i)
    }

    /// Number of edges into `node`.
    #[must_use]
    pub fn in_degree(&self, node: NodeId) -> usize {
        self.parents(node).count()
    }

    /// Number of edges out of `node`.
    #[must_use]
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.rows.get(node).map_or(0, |row| row.count_ones(..))
    }

    /// Total number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.rows.iter().map(|row| row.count_ones(..)).sum()
    }

    /// Validate that `node` indexes into the matrix.
    ///
    /// # Errors
    ///
    /// Returns [`LcaError::NodeOutOfRange`] if `node >= len()`.
    pub fn check_node(&self, node: NodeId) -> Result<(), LcaError> {
        if node < self.len() {
            Ok(())
        } else {
            Err(LcaError::NodeOutOfRange {
                node,
                len: self.len(),
            })
        }
    }

    /// Convert to a petgraph [`DiGraph`] whose node weights are the ids.
    #[must_use]
    pub fn to_digraph(&self) -> DiGraph<NodeId, ()> {
        let mut graph = DiGraph::with_capacity(self.len(), self.edge_count());
        for id in 0..self.len() {
            graph.add_node(id);
        }
        for (from, row) in self.rows.iter().enumerate() {
            for to in row.ones() {
                graph.add_edge(NodeIndex::new(from), NodeIndex::new(to), ());
            }
        }
        graph
    }

    /// Return a node that lies on a cycle, or `None` if the graph is a DAG.
    ///
    /// Self-loops count as cycles.
    #[must_use]
    pub fn find_cycle(&self) -> Option<NodeId> {
        toposort(&self.to_digraph(), None)
            .err()
            .map(|cycle| cycle.node_id().index())
    }
}

impl<N, E> From<&DiGraph<N, E>> for AdjacencyMatrix {
    /// Node `NodeIndex(i)` becomes identifier `i`; parallel edges collapse.
    fn from(graph: &DiGraph<N, E>) -> Self {
        let mut matrix = Self::new(graph.node_count());
        for edge in graph.edge_references() {
            matrix.rows[edge.source().index()].insert(edge.target().index());
        }
        matrix
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
