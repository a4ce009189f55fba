//! Lowest Common Ancestor sets for multi-rooted DAGs.
//!
//! # Algorithm
//!
//! 1. Discover every root (in-degree zero).
//! 2. For each query node, collect its ancestors: every node lying on
//!    some directed path from some root to the query node, excluding the
//!    query node itself. A node with no such ancestors (a root, or an
//!    isolated node) stands in as its own sole ancestor.
//! 3. Intersect the two ancestor sets.
//! 4. Keep the members of the intersection that have no outgoing edge to
//!    another member: the sinks of the induced subgraph.
//!
//! The result may be empty (the nodes share no ancestor) or hold several
//! incomparable nodes (diamonds and criss-cross merges).
//!
//! # Ancestor strategies
//!
//! [`AncestorStrategy::PathEnumeration`] walks every distinct path from
//! each root, which is exponential on dense graphs.
//! [`AncestorStrategy::Reachability`] visits each node once per root and
//! yields the same sets.

use std::collections::BTreeSet;

use fixedbitset::FixedBitSet;
use tracing::{debug, instrument, trace, warn};

use super::graph::{AdjacencyMatrix, NodeId};
use crate::config::{AncestorStrategy, DagConfig};
use crate::error::LcaError;

/// Return every node with no incoming edge.
///
/// Empty only for a graph with no nodes.
#[must_use]
pub fn find_all_roots(graph: &AdjacencyMatrix) -> BTreeSet<NodeId> {
    (0..graph.len())
        .filter(|&node| graph.parents(node).next().is_none())
        .collect()
}

/// Collect every node on every path from `origin` to `target`.
///
/// `target` itself is never collected, so `origin == target` yields an
/// empty set. All outgoing edges of every visited node are explored.
#[must_use]
pub fn collect_ancestors_on_path(
    graph: &AdjacencyMatrix,
    origin: NodeId,
    target: NodeId,
) -> BTreeSet<NodeId> {
    let mut path = Vec::new();
    let mut ancestors = BTreeSet::new();
    walk_paths(graph, origin, target, &mut path, &mut ancestors);
    ancestors
}

fn walk_paths(
    graph: &AdjacencyMatrix,
    node: NodeId,
    target: NodeId,
    path: &mut Vec<NodeId>,
    ancestors: &mut BTreeSet<NodeId>,
) {
    if node == target {
        trace!(?path, target, "path reached target");
        ancestors.extend(path.iter().copied());
        return;
    }

    path.push(node);
    for child in graph.children(node) {
        walk_paths(graph, child, target, path, ancestors);
    }
    path.pop();
}

/// Same result as [`collect_ancestors_on_path`], visiting each node once.
///
/// A node is collected iff it is reachable from `origin` and `target` is
/// reachable from it through at least one edge.
#[must_use]
pub fn collect_ancestors_reachable(
    graph: &AdjacencyMatrix,
    origin: NodeId,
    target: NodeId,
) -> BTreeSet<NodeId> {
    let mut walk = ReachWalk {
        graph,
        target,
        visited: FixedBitSet::with_capacity(graph.len()),
        reaches: FixedBitSet::with_capacity(graph.len()),
    };
    if origin < graph.len() {
        walk.visit(origin);
    }
    walk.reaches.ones().collect()
}

struct ReachWalk<'a> {
    graph: &'a AdjacencyMatrix,
    target: NodeId,
    visited: FixedBitSet,
    /// Nodes with a non-empty path to `target`.
    reaches: FixedBitSet,
}

impl ReachWalk<'_> {
    fn visit(&mut self, node: NodeId) -> bool {
        if node == self.target {
            return true;
        }
        if self.visited.put(node) {
            return self.reaches.contains(node);
        }

        let mut reaches = false;
        for child in self.graph.children(node) {
            // Every child is visited; short-circuiting would skip siblings.
            reaches |= self.visit(child);
        }
        self.reaches.set(node, reaches);
        reaches
    }
}

/// Union of the ancestors of `node` with respect to every root in `roots`.
///
/// Falls back to `{node}` when no root has a non-empty path to `node`.
#[must_use]
pub fn ancestors_of(
    graph: &AdjacencyMatrix,
    roots: &BTreeSet<NodeId>,
    node: NodeId,
    strategy: AncestorStrategy,
) -> BTreeSet<NodeId> {
    let collect: fn(&AdjacencyMatrix, NodeId, NodeId) -> BTreeSet<NodeId> = match strategy {
        AncestorStrategy::PathEnumeration => collect_ancestors_on_path,
        AncestorStrategy::Reachability => collect_ancestors_reachable,
    };

    let mut ancestors = BTreeSet::new();
    for &root in roots {
        ancestors.extend(collect(graph, root, node));
    }

    if ancestors.is_empty() {
        if !roots.contains(&node) {
            warn!(node, "node unreachable from every root; using itself as ancestor");
        }
        ancestors.insert(node);
    }

    debug!(node, ?ancestors, "ancestors collected");
    ancestors
}

/// Members of `set` with no outgoing edge to another member of `set`.
#[must_use]
pub fn induced_sinks(graph: &AdjacencyMatrix, set: &BTreeSet<NodeId>) -> BTreeSet<NodeId> {
    set.iter()
        .copied()
        .filter(|&x| !set.iter().any(|&y| y != x && graph.has_edge(x, y)))
        .collect()
}

/// Find the LCA set of `a` and `b` with the default [`DagConfig`].
///
/// # Errors
///
/// See [`find_lca_dag_with`].
pub fn find_lca_dag(
    graph: &AdjacencyMatrix,
    a: NodeId,
    b: NodeId,
) -> Result<BTreeSet<NodeId>, LcaError> {
    find_lca_dag_with(graph, a, b, &DagConfig::default())
}

/// Find the LCA set of `a` and `b`.
///
/// Returns the sinks of the subgraph induced by the common ancestors of
/// `a` and `b`. An empty set means the nodes share no ancestor.
///
/// # Errors
///
/// - [`LcaError::NodeOutOfRange`] if `a` or `b` is not a node.
/// - [`LcaError::CycleDetected`] if `config.check_acyclic` is set and the
///   graph has a cycle. With the check disabled, cyclic input is undefined
///   behavior for the path-enumeration strategy.
#[instrument(skip(graph, config), fields(nodes = graph.len(), strategy = ?config.strategy))]
pub fn find_lca_dag_with(
    graph: &AdjacencyMatrix,
    a: NodeId,
    b: NodeId,
    config: &DagConfig,
) -> Result<BTreeSet<NodeId>, LcaError> {
    graph.check_node(a)?;
    graph.check_node(b)?;
    if config.check_acyclic {
        if let Some(node) = graph.find_cycle() {
            return Err(LcaError::CycleDetected { node });
        }
    }

    let roots = find_all_roots(graph);
    debug!(?roots, "roots discovered");

    let parents_a = ancestors_of(graph, &roots, a, config.strategy);
    let parents_b = ancestors_of(graph, &roots, b, config.strategy);
    let common: BTreeSet<NodeId> = parents_a.intersection(&parents_b).copied().collect();

    let lcas = induced_sinks(graph, &common);
    debug!(?common, ?lcas, "lowest common ancestors");
    Ok(lcas)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[NodeId]) -> BTreeSet<NodeId> {
        ids.iter().copied().collect()
    }

    // A → {B, C, D, E}, B → D, C → {D, E}, D → E
    fn five() -> AdjacencyMatrix {
        AdjacencyMatrix::from_edges(
            5,
            &[(0, 1), (0, 2), (0, 3), (0, 4), (1, 3), (2, 3), (2, 4), (3, 4)],
        )
        .unwrap()
    }

    //   0     1
    //   |\   /|
    //   | \ / |
    //   |  X  |
    //   | / \ |
    //   2     3
    //   |\   /|
    //   | \ / |
    //   |  X  |
    //   | / \ |
    //   4     5
    fn double_diamond() -> AdjacencyMatrix {
        AdjacencyMatrix::from_edges(
            6,
            &[(0, 2), (0, 3), (1, 2), (1, 3), (2, 4), (2, 5), (3, 4), (3, 5)],
        )
        .unwrap()
    }

    #[test]
    fn roots_of_empty_graph() {
        assert!(find_all_roots(&AdjacencyMatrix::new(0)).is_empty());
    }

    #[test]
    fn isolated_nodes_are_roots() {
        let g = AdjacencyMatrix::from_edges(4, &[(0, 1)]).unwrap();
        assert_eq!(find_all_roots(&g), set(&[0, 2, 3]));
    }

    #[test]
    fn path_ancestors_exclude_target() {
        let g = five();
        assert_eq!(collect_ancestors_on_path(&g, 0, 3), set(&[0, 1, 2]));
        assert_eq!(collect_ancestors_on_path(&g, 0, 4), set(&[0, 1, 2, 3]));
        assert_eq!(collect_ancestors_on_path(&g, 2, 4), set(&[2, 3]));
    }

    #[test]
    fn origin_equal_to_target_collects_nothing() {
        assert!(collect_ancestors_on_path(&five(), 0, 0).is_empty());
        assert!(collect_ancestors_reachable(&five(), 0, 0).is_empty());
    }

    #[test]
    fn unreachable_target_collects_nothing() {
        assert!(collect_ancestors_on_path(&five(), 3, 1).is_empty());
        assert!(collect_ancestors_reachable(&five(), 3, 1).is_empty());
    }

    #[test]
    fn strategies_agree_on_fixtures() {
        for g in [five(), double_diamond()] {
            for origin in 0..g.len() {
                for target in 0..g.len() {
                    assert_eq!(
                        collect_ancestors_on_path(&g, origin, target),
                        collect_ancestors_reachable(&g, origin, target),
                        "origin={origin} target={target}"
                    );
                }
            }
        }
    }

    #[test]
    fn root_falls_back_to_itself() {
        let g = five();
        let roots = find_all_roots(&g);
        assert_eq!(
            ancestors_of(&g, &roots, 0, AncestorStrategy::PathEnumeration),
            set(&[0])
        );
    }

    #[test]
    fn induced_sinks_ignore_edges_leaving_the_set() {
        let g = five();
        // 1 → 3 leaves the set, 0 → 1 and 0 → 2 stay inside.
        assert_eq!(induced_sinks(&g, &set(&[0, 1, 2])), set(&[1, 2]));
        assert!(induced_sinks(&g, &BTreeSet::new()).is_empty());
    }

    #[test]
    fn five_node_fixture() {
        let g = five();
        assert_eq!(find_lca_dag(&g, 3, 4).unwrap(), set(&[1, 2]));
        assert_eq!(find_lca_dag(&g, 3, 2).unwrap(), set(&[0]));
        assert_eq!(find_lca_dag(&g, 2, 2).unwrap(), set(&[0]));
    }

    #[test]
    fn self_query_yields_parent_sinks() {
        let g = five();
        assert_eq!(find_lca_dag(&g, 3, 3).unwrap(), set(&[1, 2]));
        assert_eq!(find_lca_dag(&g, 4, 4).unwrap(), set(&[3]));
        assert_eq!(find_lca_dag(&g, 0, 0).unwrap(), set(&[0]));
    }

    #[test]
    fn root_paired_with_descendant() {
        let g = five();
        assert_eq!(find_lca_dag(&g, 0, 4).unwrap(), set(&[0]));
    }

    #[test]
    fn multiple_lcas_below_separate_roots() {
        let g = double_diamond();
        assert_eq!(find_lca_dag(&g, 4, 5).unwrap(), set(&[2, 3]));
        assert_eq!(find_lca_dag(&g, 2, 3).unwrap(), set(&[0, 1]));
        assert!(find_lca_dag(&g, 0, 1).unwrap().is_empty());
    }

    #[test]
    fn reachability_strategy_matches() {
        let config = DagConfig {
            strategy: AncestorStrategy::Reachability,
            ..DagConfig::default()
        };
        let g = double_diamond();
        for a in 0..g.len() {
            for b in 0..g.len() {
                assert_eq!(
                    find_lca_dag_with(&g, a, b, &config).unwrap(),
                    find_lca_dag(&g, a, b).unwrap(),
                    "a={a} b={b}"
                );
            }
        }
    }

    #[test]
    fn out_of_range_query_is_rejected() {
        let err = find_lca_dag(&five(), 1, 5).unwrap_err();
        assert_eq!(err, LcaError::NodeOutOfRange { node: 5, len: 5 });
    }

    #[test]
    fn cyclic_graph_is_rejected() {
        let g = AdjacencyMatrix::from_edges(3, &[(0, 1), (1, 2), (2, 1)]).unwrap();
        let err = find_lca_dag(&g, 1, 2).unwrap_err();
        assert!(matches!(err, LcaError::CycleDetected { .. }));
    }

    #[test]
    fn reachability_terminates_on_cycles_without_check() {
        let config = DagConfig {
            strategy: AncestorStrategy::Reachability,
            check_acyclic: false,
        };
        let g = AdjacencyMatrix::from_edges(3, &[(0, 1), (1, 2), (2, 1)]).unwrap();
        assert!(find_lca_dag_with(&g, 1, 2, &config).is_ok());
    }
}
