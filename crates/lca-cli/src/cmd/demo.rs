//! `lca demo`: walk through LCA queries on two built-in graphs.
//!
//! ```text
//!   tree               dag (A=0 .. E=4)
//!         1            A → B, C, D, E
//!        / \           B → D
//!       2   3          C → D, E
//!      / \ / \         D → E
//!     4  5 6  7
//! ```

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use lca_core::config::DagConfig;
use lca_core::dag::{AdjacencyMatrix, NodeId, find_lca_dag_with};
use lca_core::tree::{TreeId, TreeNode, find_lca};

use crate::output::{OutputMode, join_ids, pretty_section, render_mode};

const TREE_QUERIES: [(TreeId, TreeId); 7] = [(4, 5), (3, 4), (4, 7), (5, 3), (6, 7), (1, 2), (1, 1)];
const DAG_QUERIES: [(NodeId, NodeId); 4] = [(3, 4), (3, 2), (2, 2), (1, 2)];

#[derive(Debug, Serialize)]
struct TreeRow {
    a: TreeId,
    b: TreeId,
    lca: Option<TreeId>,
}

#[derive(Debug, Serialize)]
struct DagRow {
    a: NodeId,
    b: NodeId,
    lcas: Vec<NodeId>,
}

#[derive(Debug, Serialize)]
struct DemoOutput {
    tree: Vec<TreeRow>,
    dag: Vec<DagRow>,
}

fn demo_tree() -> TreeNode {
    TreeNode::leaf(1)
        .with_left(
            TreeNode::leaf(2)
                .with_left(TreeNode::leaf(4))
                .with_right(TreeNode::leaf(5)),
        )
        .with_right(
            TreeNode::leaf(3)
                .with_left(TreeNode::leaf(6))
                .with_right(TreeNode::leaf(7)),
        )
}

fn demo_dag() -> Result<AdjacencyMatrix> {
    Ok(AdjacencyMatrix::from_edges(
        5,
        &[(0, 1), (0, 2), (0, 3), (0, 4), (1, 3), (2, 3), (2, 4), (3, 4)],
    )?)
}

fn collect(dag_config: &DagConfig) -> Result<DemoOutput> {
    let tree = demo_tree();
    let tree_rows = TREE_QUERIES
        .iter()
        .map(|&(a, b)| TreeRow {
            a,
            b,
            lca: find_lca(Some(&tree), a, b),
        })
        .collect();

    let dag = demo_dag()?;
    let mut dag_rows = Vec::with_capacity(DAG_QUERIES.len());
    for (a, b) in DAG_QUERIES {
        let lcas = find_lca_dag_with(&dag, a, b, dag_config)?;
        dag_rows.push(DagRow {
            a,
            b,
            lcas: lcas.into_iter().collect(),
        });
    }

    Ok(DemoOutput {
        tree: tree_rows,
        dag: dag_rows,
    })
}

fn write_rows(v: &DemoOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for row in &v.tree {
        let lca = row.lca.map_or_else(|| "-1".to_string(), |id| id.to_string());
        writeln!(w, "LCA({}, {}) = {lca}", row.a, row.b)?;
    }
    for row in &v.dag {
        writeln!(w, "LCA_DAG({}, {}) = {{{}}}", row.a, row.b, join_ids(&row.lcas))?;
    }
    Ok(())
}

/// Execute `lca demo`.
///
/// # Errors
///
/// Returns an error if writing output fails.
pub fn run_demo(dag_config: &DagConfig, output: OutputMode) -> Result<()> {
    let value = collect(dag_config)?;
    render_mode(output, &value, write_rows, |v, w| {
        pretty_section(w, "Binary tree")?;
        for row in &v.tree {
            let lca = row.lca.map_or_else(|| "not found".to_string(), |id| id.to_string());
            writeln!(w, "  LCA({}, {}) = {lca}", row.a, row.b)?;
        }
        writeln!(w)?;
        pretty_section(w, "DAG")?;
        for row in &v.dag {
            writeln!(w, "  LCA({}, {}) = {}", row.a, row.b, join_ids(&row.lcas))?;
        }
        Ok(())
    })
}
