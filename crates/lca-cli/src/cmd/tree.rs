//! `lca tree`: LCA and root-to-node paths in a binary tree.
//!
//! The tree is given as a root id plus `--left P:C` / `--right P:C`
//! links. Omitting `--root` queries the empty tree.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::io::Write;
use tracing::debug;

use lca_core::error::ErrorCode;
use lca_core::tree::{Side, TreeBuilder, TreeId, TreeNode, find_lca, path_to};

use super::parse_pair;
use crate::output::{CliError, OutputMode, join_ids, pretty_kv, pretty_section, render_error, render_mode};

/// Arguments for `lca tree`.
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Root node id. Without it the tree is empty.
    #[arg(long, allow_negative_numbers = true)]
    pub root: Option<TreeId>,

    /// Left-child link `PARENT:CHILD` (repeatable).
    #[arg(long = "left", value_name = "PARENT:CHILD", allow_hyphen_values = true, value_parser = parse_pair::<TreeId>)]
    pub left: Vec<(TreeId, TreeId)>,

    /// Right-child link `PARENT:CHILD` (repeatable).
    #[arg(long = "right", value_name = "PARENT:CHILD", allow_hyphen_values = true, value_parser = parse_pair::<TreeId>)]
    pub right: Vec<(TreeId, TreeId)>,

    /// Print the root-to-node path of the first id instead of the LCA.
    #[arg(long)]
    pub path: bool,

    /// First node id.
    #[arg(allow_negative_numbers = true)]
    pub a: TreeId,

    /// Second node id (required unless `--path`).
    #[arg(allow_negative_numbers = true, required_unless_present = "path")]
    pub b: Option<TreeId>,
}

#[derive(Debug, Serialize)]
struct LcaOutput {
    a: TreeId,
    b: TreeId,
    lca: TreeId,
}

#[derive(Debug, Serialize)]
struct PathOutput {
    target: TreeId,
    path: Vec<TreeId>,
}

/// Assemble the tree described by `args`.
///
/// # Errors
///
/// Returns an error if the links do not form a single binary tree.
pub fn build_tree(args: &TreeArgs) -> Result<Option<TreeNode>, lca_core::LcaError> {
    let mut builder = args.root.map_or_else(TreeBuilder::empty, TreeBuilder::new);
    for &(parent, child) in &args.left {
        builder.link(parent, child, Side::Left)?;
    }
    for &(parent, child) in &args.right {
        builder.link(parent, child, Side::Right)?;
    }
    builder.build()
}

/// Execute `lca tree`.
///
/// # Errors
///
/// Returns an error if the tree is malformed or a queried node is absent.
pub fn run_tree(args: &TreeArgs, output: OutputMode) -> Result<()> {
    let tree = match build_tree(args) {
        Ok(tree) => tree,
        Err(e) => {
            render_error(output, &CliError::from(&e))?;
            anyhow::bail!("{e}");
        }
    };
    debug!(nodes = tree.as_ref().map_or(0, TreeNode::len), "tree built");

    if args.path {
        let Some(path) = path_to(tree.as_ref(), args.a) else {
            return not_found(output, &format!("node {} is not in the tree", args.a));
        };
        let value = PathOutput {
            target: args.a,
            path,
        };
        return render_mode(
            output,
            &value,
            |v, w| writeln!(w, "{}", join_ids(&v.path).replace(", ", " ")),
            |v, w| {
                pretty_section(w, &format!("Path to {}", v.target))?;
                pretty_kv(w, "path", join_ids(&v.path).replace(", ", " -> "))
            },
        );
    }

    // clap enforces `b` when `--path` is absent.
    let b = args.b.unwrap_or(args.a);
    let Some(lca) = find_lca(tree.as_ref(), args.a, b) else {
        return not_found(
            output,
            &format!("nodes {} and {b} have no common ancestor in the tree", args.a),
        );
    };

    let value = LcaOutput { a: args.a, b, lca };
    render_mode(
        output,
        &value,
        |v, w| writeln!(w, "{}", v.lca),
        |v, w| pretty_kv(w, &format!("LCA({}, {})", v.a, v.b), v.lca.to_string()),
    )
}

fn not_found(output: OutputMode, message: &str) -> Result<()> {
    render_error(output, &CliError::from_code(ErrorCode::NodeNotFound, message))?;
    anyhow::bail!("{message}")
}
