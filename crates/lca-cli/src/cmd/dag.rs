//! `lca dag` and `lca roots`: queries over a DAG given as an edge list.
//!
//! Nodes are `0..N`; `--edge F:T` adds the edge `F → T` (F is a parent
//! of T).

use std::collections::BTreeSet;
use std::io::Write;

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;
use tracing::{debug, info};

use lca_core::config::{AncestorStrategy, LcaConfig};
use lca_core::dag::{AdjacencyMatrix, NodeId, find_all_roots, find_lca_dag_with};

use super::parse_pair;
use crate::output::{CliError, OutputMode, join_ids, pretty_kv, render_error, render_mode};

/// Graph description shared by the DAG subcommands.
#[derive(Args, Debug, Clone)]
pub struct GraphArgs {
    /// Number of nodes; ids are `0..NODES`.
    #[arg(long)]
    pub nodes: usize,

    /// Edge `FROM:TO` (repeatable).
    #[arg(long = "edge", value_name = "FROM:TO", value_parser = parse_pair::<NodeId>)]
    pub edges: Vec<(NodeId, NodeId)>,
}

impl GraphArgs {
    /// Build the adjacency matrix.
    ///
    /// # Errors
    ///
    /// Returns an error if an edge endpoint is out of range.
    pub fn build(&self) -> Result<AdjacencyMatrix, lca_core::LcaError> {
        AdjacencyMatrix::from_edges(self.nodes, &self.edges)
    }
}

/// CLI spelling of [`AncestorStrategy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    PathEnumeration,
    Reachability,
}

impl From<StrategyArg> for AncestorStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::PathEnumeration => Self::PathEnumeration,
            StrategyArg::Reachability => Self::Reachability,
        }
    }
}

/// Arguments for `lca dag`.
#[derive(Args, Debug)]
pub struct DagArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Ancestor collection strategy (overrides config).
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// First node id.
    pub a: NodeId,

    /// Second node id.
    pub b: NodeId,
}

/// Arguments for `lca roots`.
#[derive(Args, Debug)]
pub struct RootsArgs {
    #[command(flatten)]
    pub graph: GraphArgs,
}

#[derive(Debug, Serialize)]
struct DagLcaOutput {
    a: NodeId,
    b: NodeId,
    lcas: BTreeSet<NodeId>,
}

#[derive(Debug, Serialize)]
struct RootsOutput {
    roots: BTreeSet<NodeId>,
}

fn build_or_report(graph: &GraphArgs, output: OutputMode) -> Result<AdjacencyMatrix> {
    match graph.build() {
        Ok(matrix) => Ok(matrix),
        Err(e) => {
            render_error(output, &CliError::from(&e))?;
            anyhow::bail!("{e}");
        }
    }
}

/// Execute `lca dag`.
///
/// # Errors
///
/// Returns an error if the graph or query is invalid.
pub fn run_dag(args: &DagArgs, config: &LcaConfig, output: OutputMode) -> Result<()> {
    let graph = build_or_report(&args.graph, output)?;

    let mut dag_config = config.dag.clone();
    if let Some(strategy) = args.strategy {
        dag_config.strategy = strategy.into();
    }
    debug!(?dag_config, nodes = graph.len(), edges = graph.edge_count(), "dag built");

    let lcas = match find_lca_dag_with(&graph, args.a, args.b, &dag_config) {
        Ok(lcas) => lcas,
        Err(e) => {
            render_error(output, &CliError::from(&e))?;
            anyhow::bail!("{e}");
        }
    };
    info!(a = args.a, b = args.b, count = lcas.len(), "dag lca computed");

    let value = DagLcaOutput {
        a: args.a,
        b: args.b,
        lcas,
    };
    render_mode(
        output,
        &value,
        |v, w| writeln!(w, "{}", join_ids(&v.lcas).replace(", ", " ")),
        |v, w| pretty_kv(w, &format!("LCA({}, {})", v.a, v.b), join_ids(&v.lcas)),
    )
}

/// Execute `lca roots`.
///
/// # Errors
///
/// Returns an error if an edge endpoint is out of range.
pub fn run_roots(args: &RootsArgs, output: OutputMode) -> Result<()> {
    let graph = build_or_report(&args.graph, output)?;
    let value = RootsOutput {
        roots: find_all_roots(&graph),
    };
    render_mode(
        output,
        &value,
        |v, w| writeln!(w, "{}", join_ids(&v.roots).replace(", ", " ")),
        |v, w| pretty_kv(w, "roots", join_ids(&v.roots)),
    )
}
